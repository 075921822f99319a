#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod NEQEuler;

use Examples::neq_examples::neq_examples;

pub fn main() {
    //
    let task: usize = 0;
    neq_examples(task);
}
