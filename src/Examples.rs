/// worked examples for the nonequilibrium Euler variable set
pub mod neq_examples;
