//! Worked examples for the nonequilibrium Euler conservative variable set.

use crate::NEQEuler::chem_library::{
    ChemLibrary, IdealMixtureLibrary, R_UNIVERSAL, SpeciesRecord,
};
use crate::NEQEuler::physical_data::PhysicalData;
use crate::NEQEuler::var_set::{Euler2DNEQ, Workspace};
use log::info;
use nalgebra::{DMatrix, DVector, Vector2};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn init_logging() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

fn nitrogen_library() -> ChemLibrary {
    let species = vec![
        SpeciesRecord {
            name: "N2".to_string(),
            molar_mass: 0.0280134,
            is_molecule: true,
            is_electron: false,
            enthalpy_form: 0.0,
        },
        SpeciesRecord {
            name: "N".to_string(),
            molar_mass: 0.0140067,
            is_molecule: false,
            is_electron: false,
            enthalpy_form: 3.3747e7,
        },
    ];
    ChemLibrary::IdealMixture(IdealMixtureLibrary::new(species, 1200.0).unwrap())
}

fn nitrogen_state(model: &Euler2DNEQ, rhos: [f64; 2], u: f64, v: f64, t: f64, ev: f64)
-> DVector<f64> {
    let rho = rhos[0] + rhos[1];
    let y0 = rhos[0] / rho;
    let y1 = rhos[1] / rho;
    let cv = y0 * 2.5 * R_UNIVERSAL / 0.0280134 + y1 * 1.5 * R_UNIVERSAL / 0.0140067;
    let form = y1 * 3.3747e7;

    let mut state = DVector::zeros(model.nb_eqs());
    state[0] = rhos[0];
    state[1] = rhos[1];
    state[2] = rho * u;
    state[3] = rho * v;
    state[4] = rho * (cv * t + form + ev + 0.5 * (u * u + v * v));
    state[5] = rho * ev;
    state
}

/// Physical data and eigensystem of a partially dissociated nitrogen flow.
pub fn physical_data_example() {
    init_logging();
    let model = Euler2DNEQ::new(nitrogen_library(), 1, 0.0).unwrap();
    let mut ws = Workspace::new(&model);
    let mut data = PhysicalData::new(model.nb_species());

    let state = nitrogen_state(&model, [0.75, 0.25], 870.0, -340.0, 6100.0, 3.1e5);
    model.compute_physical_data(&state, &mut data);
    data.pretty_print();

    let normal = Vector2::new(0.6, 0.8);
    model.compute_eigen_values_vectors(&data, &normal, &mut ws);
    let n = model.nb_eqs();
    let deviation = (&ws.right_ev * &ws.left_ev - DMatrix::identity(n, n)).norm();
    info!("||R*L - I|| = {:.3e}", deviation);
    info!("eigenvalues: {}", ws.e_values.transpose());
}

/// Flux-vector splitting with and without the carbuncle cure.
pub fn split_jacobian_example() {
    init_logging();
    for jacob_dissip in [0.0, 0.1] {
        let model = Euler2DNEQ::new(nitrogen_library(), 1, jacob_dissip).unwrap();
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());

        let state = nitrogen_state(&model, [0.8, 0.2], 420.0, 0.0, 5000.0, 2.0e5);
        model.compute_physical_data(&state, &mut data);
        model.split_jacobian(&data, &Vector2::new(1.0, 0.0), &mut ws);
        info!(
            "j = {}: trace(A+) = {:.4e}, trace(A-) = {:.4e}",
            jacob_dissip,
            ws.jacob_plus.trace(),
            ws.jacob_minus.trace()
        );
    }
}

pub fn neq_examples(task: usize) {
    match task {
        0 => physical_data_example(),
        1 => split_jacobian_example(),
        _ => println!("no such example"),
    }
}
