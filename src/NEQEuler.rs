//! Conservative variable set for the 2D Euler equations of a multi-species
//! gas mixture in thermochemical nonequilibrium: state-to-physical-data
//! mapping, analytic eigen-decomposition of the directional flux Jacobian,
//! flux-vector splitting and state admissibility checks.

/// property library interface and the bundled ideal-mixture implementation
pub mod chem_library;
/// tabular diagnostics of physical data
pub mod diagnostics;
/// analytic eigensystem of the directional flux Jacobian
/// # Example
/// ```
/// use NeqEuler::NEQEuler::chem_library::{ChemLibrary, IdealMixtureLibrary, SpeciesRecord};
/// use NeqEuler::NEQEuler::physical_data::PhysicalData;
/// use NeqEuler::NEQEuler::var_set::{Euler2DNEQ, Workspace};
/// use nalgebra::{DMatrix, DVector, Vector2};
///
/// // monatomic argon, no vibrational mode
/// let argon = SpeciesRecord {
///     name: "Ar".to_string(),
///     molar_mass: 0.039948,
///     is_molecule: false,
///     is_electron: false,
///     enthalpy_form: 0.0,
/// };
/// let lib = IdealMixtureLibrary::new(vec![argon], 1000.0).unwrap();
/// let model = Euler2DNEQ::new(ChemLibrary::IdealMixture(lib), 0, 0.0).unwrap();
/// let mut ws = Workspace::new(&model);
/// let mut data = PhysicalData::new(model.nb_species());
///
/// // gas at rest, T = 300 K
/// let r = 8.314462618 / 0.039948;
/// let mut state = DVector::zeros(model.nb_eqs());
/// state[0] = 1.0;
/// state[3] = 1.5 * r * 300.0;
/// model.compute_physical_data(&state, &mut data);
/// assert!((data.p - r * 300.0).abs() < 1e-6 * data.p);
///
/// model.compute_eigen_values_vectors(&data, &Vector2::new(1.0, 0.0), &mut ws);
/// let product = &ws.right_ev * &ws.left_ev;
/// assert!((product - DMatrix::identity(4, 4)).norm() < 1e-9);
/// ```
pub mod eigensystem;
/// tests for the eigensystem builder
pub mod eigensystem_tests;
/// flux-vector splitting and the closed-form projected Jacobian
pub mod jacobian;
/// conservative state <-> extended physical data mapping
pub mod physical_data;
/// admissibility check of conservative states
pub mod validity;
/// the variable set struct, its thermo-closure cache and per-thread scratch
pub mod var_set;
