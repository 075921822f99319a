//! Conservative variable set for the 2D thermochemical-nonequilibrium Euler
//! equations: [rho_0 .. rho_{N-1}, rhoU, rhoV, rhoE, (rhoEv0)].
//!
//! [`Euler2DNEQ`] owns the read-only thermo-closure cache (specific gas
//! constants, molar masses, degrees-of-freedom coefficients) fetched once
//! from the property library. All mutable scratch lives in [`Workspace`],
//! so one model instance can be shared across threads as long as every
//! thread brings its own workspace.

use super::chem_library::{
    ChemLibrary, ChemicalLibrary, IdealMixtureLibrary, LibraryError, SpeciesRecord,
    dof_coefficient,
};
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeqError {
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("setup error: {0}")]
    SetupError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("property library error: {0}")]
    LibraryError(#[from] LibraryError),
}

/// 2D conservative variable set for a mixture in thermochemical
/// nonequilibrium, with an optional lumped vibrational-energy equation.
#[derive(Debug, Clone)]
pub struct Euler2DNEQ {
    pub(crate) library: ChemLibrary,
    pub(crate) nb_species: usize,
    /// number of lumped vibrational-energy equations, 0 or 1
    pub(crate) nb_tv: usize,
    /// artificial-dissipation coefficient of the eigenvalue split
    pub(crate) jacob_dissip: f64,
    /// mixture gas constant
    pub(crate) rgas: f64,
    /// specific gas constants R_i
    pub(crate) ri_gas: DVector<f64>,
    /// molar masses M_i
    pub(crate) mmasses: DVector<f64>,
    /// degrees-of-freedom coefficients f_i
    pub(crate) fcoeff: DVector<f64>,
    /// formation enthalpies h_form,i
    pub(crate) hform: DVector<f64>,
    pub(crate) has_electron: bool,
    var_names: Vec<String>,
}

impl Euler2DNEQ {
    /// Builds the variable set and its thermo-closure cache from the given
    /// property library. `nb_tv` switches the vibrational-energy equation
    /// on (1) or off (0).
    pub fn new(library: ChemLibrary, nb_tv: usize, jacob_dissip: f64) -> Result<Self, NeqError> {
        let nb_species = library.nb_species();
        if nb_species == 0 {
            return Err(NeqError::SetupError("property library holds no species".to_string()));
        }
        if nb_tv > 1 {
            return Err(NeqError::SetupError(format!(
                "at most one lumped vibrational equation is supported, got {}",
                nb_tv
            )));
        }
        if jacob_dissip < 0.0 {
            return Err(NeqError::SetupError(format!(
                "dissipation coefficient must be non-negative, got {}",
                jacob_dissip
            )));
        }

        let rgas = library.rgas();
        let mut ri_gas = DVector::zeros(nb_species);
        library.set_species_gas_constants(&mut ri_gas);
        let mut mmasses = DVector::zeros(nb_species);
        library.set_molar_masses(&mut mmasses);
        let mut hform = DVector::zeros(nb_species);
        library.set_enthalpy_form(&mut hform);

        let mut is_molecule = vec![false; nb_species];
        for id in library.molecule_ids() {
            if id >= nb_species {
                return Err(NeqError::SetupError(format!(
                    "molecule index {} out of range for {} species",
                    id, nb_species
                )));
            }
            is_molecule[id] = true;
        }
        let fcoeff =
            DVector::from_iterator(nb_species, is_molecule.iter().map(|&m| dof_coefficient(m)));

        let has_electron = library.presence_electron();

        let mut var_names = Vec::with_capacity(nb_species + 3 + nb_tv);
        for ie in 0..nb_species {
            var_names.push(format!("rho{}", ie));
        }
        var_names.push("rhoU".to_string());
        var_names.push("rhoV".to_string());
        var_names.push("rhoE".to_string());
        for ie in 0..nb_tv {
            var_names.push(format!("rhoEv{}", ie));
        }

        Ok(Self {
            library,
            nb_species,
            nb_tv,
            jacob_dissip,
            rgas,
            ri_gas,
            mmasses,
            fcoeff,
            hform,
            has_electron,
            var_names,
        })
    }

    /// Convenience setup from a raw species table through the bundled
    /// ideal-mixture library. Table validation failures surface as
    /// [`NeqError::LibraryError`].
    pub fn from_species_table(
        species: Vec<SpeciesRecord>,
        cv_vib: f64,
        nb_tv: usize,
        jacob_dissip: f64,
    ) -> Result<Self, NeqError> {
        let lib = IdealMixtureLibrary::new(species, cv_vib)?;
        Self::new(ChemLibrary::IdealMixture(lib), nb_tv, jacob_dissip)
    }

    pub fn nb_species(&self) -> usize {
        self.nb_species
    }

    pub fn nb_tv(&self) -> usize {
        self.nb_tv
    }

    /// total number of equations: N species + 2 momentum + 1 energy
    /// (+ 1 vibrational)
    pub fn nb_eqs(&self) -> usize {
        self.nb_species + 3 + self.nb_tv
    }

    pub fn jacob_dissip(&self) -> f64 {
        self.jacob_dissip
    }

    pub fn library(&self) -> &ChemLibrary {
        &self.library
    }

    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// extra post-processing variables exposed next to the state
    pub fn extra_var_names(&self) -> Vec<String> {
        vec!["rho".to_string(), "H".to_string(), "M".to_string()]
    }

    /// positions of the momentum components inside the state vector
    pub fn state_velocity_ids(&self) -> [usize; 2] {
        [self.nb_species, self.nb_species + 1]
    }

    /// velocity magnitude of a conservative state
    pub fn get_speed(&self, state: &DVector<f64>) -> f64 {
        let mut rho = 0.0;
        for ie in 0..self.nb_species {
            rho += state[ie];
        }
        let u = state[self.nb_species] / rho;
        let v = state[self.nb_species + 1] / rho;
        (u * u + v * v).sqrt()
    }

    /// φ, the vibrational-electron coupling scalar of the energy rows
    pub(crate) fn coupling_phi(&self, ys: &DVector<f64>, beta: f64, t: f64) -> f64 {
        if self.has_electron {
            // electrons carry mixture index 0
            self.ri_gas[0] * ys[0] / self.library.dev_dtv(t) - beta
        } else {
            -beta
        }
    }
}

/// Mutable scratch state of one evaluation thread: the public eigensystem
/// buffers plus the private working set of the Jacobian splitter. Never
/// share one workspace across concurrent calls.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// right-eigenvector matrix of the last `compute_eigen_values_vectors`
    pub right_ev: DMatrix<f64>,
    /// left-eigenvector matrix of the last `compute_eigen_values_vectors`
    pub left_ev: DMatrix<f64>,
    /// eigenvalues of the last eigensystem or split call
    pub e_values: DVector<f64>,
    /// split Jacobian, non-negative part
    pub jacob_plus: DMatrix<f64>,
    /// split Jacobian, non-positive part
    pub jacob_minus: DMatrix<f64>,
    // private working set of the splitter
    pub(crate) right_split: DMatrix<f64>,
    pub(crate) left_split: DMatrix<f64>,
    pub(crate) e_values_p: DVector<f64>,
    pub(crate) e_values_m: DVector<f64>,
    pub(crate) scaled: DMatrix<f64>,
    // per-call species scratch
    pub(crate) ys: DVector<f64>,
    pub(crate) alpha: DVector<f64>,
    pub(crate) etr: DVector<f64>,
}

impl Workspace {
    pub fn new(model: &Euler2DNEQ) -> Self {
        let n = model.nb_eqs();
        let ns = model.nb_species();
        Self {
            right_ev: DMatrix::zeros(n, n),
            left_ev: DMatrix::zeros(n, n),
            e_values: DVector::zeros(n),
            jacob_plus: DMatrix::zeros(n, n),
            jacob_minus: DMatrix::zeros(n, n),
            right_split: DMatrix::zeros(n, n),
            left_split: DMatrix::zeros(n, n),
            e_values_p: DVector::zeros(n),
            e_values_m: DVector::zeros(n),
            scaled: DMatrix::zeros(n, n),
            ys: DVector::zeros(ns),
            alpha: DVector::zeros(ns),
            etr: DVector::zeros(ns),
        }
    }
}
