//! Thermochemical property library interface and the bundled ideal-mixture
//! implementation.
//!
//! The variable set never computes species properties itself: molar masses,
//! specific gas constants, formation enthalpies, molecule membership and the
//! vibrational specific heat all come from a `ChemicalLibrary` handle that is
//! injected at model setup. Keeping the library behind a trait makes it
//! trivial to feed synthetic species tables into the tests.

use enum_dispatch::enum_dispatch;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// universal gas constant, J/(mol*K)
pub const R_UNIVERSAL: f64 = 8.314462618;

/// translational-rotational degrees-of-freedom coefficient: 5/2 for
/// diatomic/polyatomic species, 3/2 for atoms, ions and electrons
pub fn dof_coefficient(is_molecule: bool) -> f64 {
    if is_molecule { 2.5 } else { 1.5 }
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("empty species table")]
    EmptySpeciesTable,
    #[error("species '{0}': molar mass must be positive, got {1}")]
    NonPositiveMolarMass(String, f64),
    #[error("electron species '{0}' must have mixture index 0, found at {1}")]
    ElectronNotFirst(String, usize),
    #[error("more than one electron species in the table")]
    MultipleElectrons,
    #[error("vibrational specific heat must be positive, got {0}")]
    NonPositiveCvVib(f64),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Per-species coefficients consumed by the nonequilibrium Euler variable set.
#[enum_dispatch]
pub trait ChemicalLibrary {
    fn nb_species(&self) -> usize;
    /// mixture (universal) gas constant R, J/(mol*K)
    fn rgas(&self) -> f64;
    /// specific gas constants R_i = R/M_i, J/(kg*K)
    fn set_species_gas_constants(&self, ri: &mut DVector<f64>);
    /// molar masses M_i, kg/mol
    fn set_molar_masses(&self, mm: &mut DVector<f64>);
    /// mixture indices of diatomic/polyatomic species
    fn molecule_ids(&self) -> Vec<usize>;
    /// true if the mixture carries free electrons (mixture index 0)
    fn presence_electron(&self) -> bool;
    /// per-species formation enthalpies, J/kg
    fn set_enthalpy_form(&self, hf: &mut DVector<f64>);
    /// per-species translational-rotational energies at temperature `t`:
    /// e_tr,i = f_i * R_i * t + h_form,i
    fn set_energy_tr(&self, t: f64, etr: &mut DVector<f64>);
    /// partial derivative of the lumped vibrational energy with respect to
    /// the vibrational temperature, J/(kg*K)
    fn dev_dtv(&self, tv: f64) -> f64;
    /// frozen translational-rotational specific heat of the mixture at the
    /// given mass fractions: c_v,tr = sum_i y_i * f_i * R_i
    fn de_dt(&self, ys: &DVector<f64>) -> f64;
}

/// One row of the species table of [`IdealMixtureLibrary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    /// kg/mol
    pub molar_mass: f64,
    pub is_molecule: bool,
    #[serde(default)]
    pub is_electron: bool,
    /// J/kg
    #[serde(default)]
    pub enthalpy_form: f64,
}

/// Thermally perfect multi-species mixture with constant vibrational
/// specific heat. Covers exactly the coefficients the conservative variable
/// set consumes; anything fancier (curve fits, lookup tables) belongs to an
/// external library implementing [`ChemicalLibrary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdealMixtureLibrary {
    species: Vec<SpeciesRecord>,
    /// dEv/dTv, J/(kg*K)
    cv_vib: f64,
}

impl IdealMixtureLibrary {
    pub fn new(species: Vec<SpeciesRecord>, cv_vib: f64) -> Result<Self, LibraryError> {
        if species.is_empty() {
            return Err(LibraryError::EmptySpeciesTable);
        }
        if cv_vib <= 0.0 {
            return Err(LibraryError::NonPositiveCvVib(cv_vib));
        }
        let mut electrons = 0;
        for (i, sp) in species.iter().enumerate() {
            if sp.molar_mass <= 0.0 {
                return Err(LibraryError::NonPositiveMolarMass(
                    sp.name.clone(),
                    sp.molar_mass,
                ));
            }
            if sp.is_electron {
                electrons += 1;
                if electrons > 1 {
                    return Err(LibraryError::MultipleElectrons);
                }
                // convention: the electron species owns mixture index 0
                if i != 0 {
                    return Err(LibraryError::ElectronNotFirst(sp.name.clone(), i));
                }
            }
        }
        Ok(Self { species, cv_vib })
    }

    pub fn species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    pub fn from_json_str(json: &str) -> Result<Self, LibraryError> {
        let lib: IdealMixtureLibrary = serde_json::from_str(json)?;
        Self::new(lib.species, lib.cv_vib)
    }

    pub fn to_json_str(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LibraryError> {
        fs::write(path, self.to_json_str()?)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LibraryError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl ChemicalLibrary for IdealMixtureLibrary {
    fn nb_species(&self) -> usize {
        self.species.len()
    }

    fn rgas(&self) -> f64 {
        R_UNIVERSAL
    }

    fn set_species_gas_constants(&self, ri: &mut DVector<f64>) {
        for (i, sp) in self.species.iter().enumerate() {
            ri[i] = R_UNIVERSAL / sp.molar_mass;
        }
    }

    fn set_molar_masses(&self, mm: &mut DVector<f64>) {
        for (i, sp) in self.species.iter().enumerate() {
            mm[i] = sp.molar_mass;
        }
    }

    fn molecule_ids(&self) -> Vec<usize> {
        self.species
            .iter()
            .enumerate()
            .filter(|(_, sp)| sp.is_molecule)
            .map(|(i, _)| i)
            .collect()
    }

    fn presence_electron(&self) -> bool {
        self.species.first().map(|sp| sp.is_electron).unwrap_or(false)
    }

    fn set_enthalpy_form(&self, hf: &mut DVector<f64>) {
        for (i, sp) in self.species.iter().enumerate() {
            hf[i] = sp.enthalpy_form;
        }
    }

    fn set_energy_tr(&self, t: f64, etr: &mut DVector<f64>) {
        for (i, sp) in self.species.iter().enumerate() {
            let ri = R_UNIVERSAL / sp.molar_mass;
            etr[i] = dof_coefficient(sp.is_molecule) * ri * t + sp.enthalpy_form;
        }
    }

    fn dev_dtv(&self, _tv: f64) -> f64 {
        self.cv_vib
    }

    fn de_dt(&self, ys: &DVector<f64>) -> f64 {
        let mut cv = 0.0;
        for (i, sp) in self.species.iter().enumerate() {
            let ri = R_UNIVERSAL / sp.molar_mass;
            cv += ys[i] * dof_coefficient(sp.is_molecule) * ri;
        }
        cv
    }
}

/// Dispatch enum over the available property-library implementations.
#[derive(Debug, Clone)]
#[enum_dispatch(ChemicalLibrary)]
pub enum ChemLibrary {
    IdealMixture(IdealMixtureLibrary),
}

pub fn create_library_by_name(name: &str, species: Vec<SpeciesRecord>, cv_vib: f64)
-> Result<ChemLibrary, LibraryError> {
    match name {
        "ideal_mixture" | "thermally_perfect" => {
            Ok(ChemLibrary::IdealMixture(IdealMixtureLibrary::new(species, cv_vib)?))
        }
        _ => panic!("no such property library!"),
    }
}
