//! Extended physical representation of a conservative state and the
//! state-to-physical-data mapper.
//!
//! The temperature solve is a direct linear one: under the frozen
//! translational-rotational assumption the mixture energy is linear in T,
//! E = sum_i y_i f_i R_i T + sum_i y_i h_form,i + Ev + |V|^2/2,
//! so no Newton iteration is needed.

use super::chem_library::ChemicalLibrary;
use super::var_set::{Euler2DNEQ, NeqError};
use log::warn;
use nalgebra::DVector;

/// Derived thermodynamic quantities of one cell/face state.
#[derive(Debug, Clone)]
pub struct PhysicalData {
    /// mixture density
    pub rho: f64,
    /// species mass fractions y_s
    pub ys: DVector<f64>,
    pub vx: f64,
    pub vy: f64,
    /// velocity magnitude
    pub v: f64,
    /// temperature
    pub t: f64,
    /// pressure
    pub p: f64,
    /// total specific enthalpy
    pub h: f64,
    /// frozen speed of sound
    pub a: f64,
    /// total specific energy
    pub e: f64,
    /// vibrational energy per unit mass (0 when no vibrational mode)
    pub ev: f64,
}

impl PhysicalData {
    pub fn new(nb_species: usize) -> Self {
        Self {
            rho: 0.0,
            ys: DVector::zeros(nb_species),
            vx: 0.0,
            vy: 0.0,
            v: 0.0,
            t: 0.0,
            p: 0.0,
            h: 0.0,
            a: 0.0,
            e: 0.0,
            ev: 0.0,
        }
    }
}

impl Euler2DNEQ {
    /// Maps a conservative state onto the extended physical data vector.
    ///
    /// The caller guarantees rho > 0; feeding a zero-density state divides
    /// by zero here. Use [`Euler2DNEQ::is_valid`] beforehand when the state
    /// is suspect.
    pub fn compute_physical_data(&self, state: &DVector<f64>, data: &mut PhysicalData) {
        let nb_species = self.nb_species;
        assert_eq!(state.len(), self.nb_eqs());
        assert_eq!(data.ys.len(), nb_species);

        let mut rho = 0.0;
        for ie in 0..nb_species {
            rho += state[ie];
        }
        data.rho = rho;
        let ov_rho = 1.0 / rho;

        for ie in 0..nb_species {
            data.ys[ie] = state[ie] * ov_rho;
            if data.ys[ie] > 1.1 {
                // numerical noise from the solver, not a hard error
                warn!("mass fraction above 1.1: ys[{}] = {}", ie, data.ys[ie]);
            }
        }

        data.vx = state[nb_species] * ov_rho;
        data.vy = state[nb_species + 1] * ov_rho;
        let v2 = data.vx * data.vx + data.vy * data.vy;
        data.v = v2.sqrt();

        data.ev = if self.nb_tv > 0 {
            state[nb_species + 3] * ov_rho
        } else {
            0.0
        };

        data.e = state[nb_species + 2] * ov_rho;

        let mut denom = 0.0;
        let mut form = 0.0;
        let mut riovermi = 0.0;
        for i in 0..nb_species {
            riovermi += state[i] / self.mmasses[i];
            let y_ov_m = data.ys[i] / self.mmasses[i];
            denom += y_ov_m * self.rgas * self.fcoeff[i];
            form += data.ys[i] * self.hform[i];
        }

        data.t = if self.nb_tv > 0 {
            (data.e - data.ev - form - 0.5 * v2) / denom
        } else {
            (data.e - form - 0.5 * v2) / denom
        };

        // ideal-mixture law: p = T * R * sum(rho_i / M_i)
        let p = data.t * self.rgas * riovermi;
        data.p = p;
        data.h = data.e + p * ov_rho;

        // frozen speed of sound, beta-weighted over all species
        let mut num_beta = 0.0;
        let mut den_beta = 0.0;
        for i in 0..nb_species {
            let sigma_i = data.ys[i] / self.mmasses[i];
            num_beta += sigma_i;
            den_beta += sigma_i * self.fcoeff[i];
        }
        let beta = num_beta / den_beta;
        let rt = self.rgas * data.t;

        let mut aiyi = 0.0;
        for i in 0..nb_species {
            aiyi += (data.ys[i] / self.mmasses[i])
                * (rt - beta * (self.fcoeff[i] * rt + self.mmasses[i] * self.hform[i]));
        }

        data.a = if self.nb_tv > 0 {
            (aiyi + beta * (data.h - 0.5 * v2 - data.ev)).sqrt()
        } else {
            (aiyi + beta * (data.h - 0.5 * v2)).sqrt()
        };
    }

    /// The reverse mapping is an intentional capability gap of this
    /// formulation, kept as an explicit failure.
    pub fn state_from_physical_data(
        &self,
        _data: &PhysicalData,
        _state: &mut DVector<f64>,
    ) -> Result<(), NeqError> {
        Err(NeqError::NotImplemented(
            "Euler2DNEQ::state_from_physical_data".to_string(),
        ))
    }

    pub fn set_dimensional_values(
        &self,
        _state: &DVector<f64>,
        _result: &mut DVector<f64>,
    ) -> Result<(), NeqError> {
        Err(NeqError::NotImplemented(
            "Euler2DNEQ::set_dimensional_values".to_string(),
        ))
    }

    pub fn set_adimensional_values(
        &self,
        _state: &DVector<f64>,
        _result: &mut DVector<f64>,
    ) -> Result<(), NeqError> {
        Err(NeqError::NotImplemented(
            "Euler2DNEQ::set_adimensional_values".to_string(),
        ))
    }

    pub fn set_dimensional_values_plus_extra(
        &self,
        _state: &DVector<f64>,
        _result: &mut DVector<f64>,
        _extra: &mut DVector<f64>,
    ) -> Result<(), NeqError> {
        Err(NeqError::NotImplemented(
            "Euler2DNEQ::set_dimensional_values_plus_extra".to_string(),
        ))
    }

    pub fn compute_perturbed_physical_data(
        &self,
        _state: &DVector<f64>,
        _pdata_bkp: &PhysicalData,
        _pdata: &mut PhysicalData,
        _i_var: usize,
    ) -> Result<(), NeqError> {
        Err(NeqError::NotImplemented(
            "Euler2DNEQ::compute_perturbed_physical_data".to_string(),
        ))
    }

    /// c_v,tr of the mixture at the given mass fractions, delegated to the
    /// property library
    pub(crate) fn cv_tr(&self, ys: &DVector<f64>) -> f64 {
        self.library.de_dt(ys)
    }
}
