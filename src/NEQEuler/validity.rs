//! Out-of-band admissibility check of a conservative state.
//!
//! Everything is recomputed from first principles with coefficients fetched
//! fresh from the property library, deliberately not reusing the cached
//! vectors of the variable set, so a corrupted cache cannot mask an invalid
//! state. Not a hot-path operation.

use super::chem_library::ChemicalLibrary;
use super::var_set::Euler2DNEQ;
use nalgebra::DVector;

impl Euler2DNEQ {
    /// Returns false if the state yields negative pressure, temperature or
    /// sound speed, or carries a negative species density.
    pub fn is_valid(&self, state: &DVector<f64>) -> bool {
        let nb_species = self.nb_species;

        let mut molar_masses = DVector::zeros(nb_species);
        self.library.set_molar_masses(&mut molar_masses);

        let mut flag = vec![false; nb_species];
        for id in self.library.molecule_ids() {
            flag[id] = true;
        }
        let mut f_coeff = DVector::zeros(nb_species);
        for i in 0..nb_species {
            f_coeff[i] = if flag[i] { 2.5 } else { 1.5 };
        }

        let rgas = self.library.rgas();
        let mut hform = DVector::zeros(nb_species);
        self.library.set_enthalpy_form(&mut hform);

        let rho_u = state[nb_species];
        let rho_v = state[nb_species + 1];
        let rho_e = state[nb_species + 2];
        let rho_ev = if self.nb_tv > 0 { state[nb_species + 3] } else { 0.0 };

        let mut rho = 0.0;
        for ie in 0..nb_species {
            rho += state[ie];
        }
        if rho <= 0.0 {
            return false;
        }
        let ov_rho = 1.0 / rho;

        let e = rho_e * ov_rho;
        let evib = rho_ev * ov_rho;
        let v2 = (rho_u * rho_u + rho_v * rho_v) * ov_rho * ov_rho;

        let mut denom = 0.0;
        let mut form = 0.0;
        let mut riovermi = 0.0;
        for i in 0..nb_species {
            let ys = state[i] * ov_rho;
            riovermi += state[i] / molar_masses[i];
            denom += ys / molar_masses[i] * rgas * f_coeff[i];
            form += ys * hform[i];
        }

        let t = (e - evib - form - 0.5 * v2) / denom;
        let p = t * rgas * riovermi;

        let mut num_beta = 0.0;
        let mut den_beta = 0.0;
        for i in 0..nb_species {
            let sigma_i = state[i] * ov_rho / molar_masses[i];
            num_beta += sigma_i;
            den_beta += sigma_i * f_coeff[i];
        }
        let beta = num_beta / den_beta;

        let a = ((1.0 + beta) * p * ov_rho).sqrt();

        if p < 0.0 || t < 0.0 || a < 0.0 || a.is_nan() {
            return false;
        }

        for ie in 0..nb_species {
            if state[ie] < 0.0 {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::NEQEuler::chem_library::{ChemLibrary, IdealMixtureLibrary, SpeciesRecord};
    use crate::NEQEuler::var_set::Euler2DNEQ;
    use nalgebra::DVector;

    fn nitrogen_model(nb_tv: usize) -> Euler2DNEQ {
        let species = vec![
            SpeciesRecord {
                name: "N2".to_string(),
                molar_mass: 0.028,
                is_molecule: true,
                is_electron: false,
                enthalpy_form: 0.0,
            },
            SpeciesRecord {
                name: "N".to_string(),
                molar_mass: 0.014,
                is_molecule: false,
                is_electron: false,
                enthalpy_form: 3.36e7,
            },
        ];
        let lib = IdealMixtureLibrary::new(species, 1200.0).unwrap();
        Euler2DNEQ::new(ChemLibrary::IdealMixture(lib), nb_tv, 0.0).unwrap()
    }

    fn state_from_primitive(
        model: &Euler2DNEQ,
        rhos: &[f64],
        u: f64,
        v: f64,
        t: f64,
        ev: f64,
    ) -> DVector<f64> {
        let ns = model.nb_species();
        let rho: f64 = rhos.iter().sum();
        let mut state = DVector::zeros(model.nb_eqs());
        let mut cv = 0.0;
        let mut form = 0.0;
        for i in 0..ns {
            state[i] = rhos[i];
            let y = rhos[i] / rho;
            cv += y * model.fcoeff[i] * model.ri_gas[i];
            form += y * model.hform[i];
        }
        state[ns] = rho * u;
        state[ns + 1] = rho * v;
        let ev = if model.nb_tv() > 0 { ev } else { 0.0 };
        state[ns + 2] = rho * (cv * t + form + ev + 0.5 * (u * u + v * v));
        if model.nb_tv() > 0 {
            state[ns + 3] = rho * ev;
        }
        state
    }

    #[test]
    fn valid_state_is_accepted() {
        let model = nitrogen_model(1);
        let state = state_from_primitive(&model, &[0.8, 0.2], 150.0, -30.0, 4000.0, 2.0e5);
        assert!(model.is_valid(&state));
    }

    #[test]
    fn negative_species_density_is_rejected() {
        let model = nitrogen_model(0);
        let mut state = state_from_primitive(&model, &[0.9, 0.1], 100.0, 0.0, 3000.0, 0.0);
        state[1] = -1.0e-3;
        assert!(!model.is_valid(&state));
    }

    #[test]
    fn unphysically_low_energy_is_rejected() {
        let model = nitrogen_model(0);
        let mut state = state_from_primitive(&model, &[0.5, 0.5], 0.0, 0.0, 3000.0, 0.0);
        // energy far below the formation-enthalpy floor forces T < 0
        state[4] = 1.0;
        assert!(!model.is_valid(&state));
    }
}
