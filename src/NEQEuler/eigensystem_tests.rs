#[cfg(test)]
mod tests {
    use crate::NEQEuler::chem_library::{ChemLibrary, IdealMixtureLibrary, SpeciesRecord};
    use crate::NEQEuler::physical_data::PhysicalData;
    use crate::NEQEuler::var_set::{Euler2DNEQ, Workspace};
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector, Vector2};

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

    fn ionized_model() -> Euler2DNEQ {
        let species = vec![
            SpeciesRecord {
                name: "e-".to_string(),
                molar_mass: 5.485799e-7,
                is_molecule: false,
                is_electron: true,
                enthalpy_form: 0.0,
            },
            SpeciesRecord {
                name: "N2".to_string(),
                molar_mass: 0.028,
                is_molecule: true,
                is_electron: false,
                enthalpy_form: 0.0,
            },
            SpeciesRecord {
                name: "N2+".to_string(),
                molar_mass: 0.028,
                is_molecule: true,
                is_electron: false,
                enthalpy_form: 5.37e7,
            },
        ];
        let lib = IdealMixtureLibrary::new(species, 1200.0).unwrap();
        Euler2DNEQ::new(ChemLibrary::IdealMixture(lib), 1, 0.0).unwrap()
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

    fn unit_normals() -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(0.6, 0.8),
            Vector2::new(-0.8, 0.6),
            Vector2::new(-1.0 / 2.0_f64.sqrt(), -1.0 / 2.0_f64.sqrt()),
        ]
    }

    #[test]
    fn test_right_left_product_is_identity_with_vibrational_mode() {
        let model = nitrogen_model(1);
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());
        let n = model.nb_eqs();

        let state = state_from_primitive(&model, &[0.75, 0.25], 870.0, -340.0, 6100.0, 3.1e5);
        model.compute_physical_data(&state, &mut data);

        for normal in unit_normals() {
            model.compute_eigen_values_vectors(&data, &normal, &mut ws);
            let product = &ws.right_ev * &ws.left_ev;
            // relative identity defect: left entries scale with the
            // formation enthalpies, so the absolute residual scales too
            let deviation = (product - DMatrix::identity(n, n)).norm()
                / (ws.right_ev.norm() * ws.left_ev.norm());
            assert!(
                deviation < 1e-9,
                "R*L deviates from identity by {} for normal {:?}",
                deviation,
                normal
            );
        }
    }

    #[test]
    fn test_right_left_product_is_identity_without_vibrational_mode() {
        let model = nitrogen_model(0);
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());
        let n = model.nb_eqs();

        let states = [
            state_from_primitive(&model, &[1.2, 0.05], 10.0, 5.0, 320.0, 0.0),
            state_from_primitive(&model, &[0.4, 0.6], 2400.0, 800.0, 7900.0, 0.0),
        ];
        for state in &states {
            model.compute_physical_data(state, &mut data);
            for normal in unit_normals() {
                model.compute_eigen_values_vectors(&data, &normal, &mut ws);
                let product = &ws.right_ev * &ws.left_ev;
                let deviation = (product - DMatrix::identity(n, n)).norm()
                    / (ws.right_ev.norm() * ws.left_ev.norm());
                assert!(deviation < 1e-9, "R*L deviates by {}", deviation);
            }
        }
    }

    #[test]
    fn test_eigenvalue_slots_molecule_atom_mixture() {
        // two species, one molecule one atom, normal (1,0): the spectrum is
        // U everywhere except the two acoustic slots U+a, U-a
        let model = nitrogen_model(0);
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());

        let u = 450.0;
        let state = state_from_primitive(&model, &[0.7, 0.3], u, 0.0, 5000.0, 0.0);
        model.compute_physical_data(&state, &mut data);
        model.compute_eigen_values_vectors(&data, &Vector2::new(1.0, 0.0), &mut ws);

        let ns = model.nb_species();
        for is in 0..ns {
            assert_relative_eq!(ws.e_values[is], u, max_relative = 1e-12);
        }
        assert_relative_eq!(ws.e_values[ns], u, max_relative = 1e-12);
        assert_relative_eq!(ws.e_values[ns + 1], u + data.a, max_relative = 1e-12);
        assert_relative_eq!(ws.e_values[ns + 2], u - data.a, max_relative = 1e-12);
    }

    #[test]
    fn test_eigenvalues_follow_the_normal_direction() {
        let model = nitrogen_model(1);
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());

        let state = state_from_primitive(&model, &[0.9, 0.1], 300.0, 400.0, 4500.0, 1.5e5);
        model.compute_physical_data(&state, &mut data);

        let normal = Vector2::new(0.6, 0.8);
        model.compute_eigen_values_vectors(&data, &normal, &mut ws);
        let un = data.vx * normal.x + data.vy * normal.y;

        let ns = model.nb_species();
        assert_relative_eq!(ws.e_values[0], un, max_relative = 1e-12);
        assert_relative_eq!(ws.e_values[ns + 1], un + data.a, max_relative = 1e-12);
        assert_relative_eq!(ws.e_values[ns + 2], un - data.a, max_relative = 1e-12);
        // the vibrational mode convects with the flow
        assert_relative_eq!(ws.e_values[ns + 3], un, max_relative = 1e-12);
    }

    #[test]
    fn test_ionized_mixture_eigensystem_is_finite() {
        // with free electrons the closure switches to the electron-coupled
        // phi and skips index 0 in the beta weighting; the spectrum keeps
        // its two acoustic slots
        let model = ionized_model();
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());

        let state =
            state_from_primitive(&model, &[1.0e-8, 0.85, 0.15], 1200.0, 250.0, 9000.0, 8.0e5);
        model.compute_physical_data(&state, &mut data);
        model.compute_eigen_values_vectors(&data, &Vector2::new(0.8, -0.6), &mut ws);

        assert!(ws.right_ev.iter().all(|x| x.is_finite()));
        assert!(ws.left_ev.iter().all(|x| x.is_finite()));
        let un = data.vx * 0.8 - data.vy * 0.6;
        let ns = model.nb_species();
        assert_relative_eq!(ws.e_values[ns + 1], un + data.a, max_relative = 1e-12);
        assert_relative_eq!(ws.e_values[ns + 2], un - data.a, max_relative = 1e-12);
    }

    #[test]
    #[should_panic(expected = "non-positive temperature")]
    fn test_non_positive_temperature_is_fatal() {
        let model = nitrogen_model(0);
        let mut ws = Workspace::new(&model);
        let mut data = PhysicalData::new(model.nb_species());
        data.ys[0] = 0.8;
        data.ys[1] = 0.2;
        data.rho = 1.0;
        data.t = -5.0;
        model.compute_eigen_values_vectors(&data, &Vector2::new(1.0, 0.0), &mut ws);
    }
}
