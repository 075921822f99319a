//! Flux-vector splitting and the closed-form projected Jacobian.
//!
//! The splitter rebuilds the eigensystem into a private working set (not
//! the public buffers of the eigensystem builder) using the linearized
//! closure beta = p/(rho*T*c_v,tr) and a^2 = (1+beta)*p/rho, splits the
//! spectrum into non-negative/non-positive parts (optionally Harten-
//! smoothed to cure the carbuncle) and reconstructs the split Jacobians by
//! similarity transform.

use super::chem_library::ChemicalLibrary;
use super::physical_data::PhysicalData;
use super::var_set::{Euler2DNEQ, Workspace};
use log::{debug, error};
use nalgebra::{DMatrix, Vector2};

impl Euler2DNEQ {
    /// Splits the directional flux Jacobian into `ws.jacob_plus` and
    /// `ws.jacob_minus`; the unsplit eigenvalues land in `ws.e_values`.
    ///
    /// Non-positive pressure, temperature or density is a fatal precondition
    /// violation: a solver feeding such a state is diverging and there is
    /// nothing sensible to compute here.
    pub fn split_jacobian(&self, data: &PhysicalData, normal: &Vector2<f64>, ws: &mut Workspace) {
        let nb_species = self.nb_species;

        let t = data.t;
        let rho = data.rho;
        let p = data.p;
        let cv_tr = self.cv_tr(&data.ys);
        let beta = p / (rho * t) / cv_tr;

        if p <= 0.0 {
            error!("invalid state in split_jacobian:\n{}", data);
            error!("cv_tr = {}", cv_tr);
        }
        assert!(p > 0.0, "non-positive pressure in split_jacobian: p = {}", p);
        assert!(t > 0.0, "non-positive temperature in split_jacobian: T = {}", t);
        assert!(rho > 0.0, "non-positive density in split_jacobian: rho = {}", rho);

        for is in 0..nb_species {
            ws.ys[is] = data.ys[is];
        }

        let phi = self.coupling_phi(&ws.ys, beta, t);

        self.library.set_energy_tr(t, &mut ws.etr);
        let mut tq = 0.0;
        for is in 0..nb_species {
            if !self.has_electron {
                tq = t;
            } else if is == 0 {
                tq = 0.0;
            }
            ws.alpha[is] = self.ri_gas[is] * tq - beta * ws.etr[is];
        }

        let nx = normal.x;
        let ny = normal.y;
        let u = data.vx;
        let v = data.vy;
        let v2 = data.v * data.v;
        let q = 0.5 * v2;
        let vt = v * nx - u * ny;
        let h = data.h;
        let ev = data.ev;
        let a2 = (1.0 + beta) * p / rho;
        let a = a2.sqrt();
        let un = u * nx + v * ny;

        let nb_sp_plus1 = nb_species + 1;
        let nb_sp_plus2 = nb_species + 2;
        let nb_sp_plus3 = nb_species + 3;
        let nb_tv = self.nb_tv;

        let right_ev = &mut ws.right_split;
        let left_ev = &mut ws.left_split;
        right_ev.fill(0.0);
        left_ev.fill(0.0);

        for is in 0..nb_species {
            right_ev[(is, is)] = 1.0;
            right_ev[(is, nb_sp_plus1)] = 0.5 * ws.ys[is];
            right_ev[(is, nb_sp_plus2)] = 0.5 * ws.ys[is];

            right_ev[(nb_species, is)] = u;
            right_ev[(nb_sp_plus1, is)] = v;
            right_ev[(nb_sp_plus2, is)] = q - ws.alpha[is] / beta;
        }

        right_ev[(nb_species, nb_species)] = -ny * a2;
        right_ev[(nb_species, nb_sp_plus1)] = 0.5 * (u + a * nx);
        right_ev[(nb_species, nb_sp_plus2)] = 0.5 * (u - a * nx);

        right_ev[(nb_sp_plus1, nb_species)] = nx * a2;
        right_ev[(nb_sp_plus1, nb_sp_plus1)] = 0.5 * (v + a * ny);
        right_ev[(nb_sp_plus1, nb_sp_plus2)] = 0.5 * (v - a * ny);

        right_ev[(nb_sp_plus2, nb_species)] = vt * a2;
        right_ev[(nb_sp_plus2, nb_sp_plus1)] = 0.5 * (h + a * un);
        right_ev[(nb_sp_plus2, nb_sp_plus2)] = 0.5 * (h - a * un);

        if nb_tv > 0 {
            right_ev[(nb_sp_plus2, nb_sp_plus3)] = -phi / beta;

            right_ev[(nb_sp_plus3, nb_sp_plus1)] = 0.5 * ev;
            right_ev[(nb_sp_plus3, nb_sp_plus2)] = 0.5 * ev;
            right_ev[(nb_sp_plus3, nb_sp_plus3)] = 1.0;
        }

        *right_ev /= a2;

        let bq = beta * q;
        for is in 0..nb_species {
            for js in 0..nb_species {
                let a2delta = if js != is { 0.0 } else { a2 };
                left_ev[(is, js)] = a2delta - ws.ys[is] * (ws.alpha[js] + bq);
            }

            left_ev[(is, nb_species)] = beta * u * ws.ys[is];
            left_ev[(is, nb_sp_plus1)] = beta * v * ws.ys[is];
            left_ev[(is, nb_sp_plus2)] = -beta * ws.ys[is];
            if nb_tv > 0 {
                left_ev[(is, nb_sp_plus3)] = -phi * ws.ys[is];
            }

            let alpha_plus_bq = ws.alpha[is] + bq;
            left_ev[(nb_species, is)] = -vt;
            left_ev[(nb_sp_plus1, is)] = alpha_plus_bq - un * a;
            left_ev[(nb_sp_plus2, is)] = alpha_plus_bq + un * a;
            if nb_tv > 0 {
                left_ev[(nb_sp_plus3, is)] = -ev * alpha_plus_bq;
            }
        }

        left_ev[(nb_species, nb_species)] = -ny;
        left_ev[(nb_species, nb_sp_plus1)] = nx;

        left_ev[(nb_sp_plus1, nb_species)] = a * nx - beta * u;
        left_ev[(nb_sp_plus1, nb_sp_plus1)] = a * ny - beta * v;
        left_ev[(nb_sp_plus1, nb_sp_plus2)] = beta;
        if nb_tv > 0 {
            left_ev[(nb_sp_plus1, nb_sp_plus3)] = phi;
        }

        left_ev[(nb_sp_plus2, nb_species)] = -a * nx - beta * u;
        left_ev[(nb_sp_plus2, nb_sp_plus1)] = -a * ny - beta * v;
        left_ev[(nb_sp_plus2, nb_sp_plus2)] = beta;
        if nb_tv > 0 {
            left_ev[(nb_sp_plus2, nb_sp_plus3)] = phi;
        }

        if nb_tv > 0 {
            left_ev[(nb_sp_plus3, nb_species)] = beta * u * ev;
            left_ev[(nb_sp_plus3, nb_sp_plus1)] = beta * v * ev;
            left_ev[(nb_sp_plus3, nb_sp_plus2)] = -beta * ev;
            left_ev[(nb_sp_plus3, nb_sp_plus3)] = a2 - phi * ev;
        }

        ws.e_values.fill(un);
        ws.e_values[nb_sp_plus1] += a;
        ws.e_values[nb_sp_plus2] -= a;

        // eigenvalue split, Harten-smoothed when a dissipation coefficient
        // is configured
        if self.jacob_dissip > 0.0 {
            let j2 = self.jacob_dissip * self.jacob_dissip;
            for i_eq in 0..ws.e_values.len() {
                let ev_p = ws.e_values[i_eq].max(0.0);
                ws.e_values_p[i_eq] = 0.5 * (ev_p + (ev_p * ev_p + j2 * a2).sqrt());

                let ev_m = ws.e_values[i_eq].min(0.0);
                ws.e_values_m[i_eq] = 0.5 * (ev_m - (ev_m * ev_m + j2 * a2).sqrt());
            }
        } else {
            for i_eq in 0..ws.e_values.len() {
                ws.e_values_p[i_eq] = ws.e_values[i_eq].max(0.0);
                ws.e_values_m[i_eq] = ws.e_values[i_eq].min(0.0);
            }
        }

        // jacob_plus = R * diag(lambda+) * L, jacob_minus likewise
        ws.scaled.copy_from(&ws.right_split);
        for j in 0..ws.e_values_p.len() {
            let mut col = ws.scaled.column_mut(j);
            col *= ws.e_values_p[j];
        }
        ws.scaled.mul_to(&ws.left_split, &mut ws.jacob_plus);

        ws.scaled.copy_from(&ws.right_split);
        for j in 0..ws.e_values_m.len() {
            let mut col = ws.scaled.column_mut(j);
            col *= ws.e_values_m[j];
        }
        ws.scaled.mul_to(&ws.left_split, &mut ws.jacob_minus);

        debug!("right eigenvectors @split_jacobian\n{}", ws.right_split);
        debug!("left eigenvectors @split_jacobian\n{}", ws.left_split);
        debug!("eigenvalues @split_jacobian\n{}", ws.e_values);
    }

    /// Exact (unsplit) directional flux Jacobian in closed form, independent
    /// of the eigen-decomposition. Consistent with
    /// R * diag(eigenvalues) * L from the eigensystem builder.
    pub fn compute_projected_jacobian(
        &self,
        data: &PhysicalData,
        normal: &Vector2<f64>,
        ws: &mut Workspace,
        jacob: &mut DMatrix<f64>,
    ) {
        let nb_species = self.nb_species;
        assert_eq!(jacob.nrows(), self.nb_eqs());
        assert_eq!(jacob.ncols(), self.nb_eqs());

        let t = data.t;
        let rho = data.rho;
        let p = data.p;
        let cv_tr = self.cv_tr(&data.ys);
        let beta = p / (rho * t) / cv_tr;

        if p <= 0.0 {
            error!("invalid state in compute_projected_jacobian:\n{}", data);
            error!("cv_tr = {}", cv_tr);
        }
        assert!(p > 0.0, "non-positive pressure in projected jacobian: p = {}", p);
        assert!(t > 0.0, "non-positive temperature in projected jacobian: T = {}", t);
        assert!(rho > 0.0, "non-positive density in projected jacobian: rho = {}", rho);

        for is in 0..nb_species {
            ws.ys[is] = data.ys[is];
            assert!(ws.ys[is] < 1.1, "mass fraction out of range: ys[{}] = {}", is, ws.ys[is]);
        }

        let phi = self.coupling_phi(&ws.ys, beta, t);

        // here alpha uses T for every species, unlike the eigensystem paths
        self.library.set_energy_tr(t, &mut ws.etr);
        for is in 0..nb_species {
            ws.alpha[is] = self.ri_gas[is] * t - beta * ws.etr[is];
        }

        let nx = normal.x;
        let ny = normal.y;
        let u = data.vx;
        let v = data.vy;
        let v2 = data.v * data.v;
        let q = 0.5 * v2;
        let vt = v * nx - u * ny;
        let h = data.h;
        let ev = data.ev;
        let un = u * nx + v * ny;
        let nb_sp_plus1 = nb_species + 1;
        let nb_sp_plus2 = nb_species + 2;
        let nb_sp_plus3 = nb_species + 3;
        let bq = beta * q;
        let nb_tv = self.nb_tv;

        for is in 0..nb_species {
            for js in 0..nb_species {
                let delta = if js != is { 0.0 } else { 1.0 };
                jacob[(is, js)] = (delta - ws.ys[is]) * un;
            }
            jacob[(is, nb_species)] = ws.ys[is] * nx;
            jacob[(is, nb_sp_plus1)] = ws.ys[is] * ny;
            jacob[(is, nb_sp_plus2)] = 0.0;
            if nb_tv > 0 {
                jacob[(is, nb_sp_plus3)] = 0.0;
            }

            let alpha_plus_bq = ws.alpha[is] + bq;
            jacob[(nb_species, is)] = alpha_plus_bq * nx - un * u;
            jacob[(nb_sp_plus1, is)] = alpha_plus_bq * ny - un * v;
            jacob[(nb_sp_plus2, is)] = (alpha_plus_bq - h) * un;
            if nb_tv > 0 {
                jacob[(nb_sp_plus3, is)] = -un * ev;
            }
        }

        jacob[(nb_species, nb_species)] = (1.0 - beta) * u * nx + un;
        jacob[(nb_species, nb_sp_plus1)] = (1.0 - beta) * v * nx - vt;
        jacob[(nb_species, nb_sp_plus2)] = beta * nx;
        if nb_tv > 0 {
            jacob[(nb_species, nb_sp_plus3)] = -beta * nx;
        }

        jacob[(nb_sp_plus1, nb_species)] = (1.0 - beta) * u * ny + vt;
        jacob[(nb_sp_plus1, nb_sp_plus1)] = (1.0 - beta) * v * ny + un;
        jacob[(nb_sp_plus1, nb_sp_plus2)] = beta * ny;
        if nb_tv > 0 {
            jacob[(nb_sp_plus1, nb_sp_plus3)] = -beta * ny;
        }

        jacob[(nb_sp_plus2, nb_species)] = h * nx - beta * un * u;
        jacob[(nb_sp_plus2, nb_sp_plus1)] = h * ny - beta * un * v;
        jacob[(nb_sp_plus2, nb_sp_plus2)] = (1.0 + beta) * un;
        if nb_tv > 0 {
            jacob[(nb_sp_plus2, nb_sp_plus3)] = -beta * un;
        }

        if nb_tv > 0 {
            jacob[(nb_sp_plus3, nb_species)] = ev * nx;
            jacob[(nb_sp_plus3, nb_sp_plus1)] = ev * ny;
            jacob[(nb_sp_plus3, nb_sp_plus2)] = 0.0;
            jacob[(nb_sp_plus3, nb_sp_plus3)] = un;
        }
    }
}
