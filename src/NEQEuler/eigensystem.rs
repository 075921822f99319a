//! Closed-form eigen-decomposition of the directional flux Jacobian.
//!
//! The right/left eigenvector matrices are assembled analytically from the
//! current physical data and a unit face normal. The block layout over the
//! N+3(+1) equations is: species continuity rows [0..N), normal-momentum
//! row N, tangential-momentum row N+1, energy row N+2 and, when the
//! vibrational mode is active, vibrational row N+3. The acoustic +/- modes
//! live in columns N+1 and N+2.

use super::chem_library::ChemicalLibrary;
use super::physical_data::PhysicalData;
use super::var_set::{Euler2DNEQ, Workspace};
use log::warn;
use nalgebra::Vector2;

impl Euler2DNEQ {
    /// Fills `ws.right_ev`, `ws.left_ev` and `ws.e_values` with the
    /// eigensystem of the flux Jacobian projected on `normal`.
    ///
    /// Requires t > 0 (fatal otherwise) and a workspace sized for this
    /// model. R is normalized by 1/a^2, so R * L = I holds.
    pub fn compute_eigen_values_vectors(
        &self,
        data: &PhysicalData,
        normal: &Vector2<f64>,
        ws: &mut Workspace,
    ) {
        let nb_species = self.nb_species;
        let t = data.t;
        assert!(t > 0.0, "non-positive temperature in eigensystem: T = {}", t);

        // beta from the mass-weighted inverse degrees of freedom, restricted
        // to heavy species when free electrons are present
        let start = if self.has_electron { 1 } else { 0 };
        let mut num_beta = 0.0;
        let mut den_beta = 0.0;
        for i in start..nb_species {
            let sigma_i = data.ys[i] / self.mmasses[i];
            num_beta += sigma_i;
            den_beta += sigma_i * self.fcoeff[i];
        }
        let beta = num_beta / den_beta;

        for is in 0..nb_species {
            ws.ys[is] = data.ys[is];
            if ws.ys[is] > 1.1 {
                warn!("mass fraction above 1.1: ys[{}] = {}", is, ws.ys[is]);
            }
        }

        let phi = self.coupling_phi(&ws.ys, beta, t);

        self.library.set_energy_tr(t, &mut ws.etr);
        for is in 0..nb_species {
            // T_q is the translational-rotational reference temperature of
            // the species: zero for the electron gas, T for heavy species
            let tq = if !self.has_electron {
                t
            } else if is == 0 {
                0.0
            } else {
                t
            };
            ws.alpha[is] = self.ri_gas[is] * tq - beta * ws.etr[is];
        }

        let nx = normal.x;
        let ny = normal.y;
        let u = data.vx;
        let v = data.vy;
        let v2 = data.v * data.v;
        let q = 0.5 * v2;
        let vt = v * nx - u * ny; // tangential velocity
        let h = data.h;
        let ev = data.ev;
        let a = data.a;
        let a2 = a * a;
        let un = u * nx + v * ny;

        let nb_sp_plus1 = nb_species + 1;
        let nb_sp_plus2 = nb_species + 2;
        let nb_sp_plus3 = nb_species + 3;
        let nb_tv = self.nb_tv;

        let right_ev = &mut ws.right_ev;
        let left_ev = &mut ws.left_ev;
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
                left_ev[(is, nb_sp_plus3)] = beta * ws.ys[is];
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
    }
}
