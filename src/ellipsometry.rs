//! Ellipsometric angles from stack reflection coefficients.
//!
//! An ellipsometer measures the complex ratio `rho = r_p / r_s` as
//!
//! ```text
//! rho = tan(psi) * exp(i delta)
//! ```
//!
//! `delta` depends on the p-polarization sign convention. The usual
//! ellipsometry literature uses [`ParallelConvention::BornWolf`], under which a
//! bare interface at normal incidence gives `delta = pi`.
//!
//! A polarizer ahead of the sample sets the incident state. For a linear
//! polarizer at azimuth `P` from the plane of incidence, the reflected Jones
//! vector is `(r_p cos P, r_s sin P)`, which at `P = 45` degrees is
//! proportional to `(rho, 1)`.
//!
//! [`ParallelConvention::BornWolf`]: crate::fresnel::ParallelConvention::BornWolf

use nalgebra::Vector2;
use num_complex::Complex64;
use serde::Serialize;

use crate::{error::StackError, result::Reflection};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fresnel::ParallelConvention, layer::Stack, problem::Problem};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn real(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&n| Complex64::new(n, 0.0)).collect()
    }

    #[test]
    fn silicon_on_insulator() {
        let stack =
            Stack::from_indices(&real(&[1.0, 3.8, 1.45, 3.8]), &[220.0, 3000.0]).unwrap();
        let reflection = Problem::new(stack, 500.056, 65.0_f64.to_radians())
            .unwrap()
            .with_convention(ParallelConvention::BornWolf)
            .solve()
            .unwrap();

        let e = psi_delta(&reflection).unwrap();
        assert_abs_diff_eq!(e.psi, 0.6162621200765622, epsilon = 1e-9);
        assert_abs_diff_eq!(e.delta, 2.4439711419293992, epsilon = 1e-9);
        let ratio = reflection.rp.norm() / reflection.rs.norm();
        assert_abs_diff_eq!(e.psi.tan(), ratio, epsilon = 1e-12);
    }

    #[test]
    fn normal_incidence() {
        let stack = Stack::from_indices(&real(&[1.0, 1.5]), &[]).unwrap();
        let problem = Problem::new(stack, 633.0, 0.0).unwrap();

        let symmetric = psi_delta(&problem.solve().unwrap()).unwrap();
        assert_abs_diff_eq!(symmetric.psi, PI / 4.0, epsilon = 1e-15);
        assert_abs_diff_eq!(symmetric.delta.cos(), 1.0, epsilon = 1e-15);

        let born_wolf = problem.with_convention(ParallelConvention::BornWolf);
        let e = psi_delta(&born_wolf.solve().unwrap()).unwrap();
        assert_abs_diff_eq!(e.psi, PI / 4.0, epsilon = 1e-15);
        assert_abs_diff_eq!(e.delta.cos(), -1.0, epsilon = 1e-15);
    }

    #[test]
    fn brewster_angle() {
        let stack = Stack::from_indices(&real(&[1.0, 1.5]), &[]).unwrap();
        let reflection = Problem::new(stack, 633.0, 1.5_f64.atan())
            .unwrap()
            .solve()
            .unwrap();
        let e = psi_delta(&reflection).unwrap();
        assert_abs_diff_eq!(e.psi, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn polarizer_at_45_degrees_reflects_rho() {
        let stack =
            Stack::from_indices(&real(&[1.0, 3.8, 1.45, 3.8]), &[220.0, 3000.0]).unwrap();
        let reflection = Problem::new(stack, 500.056, 65.0_f64.to_radians())
            .unwrap()
            .with_convention(ParallelConvention::BornWolf)
            .solve()
            .unwrap();

        let field = reflected_state(&reflection, PI / 4.0);
        let rho = field[0] / field[1];
        let e = psi_delta(&reflection).unwrap();
        assert_abs_diff_eq!(rho.norm().atan(), e.psi, epsilon = 1e-12);
        assert_abs_diff_eq!(rho.arg(), e.delta, epsilon = 1e-12);
    }

    #[test]
    fn polarizer_in_plane_selects_p() {
        let reflection = Reflection::new(Complex64::new(-0.4, 0.1), Complex64::new(0.3, -0.2));
        let field = reflected_state(&reflection, 0.0);
        assert_eq!(field[0], reflection.rp);
        assert_abs_diff_eq!(field[1].norm(), 0.0, epsilon = 1e-16);

        let field = reflected_state(&reflection, PI / 2.0);
        assert_abs_diff_eq!(field[0].norm(), 0.0, epsilon = 1e-16);
        assert_abs_diff_eq!(field[1].re, reflection.rs.re, epsilon = 1e-16);
    }

    #[test]
    fn undefined_ratio() {
        let zero = Complex64::new(0.0, 0.0);
        let reflection = Reflection::new(zero, Complex64::new(0.1, 0.0));
        assert!(matches!(psi_delta(&reflection), Err(StackError::Domain(_))));
    }
}

/// Ellipsometric angles, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ellipsometry {
    pub psi: f64,
    pub delta: f64,
}

/// Converts reflection coefficients to `psi` and `delta`.
///
/// Fails with [`StackError::Domain`] when `r_s` is zero and the ratio is
/// undefined.
pub fn psi_delta(reflection: &Reflection) -> Result<Ellipsometry, StackError> {
    let (rs, rp) = (reflection.rs, reflection.rp);
    if rs.norm_sqr() == 0.0 {
        return Err(StackError::Domain(
            "s-polarized reflection is zero, psi and delta are undefined".to_string(),
        ));
    }

    let rho = rp / rs;
    Ok(Ellipsometry {
        psi: rho.norm().atan(),
        delta: rho.arg(),
    })
}

/// Jones vector, in the (p, s) basis, of a linear polarizer at `azimuth`
/// radians from the plane of incidence.
pub fn linear_polarization(azimuth: f64) -> Vector2<Complex64> {
    Vector2::new(
        Complex64::new(azimuth.cos(), 0.0),
        Complex64::new(azimuth.sin(), 0.0),
    )
}

/// Field reflected by the stack when lit through a linear polarizer at
/// `azimuth`.
pub fn reflected_state(reflection: &Reflection, azimuth: f64) -> Vector2<Complex64> {
    reflection.reflect(&linear_polarization(azimuth))
}
