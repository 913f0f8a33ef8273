//! Wavelength-dependent refractive index models.
//!
//! Layers in a configuration file may give a fixed complex refractive index or
//! a Cauchy dispersion relation. Either is evaluated at the problem wavelength
//! before the stack is built.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};


/// Refractive index as a function of free-space wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefrIndexModel {
    /// Non-dispersive complex index, written `[re, im]`.
    Constant(Complex64),
    /// Cauchy's equation `n = a + b / lambda^2`, with `b` in units of the
    /// wavelength squared. Lossless.
    Cauchy { a: f64, b: f64 },
}

impl RefrIndexModel {
    /// Evaluates the model at a free-space wavelength.
    pub fn at(&self, wavelength: f64) -> Complex64 {
        match *self {
            RefrIndexModel::Constant(n) => n,
            RefrIndexModel::Cauchy { a, b } => {
                Complex64::new(a + b / (wavelength * wavelength), 0.0)
            }
        }
    }
}

impl From<Complex64> for RefrIndexModel {
    fn from(n: Complex64) -> Self {
        RefrIndexModel::Constant(n)
    }
}
