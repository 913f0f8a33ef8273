use std::fmt;

use nalgebra::{Matrix2, Vector2};
use num_complex::Complex64;
use serde::Serialize;

/// Complex amplitude reflection coefficients of a whole stack.
///
/// Only the amplitudes are computed; callers needing reflectance take the
/// squared norm themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reflection {
    pub rs: Complex64,
    pub rp: Complex64,
}

impl Reflection {
    pub fn new(rs: Complex64, rp: Complex64) -> Self {
        Self { rs, rp }
    }

    /// Diagonal reflection Jones matrix in the (p, s) basis.
    pub fn jones(&self) -> Matrix2<Complex64> {
        Matrix2::from_diagonal(&Vector2::new(self.rp, self.rs))
    }

    /// Reflected Jones vector for an incident state given in the (p, s) basis.
    pub fn reflect(&self, incident: &Vector2<Complex64>) -> Vector2<Complex64> {
        self.jones() * incident
    }
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r_s = {:+.9} {:+.9}i, r_p = {:+.9} {:+.9}i",
            self.rs.re, self.rs.im, self.rp.re, self.rp.im
        )
    }
}
