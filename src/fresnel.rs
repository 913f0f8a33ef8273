//! Fresnel equations for a single planar interface.
//!
//! This module computes the amplitude reflection and transmission
//! coefficients at the boundary between two homogeneous media, written in
//! terms of the normal wavevector components on either side rather than
//! explicit angles. This form stays valid for absorbing media and evanescent
//! waves, where the refraction angle is complex.
//!
//! The interface calculations provide:
//! - Reflection and transmission coefficients for s and p polarizations
//! - Complex refractive index support for absorbing layers
//! - A selectable sign convention for the p reflection coefficient
//! - Explicit errors for degenerate interfaces instead of infinities
//!
//! # Formulation
//!
//! For an incident side `i` and transmission side `t`:
//!
//! ```text
//! r_s = (k_i - k_t) / (k_i + k_t)
//! t_s = 2 k_i / (k_i + k_t)
//! r_p = (k_i n_t^2 - k_t n_i^2) / (k_i n_t^2 + k_t n_i^2)     (Born & Wolf)
//! t_p = 2 k_i n_i n_t / (k_i n_t^2 + k_t n_i^2)
//! ```
//!
//! The coefficients are direction-sensitive: swapping the two sides negates
//! both reflection coefficients and renormalizes the transmissions.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{error::StackError, snell::LayerWave};


/// Field polarization relative to the plane of incidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    /// Senkrecht: electric field perpendicular to the plane of incidence.
    S,
    /// Electric field parallel to the plane of incidence.
    P,
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarization::S => write!(f, "s"),
            Polarization::P => write!(f, "p"),
        }
    }
}

/// Sign convention for the p-polarized reflection coefficient.
///
/// Both conventions are self-consistent; flipping every p reflection
/// coefficient flips the stack's composite `r_p` and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParallelConvention {
    /// `r_p = (k_i n_t^2 - k_t n_i^2) / (k_i n_t^2 + k_t n_i^2)`.
    /// Gives `r_p = -r_s` at normal incidence. Standard in ellipsometry.
    #[value(name = "bornwolf")]
    BornWolf,
    /// The negated Born & Wolf coefficient, so that `r_p = r_s` at normal
    /// incidence.
    #[default]
    Symmetric,
}

impl fmt::Display for ParallelConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParallelConvention::BornWolf => write!(f, "bornwolf"),
            ParallelConvention::Symmetric => write!(f, "symmetric"),
        }
    }
}

/// Fresnel coefficients for one ordered (incident, transmission) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceCoefficients {
    pub rs: Complex64,
    pub ts: Complex64,
    pub rp: Complex64,
    pub tp: Complex64,
}

impl InterfaceCoefficients {
    /// Reflection and transmission for one polarization, as `(r, t)`.
    pub fn get(&self, polarization: Polarization) -> (Complex64, Complex64) {
        match polarization {
            Polarization::S => (self.rs, self.ts),
            Polarization::P => (self.rp, self.tp),
        }
    }

    fn is_finite(&self) -> bool {
        [self.rs, self.ts, self.rp, self.tp]
            .iter()
            .all(|c| c.is_finite())
    }
}

/// Computes the four Fresnel coefficients for light travelling from
/// `incident` into `transmitted`.
///
/// **Context**: Every interface of a stack is crossed twice by the recursion,
/// once inward and once back out of the film above it, so the coefficients
/// are needed for both orderings of each layer pair.
///
/// **How it Works**: Evaluates the s and p formulas from the normal
/// wavevector components and refractive indices of the two layers, then
/// applies the p sign convention. Both denominators are checked before
/// dividing.
///
/// An exactly zero denominator fails with [`StackError::Domain`] instead of
/// producing an infinity. A non-finite coefficient from finite but extreme
/// inputs fails with [`StackError::NumericInstability`] at the incident layer.
pub fn coefficients(
    incident: &LayerWave,
    transmitted: &LayerWave,
    convention: ParallelConvention,
) -> Result<InterfaceCoefficients, StackError> {
    let (ki, kt) = (incident.kz, transmitted.kz);
    let (ni, nt) = (incident.refr_index, transmitted.refr_index);
    let zero = Complex64::new(0.0, 0.0);

    let s_denom = ki + kt;
    if s_denom == zero {
        return Err(zero_denominator(incident, transmitted, Polarization::S));
    }

    let ni2 = ni * ni;
    let nt2 = nt * nt;
    let p_denom = ki * nt2 + kt * ni2;
    if p_denom == zero {
        return Err(zero_denominator(incident, transmitted, Polarization::P));
    }

    let rp = (ki * nt2 - kt * ni2) / p_denom;
    let coeffs = InterfaceCoefficients {
        rs: (ki - kt) / s_denom,
        ts: 2.0 * ki / s_denom,
        rp: match convention {
            ParallelConvention::BornWolf => rp,
            ParallelConvention::Symmetric => -rp,
        },
        tp: 2.0 * ki * ni * nt / p_denom,
    };

    if coeffs.is_finite() {
        Ok(coeffs)
    } else {
        Err(StackError::NumericInstability {
            layer: incident.layer,
            quantity: "Fresnel coefficient",
        })
    }
}

fn zero_denominator(
    incident: &LayerWave,
    transmitted: &LayerWave,
    polarization: Polarization,
) -> StackError {
    StackError::Domain(format!(
        "zero denominator in {}-polarized Fresnel coefficient at interface {} -> {}",
        polarization, incident.layer, transmitted.layer
    ))
}
