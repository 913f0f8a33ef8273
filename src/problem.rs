//! Stack reflectivity driver.
//!
//! A [`Problem`] couples a validated [`Stack`] with its illumination: the
//! free-space wavelength and the angle of incidence in the cover medium.
//! Solving it resolves the normal wavevector of every layer once, starts from
//! the bare Fresnel reflection at the innermost interface, and then folds one
//! film at a time outward until the cover is reached:
//!
//! ```text
//!   cover            r = compose(r_1, ...)           <- result
//!   film 1           r_1 = compose(r_2, ...)
//!   ...
//!   film N-2         r_{N-2} = fresnel(N-2 -> N-1)   <- start
//!   substrate
//! ```
//!
//! Each fold depends on the previous one, so a single problem is strictly
//! sequential. Independent problems are solved in parallel by
//! [`crate::batch::Batch`].

use std::f64::consts::{FRAC_PI_2, PI};

use itertools::Itertools;
use log::{debug, trace};
use num_complex::Complex64;

use crate::{
    error::StackError,
    film,
    fresnel::{self, InterfaceCoefficients, ParallelConvention, Polarization},
    layer::Stack,
    result::Reflection,
    snell,
};


/// A single stack evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub stack: Stack,
    /// Free-space wavelength, in the same units as the film thicknesses.
    pub wavelength: f64,
    /// Angle of incidence in the cover medium, in radians.
    pub angle: f64,
    pub convention: ParallelConvention,
}

impl Problem {
    /// Creates a problem, checking that the wavelength is positive and the
    /// angle lies in `[0, pi/2)`.
    pub fn new(stack: Stack, wavelength: f64, angle: f64) -> Result<Self, StackError> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(StackError::MalformedStack(format!(
                "wavelength must be finite and positive, got {}",
                wavelength
            )));
        }
        if !(0.0..FRAC_PI_2).contains(&angle) {
            return Err(StackError::MalformedStack(format!(
                "angle of incidence must lie in [0, pi/2) radians, got {}",
                angle
            )));
        }

        Ok(Self {
            stack,
            wavelength,
            angle,
            convention: ParallelConvention::default(),
        })
    }

    /// Selects the p-polarization sign convention.
    pub fn with_convention(mut self, convention: ParallelConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Free-space wavenumber `2 pi / lambda`.
    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// Computes the stack's s- and p-polarized reflection coefficients.
    pub fn solve(&self) -> Result<Reflection, StackError> {
        debug!(
            "solving stack of {} layers at wavelength {} and angle {} rad",
            self.stack.len(),
            self.wavelength,
            self.angle
        );

        let waves = snell::resolve(&self.stack, self.wavenumber(), self.angle)?;
        let last = waves.len() - 1;

        // innermost interface: last film (or cover) into the substrate
        let innermost =
            fresnel::coefficients(&waves[last - 1], &waves[last], self.convention)?;
        let mut rs = innermost.rs;
        let mut rp = innermost.rp;

        // fold films outward; each window is (incident layer, film)
        let windows = waves[..last].iter().tuple_windows().collect_vec();
        for (outer, inner) in windows.into_iter().rev() {
            let thickness = self.stack.layers()[inner.layer]
                .thickness
                .ok_or_else(|| {
                    StackError::MalformedStack(format!("film {} has no thickness", inner.layer))
                })?;
            let phase = film::round_trip_phase(thickness, inner.kz);

            let into = fresnel::coefficients(outer, inner, self.convention)?;
            let back = fresnel::coefficients(inner, outer, self.convention)?;
            rs = fold(&into, &back, rs, phase, Polarization::S, inner.layer)?;
            rp = fold(&into, &back, rp, phase, Polarization::P, inner.layer)?;

            trace!(
                "film {}: phase = {}, r_s = {}, r_p = {}",
                inner.layer,
                phase,
                rs,
                rp
            );
        }

        Ok(Reflection::new(rs, rp))
    }
}

/// Adds one film to the running reflection of one polarization, given the
/// coefficients of its outer interface in both directions.
fn fold(
    into: &InterfaceCoefficients,
    back: &InterfaceCoefficients,
    r_below: Complex64,
    phase: Complex64,
    polarization: Polarization,
    layer: usize,
) -> Result<Complex64, StackError> {
    let (r_into, t_into) = into.get(polarization);
    let (_, t_back) = back.get(polarization);

    let r = film::compose(r_below, r_into, t_into, t_back, phase);
    if r.is_finite() {
        Ok(r)
    } else {
        Err(StackError::NumericInstability {
            layer,
            quantity: "running reflection",
        })
    }
}
