//! Airy summation for a single film.
//!
//! Light entering a film bounces back and forth between its two interfaces.
//! The partial waves form a geometric series, summed in closed form:
//!
//! ```text
//! r = r_into + t_into * r_below * t_back / (exp(-i phi) + r_below * r_into)
//! ```
//!
//! where `r_below` is the reflection of everything beneath the film as seen
//! from inside it, `r_into`/`t_into` are the coefficients of the film's outer
//! interface from the incident side, `t_back` is the transmission back out of
//! the film, and `phi = 2 d k_z` is the round-trip phase. Applying this once
//! per film folds a whole stack into a single reflection coefficient.

use num_complex::Complex64;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn no_substack_contribution() {
        let r_into = Complex64::new(-0.3, 0.1);
        let phi = Complex64::new(1.2, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let t = Complex64::new(0.7, 0.0);

        assert_eq!(compose(zero, r_into, t, t, phi), r_into);
        assert_eq!(compose(Complex64::new(0.5, 0.0), r_into, zero, t, phi), r_into);
    }

    #[test]
    fn phase_periodicity() {
        let r_below = Complex64::new(0.4, -0.2);
        let r_into = Complex64::new(-0.2, 0.0);
        let t_into = Complex64::new(0.8, 0.0);
        let t_back = Complex64::new(1.2, 0.0);
        let phi = Complex64::new(0.9, 0.0);

        let a = compose(r_below, r_into, t_into, t_back, phi);
        let b = compose(r_below, r_into, t_into, t_back, phi + 2.0 * PI);
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-14);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-14);
    }

    #[test]
    fn strongly_absorbing_film_hides_substack() {
        let r_into = Complex64::new(-0.2, 0.05);
        let t = Complex64::new(0.9, 0.0);
        // large positive imaginary phase: the wave dies inside the film
        let phi = Complex64::new(3.0, 60.0);
        let r = compose(Complex64::new(0.9, 0.0), r_into, t, t, phi);
        assert_abs_diff_eq!(r.re, r_into.re, epsilon = 1e-20);
        assert_abs_diff_eq!(r.im, r_into.im, epsilon = 1e-20);
    }

    #[test]
    fn round_trip_phase_is_twice_thickness_times_kz() {
        let kz = Complex64::new(0.02, 0.001);
        let phi = round_trip_phase(150.0, kz);
        assert_abs_diff_eq!(phi.re, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(phi.im, 0.3, epsilon = 1e-12);
    }
}

/// Round-trip phase `2 d k_z` accumulated across a film of thickness `d`.
///
/// Complex for absorbing films, where the imaginary part is the attenuation.
pub fn round_trip_phase(thickness: f64, kz: Complex64) -> Complex64 {
    kz * (2.0 * thickness)
}

/// Reflection coefficient of a film on top of a sub-stack with reflection
/// `r_below`, for one polarization.
///
/// The result is not checked: a zero denominator yields a non-finite value
/// which the caller is expected to reject.
pub fn compose(
    r_below: Complex64,
    r_into: Complex64,
    t_into: Complex64,
    t_back: Complex64,
    phase: Complex64,
) -> Complex64 {
    let numerator = t_into * r_below * t_back;
    let denominator = (-Complex64::i() * phase).exp() + r_below * r_into;
    r_into + numerator / denominator
}
