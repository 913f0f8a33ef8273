//! Generalized Snell's law for complex refractive indices.
//!
//! Rather than tracking refraction angles through the stack, each layer is
//! described by the normal component of its wavevector. The tangential
//! component is conserved across every planar interface, so a single lateral
//! wavenumber fixed in the cover medium determines all layers:
//!
//! ```text
//! k_x   = k0 * n_0 * sin(theta)
//! k_z,j = k0 * sqrt(n_j^2 - (n_0 * sin(theta))^2)
//! ```
//!
//! The implementation provides:
//! - One normal wavenumber per layer, cover and substrate included
//! - Complex wavenumbers for absorbing layers and evanescent waves
//! - A fixed square-root branch, see [`decaying_sqrt`]
//! - Detection of non-finite wavenumbers before any coefficient is formed

use num_complex::Complex64;

use crate::{error::StackError, layer::Stack};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn normal_incidence_is_optical_wavenumber() {
        let k0 = 2.0 * PI / 500.0;
        let n0 = Complex64::new(1.0, 0.0);
        let n = Complex64::new(1.5, 0.0);
        let kz = normal_component(k0, n, n0, 0.0);
        assert_abs_diff_eq!(kz.re, 1.5 * k0, epsilon = 1e-15);
        assert_eq!(kz.im, 0.0);
    }

    #[test]
    fn evanescent_wave_decays() {
        // glass to air beyond the critical angle
        let n0 = Complex64::new(1.5, 0.0);
        let n = Complex64::new(1.0, 0.0);
        let kz = normal_component(1.0, n, n0, 60.0_f64.to_radians());
        assert_abs_diff_eq!(kz.re, 0.0, epsilon = 1e-15);
        assert!(kz.im > 0.0);
    }

    #[test]
    fn absorbing_layer_decays() {
        let n0 = Complex64::new(1.0, 0.0);
        let metal = Complex64::new(0.2, 3.0);
        let kz = normal_component(1.0, metal, n0, 0.5);
        assert!(kz.re > 0.0);
        assert!(kz.im > 0.0);
    }

    #[test]
    fn branch_rule() {
        // -0.0 imaginary part puts the principal root on the negative axis
        let w = decaying_sqrt(Complex64::new(-4.0, -0.0));
        assert_eq!(w.re, 0.0);
        assert_abs_diff_eq!(w.im, 2.0, epsilon = 1e-15);

        let w = decaying_sqrt(Complex64::new(-3.0, 4.0));
        assert_abs_diff_eq!(w.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w.im, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn angle30_incidence() {
        // 1 -> 1.31 at 30 degrees refracts to 0.3916126 rad
        let theta = 30.0_f64.to_radians();
        let n = Complex64::new(1.31, 0.0);
        let kz = normal_component(1.0, n, Complex64::new(1.0, 0.0), theta);
        assert_abs_diff_eq!(kz.re, 1.31 * 0.3916126_f64.cos(), epsilon = 1e-6);
        assert_eq!(kz.im, 0.0);
    }

    #[test]
    fn resolve_all_layers() {
        let stack = Stack::from_indices(
            &[
                Complex64::new(1.0, 0.0),
                Complex64::new(3.8, 0.0),
                Complex64::new(1.45, 0.0),
                Complex64::new(3.8, 0.0),
            ],
            &[220.0, 3000.0],
        )
        .unwrap();
        let k0 = 2.0 * PI / 500.056;
        let theta = 65.0_f64.to_radians();
        let waves = resolve(&stack, k0, theta).unwrap();

        assert_eq!(waves.len(), 4);
        // cover: k0 cos(theta)
        assert_abs_diff_eq!(waves[0].kz.re, k0 * theta.cos(), epsilon = 1e-14);
        assert_eq!(waves[1].kz, waves[3].kz);
        for (i, wave) in waves.iter().enumerate() {
            assert_eq!(wave.layer, i);
            assert_eq!(wave.refr_index, stack.layers()[i].refr_index);
        }
    }
}

/// The resolved wave inside one layer of a stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerWave {
    /// Position of the layer in the stack, cover = 0.
    pub layer: usize,
    pub refr_index: Complex64,
    /// Wavevector component normal to the interfaces.
    pub kz: Complex64,
}

/// Complex square root with the decaying branch.
///
/// Takes the principal root and negates it if its real part is negative, or
/// if the real part is zero and the imaginary part negative. The result has
/// `re >= 0`, and `im >= 0` whenever `re == 0`, so a purely imaginary normal
/// wavenumber always describes a wave that decays away from the interface.
pub fn decaying_sqrt(z: Complex64) -> Complex64 {
    let w = z.sqrt();
    if w.re < 0.0 || (w.re == 0.0 && w.im < 0.0) {
        -w
    } else {
        w
    }
}

/// Normal wavevector component in a layer of index `n`, for light incident at
/// `theta` from a cover of index `cover_index`.
pub fn normal_component(k0: f64, n: Complex64, cover_index: Complex64, theta: f64) -> Complex64 {
    let s = cover_index * theta.sin();
    decaying_sqrt(n * n - s * s) * k0
}

/// Resolves the normal wavevector component of every layer in the stack.
///
/// **Context**: Fresnel coefficients and film phases are both expressed through
/// `k_z`, so the driver needs it for every layer before folding the stack.
///
/// **How it Works**: Fixes the lateral wavenumber in the cover medium and
/// evaluates [`normal_component`] for each layer in order.
///
/// Fails with [`StackError::NumericInstability`] naming the first layer whose
/// wavenumber is not finite.
pub fn resolve(stack: &Stack, k0: f64, theta: f64) -> Result<Vec<LayerWave>, StackError> {
    let cover_index = stack.cover().refr_index;

    stack
        .layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let kz = normal_component(k0, layer.refr_index, cover_index, theta);
            if kz.is_finite() {
                Ok(LayerWave {
                    layer: i,
                    refr_index: layer.refr_index,
                    kz,
                })
            } else {
                Err(StackError::NumericInstability {
                    layer: i,
                    quantity: "normal wavevector component",
                })
            }
        })
        .collect()
}
