//! Planar layer stacks.
//!
//! A [`Stack`] is an ordered sequence of [`Layer`]s bounded by two
//! semi-infinite media. Light arrives from the first layer (the cover) and the
//! last layer is the substrate it would exit into. Every layer in between is a
//! film of finite thickness.
//!
//! ```text
//!  layer 0        cover (semi-infinite)    \ incident
//! ---------------------------------------------
//!  layer 1        film, thickness d_1
//! ---------------------------------------------
//!  ...
//! ---------------------------------------------
//!  layer N-1      substrate (semi-infinite)
//! ```
//!
//! Stacks are validated on construction and immutable afterwards.

use num_complex::Complex64;

use crate::error::StackError;


/// A homogeneous layer with a complex refractive index.
///
/// The thickness is `None` for the two semi-infinite end media and `Some(d)`
/// for a film, in the same length units as the wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub refr_index: Complex64,
    pub thickness: Option<f64>,
}

impl Layer {
    /// A semi-infinite bounding medium.
    pub fn semi_infinite(refr_index: Complex64) -> Self {
        Self {
            refr_index,
            thickness: None,
        }
    }

    /// A film of finite thickness.
    pub fn film(refr_index: Complex64, thickness: f64) -> Self {
        Self {
            refr_index,
            thickness: Some(thickness),
        }
    }

    pub fn is_semi_infinite(&self) -> bool {
        self.thickness.is_none()
    }
}

/// A validated, ordered sequence of at least two layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    /// Validates a layer sequence and wraps it as a stack.
    ///
    /// Requires at least two layers, semi-infinite end layers, finite positive
    /// film thicknesses and finite refractive indices.
    pub fn new(layers: Vec<Layer>) -> Result<Self, StackError> {
        if layers.len() < 2 {
            return Err(StackError::MalformedStack(format!(
                "a stack needs at least 2 layers, got {}",
                layers.len()
            )));
        }

        let last = layers.len() - 1;
        for (i, layer) in layers.iter().enumerate() {
            let n = layer.refr_index;
            if !(n.re.is_finite() && n.im.is_finite()) {
                return Err(StackError::MalformedStack(format!(
                    "layer {} has a non-finite refractive index {}",
                    i, n
                )));
            }

            match (i == 0 || i == last, layer.thickness) {
                (true, Some(d)) => {
                    return Err(StackError::MalformedStack(format!(
                        "end layer {} must be semi-infinite, got thickness {}",
                        i, d
                    )));
                }
                (false, None) => {
                    return Err(StackError::MalformedStack(format!(
                        "film {} has no thickness",
                        i
                    )));
                }
                (false, Some(d)) if !(d.is_finite() && d > 0.0) => {
                    return Err(StackError::MalformedStack(format!(
                        "film {} must have a finite positive thickness, got {}",
                        i, d
                    )));
                }
                _ => {}
            }
        }

        Ok(Self { layers })
    }

    /// Builds a stack from parallel lists of refractive indices (cover first,
    /// substrate last) and film thicknesses (one per interior layer).
    pub fn from_indices(
        refr_indices: &[Complex64],
        thicknesses: &[f64],
    ) -> Result<Self, StackError> {
        if refr_indices.len() < 2 {
            return Err(StackError::MalformedStack(format!(
                "a stack needs at least 2 refractive indices, got {}",
                refr_indices.len()
            )));
        }
        let num_films = refr_indices.len() - 2;
        if thicknesses.len() != num_films {
            return Err(StackError::MalformedStack(format!(
                "{} refractive indices need {} film thicknesses, got {}",
                refr_indices.len(),
                num_films,
                thicknesses.len()
            )));
        }

        let last = refr_indices.len() - 1;
        let layers = refr_indices
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                if i == 0 || i == last {
                    Layer::semi_infinite(n)
                } else {
                    Layer::film(n, thicknesses[i - 1])
                }
            })
            .collect();

        Self::new(layers)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false for a validated stack; provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn num_films(&self) -> usize {
        self.layers.len() - 2
    }

    /// The semi-infinite medium the light is incident from.
    pub fn cover(&self) -> &Layer {
        &self.layers[0]
    }

    /// The semi-infinite medium terminating the stack.
    pub fn substrate(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }
}
