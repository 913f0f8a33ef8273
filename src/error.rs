//! Error taxonomy for a single stack evaluation.
//!
//! Every failure is local to one evaluation and no partial result is ever
//! returned. Nothing is retried: the computation is a deterministic function
//! of its inputs, so the only recovery is to correct them.

use thiserror::Error;

/// Errors that can occur while validating or evaluating a layer stack.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StackError {
    /// The stack description or illumination parameters are invalid.
    /// Detected before any computation begins.
    #[error("Malformed stack: {0}")]
    MalformedStack(String),

    /// A quantity is mathematically undefined, e.g. a Fresnel coefficient
    /// with an exactly zero denominator.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A NaN or infinite value appeared mid-computation.
    #[error("Numeric instability at layer {layer}: non-finite {quantity}")]
    NumericInstability { layer: usize, quantity: &'static str },
}
