//! Reflection coefficients of planar multilayer thin-film stacks.
//!
//! A stack is a cover medium, any number of films and a substrate. For a
//! monochromatic plane wave incident from the cover, [`problem::Problem::solve`]
//! returns the complex amplitude reflection coefficients `r_s` and `r_p`:
//!
//! ```
//! use filmstack::{layer::Stack, problem::Problem};
//! use num_complex::Complex64;
//!
//! let stack = Stack::from_indices(
//!     &[Complex64::new(1.0, 0.0), Complex64::new(1.5, 0.0)],
//!     &[],
//! )?;
//! let reflection = Problem::new(stack, 500.0, 0.0)?.solve()?;
//! assert!((reflection.rs.re + 0.2).abs() < 1e-12);
//! # Ok::<(), filmstack::error::StackError>(())
//! ```

pub mod batch;
pub mod dispersion;
pub mod ellipsometry;
pub mod error;
pub mod film;
pub mod fresnel;
pub mod layer;
pub mod output;
pub mod problem;
pub mod result;
pub mod settings;
pub mod snell;
