use filmstack::{
    ellipsometry::{psi_delta, reflected_state},
    error::StackError,
    fresnel::ParallelConvention,
    layer::Stack,
    problem::Problem,
    result::Reflection,
};
use num_complex::Complex64;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(e: StackError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn solve(
    refr_indices: &[(f64, f64)],
    thicknesses: &[f64],
    wavelength: f64,
    angle: f64,
    born_wolf: bool,
) -> PyResult<Reflection> {
    let indices: Vec<Complex64> = refr_indices
        .iter()
        .map(|&(re, im)| Complex64::new(re, im))
        .collect();
    let convention = if born_wolf {
        ParallelConvention::BornWolf
    } else {
        ParallelConvention::Symmetric
    };

    let stack = Stack::from_indices(&indices, thicknesses).map_err(to_py_err)?;
    Problem::new(stack, wavelength, angle)
        .map_err(to_py_err)?
        .with_convention(convention)
        .solve()
        .map_err(to_py_err)
}

/// Reflection coefficients of a stack, as ((re(rs), im(rs)), (re(rp), im(rp))).
///
/// `refr_indices` lists (re, im) pairs from cover to substrate, `thicknesses`
/// one value per film, and `angle` is in radians.
#[pyfunction]
#[pyo3(signature = (refr_indices, thicknesses, wavelength, angle, born_wolf = false))]
fn reflect(
    refr_indices: Vec<(f64, f64)>,
    thicknesses: Vec<f64>,
    wavelength: f64,
    angle: f64,
    born_wolf: bool,
) -> PyResult<((f64, f64), (f64, f64))> {
    let r = solve(&refr_indices, &thicknesses, wavelength, angle, born_wolf)?;
    Ok(((r.rs.re, r.rs.im), (r.rp.re, r.rp.im)))
}

/// Ellipsometric angles (psi, delta) in radians. Uses the Born & Wolf
/// convention unless `born_wolf` is false.
#[pyfunction]
#[pyo3(signature = (refr_indices, thicknesses, wavelength, angle, born_wolf = true))]
fn ellipsometry(
    refr_indices: Vec<(f64, f64)>,
    thicknesses: Vec<f64>,
    wavelength: f64,
    angle: f64,
    born_wolf: bool,
) -> PyResult<(f64, f64)> {
    let r = solve(&refr_indices, &thicknesses, wavelength, angle, born_wolf)?;
    let e = psi_delta(&r).map_err(to_py_err)?;
    Ok((e.psi, e.delta))
}

/// Reflected Jones vector ((re(E_p), im(E_p)), (re(E_s), im(E_s))) for light
/// passed through a linear polarizer at `polarizer` radians from the plane of
/// incidence.
#[pyfunction]
#[pyo3(signature = (refr_indices, thicknesses, wavelength, angle, polarizer, born_wolf = true))]
fn reflected_field(
    refr_indices: Vec<(f64, f64)>,
    thicknesses: Vec<f64>,
    wavelength: f64,
    angle: f64,
    polarizer: f64,
    born_wolf: bool,
) -> PyResult<((f64, f64), (f64, f64))> {
    let r = solve(&refr_indices, &thicknesses, wavelength, angle, born_wolf)?;
    let field = reflected_state(&r, polarizer);
    Ok(((field[0].re, field[0].im), (field[1].re, field[1].im)))
}

/// Thin-film stack reflection coefficients implemented in Rust.
#[pymodule]
fn _filmstack_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reflect, m)?)?;
    m.add_function(wrap_pyfunction!(ellipsometry, m)?)?;
    m.add_function(wrap_pyfunction!(reflected_field, m)?)?;
    Ok(())
}
