//! Python bindings via PyO3
//!
//! This module provides the Python interface for distclus.

pub mod json;
pub mod native;

use crate::errors::DistclusError;
use crate::types::{Figure, Initializer, Oc, Space, Tag};
use pyo3::prelude::*;

impl From<DistclusError> for PyErr {
    fn from(err: DistclusError) -> PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

fn add_symbols<T: Tag>(m: &Bound<'_, PyModule>) -> PyResult<()> {
    for tag in T::ALL {
        m.add(tag.symbol(), tag.ordinal())?;
    }
    Ok(())
}

/// Register all Python classes and functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Header symbols (I_RANDOM, S_REAL, O_MCMC, F_MAX_DISTANCE, ...)
    add_symbols::<Initializer>(m)?;
    add_symbols::<Space>(m)?;
    add_symbols::<Oc>(m)?;
    add_symbols::<Figure>(m)?;

    // Native interface
    m.add_class::<native::PyOcConf>()?;
    m.add_function(wrap_pyfunction!(native::initializer, m)?)?;
    m.add_function(wrap_pyfunction!(native::space, m)?)?;
    m.add_function(wrap_pyfunction!(native::oc, m)?)?;
    m.add_function(wrap_pyfunction!(native::figure, m)?)?;
    m.add_function(wrap_pyfunction!(native::initializer_name, m)?)?;
    m.add_function(wrap_pyfunction!(native::space_name, m)?)?;
    m.add_function(wrap_pyfunction!(native::oc_name, m)?)?;
    m.add_function(wrap_pyfunction!(native::figure_name, m)?)?;

    // JSON interface functions
    m.add_function(wrap_pyfunction!(json::validate_conf, m)?)?;

    Ok(())
}
