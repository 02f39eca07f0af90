//! JSON interface
//!
//! Configurations travel as JSON so algorithm-specific knobs can be passed
//! without a Python signature for each algorithm.

use crate::conf::OcConf;
use pyo3::prelude::*;

/// Validate a JSON configuration and return it normalized (defaults filled in)
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn validate_conf(json_input: &str) -> PyResult<String> {
    let conf = OcConf::from_json(json_input)?;
    Ok(conf.to_json()?)
}
