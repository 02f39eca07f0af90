//! Native Python interface
//!
//! Name/ordinal lookups for the configuration vocabulary and a configuration
//! class validated on construction.

use crate::conf::OcConf;
use crate::types::{Figure, Initializer, Oc, Space, Tag};
use pyo3::prelude::*;

/// Ordinal of an initializer name (`random`, `given`, `kmeanspp`)
#[pyfunction]
pub fn initializer(name: &str) -> PyResult<i32> {
    Ok(Initializer::from_name(name)?.ordinal())
}

/// Ordinal of a space name (`real`/`euclid`, `complex`, `series`)
#[pyfunction]
pub fn space(name: &str) -> PyResult<i32> {
    Ok(Space::from_name(name)?.ordinal())
}

/// Ordinal of an algorithm class name (`kmeans`, `mcmc`, `knn`, `streaming`)
#[pyfunction]
pub fn oc(name: &str) -> PyResult<i32> {
    Ok(Oc::from_name(name)?.ordinal())
}

/// Ordinal of a figure name (`iterations`, `max_distance`)
#[pyfunction]
pub fn figure(name: &str) -> PyResult<i32> {
    Ok(Figure::from_name(name)?.ordinal())
}

#[pyfunction]
pub fn initializer_name(ordinal: i32) -> PyResult<&'static str> {
    Ok(Initializer::from_ordinal(ordinal)?.as_str())
}

#[pyfunction]
pub fn space_name(ordinal: i32) -> PyResult<&'static str> {
    Ok(Space::from_ordinal(ordinal)?.as_str())
}

#[pyfunction]
pub fn oc_name(ordinal: i32) -> PyResult<&'static str> {
    Ok(Oc::from_ordinal(ordinal)?.as_str())
}

#[pyfunction]
pub fn figure_name(ordinal: i32) -> PyResult<&'static str> {
    Ok(Figure::from_ordinal(ordinal)?.as_str())
}

/// Configuration for one clustering algorithm
#[pyclass(name = "OcConf")]
#[derive(Clone)]
pub struct PyOcConf {
    inner: OcConf,
}

#[pymethods]
impl PyOcConf {
    #[new]
    #[pyo3(signature = (
        oc="mcmc",
        space="real",
        initializer="kmeanspp",
        par=true,
        seed=None,
        init_k=2,
        iter=0,
        iter_freq=0.0,
        data_per_iter=0,
        timeout=0.0,
        window=None,
        inner_space=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        oc: &str,
        space: &str,
        initializer: &str,
        par: bool,
        seed: Option<u64>,
        init_k: usize,
        iter: usize,
        iter_freq: f64,
        data_per_iter: usize,
        timeout: f64,
        window: Option<usize>,
        inner_space: Option<&str>,
    ) -> PyResult<Self> {
        let inner_space = match inner_space {
            Some(name) => Some(Space::from_name(name)?),
            None => None,
        };

        let conf = OcConf {
            oc: Oc::from_name(oc)?,
            space: Space::from_name(space)?,
            initializer: Initializer::from_name(initializer)?,
            par,
            seed,
            init_k,
            iter,
            iter_freq,
            data_per_iter,
            timeout,
            window,
            inner_space,
            params: Default::default(),
        };
        conf.validate()?;

        Ok(Self { inner: conf })
    }

    #[getter]
    fn oc(&self) -> i32 {
        self.inner.oc.ordinal()
    }

    #[getter]
    fn space(&self) -> i32 {
        self.inner.space.ordinal()
    }

    #[getter]
    fn initializer(&self) -> i32 {
        self.inner.initializer.ordinal()
    }

    #[getter]
    fn seed(&self) -> Option<u64> {
        self.inner.seed
    }

    /// Serialize to the JSON accepted by `validate_conf`
    fn to_json(&self) -> PyResult<String> {
        Ok(self.inner.to_json()?)
    }

    fn __repr__(&self) -> String {
        format!(
            "OcConf(oc='{}', space='{}', initializer='{}', init_k={})",
            self.inner.oc, self.inner.space, self.inner.initializer, self.inner.init_k
        )
    }
}
