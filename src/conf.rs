//! Algorithm configuration
//!
//! [`OcConf`] carries the tags that select an algorithm (class, space,
//! initializer) together with the execution controls shared by every
//! algorithm. Algorithm-specific knobs (`mcmc_iter`, `sigma`, `buffer_size`,
//! ...) are kept untyped in [`OcConf::params`] and read by the implementation
//! that understands them.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "oc": "streaming",
//!   "space": "series",
//!   "inner_space": "real",
//!   "window": 10,
//!   "seed": 1367098323,
//!   "sigma": 0.3
//! }
//! ```

use crate::errors::{DistclusError, Result};
use crate::types::{Initializer, Oc, Space};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for one clustering algorithm instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcConf {
    /// Algorithm class
    #[serde(default = "default_oc")]
    pub oc: Oc,
    /// Space the input points live in
    #[serde(default)]
    pub space: Space,
    /// Seeding strategy
    #[serde(default)]
    pub initializer: Initializer,
    /// Run in parallel when the algorithm supports it
    #[serde(default = "default_par")]
    pub par: bool,
    /// Random seed; `None` lets the implementation pick one
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of clusters to initialize with
    #[serde(default = "default_init_k")]
    pub init_k: usize,
    /// Maximum number of iterations (0 = unbounded)
    #[serde(default)]
    pub iter: usize,
    /// Maximum iteration frequency in iterations per second (0 = unbounded)
    #[serde(default)]
    pub iter_freq: f64,
    /// Number of new elements required between two iterations
    #[serde(default)]
    pub data_per_iter: usize,
    /// Run timeout in seconds (0 = none)
    #[serde(default)]
    pub timeout: f64,
    /// Window length of a series space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
    /// Space used inside each window of a series space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_space: Option<Space>,
    /// Algorithm-specific parameters
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

fn default_oc() -> Oc {
    Oc::Mcmc
}
fn default_par() -> bool {
    true
}
fn default_init_k() -> usize {
    2
}

impl Default for OcConf {
    fn default() -> Self {
        Self {
            oc: default_oc(),
            space: Space::default(),
            initializer: Initializer::default(),
            par: default_par(),
            seed: None,
            init_k: default_init_k(),
            iter: 0,
            iter_freq: 0.0,
            data_per_iter: 0,
            timeout: 0.0,
            window: None,
            inner_space: None,
            params: BTreeMap::new(),
        }
    }
}

impl OcConf {
    /// Create a configuration for an algorithm class with default settings
    pub fn new(oc: Oc) -> Self {
        Self {
            oc,
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let conf: Self = serde_json::from_str(json)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.init_k == 0 {
            return Err(DistclusError::invalid_config("init_k must be at least 1"));
        }
        if !self.iter_freq.is_finite() || self.iter_freq < 0.0 {
            return Err(DistclusError::invalid_config(
                "iter_freq must be a non-negative number",
            ));
        }
        if !self.timeout.is_finite() || self.timeout < 0.0 {
            return Err(DistclusError::invalid_config(
                "timeout must be a non-negative number of seconds",
            ));
        }
        match self.space {
            Space::Series => {
                match self.window {
                    None => {
                        return Err(DistclusError::invalid_config(
                            "series space requires a window",
                        ))
                    }
                    Some(0) => {
                        return Err(DistclusError::invalid_config(
                            "window must be at least 1",
                        ))
                    }
                    Some(_) => {}
                }
                if self.inner_space == Some(Space::Series) {
                    return Err(DistclusError::invalid_config(
                        "inner_space cannot itself be a series space",
                    ));
                }
            }
            Space::Real | Space::Complex => {
                if self.window.is_some() || self.inner_space.is_some() {
                    return Err(DistclusError::invalid_config(format!(
                        "window and inner_space only apply to the series space, not {}",
                        self.space
                    )));
                }
            }
        }
        Ok(())
    }

    /// Read a numeric algorithm parameter
    pub fn param_f64(&self, name: &str) -> Option<f64> {
        self.params.get(name).and_then(|v| v.as_f64())
    }

    /// Read a non-negative integer algorithm parameter
    pub fn param_usize(&self, name: &str) -> Option<usize> {
        self.params
            .get(name)
            .and_then(|v| v.as_u64())
            .and_then(|v| usize::try_from(v).ok())
    }

    /// Builder: set the space
    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Builder: set the initializer
    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    /// Builder: set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: enable or disable parallel execution
    pub fn with_par(mut self, par: bool) -> Self {
        self.par = par;
        self
    }

    /// Builder: set the initial number of clusters
    pub fn with_init_k(mut self, init_k: usize) -> Self {
        self.init_k = init_k;
        self
    }

    /// Builder: set the maximum number of iterations
    pub fn with_iter(mut self, iter: usize) -> Self {
        self.iter = iter;
        self
    }

    /// Builder: set the run timeout in seconds
    pub fn with_timeout(mut self, timeout: f64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: configure a series space
    pub fn with_series(mut self, inner_space: Space, window: usize) -> Self {
        self.space = Space::Series;
        self.inner_space = Some(inner_space);
        self.window = Some(window);
        self
    }

    /// Move the configuration to another space.
    ///
    /// Leaving the series space drops `window` and `inner_space`, which have
    /// no meaning elsewhere. Moving into it keeps them, so a series target
    /// still needs a window to validate.
    pub fn switch_space(mut self, space: Space) -> Self {
        if space != Space::Series {
            self.window = None;
            self.inner_space = None;
        }
        self.space = space;
        self
    }

    /// Builder: set an algorithm-specific parameter
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conf_is_valid() {
        let conf = OcConf::default();
        assert!(conf.validate().is_ok());
        assert_eq!(conf.oc, Oc::Mcmc);
        assert_eq!(conf.initializer, Initializer::KMeansPP);
        assert_eq!(conf.space, Space::Real);
        assert!(conf.par);
    }

    #[test]
    fn test_from_json_collects_params() {
        let conf = OcConf::from_json(
            r#"{"oc": "mcmc", "init_k": 2, "seed": 653126513379, "b": 1, "mcmc_iter": 5, "amp": 0.5}"#,
        )
        .unwrap();
        assert_eq!(conf.seed, Some(653126513379));
        assert_eq!(conf.param_usize("mcmc_iter"), Some(5));
        assert_eq!(conf.param_f64("amp"), Some(0.5));
        assert_eq!(conf.param_f64("missing"), None);
    }

    #[test]
    fn test_series_requires_window() {
        let conf = OcConf::new(Oc::Streaming).with_space(Space::Series);
        assert!(matches!(
            conf.validate(),
            Err(DistclusError::InvalidConfig { .. })
        ));

        let conf = OcConf::new(Oc::Streaming).with_series(Space::Real, 10);
        assert!(conf.validate().is_ok());

        let conf = OcConf::new(Oc::Streaming).with_series(Space::Series, 10);
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_window_rejected_outside_series() {
        let mut conf = OcConf::new(Oc::KMeans);
        conf.window = Some(3);
        let err = conf.validate().unwrap_err();
        assert!(err.to_string().contains("not real"));
    }

    #[test]
    fn test_switch_space_drops_series_fields() {
        let series = OcConf::new(Oc::Streaming)
            .with_seed(3)
            .with_series(Space::Complex, 10);

        let real = series.clone().switch_space(Space::Real);
        assert_eq!(real.space, Space::Real);
        assert_eq!((real.window, real.inner_space), (None, None));
        assert_eq!(real.seed, Some(3));
        assert!(real.validate().is_ok());

        let back = series.clone().switch_space(Space::Series);
        assert_eq!(back, series);
        assert!(OcConf::default()
            .switch_space(Space::Series)
            .validate()
            .is_err());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(OcConf::default().with_init_k(0).validate().is_err());
        assert!(OcConf::default().with_timeout(-1.0).validate().is_err());
        assert!(OcConf::default().with_timeout(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_unknown_tag_name_in_json() {
        let err = OcConf::from_json(r#"{"space": "cosinus"}"#).unwrap_err();
        assert!(matches!(err, DistclusError::Serialization { .. }));
    }

    #[test]
    fn test_json_roundtrip_keeps_params() {
        let conf = OcConf::new(Oc::Streaming)
            .with_seed(7)
            .with_param("sigma", 0.3)
            .with_param("buffer_size", 100);
        let back = OcConf::from_json(&conf.to_json().unwrap()).unwrap();
        assert_eq!(back, conf);
    }
}
