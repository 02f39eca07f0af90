//! # distclus
//!
//! Configuration vocabulary and binding facade for online clustering
//! algorithms.
//!
//! The crate defines the tags shared with foreign callers (initializer
//! strategies, data spaces, algorithm classes), keeps their integer ordinals
//! stable, and drives pluggable algorithms through descriptors and flat
//! buffers.
//!
//! ## Features
//!
//! - **Stable ordinals**: every tag converts to and from its C header ordinal;
//!   out-of-range ordinals are rejected with [`DistclusError::InvalidVariant`]
//! - **Descriptor facade**: create, push, run, predict, read centroids and free
//!   algorithms by integer handle
//! - **Late initialization**: buffer data until an algorithm can be built
//! - **Python bindings**: the vocabulary is exposed via PyO3

pub mod algorithm;
pub mod buffer;
pub mod conf;
pub mod errors;
pub mod facade;
pub mod late;
pub mod registry;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{DistclusError, Result};
pub use types::{Elemt, Figure, Initializer, Oc, Space, Tag};

// Re-export main functionality
pub use algorithm::{AlgorithmFactory, OnlineClust, Prediction};
pub use buffer::{elemts_from_array, elemts_to_array, labels_to_array, FlatArray};
pub use conf::OcConf;
pub use facade::Facade;
pub use late::LateAlgo;
pub use registry::{AlgoHandle, AlgorithmRegistry, Descriptor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
