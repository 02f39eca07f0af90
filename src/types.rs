//! Core types for distclus
//!
//! This module defines the configuration vocabulary shared with foreign
//! callers: initializer strategies, data spaces, algorithm classes and the
//! figures an algorithm can report. Every tag keeps the ordinal it has in the
//! C binding header, so values can cross an FFI boundary as plain integers.

use crate::errors::{DistclusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A real-valued point
pub type Elemt = Vec<f64>;

// ============================================================================
// Tag trait
// ============================================================================

/// A closed set of symbolic tags with stable integer ordinals.
pub trait Tag: Copy + Eq + 'static {
    /// Name of the enumeration, used in error messages
    const KIND: &'static str;

    /// Every variant, in ordinal order
    const ALL: &'static [Self];

    /// The integer ordinal of this variant
    fn ordinal(self) -> i32;

    /// Canonical lowercase name
    fn as_str(self) -> &'static str;

    /// Identifier of this variant in the C binding header
    fn symbol(self) -> &'static str;

    /// Extra names accepted by [`Tag::from_name`]
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Look up a variant by ordinal.
    ///
    /// Ordinals outside `0..ALL.len()` fail with
    /// [`DistclusError::InvalidVariant`].
    fn from_ordinal(ordinal: i32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.ordinal() == ordinal)
            .ok_or_else(|| DistclusError::invalid_variant(Self::KIND, ordinal))
    }

    /// Look up a variant by name, ignoring case. Header symbols are accepted too.
    fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| {
                tag.as_str() == wanted
                    || tag.symbol().eq_ignore_ascii_case(&wanted)
                    || tag.aliases().contains(&wanted.as_str())
            })
            .ok_or_else(|| DistclusError::unknown_name(Self::KIND, name))
    }
}

// ============================================================================
// Initializer
// ============================================================================

/// Strategy used to seed the initial cluster state
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Initializer {
    /// Centroids drawn uniformly from the data
    Random = 0,
    /// Centroids supplied by the caller
    Given = 1,
    /// k-means++ seeding
    #[default]
    #[serde(alias = "kmeans++")]
    KMeansPP = 2,
}

impl Initializer {
    pub const ALL: [Initializer; 3] = [Self::Random, Self::Given, Self::KMeansPP];
}

impl Tag for Initializer {
    const KIND: &'static str = "initializer";
    const ALL: &'static [Self] = &Initializer::ALL;

    fn ordinal(self) -> i32 {
        self as i32
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Given => "given",
            Self::KMeansPP => "kmeanspp",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Random => "I_RANDOM",
            Self::Given => "I_GIVEN",
            Self::KMeansPP => "I_KMEANSPP",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::KMeansPP => &["kmeans++"],
            Self::Random | Self::Given => &[],
        }
    }
}

// ============================================================================
// Space
// ============================================================================

/// Mathematical domain of input points
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Real vectors under the euclidean distance
    #[default]
    #[serde(alias = "euclid", alias = "euclidean")]
    Real = 0,
    /// Complex vectors
    Complex = 1,
    /// Time series compared window by window in an inner space
    #[serde(alias = "timeseries")]
    Series = 2,
}

impl Space {
    pub const ALL: [Space; 3] = [Self::Real, Self::Complex, Self::Series];
}

impl Tag for Space {
    const KIND: &'static str = "space";
    const ALL: &'static [Self] = &Space::ALL;

    fn ordinal(self) -> i32 {
        self as i32
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Complex => "complex",
            Self::Series => "series",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Real => "S_REAL",
            Self::Complex => "S_COMPLEX",
            Self::Series => "S_SERIES",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Real => &["euclid", "euclidean"],
            Self::Complex => &[],
            Self::Series => &["timeseries"],
        }
    }
}

// ============================================================================
// Oc (online clustering algorithm class)
// ============================================================================

/// Class of clustering algorithm
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oc {
    KMeans = 0,
    Mcmc = 1,
    Knn = 2,
    Streaming = 3,
}

impl Oc {
    pub const ALL: [Oc; 4] = [Self::KMeans, Self::Mcmc, Self::Knn, Self::Streaming];
}

impl Tag for Oc {
    const KIND: &'static str = "oc";
    const ALL: &'static [Self] = &Oc::ALL;

    fn ordinal(self) -> i32 {
        self as i32
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::KMeans => "kmeans",
            Self::Mcmc => "mcmc",
            Self::Knn => "knn",
            Self::Streaming => "streaming",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::KMeans => "O_KMEANS",
            Self::Mcmc => "O_MCMC",
            Self::Knn => "O_KNN",
            Self::Streaming => "O_STREAMING",
        }
    }
}

// ============================================================================
// Figure
// ============================================================================

/// Numeric figures an algorithm can report about its run
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Figure {
    /// Number of iterations done so far
    Iterations = 0,
    /// Largest distance observed between an element and its centroid
    MaxDistance = 1,
}

impl Figure {
    pub const ALL: [Figure; 2] = [Self::Iterations, Self::MaxDistance];
}

impl Tag for Figure {
    const KIND: &'static str = "figure";
    const ALL: &'static [Self] = &Figure::ALL;

    fn ordinal(self) -> i32 {
        self as i32
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Iterations => "iterations",
            Self::MaxDistance => "max_distance",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Iterations => "F_ITERATIONS",
            Self::MaxDistance => "F_MAX_DISTANCE",
        }
    }
}

// ============================================================================
// Std conversions
// ============================================================================

macro_rules! impl_tag_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<i32> for $ty {
            type Error = DistclusError;

            fn try_from(ordinal: i32) -> Result<Self> {
                <$ty as Tag>::from_ordinal(ordinal)
            }
        }

        impl From<$ty> for i32 {
            fn from(tag: $ty) -> i32 {
                tag.ordinal()
            }
        }

        impl FromStr for $ty {
            type Err = DistclusError;

            fn from_str(name: &str) -> Result<Self> {
                <$ty as Tag>::from_name(name)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

impl_tag_conversions!(Initializer, Space, Oc, Figure);
