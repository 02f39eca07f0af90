//! Algorithm seams
//!
//! The crate does not ship clustering algorithms. Implementations plug in
//! through two traits: [`OnlineClust`], one running algorithm instance, and
//! [`AlgorithmFactory`], which builds instances from an [`OcConf`].

use crate::conf::OcConf;
use crate::errors::{DistclusError, Result};
use crate::types::{Elemt, Figure, Space};

/// Result of predicting the cluster of one element
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Centroid of the predicted cluster
    pub centroid: Elemt,
    /// Index of the predicted cluster in [`OnlineClust::centroids`]
    pub label: usize,
}

// ============================================================================
// OnlineClust — one algorithm instance
// ============================================================================

/// A clustering algorithm that receives data incrementally.
///
/// # Contract
///
/// - `push` may be called before and while the algorithm runs.
/// - `run(true)` returns immediately and keeps the algorithm working in the
///   background; `run(false)` returns once the run is over.
/// - `centroids` and `predict` fail with [`DistclusError::NotStarted`] until
///   the algorithm has produced centroids.
/// - `close` stops a background run; further `run` calls may fail.
pub trait OnlineClust: Send {
    /// Add one element to the data set
    fn push(&mut self, elemt: Elemt) -> Result<()>;

    /// Start the algorithm, in the background if `asynchronous`
    fn run(&mut self, asynchronous: bool) -> Result<()>;

    /// Predict the cluster of `elemt`, optionally pushing it afterwards
    fn predict(&mut self, elemt: &[f64], push: bool) -> Result<Prediction>;

    /// Current centroids
    fn centroids(&self) -> Result<Vec<Elemt>>;

    /// Stop the algorithm
    fn close(&mut self) -> Result<()>;

    /// Current configuration
    fn conf(&self) -> &OcConf;

    /// Switch to a new configuration
    fn set_conf(&mut self, conf: OcConf) -> Result<()>;

    /// Switch the space used to compare elements
    fn set_space(&mut self, space: Space, conf: &OcConf) -> Result<()>;

    /// Report a numeric figure about the run
    fn figure(&self, figure: Figure) -> Result<f64> {
        Err(DistclusError::unsupported(format!(
            "{} does not report {}",
            self.conf().oc,
            figure
        )))
    }
}

// ============================================================================
// AlgorithmFactory — builds instances
// ============================================================================

/// Builds algorithm instances from a validated configuration.
///
/// `initial` holds the elements the algorithm starts with; it may be empty.
pub trait AlgorithmFactory: Send + Sync {
    fn create(&self, conf: &OcConf, initial: Vec<Elemt>) -> Result<Box<dyn OnlineClust>>;
}

impl<F> AlgorithmFactory for F
where
    F: Fn(&OcConf, Vec<Elemt>) -> Result<Box<dyn OnlineClust>> + Send + Sync,
{
    fn create(&self, conf: &OcConf, initial: Vec<Elemt>) -> Result<Box<dyn OnlineClust>> {
        self(conf, initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Oc;

    struct Idle {
        conf: OcConf,
    }

    impl OnlineClust for Idle {
        fn push(&mut self, _elemt: Elemt) -> Result<()> {
            Ok(())
        }
        fn run(&mut self, _asynchronous: bool) -> Result<()> {
            Ok(())
        }
        fn predict(&mut self, _elemt: &[f64], _push: bool) -> Result<Prediction> {
            Err(DistclusError::NotStarted)
        }
        fn centroids(&self) -> Result<Vec<Elemt>> {
            Err(DistclusError::NotStarted)
        }
        fn close(&mut self) -> Result<()> {
            Ok(())
        }
        fn conf(&self) -> &OcConf {
            &self.conf
        }
        fn set_conf(&mut self, conf: OcConf) -> Result<()> {
            self.conf = conf;
            Ok(())
        }
        fn set_space(&mut self, space: Space, _conf: &OcConf) -> Result<()> {
            self.conf.space = space;
            Ok(())
        }
    }

    #[test]
    fn test_closure_factory() {
        let factory = |conf: &OcConf, _initial: Vec<Elemt>| -> Result<Box<dyn OnlineClust>> {
            Ok(Box::new(Idle { conf: conf.clone() }))
        };
        let algo = factory.create(&OcConf::new(Oc::Knn), Vec::new()).unwrap();
        assert_eq!(algo.conf().oc, Oc::Knn);
        assert!(algo.centroids().unwrap_err().is_not_started());
    }

    #[test]
    fn test_default_figure_is_unsupported() {
        let algo = Idle {
            conf: OcConf::new(Oc::KMeans),
        };
        let err = algo.figure(Figure::MaxDistance).unwrap_err();
        assert_eq!(
            err,
            DistclusError::unsupported("kmeans does not report max_distance")
        );
    }
}
