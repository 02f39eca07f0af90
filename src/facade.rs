//! Binding facade
//!
//! The facade is the surface a foreign caller sees: algorithms are created
//! from tags, addressed by [`Descriptor`], and fed with row-major `f64`
//! buffers. Integer ordinals coming from the caller are turned into tags
//! here, so an out-of-range value is rejected before anything is built.

use crate::algorithm::AlgorithmFactory;
use crate::buffer::{elemts_from_array, elemts_to_array, labels_to_array, FlatArray};
use crate::conf::OcConf;
use crate::errors::{DistclusError, Result};
use crate::registry::{AlgorithmRegistry, Descriptor};
use crate::types::{Figure, Initializer, Oc, Space, Tag};
use tracing::{debug, warn};

/// Creates, drives and releases algorithm instances on behalf of a caller
pub struct Facade<F: AlgorithmFactory> {
    factory: F,
    registry: AlgorithmRegistry,
}

impl<F: AlgorithmFactory> Facade<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            registry: AlgorithmRegistry::new(),
        }
    }

    /// The registry holding this facade's algorithms
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Build and register an algorithm.
    ///
    /// `data` is a `rows x cols` row-major buffer of initial elements; pass an
    /// empty buffer with zero rows to start without data.
    pub fn create_oc(
        &self,
        conf: &OcConf,
        data: &[f64],
        rows: usize,
        cols: usize,
    ) -> Result<Descriptor> {
        conf.validate()?;
        let initial = elemts_from_array(data, rows, cols)?;
        let algo = self.factory.create(conf, initial)?;
        let descr = self.registry.register(algo)?;
        debug!(
            descr = descr.0,
            oc = conf.oc.as_str(),
            space = conf.space.as_str(),
            initializer = conf.initializer.as_str(),
            initial = rows,
            "created algorithm"
        );
        Ok(descr)
    }

    /// Build and register an algorithm from raw ordinals.
    ///
    /// The ordinals override the matching fields of `conf`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_oc_from_ordinals(
        &self,
        oc: i32,
        space: i32,
        initializer: i32,
        conf: &OcConf,
        data: &[f64],
        rows: usize,
        cols: usize,
    ) -> Result<Descriptor> {
        let conf = OcConf {
            oc: Oc::from_ordinal(oc)?,
            initializer: Initializer::from_ordinal(initializer)?,
            ..conf.clone()
        }
        .switch_space(Space::from_ordinal(space)?);
        self.create_oc(&conf, data, rows, cols)
    }

    /// Push a buffer of elements
    pub fn push(&self, descr: Descriptor, data: &[f64], rows: usize, cols: usize) -> Result<()> {
        let elemts = elemts_from_array(data, rows, cols)?;
        self.registry.with_algorithm(descr, |algo| {
            for elemt in elemts {
                algo.push(elemt)?;
            }
            Ok(())
        })
    }

    /// Run an algorithm, in the background if `asynchronous`
    pub fn run(&self, descr: Descriptor, asynchronous: bool) -> Result<()> {
        debug!(descr = descr.0, asynchronous, "run");
        self.registry
            .with_algorithm(descr, |algo| algo.run(asynchronous))
    }

    /// Push a buffer, run to completion, then close
    pub fn fit(&self, descr: Descriptor, data: &[f64], rows: usize, cols: usize) -> Result<()> {
        let elemts = elemts_from_array(data, rows, cols)?;
        debug!(descr = descr.0, rows, "fit");
        self.registry.with_algorithm(descr, |algo| {
            for elemt in elemts {
                algo.push(elemt)?;
            }
            algo.run(false)?;
            algo.close()
        })
    }

    /// Predict the label of every element in the buffer
    pub fn predict(
        &self,
        descr: Descriptor,
        data: &[f64],
        rows: usize,
        cols: usize,
        push: bool,
    ) -> Result<Vec<i64>> {
        let elemts = elemts_from_array(data, rows, cols)?;
        let labels = self.registry.with_algorithm(descr, |algo| {
            elemts
                .iter()
                .map(|elemt| algo.predict(elemt, push).map(|p| p.label))
                .collect::<Result<Vec<usize>>>()
        })?;
        Ok(labels_to_array(&labels))
    }

    /// Current centroids as a row-major buffer
    pub fn real_centroids(&self, descr: Descriptor) -> Result<FlatArray> {
        let centroids = self
            .registry
            .with_algorithm(descr, |algo| algo.centroids())?;
        elemts_to_array(&centroids)
    }

    /// Read a numeric figure
    pub fn figure(&self, descr: Descriptor, figure: Figure) -> Result<f64> {
        self.registry.with_algorithm(descr, |algo| algo.figure(figure))
    }

    /// Stop an algorithm without releasing it
    pub fn close(&self, descr: Descriptor) -> Result<()> {
        debug!(descr = descr.0, "close");
        self.registry.with_algorithm(descr, |algo| algo.close())
    }

    /// Stop an algorithm and release its descriptor.
    ///
    /// The descriptor is released even when closing fails.
    pub fn free(&self, descr: Descriptor) -> Result<()> {
        let closed = self.close(descr);
        if let Err(DistclusError::UnknownDescriptor { .. }) = closed {
            return closed;
        }
        self.registry.unregister(descr);
        if let Err(err) = &closed {
            warn!(descr = descr.0, error = %err, "algorithm failed to close before release");
        }
        closed
    }

    /// Switch an algorithm's configuration
    pub fn set_conf(&self, descr: Descriptor, conf: OcConf) -> Result<()> {
        conf.validate()?;
        self.registry.with_algorithm(descr, |algo| algo.set_conf(conf))
    }

    /// Switch an algorithm's space.
    ///
    /// Without `conf`, the algorithm's current configuration is used to
    /// parameterize the new space; its series settings are dropped when the
    /// new space is not a series.
    pub fn set_space(&self, descr: Descriptor, space: Space, conf: Option<OcConf>) -> Result<()> {
        self.registry.with_algorithm(descr, |algo| {
            let conf = match conf {
                Some(conf) => conf,
                None => algo.conf().clone(),
            }
            .switch_space(space);
            conf.validate()?;
            algo.set_space(space, &conf)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{OnlineClust, Prediction};
    use crate::types::Elemt;

    /// Keeps the first element pushed as its only centroid.
    struct First {
        conf: OcConf,
        data: Vec<Elemt>,
        started: bool,
        closed: bool,
    }

    impl OnlineClust for First {
        fn push(&mut self, elemt: Elemt) -> Result<()> {
            if self.closed {
                return Err(DistclusError::algorithm("closed"));
            }
            self.data.push(elemt);
            Ok(())
        }
        fn run(&mut self, _asynchronous: bool) -> Result<()> {
            self.started = true;
            Ok(())
        }
        fn predict(&mut self, elemt: &[f64], push: bool) -> Result<Prediction> {
            let centroid = self.centroids()?.remove(0);
            if push {
                self.data.push(elemt.to_vec());
            }
            Ok(Prediction { centroid, label: 0 })
        }
        fn centroids(&self) -> Result<Vec<Elemt>> {
            match (self.started, self.data.first()) {
                (true, Some(first)) => Ok(vec![first.clone()]),
                _ => Err(DistclusError::NotStarted),
            }
        }
        fn close(&mut self) -> Result<()> {
            self.closed = true;
            Ok(())
        }
        fn conf(&self) -> &OcConf {
            &self.conf
        }
        fn set_conf(&mut self, conf: OcConf) -> Result<()> {
            self.conf = conf;
            Ok(())
        }
        fn set_space(&mut self, space: Space, conf: &OcConf) -> Result<()> {
            self.conf = OcConf {
                space,
                ..conf.clone()
            };
            Ok(())
        }
        fn figure(&self, figure: Figure) -> Result<f64> {
            match figure {
                Figure::Iterations => Ok(self.started as u8 as f64),
                Figure::MaxDistance => Ok(0.0),
            }
        }
    }

    fn facade() -> Facade<impl AlgorithmFactory> {
        Facade::new(|conf: &OcConf, initial: Vec<Elemt>| -> Result<Box<dyn OnlineClust>> {
            Ok(Box::new(First {
                conf: conf.clone(),
                data: initial,
                started: false,
                closed: false,
            }))
        })
    }

    #[test]
    fn test_push_run_centroids() {
        let facade = facade();
        let descr = facade.create_oc(&OcConf::default(), &[], 0, 0).unwrap();

        assert!(facade.real_centroids(descr).unwrap_err().is_not_started());

        facade.push(descr, &[2.0, 4.0, 30.0, -15.0], 2, 2).unwrap();
        facade.run(descr, false).unwrap();

        let centroids = facade.real_centroids(descr).unwrap();
        assert_eq!((centroids.rows(), centroids.cols()), (1, 2));
        assert_eq!(centroids.data(), &[2.0, 4.0][..]);
        assert_eq!(facade.figure(descr, Figure::Iterations).unwrap(), 1.0);
    }

    #[test]
    fn test_fit_runs_and_closes() {
        let facade = facade();
        let descr = facade.create_oc(&OcConf::default(), &[], 0, 0).unwrap();

        facade.fit(descr, &[2.0, 4.0, 30.0, -15.0], 2, 2).unwrap();
        let centroids = facade.real_centroids(descr).unwrap();
        assert_eq!(centroids.data(), &[2.0, 4.0][..]);
        assert_eq!(facade.figure(descr, Figure::Iterations).unwrap(), 1.0);
        // Closed once fitted.
        assert_eq!(
            facade.push(descr, &[1.0, 1.0], 1, 2).unwrap_err(),
            DistclusError::algorithm("closed")
        );

        assert!(matches!(
            facade.fit(descr, &[1.0], 1, 2),
            Err(DistclusError::InvalidShape { .. })
        ));
        facade.free(descr).unwrap();
        assert!(facade.fit(descr, &[], 0, 2).is_err());
    }

    #[test]
    fn test_predict_labels() {
        let facade = facade();
        let descr = facade
            .create_oc(&OcConf::default(), &[1.0, 1.0], 1, 2)
            .unwrap();
        facade.run(descr, true).unwrap();
        let labels = facade.predict(descr, &[0.0, 0.0, 5.0, 5.0], 2, 2, true).unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn test_ordinal_boundary() {
        let facade = facade();
        let conf = OcConf::default();
        let descr = facade
            .create_oc_from_ordinals(3, 0, 2, &conf, &[], 0, 0)
            .unwrap();
        let oc = facade
            .registry()
            .with_algorithm(descr, |algo| Ok(algo.conf().oc))
            .unwrap();
        assert_eq!(oc, Oc::Streaming);

        let err = facade
            .create_oc_from_ordinals(0, 0, 3, &conf, &[], 0, 0)
            .unwrap_err();
        assert_eq!(err, DistclusError::invalid_variant("initializer", 3));
        assert_eq!(facade.registry().len(), 1);
    }

    #[test]
    fn test_invalid_conf_is_not_registered() {
        let facade = facade();
        let conf = OcConf::default().with_init_k(0);
        assert!(facade.create_oc(&conf, &[], 0, 0).is_err());
        assert!(facade.registry().is_empty());
    }

    #[test]
    fn test_free_releases_descriptor() {
        let facade = facade();
        let descr = facade.create_oc(&OcConf::default(), &[], 0, 0).unwrap();
        facade.free(descr).unwrap();
        assert!(facade.registry().get(descr).is_none());
        assert_eq!(
            facade.free(descr).unwrap_err(),
            DistclusError::unknown_descriptor(descr.0)
        );
        assert!(facade.run(descr, false).is_err());
    }

    #[test]
    fn test_shape_mismatch_leaves_algorithm_untouched() {
        let facade = facade();
        let descr = facade.create_oc(&OcConf::default(), &[], 0, 0).unwrap();
        assert!(facade.push(descr, &[1.0, 2.0, 3.0], 2, 2).is_err());
        facade.run(descr, false).unwrap();
        assert!(facade.real_centroids(descr).unwrap_err().is_not_started());
    }

    #[test]
    fn test_set_space_reuses_current_conf() {
        let facade = facade();
        let conf = OcConf::default().with_seed(42);
        let descr = facade.create_oc(&conf, &[], 0, 0).unwrap();

        facade.set_space(descr, Space::Complex, None).unwrap();
        let current = facade
            .registry()
            .with_algorithm(descr, |algo| Ok(algo.conf().clone()))
            .unwrap();
        assert_eq!(current.space, Space::Complex);
        assert_eq!(current.seed, Some(42));

        // A series space needs a window.
        assert!(facade.set_space(descr, Space::Series, None).is_err());
        let series = OcConf::default().with_series(Space::Real, 5);
        facade.set_space(descr, Space::Series, Some(series)).unwrap();
    }

    #[test]
    fn test_set_space_leaves_series() {
        let facade = facade();
        let conf = OcConf::new(Oc::Streaming).with_series(Space::Real, 10);
        let descr = facade.create_oc(&conf, &[], 0, 0).unwrap();

        facade.set_space(descr, Space::Real, None).unwrap();
        let current = facade
            .registry()
            .with_algorithm(descr, |algo| Ok(algo.conf().clone()))
            .unwrap();
        assert_eq!(current.space, Space::Real);
        assert_eq!(current.window, None);
        assert_eq!(current.inner_space, None);
        assert_eq!(current.oc, Oc::Streaming);

        // Back to a series space needs the window again.
        assert!(facade.set_space(descr, Space::Series, None).is_err());
        facade.set_space(descr, Space::Series, Some(conf)).unwrap();
    }

    #[test]
    fn test_ordinals_override_series_conf() {
        let facade = facade();
        let series = OcConf::new(Oc::Streaming).with_series(Space::Real, 10);

        let descr = facade
            .create_oc_from_ordinals(3, 0, 2, &series, &[], 0, 0)
            .unwrap();
        let conf = facade
            .registry()
            .with_algorithm(descr, |algo| Ok(algo.conf().clone()))
            .unwrap();
        assert_eq!(conf.space, Space::Real);
        assert_eq!(conf.window, None);

        let descr = facade
            .create_oc_from_ordinals(3, 2, 2, &series, &[], 0, 0)
            .unwrap();
        let window = facade
            .registry()
            .with_algorithm(descr, |algo| Ok(algo.conf().window))
            .unwrap();
        assert_eq!(window, Some(10));
    }

    #[test]
    fn test_set_conf_validates() {
        let facade = facade();
        let descr = facade.create_oc(&OcConf::default(), &[], 0, 0).unwrap();
        assert!(facade
            .set_conf(descr, OcConf::default().with_timeout(-2.0))
            .is_err());
        facade
            .set_conf(descr, OcConf::new(Oc::KMeans).with_iter(10))
            .unwrap();
    }
}
