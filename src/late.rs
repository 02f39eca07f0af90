//! Late initialization
//!
//! Some algorithms cannot be built before they have seen data: MCMC needs at
//! least `init_k` elements and the dimension of the space. [`LateAlgo`]
//! buffers pushed elements and asks a builder for an algorithm after every
//! push until one is returned.

use crate::algorithm::{OnlineClust, Prediction};
use crate::errors::{DistclusError, Result};
use crate::types::Elemt;
use std::sync::Mutex;
use tracing::{debug, trace};

/// Builds an algorithm from the elements buffered so far, or returns `None`
/// when more data is needed. The buffered elements are handed to the new
/// algorithm by the builder.
pub type Builder = Box<dyn FnMut(&[Elemt]) -> Result<Option<Box<dyn OnlineClust>>> + Send>;

struct LateState {
    builder: Builder,
    buffer: Vec<Elemt>,
    algo: Option<Box<dyn OnlineClust>>,
    playing: bool,
}

impl LateState {
    fn algo(&mut self) -> Result<&mut Box<dyn OnlineClust>> {
        self.algo.as_mut().ok_or(DistclusError::NotStarted)
    }

    fn try_build(&mut self) -> Result<()> {
        if self.algo.is_some() {
            return Ok(());
        }
        let Some(algo) = (self.builder)(&self.buffer)? else {
            trace!(buffered = self.buffer.len(), "not enough data to build");
            return Ok(());
        };
        debug!(initial = self.buffer.len(), "built algorithm");
        // The builder handed the buffer over; keep the algorithm even if
        // starting it fails so that data is not lost.
        self.buffer.clear();
        let algo = self.algo.insert(algo);
        if self.playing {
            algo.run(true)?;
        }
        Ok(())
    }
}

/// Wrapper that defers building an algorithm until enough data arrived
pub struct LateAlgo {
    state: Mutex<LateState>,
}

impl LateAlgo {
    pub fn new(builder: Builder) -> Self {
        Self {
            state: Mutex::new(LateState {
                builder,
                buffer: Vec::new(),
                algo: None,
                playing: false,
            }),
        }
    }

    /// Build from a closure
    pub fn with_builder<B>(builder: B) -> Self
    where
        B: FnMut(&[Elemt]) -> Result<Option<Box<dyn OnlineClust>>> + Send + 'static,
    {
        Self::new(Box::new(builder))
    }

    /// Push elements, building the algorithm once the builder accepts the buffer
    pub fn push(&self, elemts: Vec<Elemt>) -> Result<()> {
        let mut state = self.state.lock()?;
        if let Some(algo) = state.algo.as_mut() {
            for elemt in elemts {
                algo.push(elemt)?;
            }
            return Ok(());
        }
        state.buffer.extend(elemts);
        state.try_build()
    }

    /// Run asynchronously, now or as soon as the algorithm is built
    pub fn play(&self) -> Result<()> {
        let mut state = self.state.lock()?;
        state.playing = true;
        match state.algo.as_mut() {
            Some(algo) => algo.run(true),
            None => Ok(()),
        }
    }

    /// Run synchronously to the end, then close
    pub fn batch(&self) -> Result<()> {
        let mut state = self.state.lock()?;
        let algo = state.algo()?;
        algo.run(false)?;
        algo.close()
    }

    /// Close the algorithm if it was built
    pub fn stop(&self) -> Result<()> {
        let mut state = self.state.lock()?;
        state.playing = false;
        match state.algo.as_mut() {
            Some(algo) => algo.close(),
            None => Ok(()),
        }
    }

    /// Block until pushes running on other threads are applied.
    ///
    /// Pushes, builds and runs all happen under one lock, so once it is
    /// acquired every push issued before the call has reached the buffer or
    /// the algorithm.
    pub fn wait(&self) -> Result<()> {
        let state = self.state.lock()?;
        trace!(
            built = state.algo.is_some(),
            buffered = state.buffer.len(),
            "wait"
        );
        Ok(())
    }

    pub fn centroids(&self) -> Result<Vec<Elemt>> {
        let mut state = self.state.lock()?;
        state.algo()?.centroids()
    }

    /// Predict the cluster of every element
    pub fn predict(&self, elemts: &[Elemt], push: bool) -> Result<Vec<Prediction>> {
        let mut state = self.state.lock()?;
        let algo = state.algo()?;
        elemts.iter().map(|e| algo.predict(e, push)).collect()
    }

    /// Whether the builder has produced an algorithm
    pub fn is_built(&self) -> bool {
        self.state.lock().map(|s| s.algo.is_some()).unwrap_or(false)
    }

    /// Number of elements waiting for the algorithm to be built
    pub fn buffered(&self) -> usize {
        self.state.lock().map(|s| s.buffer.len()).unwrap_or(0)
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().map(|s| s.playing).unwrap_or(false)
    }
}

impl Drop for LateAlgo {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            if let Some(algo) = state.algo.as_mut() {
                if let Err(err) = algo.close() {
                    debug!(error = %err, "close on drop failed");
                }
            }
        }
    }
}
