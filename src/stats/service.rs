//! Engine plus its running evictor, as one owned unit

use super::engine::StatisticsEngine;
use super::error::{AdmissionError, EvictorError};
use super::evictor::{start_evictor, EvictorHandle};
use super::types::{Statistics, Transaction};
use crate::config::StatsConfig;
use std::sync::Arc;
use std::time::Duration;

/// A statistics engine whose evictor starts with it
///
/// Must be created from within a tokio runtime.
pub struct StatisticsService {
    engine: Arc<StatisticsEngine>,
    evictor: EvictorHandle,
}

impl StatisticsService {
    /// Build an engine from `config` and start sweeping it
    pub fn start(config: &StatsConfig) -> Self {
        let engine = Arc::new(StatisticsEngine::new(config.window()));
        Self::start_with_engine(engine, config.cleanup_interval())
    }

    /// Start sweeping an existing engine
    pub fn start_with_engine(engine: Arc<StatisticsEngine>, cleanup_interval: Duration) -> Self {
        let evictor = start_evictor(engine.clone(), cleanup_interval);
        Self { engine, evictor }
    }

    pub fn submit(&self, transaction: Transaction) -> Result<Transaction, AdmissionError> {
        self.engine.submit(transaction)
    }

    pub fn snapshot(&self) -> Statistics {
        self.engine.snapshot()
    }

    pub fn clear(&self) {
        self.engine.clear()
    }

    /// Shared engine, for callers that need to hand it to other tasks
    pub fn engine(&self) -> Arc<StatisticsEngine> {
        self.engine.clone()
    }

    /// True if the evictor exited on its own (always a fatal condition)
    pub fn evictor_finished(&self) -> bool {
        self.evictor.is_finished()
    }

    /// Resolves only if the evictor exits without a stop request
    ///
    /// Cancel safe, so it can sit in a `select!` loop next to other work.
    pub async fn evictor_exited(&mut self) -> EvictorError {
        self.evictor.exited().await
    }

    /// Stop the evictor; the engine stays usable through any `engine()` clones
    pub async fn shutdown(self) -> Result<(), EvictorError> {
        self.evictor.shutdown().await
    }
}
