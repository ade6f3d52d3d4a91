//! Sliding-window transaction statistics
//!
//! Concurrent in-memory aggregator reporting sum, average, min, max and count
//! over the transactions of the last W seconds. See [`stats`] for the engine
//! and [`config`] for environment-driven settings.

pub mod config;
pub mod stats;

pub use config::StatsConfig;
pub use stats::{
    AdmissionError, AggregateOverflow, DecimalStatistics, EvictorError, StatisticsEngine,
    StatisticsService, Statistics, Transaction,
};
