//! # Sliding-Window Transaction Statistics
//!
//! In-memory aggregator maintaining sum, average, min, max and count over the
//! transactions of the last W seconds.
//!
//! ## Architecture
//!
//! ```text
//! Transaction
//!     ↓
//! AdmissionPolicy (reject future-dated / expired)
//!     ↓
//! StatisticsEngine (RwLock<TransactionWindow + cached Statistics>)
//!     ↑                               ↓
//! Evictor (tokio interval)        snapshot() → Statistics (2dp strings)
//! ```
//!
//! ## Module Organization
//!
//! - `types` - Transaction and the Statistics presentation snapshot
//! - `aggregate` - Combinable decimal accumulator and 2dp formatting
//! - `window` - Rolling window trait and Vec-backed implementation
//! - `admission` - Timestamp freshness checks
//! - `engine` - Lock-guarded window + snapshot, the public contract
//! - `evictor` - Periodic expiry task with explicit shutdown
//! - `service` - Engine bundled with its running evictor
//! - `error` - Admission and evictor errors

pub mod admission;
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod evictor;
pub mod service;
pub mod types;
pub mod window;

// Re-export commonly used types
pub use admission::AdmissionPolicy;
pub use aggregate::{format_amount, DecimalStatistics};
pub use engine::{Clock, StatisticsEngine};
pub use error::{AdmissionError, AggregateOverflow, EvictorError};
pub use evictor::{run_evictor, start_evictor, EvictorHandle};
pub use service::StatisticsService;
pub use types::{Statistics, Transaction};
pub use window::{RollingWindow, TransactionWindow};
