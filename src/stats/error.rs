use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a transaction is refused at admission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("future dated transaction: timestamp {timestamp} is after {now}")]
    FutureTimestamp {
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("expired transaction: timestamp {timestamp} is older than {}s before {now}", .window.num_seconds())]
    ExpiredTimestamp {
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
        window: Duration,
    },

    #[error("amount {amount} would overflow the window aggregate")]
    AmountOverflow { amount: Decimal },
}

impl AdmissionError {
    pub fn is_future(&self) -> bool {
        matches!(self, AdmissionError::FutureTimestamp { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, AdmissionError::ExpiredTimestamp { .. })
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, AdmissionError::AmountOverflow { .. })
    }
}

/// A running total could not hold another value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("decimal overflow while accumulating {amount}")]
pub struct AggregateOverflow {
    pub amount: Decimal,
}

/// Fatal conditions of the background evictor
#[derive(Debug, Error)]
pub enum EvictorError {
    /// The stop channel closed without an explicit shutdown request
    #[error("evictor interrupted: stop channel closed without shutdown")]
    Interrupted,

    /// The task panicked or was cancelled by the runtime
    #[error("evictor task aborted: {0}")]
    Aborted(String),
}
