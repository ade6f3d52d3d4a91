//! Admission policy: timestamp freshness checks applied before insertion

use super::error::AdmissionError;
use super::types::Transaction;
use chrono::{DateTime, Duration, Utc};

/// Rejects future-dated and already-expired transactions
///
/// The same window is used for admission and for eviction, so a transaction
/// can never be admitted already stale.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    window: Duration,
}

impl AdmissionPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check a transaction against `now`
    ///
    /// The future check runs first. Both bounds are inclusive: a timestamp
    /// equal to `now`, or exactly `window` old, is admitted.
    pub fn check(&self, transaction: &Transaction, now: DateTime<Utc>) -> Result<(), AdmissionError> {
        if transaction.is_future(now) {
            return Err(AdmissionError::FutureTimestamp {
                timestamp: transaction.timestamp,
                now,
            });
        }

        if transaction.is_expired(now, self.window) {
            return Err(AdmissionError::ExpiredTimestamp {
                timestamp: transaction.timestamp,
                now,
                window: self.window,
            });
        }

        Ok(())
    }
}
