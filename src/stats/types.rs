//! Core data types: admitted transactions and the presentation snapshot

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single timestamped amount submitted to the engine
///
/// Immutable once admitted. The amount is an exact decimal so reported sums
/// never carry binary floating point artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self { amount, timestamp }
    }

    /// Age of the transaction relative to `now` (negative if future-dated)
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
    }

    /// True if the timestamp is strictly ahead of `now`
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.timestamp > now
    }

    /// True if the transaction is strictly older than `window`
    ///
    /// An age of exactly `window` is still inside the window.
    pub fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) > window
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "amount={} timestamp={}",
            self.amount,
            self.timestamp.to_rfc3339()
        )
    }
}

/// Presentation snapshot of the current window
///
/// Decimal fields always carry exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub sum: String,
    pub avg: String,
    pub max: String,
    pub min: String,
    pub count: u64,
}

impl Statistics {
    /// Snapshot of an empty window
    pub fn empty() -> Self {
        Self {
            sum: "0.00".to_string(),
            avg: "0.00".to_string(),
            max: "0.00".to_string(),
            min: "0.00".to_string(),
            count: 0,
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sum={} avg={} max={} min={} count={}",
            self.sum, self.avg, self.max, self.min, self.count
        )
    }
}
