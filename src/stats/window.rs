//! Rolling transaction window
//!
//! Holds the admitted transactions in insertion order. Eviction is by age
//! relative to a caller-supplied "now", so the window itself never reads the
//! clock.

use super::aggregate::DecimalStatistics;
use super::error::AggregateOverflow;
use super::types::Transaction;
use chrono::{DateTime, Duration, Utc};

/// Trait for a single rolling time window of transactions
pub trait RollingWindow {
    /// Append a transaction (no deduplication)
    fn add_transaction(&mut self, transaction: Transaction);

    /// Remove every transaction strictly older than `window`, returning how many were removed
    fn evict_expired(&mut self, now: DateTime<Utc>, window: Duration) -> usize;

    /// Remove all transactions
    fn clear(&mut self);

    /// Read-only view of the held transactions, in insertion order
    fn transactions(&self) -> &[Transaction];

    fn len(&self) -> usize {
        self.transactions().len()
    }

    fn is_empty(&self) -> bool {
        self.transactions().is_empty()
    }

    /// Fold every held amount into a fresh accumulator
    fn aggregate(&self) -> Result<DecimalStatistics, AggregateOverflow> {
        DecimalStatistics::from_amounts(self.transactions().iter().map(|t| t.amount))
    }
}

/// Vec-backed window; eviction is a linear retain
#[derive(Debug, Clone, Default)]
pub struct TransactionWindow {
    transactions: Vec<Transaction>,
}

impl TransactionWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RollingWindow for TransactionWindow {
    fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    fn evict_expired(&mut self, now: DateTime<Utc>, window: Duration) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| !t.is_expired(now, window));
        before - self.transactions.len()
    }

    fn clear(&mut self) {
        self.transactions.clear();
    }

    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
