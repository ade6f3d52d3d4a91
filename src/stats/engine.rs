//! Statistics Engine - concurrent sliding-window aggregator
//!
//! `StatisticsEngine` owns the transaction window and the cached `Statistics`
//! snapshot behind a single reader/writer lock:
//!
//! ```text
//! Transaction
//!     ↓
//! AdmissionPolicy::check()      (no lock held)
//!     ↓
//! write lock → fold window + new amount (checked) → add_transaction() → unlock
//!
//! snapshot()      → read lock  → cached Statistics
//! clear()         → write lock → empty window       → recalculate
//! evict_expired() → write lock → TransactionWindow::evict_expired() → recalculate
//! ```
//!
//! The cached snapshot is recomputed from scratch on every membership change,
//! so readers always see statistics that match the window they were built
//! from. Writers are linearized by the lock: a `snapshot()` that starts after
//! a `submit()` returned reflects that submit.
//!
//! A submit whose amount would overflow the aggregate is refused before the
//! window is touched. Eviction and clear only fold subsets of admitted
//! amounts, which cannot overflow (see `aggregate`).

use super::admission::AdmissionPolicy;
use super::aggregate::DecimalStatistics;
use super::error::{AdmissionError, AggregateOverflow};
use super::types::{Statistics, Transaction};
use super::window::{RollingWindow, TransactionWindow};
use chrono::{DateTime, Duration, Utc};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Source of "now" for admission and eviction
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Window contents plus the snapshot derived from them
#[derive(Debug, Default)]
struct EngineState {
    window: TransactionWindow,
    /// None only until the first recompute
    statistics: Option<Statistics>,
}

impl EngineState {
    fn recalculate(&mut self) -> Result<(), AggregateOverflow> {
        self.statistics = Some(self.window.aggregate()?.to_statistics());
        Ok(())
    }

    /// Recompute the cached snapshot; the window only ever shrinks between
    /// a checked submit and this call, so the fold cannot overflow
    fn refresh(&mut self) {
        if let Err(e) = self.recalculate() {
            log::error!(
                "❌ Failed to recompute statistics over {} transactions: {}",
                self.window.len(),
                e
            );
        }
    }
}

pub struct StatisticsEngine {
    state: RwLock<EngineState>,
    policy: AdmissionPolicy,
    now_fn: Clock,
}

impl StatisticsEngine {
    /// Create an engine over a window of `window`, using the system clock
    pub fn new(window: Duration) -> Self {
        Self::new_with_clock(window, Box::new(Utc::now))
    }

    /// Create an engine with a custom clock
    ///
    /// Used for testing with deterministic timestamps.
    pub fn new_with_clock(window: Duration, now_fn: Clock) -> Self {
        Self {
            state: RwLock::new(EngineState::default()),
            policy: AdmissionPolicy::new(window),
            now_fn,
        }
    }

    pub fn window(&self) -> Duration {
        self.policy.window()
    }

    /// Admit a transaction into the window
    ///
    /// Rejected transactions leave the engine untouched.
    pub fn submit(&self, transaction: Transaction) -> Result<Transaction, AdmissionError> {
        let now = (self.now_fn)();

        if let Err(e) = self.policy.check(&transaction, now) {
            log::warn!("Rejected transaction ({}): {}", transaction, e);
            return Err(e);
        }

        let mut state = self.write_state();
        let amounts = state.window.transactions().iter().map(|t| t.amount);
        let aggregate =
            match DecimalStatistics::from_amounts(amounts.chain(Some(transaction.amount))) {
                Ok(aggregate) => aggregate,
                Err(overflow) => {
                    let e = AdmissionError::AmountOverflow {
                        amount: overflow.amount,
                    };
                    log::warn!("Rejected transaction ({}): {}", transaction, e);
                    return Err(e);
                }
            };

        log::info!("Adding transaction: {}", transaction);
        state.window.add_transaction(transaction.clone());
        state.statistics = Some(aggregate.to_statistics());

        Ok(transaction)
    }

    /// Current statistics for the window
    pub fn snapshot(&self) -> Statistics {
        {
            let state = self.read_state();
            if let Some(statistics) = &state.statistics {
                return statistics.clone();
            }
        }

        // Nothing computed yet: take the write lock and compute once.
        let mut state = self.write_state();
        if let Some(statistics) = &state.statistics {
            return statistics.clone();
        }
        state.refresh();
        state.statistics.clone().unwrap_or_default()
    }

    /// Drop every transaction
    pub fn clear(&self) {
        let mut state = self.write_state();
        log::info!("Cleaning all transactions ({} held)", state.window.len());
        state.window.clear();
        state.refresh();
    }

    /// Remove transactions older than the window, returning how many were removed
    ///
    /// "now" is read once at call start. Statistics are recomputed even when
    /// nothing was removed.
    pub fn evict_expired(&self) -> usize {
        let now = (self.now_fn)();
        let mut state = self.write_state();

        let removed = state.window.evict_expired(now, self.policy.window());
        state.refresh();

        if removed > 0 {
            log::debug!(
                "Evicted {} expired transactions ({} remaining)",
                removed,
                state.window.len()
            );
        }
        removed
    }

    /// Number of transactions currently held
    pub fn len(&self) -> usize {
        self.read_state().window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every critical section leaves window and snapshot consistent, so a
    // poisoned lock is still safe to use.
    fn read_state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
