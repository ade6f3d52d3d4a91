//! Background eviction task
//!
//! Periodically sweeps expired transactions out of a `StatisticsEngine` so the
//! statistics age out without a read having to trigger cleanup. The task
//! runs until `EvictorHandle::shutdown()` is called.

use super::engine::StatisticsEngine;
use super::error::EvictorError;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Smallest accepted sweep interval (tokio intervals reject zero)
const MIN_CLEANUP_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running evictor task
///
/// Dropping the handle without calling `shutdown()` closes the stop channel,
/// which the task reports as `EvictorError::Interrupted`.
pub struct EvictorHandle {
    shutdown: watch::Sender<bool>,
    /// None once `exited()` has observed the task's exit
    task: Option<JoinHandle<Result<(), EvictorError>>>,
}

impl EvictorHandle {
    /// True once the task has exited, for any reason
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the task to exit on its own
    ///
    /// Without a stop request any exit is fatal, so this always yields an
    /// error. Cancel safe: dropping the future leaves the handle usable.
    pub async fn exited(&mut self) -> EvictorError {
        let Some(task) = self.task.as_mut() else {
            return std::future::pending().await;
        };
        let joined = task.await;
        self.task = None;

        match joined {
            Ok(Ok(())) => EvictorError::Aborted("exited without a stop request".to_string()),
            Ok(Err(e)) => e,
            Err(e) => EvictorError::Aborted(e.to_string()),
        }
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) -> Result<(), EvictorError> {
        // Fails only if the task already exited; the join below reports why.
        let _ = self.shutdown.send(true);

        let Some(task) = self.task else {
            return Err(EvictorError::Aborted("already exited".to_string()));
        };
        match task.await {
            Ok(result) => result,
            Err(e) => Err(EvictorError::Aborted(e.to_string())),
        }
    }
}

/// Spawn the evictor on the current tokio runtime
///
/// The first sweep runs immediately, then once per `cleanup_interval`.
pub fn start_evictor(engine: Arc<StatisticsEngine>, cleanup_interval: Duration) -> EvictorHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_evictor(engine, cleanup_interval, shutdown_rx));

    EvictorHandle {
        shutdown: shutdown_tx,
        task: Some(task),
    }
}

/// Evictor loop: sweep, then wait for the next tick or a stop signal
///
/// Returns `Ok(())` after an explicit stop, `Err(EvictorError::Interrupted)`
/// if the stop channel closes underneath it.
pub async fn run_evictor(
    engine: Arc<StatisticsEngine>,
    cleanup_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), EvictorError> {
    let cleanup_interval = cleanup_interval.max(MIN_CLEANUP_INTERVAL);
    log::info!(
        "🧹 Starting evictor (interval: {}ms, window: {}s)",
        cleanup_interval.as_millis(),
        engine.window().num_seconds()
    );

    let mut timer = interval(cleanup_interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                let removed = engine.evict_expired();
                if removed > 0 {
                    log::debug!("🧹 Sweep removed {} transactions", removed);
                }
            }

            changed = shutdown.changed() => {
                match changed {
                    Ok(()) if *shutdown.borrow() => {
                        log::info!("✅ Evictor stopped");
                        return Ok(());
                    }
                    Ok(()) => {}
                    Err(_) => {
                        log::error!("❌ Evictor interrupted: stop channel closed without shutdown");
                        return Err(EvictorError::Interrupted);
                    }
                }
            }
        }
    }
}
