//! Statistics Runtime
//!
//! Runs a sliding-window statistics engine with its background evictor and
//! logs a JSON snapshot of the current window at a fixed interval.
//!
//! Usage:
//!   cargo run --release --bin txstats
//!
//! Environment variables:
//!   WINDOW_SECONDS - Sliding window width (default: 60)
//!   CLEANUP_INTERVAL_MS - Evictor sweep interval (default: 3000)
//!   STATS_REPORT_INTERVAL_MS - Snapshot log interval (default: 10000)
//!   RUST_LOG - Log filter (default: info)

use dotenv::dotenv;
use log::{error, info};
use std::process::ExitCode;
use tokio::time::interval;
use txstats::{StatisticsService, StatsConfig};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let config = StatsConfig::from_env();

    env_logger::Builder::new()
        .parse_filters(config.log_filter())
        .target(env_logger::Target::Stderr)
        .init();

    info!("🚀 Starting txstats...");
    info!("📊 Configuration:");
    info!("   ├─ Window: {}s", config.window_seconds);
    info!("   ├─ Cleanup interval: {}ms", config.cleanup_interval_ms);
    info!("   └─ Report interval: {}ms", config.report_interval_ms);

    let mut service = StatisticsService::start(&config);
    info!("✅ Engine created, evictor running");
    info!("🔄 Press CTRL+C to shutdown gracefully");

    let mut report_timer = interval(config.report_interval());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = report_timer.tick() => {
                let statistics = service.snapshot();
                match serde_json::to_string(&statistics) {
                    Ok(json) => info!("📊 Statistics: {}", json),
                    Err(e) => error!("❌ Failed to serialize statistics: {}", e),
                }
            }

            err = service.evictor_exited() => {
                error!("❌ Fatal evictor error: {}", err);
                return ExitCode::FAILURE;
            }

            result = &mut ctrl_c => {
                if let Err(err) = result {
                    error!("❌ Failed to listen for CTRL+C: {}", err);
                }
                info!("⚠️  Shutting down...");
                break;
            }
        }
    }

    match service.shutdown().await {
        Ok(()) => {
            info!("✅ txstats stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Evictor failed during shutdown: {}", e);
            ExitCode::FAILURE
        }
    }
}
