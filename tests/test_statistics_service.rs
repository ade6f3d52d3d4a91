//! Integration tests for the statistics service
//!
//! Exercises the public API end to end:
//! - Submit / snapshot / clear through the service
//! - Admission rejections surfaced to the caller
//! - Background eviction without reads
//! - Concurrent writers from tokio tasks and OS threads

#[cfg(test)]
mod statistics_service_tests {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use txstats::{
        AdmissionError, Statistics, StatisticsEngine, StatisticsService, StatsConfig, Transaction,
    };

    fn amount(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn manual_engine(window_secs: i64) -> (Arc<StatisticsEngine>, Arc<Mutex<DateTime<Utc>>>) {
        let now = Arc::new(Mutex::new(Utc::now()));
        let clock = now.clone();
        let engine = StatisticsEngine::new_with_clock(
            chrono::Duration::seconds(window_secs),
            Box::new(move || *clock.lock().unwrap()),
        );
        (Arc::new(engine), now)
    }

    #[tokio::test]
    async fn test_service_scenario() {
        // Test: two transactions one second apart, then clear
        let (engine, now) = manual_engine(60);
        let service = StatisticsService::start_with_engine(engine, Duration::from_millis(50));
        let t0 = *now.lock().unwrap();

        service
            .submit(Transaction::new(amount("100.00"), t0))
            .unwrap();
        *now.lock().unwrap() = t0 + chrono::Duration::seconds(1);
        service
            .submit(Transaction::new(amount("110.00"), t0 + chrono::Duration::seconds(1)))
            .unwrap();

        let stats = service.snapshot();
        assert_eq!(stats.sum, "210.00");
        assert_eq!(stats.avg, "105.00");
        assert_eq!(stats.max, "110.00");
        assert_eq!(stats.min, "100.00");
        assert_eq!(stats.count, 2);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sum": "210.00",
                "avg": "105.00",
                "max": "110.00",
                "min": "100.00",
                "count": 2
            })
        );

        service.clear();
        assert_eq!(service.snapshot().count, 0);

        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_service_from_config_starts_empty() {
        // Test: default config, real clock
        let service = StatisticsService::start(&StatsConfig::default());

        assert_eq!(service.snapshot(), Statistics::empty());
        assert!(!service.evictor_finished());

        service.submit(Transaction::new(amount("12.50"), Utc::now())).unwrap();
        assert_eq!(service.snapshot().count, 1);

        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_service_rejections() {
        let service = StatisticsService::start(&StatsConfig::default());
        let now = Utc::now();

        let future = service.submit(Transaction::new(
            amount("100"),
            now + chrono::Duration::seconds(100),
        ));
        let expired = service.submit(Transaction::new(
            amount("100"),
            now - chrono::Duration::seconds(100),
        ));

        assert!(matches!(future, Err(AdmissionError::FutureTimestamp { .. })));
        assert!(matches!(expired, Err(AdmissionError::ExpiredTimestamp { .. })));
        assert_eq!(service.snapshot().count, 0);

        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_background_eviction() {
        // Test: admitted while fresh, gone once older than the window, no reads in between
        let (engine, now) = manual_engine(60);
        let service = StatisticsService::start_with_engine(engine.clone(), Duration::from_millis(10));
        let t0 = *now.lock().unwrap();

        service
            .submit(Transaction::new(amount("100"), t0 - chrono::Duration::seconds(57)))
            .unwrap();
        service.submit(Transaction::new(amount("7"), t0)).unwrap();

        *now.lock().unwrap() = t0 + chrono::Duration::seconds(4);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(engine.len(), 1);
        let stats = service.snapshot();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.sum, "7.00");

        service.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_tasks() {
        // Test: many tasks submitting distinct amounts, no lost updates
        let service = Arc::new(StatisticsService::start(&StatsConfig::default()));
        let tasks = 16;
        let per_task = 50;

        let mut handles = Vec::new();
        for t in 0..tasks {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..per_task {
                    let cents = (t * per_task + i + 1) as i64;
                    service
                        .submit(Transaction::new(Decimal::new(cents, 2), Utc::now()))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let n = (tasks * per_task) as i64;
        let stats = service.snapshot();
        assert_eq!(stats.count, n as u64);
        assert_eq!(stats.min, "0.01");
        assert_eq!(stats.max, txstats::stats::format_amount(Decimal::new(n, 2)));
        // 0.01 + 0.02 + ... + n/100
        assert_eq!(
            stats.sum,
            txstats::stats::format_amount(Decimal::new(n * (n + 1) / 2, 2))
        );

        let service = Arc::try_unwrap(service).ok().unwrap();
        service.shutdown().await.unwrap();
    }

    #[test]
    fn test_independent_engines() {
        // Test: engines share no state
        let a = StatisticsEngine::new(chrono::Duration::seconds(60));
        let b = StatisticsEngine::new(chrono::Duration::seconds(60));

        a.submit(Transaction::new(amount("1"), Utc::now())).unwrap();

        assert_eq!(a.snapshot().count, 1);
        assert_eq!(b.snapshot().count, 0);
    }

    #[test]
    fn test_readers_see_consistent_snapshots() {
        // Test: count and sum always agree while writers run (every amount is 1.00)
        let engine = Arc::new(StatisticsEngine::new(chrono::Duration::seconds(60)));

        let writer = {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for _ in 0..500 {
                    engine.submit(Transaction::new(Decimal::ONE, Utc::now())).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let stats = engine.snapshot();
                        assert_eq!(stats.sum, format!("{}.00", stats.count));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(engine.snapshot().count, 500);
    }
}
