mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use photo_ledger_node::clock::ManualClock;
use photo_ledger_node::ledger::{CacheStats, ScanCache};

const TTL: u64 = 5000;

fn cache_over(source: Arc<CountingSource>, clock: Arc<ManualClock>) -> ScanCache {
    ScanCache::new(source, clock, TTL)
}

#[tokio::test]
async fn test_same_entries_within_ttl() {
    let source = Arc::new(CountingSource::new(vec![ledger_entry(&hash_from_byte(1), "1,1", "s1")]));
    let clock = Arc::new(ManualClock::new(1_000));
    let cache = cache_over(source.clone(), clock.clone());

    let a = cache.get().await;
    clock.advance(TTL - 1);
    let b = cache.get().await;

    assert_eq!(source.loads(), 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.len(), 1);
}

#[tokio::test]
async fn test_rescans_once_ttl_elapses() {
    let source = Arc::new(CountingSource::new(Vec::new()));
    let clock = Arc::new(ManualClock::new(1_000));
    let cache = cache_over(source.clone(), clock.clone());

    cache.get().await;
    clock.advance(TTL);
    cache.get().await;
    assert_eq!(source.loads(), 2);

    let snap = cache.snapshot().await.unwrap();
    assert_eq!(snap.captured_at_millis, 1_000 + TTL);
}

#[tokio::test]
async fn test_concurrent_expiry_runs_one_scan() {
    let source = Arc::new(CountingSource::new(Vec::new()).with_delay(Duration::from_millis(50)));
    let clock = Arc::new(ManualClock::new(0));
    let cache = Arc::new(cache_over(source.clone(), clock));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get().await })
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }

    assert_eq!(source.loads(), 1);
}

#[tokio::test]
async fn test_failed_scan_served_empty_and_not_cached() {
    let source = Arc::new(CountingSource::new(vec![ledger_entry(&hash_from_byte(1), "1,1", "s1")]));
    let clock = Arc::new(ManualClock::new(0));
    let cache = cache_over(source.clone(), clock);

    source.set_failing(true);
    let first = cache.get().await;
    assert!(first.is_empty());
    assert!(cache.snapshot().await.is_none());

    source.set_failing(false);
    let second = cache.get().await;
    assert_eq!(second.len(), 1);
    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_rescan() {
    let source = Arc::new(CountingSource::new(Vec::new()));
    let clock = Arc::new(ManualClock::new(0));
    let cache = cache_over(source.clone(), clock);

    cache.get().await;
    cache.invalidate().await;
    cache.get().await;
    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn test_stats_count_hits_refreshes_and_failures() {
    let source = Arc::new(CountingSource::new(vec![ledger_entry(&hash_from_byte(1), "1,1", "s1")]));
    let clock = Arc::new(ManualClock::new(0));
    let cache = cache_over(source.clone(), clock.clone());
    assert_eq!(cache.stats(), CacheStats::default());

    cache.get().await;
    cache.get().await;
    cache.get().await;
    assert_eq!(cache.stats(), CacheStats { hits: 2, refreshes: 1, refresh_failures: 0 });

    source.set_failing(true);
    clock.advance(TTL);
    cache.get().await;
    cache.get().await;
    assert_eq!(cache.stats(), CacheStats { hits: 2, refreshes: 3, refresh_failures: 2 });
}

#[tokio::test]
async fn test_waiters_on_concurrent_refresh_count_as_hits() {
    let source = Arc::new(CountingSource::new(Vec::new()).with_delay(Duration::from_millis(50)));
    let clock = Arc::new(ManualClock::new(0));
    let cache = Arc::new(cache_over(source.clone(), clock));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get().await })
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.refreshes, 1);
    assert_eq!(stats.hits, 3);
}
