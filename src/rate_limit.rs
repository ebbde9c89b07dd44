use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::metrics::QUOTA_CLIENTS;

// Quota entry - tracks consumed requests per client IP
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

impl RateLimitEntry {
    fn expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }
}

/// Admission gate in front of the humanize pipeline.
///
/// Implementations must make `admit` atomic per key so concurrent requests
/// from one client never push it past capacity.
pub trait QuotaStore: Send + Sync {
    /// Consume one request for `key`; `false` means the quota is exhausted.
    fn admit(&self, key: &str) -> bool;
}

// Fixed-window counter per client, held in process memory
pub struct InMemoryQuota {
    entries: DashMap<String, RateLimitEntry>,
    capacity: u32,    // max requests allowed per window
    window: Duration, // length of a window
}

impl InMemoryQuota {
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
            window,
        }
    }

    pub fn admit_at(&self, key: &str, now: Instant) -> bool {
        // entry() holds the shard lock until the guard drops
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window over..? start a fresh one
        if entry.expired(now, self.window) {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count < self.capacity {
            entry.count += 1;
            return true;
        }

        false
    }

    // Drop every record whose window has elapsed, returns how many went
    pub fn evict_expired(&self, now: Instant) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.expired(now, self.window);
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}

impl QuotaStore for InMemoryQuota {
    fn admit(&self, key: &str) -> bool {
        let admitted = self.admit_at(key, Instant::now());
        QUOTA_CLIENTS.set(self.entries.len() as f64);
        admitted
    }
}

// Background sweeper - keeps the quota map bounded
pub async fn quota_sweeper(quota: Arc<InMemoryQuota>, sweep_interval: Duration) {
    let mut interval = interval(sweep_interval);

    tracing::info!(interval = ?sweep_interval, "Quota sweeper started");

    loop {
        interval.tick().await;

        let evicted = quota.evict_expired(Instant::now());
        QUOTA_CLIENTS.set(quota.tracked_clients() as f64);
        if evicted > 0 {
            tracing::debug!(
                evicted,
                remaining = quota.tracked_clients(),
                "Evicted expired quota records"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[test]
    fn admits_up_to_capacity_then_rejects() {
        let quota = InMemoryQuota::new(3, DAY);
        let now = Instant::now();

        assert!(quota.admit_at("10.0.0.1", now));
        assert!(quota.admit_at("10.0.0.1", now));
        assert!(quota.admit_at("10.0.0.1", now));
        assert!(!quota.admit_at("10.0.0.1", now));
        assert!(!quota.admit_at("10.0.0.1", now + Duration::from_secs(60)));
    }

    #[test]
    fn clients_are_counted_separately() {
        let quota = InMemoryQuota::new(1, DAY);
        let now = Instant::now();

        assert!(quota.admit_at("10.0.0.1", now));
        assert!(!quota.admit_at("10.0.0.1", now));
        assert!(quota.admit_at("10.0.0.2", now));
        assert_eq!(quota.tracked_clients(), 2);
    }

    #[test]
    fn exhausted_client_is_admitted_after_window() {
        let quota = InMemoryQuota::new(2, DAY);
        let start = Instant::now();

        assert!(quota.admit_at("10.0.0.1", start));
        assert!(quota.admit_at("10.0.0.1", start));
        assert!(!quota.admit_at("10.0.0.1", start + DAY - Duration::from_secs(1)));

        // counter resets at the boundary, new window begins here
        let later = start + DAY;
        assert!(quota.admit_at("10.0.0.1", later));
        assert!(quota.admit_at("10.0.0.1", later));
        assert!(!quota.admit_at("10.0.0.1", later));
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let quota = InMemoryQuota::new(0, DAY);
        assert!(!quota.admit_at("10.0.0.1", Instant::now()));
    }

    #[test]
    fn evicts_only_expired_records() {
        let quota = InMemoryQuota::new(5, DAY);
        let start = Instant::now();

        quota.admit_at("old", start);
        quota.admit_at("fresh", start + Duration::from_secs(3600));

        assert_eq!(quota.evict_expired(start + DAY), 1);
        assert_eq!(quota.tracked_clients(), 1);
        assert!(quota.admit_at("fresh", start + DAY));
    }

    #[test]
    fn eviction_during_concurrent_admissions() {
        let quota = Arc::new(InMemoryQuota::new(5, Duration::from_millis(1)));
        let start = Instant::now();

        let writer = {
            let quota = Arc::clone(&quota);
            std::thread::spawn(move || {
                for i in 0..20_000 {
                    quota.admit_at(&format!("10.1.{}.{}", i / 256, i % 256), start);
                }
            })
        };

        let mut evicted = 0;
        while !writer.is_finished() {
            evicted += quota.evict_expired(start + Duration::from_secs(10));
        }
        writer.join().unwrap();
        evicted += quota.evict_expired(start + Duration::from_secs(10));

        assert_eq!(evicted, 20_000);
        assert_eq!(quota.tracked_clients(), 0);
    }

    #[test]
    fn concurrent_admission_never_exceeds_capacity() {
        let quota = Arc::new(InMemoryQuota::new(50, DAY));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let quota = Arc::clone(&quota);
                std::thread::spawn(move || (0..20).filter(|_| quota.admit("10.0.0.9")).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
    }
}
