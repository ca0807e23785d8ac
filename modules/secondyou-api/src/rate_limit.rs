use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Map size past which empty entries are swept on the next check.
const PRUNE_THRESHOLD: usize = 1000;

/// Sliding-window request limiter keyed by client IP.
pub struct RateLimiter {
    max: usize,
    window: Duration,
    entries: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max: usize, window: Duration) -> Self {
        Self {
            max,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `ip` at `now`. Returns false when the IP is over its limit.
    pub async fn check(&self, ip: IpAddr, now: Instant) -> bool {
        let mut limiter = self.entries.lock().await;
        if limiter.len() > PRUNE_THRESHOLD {
            prune_empty_entries(&mut limiter, now, self.window);
        }
        let entries = limiter.entry(ip).or_default();
        check_rate_limit(entries, now, self.window, self.max)
    }
}

/// Drop timestamps older than `window`, then admit and record the request if
/// fewer than `max` remain.
pub fn check_rate_limit(
    entries: &mut Vec<Instant>,
    now: Instant,
    window: Duration,
    max: usize,
) -> bool {
    if let Some(cutoff) = now.checked_sub(window) {
        entries.retain(|t| *t > cutoff);
    }
    if entries.len() >= max {
        return false;
    }
    entries.push(now);
    true
}

pub fn prune_empty_entries(
    limiter: &mut HashMap<IpAddr, Vec<Instant>>,
    now: Instant,
    window: Duration,
) {
    limiter.retain(|_, entries| {
        if let Some(cutoff) = now.checked_sub(window) {
            entries.retain(|t| *t > cutoff);
        }
        !entries.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(900);

    #[test]
    fn allows_up_to_max_then_blocks() {
        let now = Instant::now();
        let mut entries = Vec::new();
        for _ in 0..10 {
            assert!(check_rate_limit(&mut entries, now, WINDOW, 10));
        }
        assert!(!check_rate_limit(&mut entries, now, WINDOW, 10));
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn old_requests_fall_out_of_the_window() {
        let start = Instant::now();
        let mut entries = Vec::new();
        for _ in 0..10 {
            check_rate_limit(&mut entries, start, WINDOW, 10);
        }
        let later = start + WINDOW + Duration::from_secs(1);
        assert!(check_rate_limit(&mut entries, later, WINDOW, 10));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn prune_drops_expired_ips() {
        let start = Instant::now();
        let mut limiter = HashMap::new();
        limiter.insert("10.0.0.1".parse().unwrap(), vec![start]);
        limiter.insert("10.0.0.2".parse().unwrap(), vec![start + WINDOW]);

        prune_empty_entries(&mut limiter, start + WINDOW + Duration::from_secs(1), WINDOW);
        assert_eq!(limiter.len(), 1);
        assert!(limiter.contains_key(&"10.0.0.2".parse::<IpAddr>().unwrap()));
    }

    #[tokio::test]
    async fn limiter_tracks_ips_separately() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();
        let a: IpAddr = "127.0.0.1".parse().unwrap();
        let b: IpAddr = "127.0.0.2".parse().unwrap();

        assert!(limiter.check(a, now).await);
        assert!(!limiter.check(a, now).await);
        assert!(limiter.check(b, now).await);
    }
}
