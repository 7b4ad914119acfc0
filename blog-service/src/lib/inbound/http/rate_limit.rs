//! Per-client token bucket admission control.
//!
//! Each client IP gets its own bucket, created full on first sight. One
//! mutex guards the whole client table so lookup-or-create, consumption and
//! the idle sweep never interleave.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::RateLimitConfig;

/// Bucket and eviction parameters shared by every client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitPolicy {
    /// Tokens added per second.
    pub refill_per_second: f64,
    /// Bucket capacity, also the size of an instantaneous burst.
    pub burst: u32,
    pub sweep_interval: Duration,
    /// Idle time after which a client entry is evicted.
    pub stale_after: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

impl From<&RateLimitConfig> for RateLimitPolicy {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            refill_per_second: config.requests_per_second,
            burst: config.burst,
            sweep_interval: config.sweep_interval(),
            stale_after: config.stale_after(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited,
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn full(policy: &RateLimitPolicy, now: Instant) -> Self {
        Self {
            tokens: f64::from(policy.burst),
            last_refill: now,
        }
    }

    fn try_acquire(&mut self, policy: &RateLimitPolicy, now: Instant) -> bool {
        if now > self.last_refill {
            let elapsed = now.duration_since(self.last_refill).as_secs_f64();
            self.tokens =
                (self.tokens + elapsed * policy.refill_per_second).min(f64::from(policy.burst));
            self.last_refill = now;
        }

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
struct ClientEntry {
    bucket: TokenBucket,
    last_seen: Instant,
}

/// Shared per-IP rate limiter. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    clients: Arc<Mutex<HashMap<IpAddr, ClientEntry>>>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Admit or reject one request from `ip`.
    pub fn check(&self, ip: IpAddr) -> RateLimitDecision {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> RateLimitDecision {
        let mut clients = self.clients.lock();

        let entry = clients.entry(ip).or_insert_with(|| ClientEntry {
            bucket: TokenBucket::full(&self.policy, now),
            last_seen: now,
        });
        entry.last_seen = now;

        if entry.bucket.try_acquire(&self.policy, now) {
            RateLimitDecision::Allowed
        } else {
            RateLimitDecision::Limited
        }
    }

    /// Evict clients idle for longer than the policy allows.
    ///
    /// # Returns
    /// Number of evicted entries
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut clients = self.clients.lock();
        let before = clients.len();
        let stale_after = self.policy.stale_after;

        clients.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= stale_after);

        before - clients.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().len()
    }

    /// Spawn the periodic idle sweep on the current tokio runtime.
    ///
    /// The sweep runs until [`SweeperHandle::stop`] is called or the handle
    /// is dropped.
    pub fn start_sweeper(&self) -> SweeperHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let limiter = self.clone();
        let period = self.policy.sweep_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = limiter.sweep();
                        tracing::debug!(
                            evicted,
                            remaining = limiter.tracked_clients(),
                            "Rate limiter sweep"
                        );
                    }
                    _ = stop_rx.changed() => break,
                }
            }

            tracing::debug!("Rate limiter sweeper stopped");
        });

        tracing::info!(
            interval_secs = period.as_secs_f64(),
            stale_after_secs = self.policy.stale_after.as_secs_f64(),
            "Rate limiter sweeper started"
        );

        SweeperHandle { stop_tx, task }
    }
}

/// Running sweep task started by [`RateLimiter::start_sweeper`].
pub struct SweeperHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweep task and wait for it to exit.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Rate limiter sweeper failed");
        }
    }
}
