// src/registry.rs

// one throttle per rate-limited resource, created on first use

// dependencies
use crate::clock::{Clock, MonotonicClock};
use crate::config::ThrottleConfig;
use crate::errors::ThrottleError;
use crate::throttle::{Admission, Throttle, saturating_millis};
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Keyed collection of independent throttles sharing one configuration.
/// K identifies the throttled resource (e.g. an API host or endpoint name).
/// C is the clock type; every throttle gets its own clone of it.
/// We use `Arc<DashMap>` for thread-safe concurrent access to per-key throttles.
#[derive(Debug)]
pub struct ThrottleRegistry<K, C = MonotonicClock>
where
    K: Hash + Eq,
    C: Clock + Clone,
{
    config: ThrottleConfig,
    throttles: Arc<DashMap<K, Arc<Throttle<C>>>>,
    clock: C,
}

impl<K, C> ThrottleRegistry<K, C>
where
    K: Hash + Eq,
    C: Clock + Clone,
{
    pub fn with_config(config: ThrottleConfig, clock: C) -> Result<Self, ThrottleError> {
        config.validate()?;
        Ok(Self {
            config,
            throttles: Arc::new(DashMap::new()),
            clock,
        })
    }

    /// The throttle guarding `key`, created on first use.
    pub fn throttle(&self, key: K) -> Arc<Throttle<C>> {
        // clone out of the map so no shard lock is held while admitting
        self.throttles
            .entry(key)
            .or_insert_with(|| {
                debug!(
                    limit = self.config.limit,
                    window_ms = saturating_millis(self.config.window),
                    "creating throttle for new key"
                );
                Arc::new(Throttle::build(
                    self.config.limit,
                    self.config.window,
                    self.clock.clone(),
                ))
            })
            .value()
            .clone()
    }

    pub fn request_admission(&self, key: K) -> Result<Duration, ThrottleError> {
        self.throttle(key).request_admission()
    }

    pub fn admit(&self, key: K) -> Result<Admission, ThrottleError> {
        self.throttle(key).admit()
    }

    /// Drop throttles whose newest reservation left the window more than
    /// `max_idle_nanos` ago. Returns how many were removed.
    ///
    /// A removed throttle constrains nothing, so recreating it on the next
    /// request is equivalent to keeping it. Throttles still referenced outside
    /// the registry are kept: a detached throttle would keep admitting next to
    /// its replacement.
    pub fn cleanup_idle_throttles(&self, max_idle_nanos: u64) -> Result<usize, ThrottleError> {
        let now = self.clock.now()?;
        let mut removed = 0;
        self.throttles.retain(|_, throttle| {
            // handles are only cloned out under this shard's lock
            let keep =
                Arc::strong_count(throttle) > 1 || !throttle.is_idle_at(now, max_idle_nanos);
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            debug!(removed, remaining = self.throttles.len(), "removed idle throttles");
        }
        Ok(removed)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.throttles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.throttles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throttles.is_empty()
    }
}
