//! Scroll sampling
//!
//! Rate-limits the raw scroll stream so positioning passes run at most
//! once per interval. Semantics are leading+trailing: the first offset of
//! a burst is emitted immediately, offsets arriving inside the interval
//! replace the pending trailing value, and the settled value is emitted
//! once the interval has elapsed.
//!
//! A sampler is replaced wholesale when the tracked citation set changes;
//! its pending trailing value dies with it, so a stale offset can never be
//! positioned against a rebuilt index set.

use std::time::{Duration, Instant};

use citeview_core::constants::sampling::SCROLL_SAMPLE_INTERVAL;

/// Leading+trailing throttle over scroll offsets
#[derive(Debug)]
pub struct ScrollSampler {
    interval: Duration,
    /// When the last sample was emitted
    last_emit: Option<Instant>,
    /// Latest offset seen inside the interval, awaiting trailing emission
    pending: Option<f64>,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::with_interval(SCROLL_SAMPLE_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a raw scroll offset
    ///
    /// Returns the offset when it should be acted on now (leading edge, or
    /// the interval has elapsed); otherwise retains it as the pending
    /// trailing value.
    pub fn offer(&mut self, offset: f64) -> Option<f64> {
        self.offer_at(offset, Instant::now())
    }

    /// `offer` with an explicit clock, for deterministic tests
    pub fn offer_at(&mut self, offset: f64, now: Instant) -> Option<f64> {
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.interval => {
                self.pending = Some(offset);
                None
            }
            _ => {
                self.last_emit = Some(now);
                self.pending = None;
                Some(offset)
            }
        }
    }

    /// Emit the pending trailing sample once the interval has elapsed
    ///
    /// Call from the host's event-loop tick; returns `None` while throttled
    /// or when nothing is pending.
    pub fn poll(&mut self) -> Option<f64> {
        self.poll_at(Instant::now())
    }

    /// `poll` with an explicit clock, for deterministic tests
    pub fn poll_at(&mut self, now: Instant) -> Option<f64> {
        let last = self.last_emit?;
        if now.duration_since(last) < self.interval {
            return None;
        }
        let pending = self.pending.take()?;
        self.last_emit = Some(now);
        Some(pending)
    }

    /// Whether a trailing emission is still owed
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ScrollSampler {
    fn default() -> Self {
        Self::new()
    }
}
