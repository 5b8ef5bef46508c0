//! Restart backoff policy.
//!
//! The config format does not carry backoff timing, so the policy is a
//! supervisor-level setting: exponential delay capped at a maximum,
//! with a consecutive-restart limit. A process that stays up past the
//! stability window gets its counter reset on the next exit.

use std::time::Duration;

/// Default delay before the first automatic restart.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Default cap on the restart delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Default limit on consecutive automatic restarts.
pub const DEFAULT_MAX_RESTARTS: u32 = 10;

/// Default uptime after which a run counts as stable.
pub const DEFAULT_STABLE_UPTIME: Duration = Duration::from_secs(10);

/// Restart timing and limits for automatic respawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPolicy {
    /// Delay before the first restart; doubles on each consecutive one.
    pub base_delay: Duration,
    /// Upper bound on the restart delay.
    pub max_delay: Duration,
    /// Consecutive restarts allowed before the handle is marked Failed.
    pub max_restarts: u32,
    /// Uptime after which the restart counter resets.
    pub stable_uptime: Duration,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_restarts: DEFAULT_MAX_RESTARTS,
            stable_uptime: DEFAULT_STABLE_UPTIME,
        }
    }
}

impl RestartPolicy {
    /// Sets the base delay.
    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the delay cap.
    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the consecutive-restart limit.
    #[must_use]
    pub fn max_restarts(mut self, limit: u32) -> Self {
        self.max_restarts = limit;
        self
    }

    /// Sets the stability window.
    #[must_use]
    pub fn stable_uptime(mut self, uptime: Duration) -> Self {
        self.stable_uptime = uptime;
        self
    }

    /// Returns the delay before restart number `restart_count + 1`,
    /// or `None` if the limit is exhausted.
    #[must_use]
    pub fn delay_for(&self, restart_count: u32) -> Option<Duration> {
        if restart_count >= self.max_restarts {
            return None;
        }
        let factor = 2u32.saturating_pow(restart_count.min(31));
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
