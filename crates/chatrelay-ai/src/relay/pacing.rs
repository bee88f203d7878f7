//! Reply pacing: the post-rate-limit cooldown and the minimum latency floor.

use tokio::time::{Duration, Instant, sleep};

/// How long remote calls stay suppressed after a rate-limit signal.
pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(30);

/// Latency floor applied to the first call after a cooldown ends.
pub const POST_COOLDOWN_LATENCY_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// Never tripped, or already cleared.
    Idle,
    /// Tripped less than [`COOLDOWN_WINDOW`] ago.
    Active,
    /// Tripped, and the window has passed.
    Expired,
}

/// Process-wide cooldown shared by every session of one relay.
#[derive(Debug, Clone, Default)]
pub struct Cooldown {
    tripped_at: Option<Instant>,
}

impl Cooldown {
    pub fn trip(&mut self, now: Instant) {
        self.tripped_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.tripped_at = None;
    }

    pub fn check(&self, now: Instant) -> CooldownState {
        match self.tripped_at {
            None => CooldownState::Idle,
            Some(at) if now.saturating_duration_since(at) < COOLDOWN_WINDOW => {
                CooldownState::Active
            }
            Some(_) => CooldownState::Expired,
        }
    }
}

/// Sleep out whatever is left of `floor` since `started`, returning the time slept.
pub async fn pace(started: Instant, floor: Duration) -> Duration {
    let remaining = floor.saturating_sub(started.elapsed());
    if !remaining.is_zero() {
        tracing::debug!(
            wait_ms = remaining.as_millis() as u64,
            "Holding reply for latency floor"
        );
        sleep(remaining).await;
    }
    remaining
}
