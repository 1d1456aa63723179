use std::time::Duration;

/// Fixed-timestep gate with drop-frame compensation.
///
/// Callers feed the wall-clock delta observed since the previous
/// callback; the gate answers whether one update pass should run now.
/// Callbacks arriving faster than the target rate are coalesced (the
/// delta keeps accumulating), and a pass fires only when the
/// accumulated delta reaches the interval. On firing, the remainder
/// modulo the interval carries forward as the new baseline, so the
/// cadence never drifts and a long stall never produces a catch-up
/// burst: at most one pass per feed.
#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    carry: Duration,
}

/// 1000/60 ms.
pub const TARGET_TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: if interval.is_zero() {
                TARGET_TICK_INTERVAL
            } else {
                interval
            },
            carry: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Registers the elapsed delta since the previous feed. Returns true
    /// when exactly one update pass should run.
    pub fn feed(&mut self, delta: Duration) -> bool {
        self.carry = self.carry.saturating_add(delta);
        if self.carry < self.interval {
            return false;
        }
        let interval_nanos = self.interval.as_nanos();
        let carry_nanos = self.carry.as_nanos() % interval_nanos;
        self.carry = Duration::from_nanos(carry_nanos as u64);
        true
    }

    /// Discards any accumulated remainder. Called when the scheduling
    /// chain restarts after a full halt, so the paused span is not
    /// treated as elapsed simulation time.
    pub fn restart(&mut self) {
        self.carry = Duration::ZERO;
    }
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new(TARGET_TICK_INTERVAL)
    }
}
