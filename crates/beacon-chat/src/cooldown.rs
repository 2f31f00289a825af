//! Minimum-interval gate between sends.
//!
//! The gate is armed on every accepted send, whatever that send's
//! eventual outcome. The check is a direct timestamp comparison; the
//! countdown shown to the user is derived from the same state.

use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    Allowed,
    Rejected { remaining_seconds: u64 },
}

#[derive(Debug, Clone)]
pub struct CooldownGate {
    interval: Duration,
    until: Option<Instant>,
}

impl CooldownGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            until: None,
        }
    }

    /// Arm the gate until `now + interval`, or report how long to wait.
    pub fn try_acquire(&mut self, now: Instant) -> Acquire {
        let remaining_seconds = self.remaining_seconds(now);
        if remaining_seconds > 0 {
            return Acquire::Rejected { remaining_seconds };
        }
        self.until = Some(now + self.interval);
        Acquire::Allowed
    }

    /// `max(0, ceil(until - now))` in whole seconds.
    pub fn remaining_seconds(&self, now: Instant) -> u64 {
        match self.until {
            Some(until) if until > now => ceil_secs(until - now),
            _ => 0,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.remaining_seconds(now) > 0
    }

    pub fn cooldown_until(&self) -> Option<Instant> {
        self.until
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reset(&mut self) {
        self.until = None;
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_nanos().div_ceil(1_000_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> (CooldownGate, Instant) {
        (CooldownGate::new(Duration::from_secs(15)), Instant::now())
    }

    #[test]
    fn first_acquire_is_allowed() {
        let (mut gate, t0) = gate();
        assert_eq!(gate.try_acquire(t0), Acquire::Allowed);
        assert_eq!(gate.cooldown_until(), Some(t0 + Duration::from_secs(15)));
    }

    #[test]
    fn rejects_inside_interval_with_remaining_seconds() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        assert_eq!(
            gate.try_acquire(t0 + Duration::from_secs(5)),
            Acquire::Rejected {
                remaining_seconds: 10
            }
        );
    }

    #[test]
    fn allows_exactly_at_interval() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        assert_eq!(
            gate.try_acquire(t0 + Duration::from_secs(15)),
            Acquire::Allowed
        );
    }

    #[test]
    fn rejection_does_not_rearm() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        gate.try_acquire(t0 + Duration::from_secs(14));
        assert_eq!(gate.cooldown_until(), Some(t0 + Duration::from_secs(15)));
    }

    #[test]
    fn remaining_rounds_up_partial_seconds() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        assert_eq!(gate.remaining_seconds(t0 + Duration::from_millis(14_001)), 1);
        assert_eq!(gate.remaining_seconds(t0 + Duration::from_millis(500)), 15);
        assert_eq!(gate.remaining_seconds(t0 + Duration::from_secs(20)), 0);
    }

    #[test]
    fn rejected_remaining_is_at_least_one() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        let almost = t0 + Duration::from_secs(15) - Duration::from_nanos(1);
        assert_eq!(
            gate.try_acquire(almost),
            Acquire::Rejected {
                remaining_seconds: 1
            }
        );
    }

    #[test]
    fn unarmed_gate_reports_zero() {
        let (gate, t0) = gate();
        assert_eq!(gate.remaining_seconds(t0), 0);
        assert!(!gate.is_active(t0));
    }

    #[test]
    fn zero_interval_never_blocks() {
        let mut gate = CooldownGate::new(Duration::ZERO);
        let t0 = Instant::now();
        assert_eq!(gate.try_acquire(t0), Acquire::Allowed);
        assert_eq!(gate.try_acquire(t0), Acquire::Allowed);
    }

    #[test]
    fn reset_disarms() {
        let (mut gate, t0) = gate();
        gate.try_acquire(t0);
        gate.reset();
        assert_eq!(gate.try_acquire(t0 + Duration::from_secs(1)), Acquire::Allowed);
    }
}
