//! Per-round countdown.
//!
//! The host drives the timer by reporting elapsed time, the same way it
//! drives the rest of the game loop. Each whole second that passes produces
//! one tick; reaching zero produces a single expiry.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerState {
    Idle,
    /// No time limit: shows the untimed marker and never expires
    Untimed,
    Running { remaining: u32, carry: f64 },
    Expired,
    Cancelled,
}

/// Receives timer callbacks. Passed in on every call so the timer never holds
/// on to game state.
pub trait TimerListener {
    fn on_tick(&mut self, remaining: u32);
    fn on_expire(&mut self);
}

#[derive(Debug, Clone)]
pub struct RoundTimer {
    state: TimerState,
    limit: u32,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTimer {
    pub fn new() -> Self {
        RoundTimer {
            state: TimerState::Idle,
            limit: 0,
        }
    }

    /// (Re)starts the countdown, dropping whatever the previous one was doing.
    /// A timed start reports the full limit right away.
    pub fn start(&mut self, limit_secs: u32, listener: &mut impl TimerListener) {
        self.limit = limit_secs;
        if limit_secs == 0 {
            self.state = TimerState::Untimed;
            return;
        }
        self.state = TimerState::Running {
            remaining: limit_secs,
            carry: 0.0,
        };
        listener.on_tick(limit_secs);
    }

    /// Feeds `dt` seconds of elapsed time.
    pub fn advance(&mut self, dt: f64, listener: &mut impl TimerListener) {
        let TimerState::Running {
            mut remaining,
            mut carry,
        } = self.state
        else {
            return;
        };
        carry += dt.max(0.0);
        while carry >= 1.0 {
            carry -= 1.0;
            remaining -= 1;
            listener.on_tick(remaining);
            if remaining == 0 {
                self.state = TimerState::Expired;
                listener.on_expire();
                return;
            }
        }
        self.state = TimerState::Running { remaining, carry };
    }

    /// Stops a running or untimed countdown. Does nothing otherwise.
    pub fn cancel(&mut self) {
        if matches!(self.state, TimerState::Running { .. } | TimerState::Untimed) {
            self.state = TimerState::Cancelled;
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            TimerState::Running { remaining, .. } => Some(remaining),
            TimerState::Expired => Some(0),
            _ => None,
        }
    }

    /// Share of the limit still left, for the shrinking countdown bar.
    pub fn fraction_remaining(&self) -> f64 {
        match self.state {
            TimerState::Running { remaining, carry } => {
                ((remaining as f64 - carry) / self.limit as f64).clamp(0.0, 1.0)
            }
            TimerState::Expired => 0.0,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<u32>,
        expirations: usize,
    }

    impl TimerListener for Recorder {
        fn on_tick(&mut self, remaining: u32) {
            self.ticks.push(remaining);
        }

        fn on_expire(&mut self) {
            self.expirations += 1;
        }
    }

    #[test]
    fn test_countdown_ticks_then_expires_once() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(5, &mut rec);
        assert_eq!(rec.ticks, vec![5]);

        for _ in 0..10 {
            timer.advance(1.0, &mut rec);
        }
        assert_eq!(rec.ticks, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(rec.expirations, 1);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining(), Some(0));
    }

    #[test]
    fn test_fractional_frames_accumulate() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(2, &mut rec);
        for _ in 0..9 {
            timer.advance(0.1, &mut rec);
        }
        assert_eq!(rec.ticks, vec![2]);
        assert!((timer.fraction_remaining() - 0.55).abs() < 1e-9);
        timer.advance(0.2, &mut rec);
        assert_eq!(rec.ticks, vec![2, 1]);
        // A long frame covers several seconds at once.
        timer.advance(3.0, &mut rec);
        assert_eq!(rec.ticks, vec![2, 1, 0]);
        assert_eq!(rec.expirations, 1);
    }

    #[test]
    fn test_untimed_never_expires() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(0, &mut rec);
        timer.advance(10_000.0, &mut rec);
        assert!(rec.ticks.is_empty());
        assert_eq!(rec.expirations, 0);
        assert_eq!(timer.state(), TimerState::Untimed);
        assert_eq!(timer.fraction_remaining(), 1.0);
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Cancelled);
    }

    #[test]
    fn test_cancel_silences_callbacks() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(5, &mut rec);
        timer.advance(2.0, &mut rec);
        timer.cancel();
        timer.advance(10.0, &mut rec);
        assert_eq!(rec.ticks, vec![5, 4, 3]);
        assert_eq!(rec.expirations, 0);

        timer.cancel();
        assert_eq!(timer.state(), TimerState::Cancelled);
    }

    #[test]
    fn test_cancel_after_expiry_is_noop() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(1, &mut rec);
        timer.advance(1.0, &mut rec);
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn test_restart_replaces_previous_countdown() {
        let mut timer = RoundTimer::new();
        let mut rec = Recorder::default();
        timer.start(3, &mut rec);
        timer.advance(2.5, &mut rec);
        timer.start(3, &mut rec);
        timer.advance(0.9, &mut rec);
        assert_eq!(rec.ticks, vec![3, 2, 1, 3]);
        assert_eq!(timer.remaining(), Some(3));
        assert_eq!(rec.expirations, 0);
    }
}
