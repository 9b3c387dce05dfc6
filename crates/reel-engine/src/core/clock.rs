/// Turns the host's absolute frame timestamps into per-frame deltas.
/// Assumes nothing about the refresh rate, only that timestamps are monotonic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame in milliseconds.
    last_ms: Option<f64>,
    /// Largest delta handed out, so a suspended tab does not teleport idle reels.
    max_delta_ms: f64,
}

impl FrameClock {
    pub fn new(max_delta_ms: f64) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Record a frame at `now_ms`. Returns the clamped delta in milliseconds
    /// (zero on the first frame and when time runs backwards).
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_ms = Some(match self.last_ms {
            Some(last) => last.max(now_ms),
            None => now_ms,
        });
        delta
    }

    /// Timestamp of the most recent frame, if any.
    pub fn now(&self) -> Option<f64> {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_delta() {
        let mut clock = FrameClock::new(100.0);
        assert_eq!(clock.advance(5_000.0), 0.0);
        assert_eq!(clock.advance(5_016.0), 16.0);
    }

    #[test]
    fn caps_long_gaps() {
        let mut clock = FrameClock::new(100.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), 100.0);
    }

    #[test]
    fn backwards_time_is_ignored() {
        let mut clock = FrameClock::new(100.0);
        clock.advance(50.0);
        assert_eq!(clock.advance(40.0), 0.0);
        assert_eq!(clock.advance(60.0), 10.0);
    }
}
