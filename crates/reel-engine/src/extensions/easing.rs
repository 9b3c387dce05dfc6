// extensions/easing.rs
//
// Pure easing functions for reel interpolation.
// No dependencies on reels or sprites, just math.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow end.
    QuadOut,
    /// Stronger slow end.
    CubicOut,
    /// Very strong slow end.
    QuartOut,
    /// Sine wave easing (smooth).
    SineOut,
    /// Cubic fling past the end, then settle back. `amount` sets the overshoot;
    /// 0 degenerates to a plain cubic ease-out.
    Backout { amount: f64 },
}

impl Easing {
    /// The reel stop curve of the production game.
    pub const REEL_STOP: Easing = Easing::Backout { amount: 0.55 };

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// The endpoints are pinned: `apply(0.0) == 0.0` and `apply(1.0) == 1.0` exactly.
    /// In between the value can exceed 1 for Backout.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::SineOut => (t * std::f64::consts::FRAC_PI_2).sin(),
            Easing::Backout { amount } => {
                let u = t - 1.0;
                u * u * ((amount + 1.0) * u + amount) + 1.0
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f64, b: f64, t: f64, easing: Easing) -> f64 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadOut,
        Easing::CubicOut,
        Easing::QuartOut,
        Easing::SineOut,
        Easing::REEL_STOP,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn backout_overshoots_then_settles() {
        let peak = (1..100)
            .map(|i| Easing::REEL_STOP.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "backout should overshoot, peak {}", peak);
        assert!(peak < 1.05, "overshoot should stay small, peak {}", peak);
        // approaches 1 from above
        assert!(Easing::REEL_STOP.apply(0.99) > 1.0);
    }

    #[test]
    fn backout_starts_forward() {
        let mut last = 0.0;
        for i in 1..=60 {
            let v = Easing::REEL_STOP.apply(i as f64 / 100.0);
            assert!(v > last, "backout should rise early, t={}", i);
            last = v;
        }
    }

    #[test]
    fn ease_out_curves_are_monotonic() {
        for easing in [Easing::QuadOut, Easing::CubicOut, Easing::QuartOut, Easing::SineOut] {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v >= last, "{:?} dipped at {}", easing, i);
                last = v;
            }
        }
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
