use serde::{Deserialize, Serialize};
use crate::api::error::ReelError;

/// Configuration for a reel machine, normally provided by the host as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReelConfig {
    /// Visible rows per reel (default: 4).
    pub num_rows: usize,
    /// Rendered symbol cell size in pixels (default: 144).
    pub symbol_size: f64,
    /// Gap between cells in pixels (default: 8).
    pub gap: f64,
    /// Horizontal distance between reel origins. Default: `symbol_size + gap`.
    pub reel_width: Option<f64>,
    /// Base number of whole symbol steps a reel travels before its stop (default: 12).
    pub spin_cycles: u32,
    /// Extra steps added per reel index, so later reels spin further (default: 2).
    pub cycle_stagger: u32,
    /// Upper bound (exclusive) of random extra steps per reel (default: 2).
    pub cycle_jitter: u32,
    /// Tween duration of the first reel in milliseconds (default: 1600).
    pub base_duration_ms: f64,
    /// Extra duration per reel index in milliseconds (default: 220).
    pub stop_stagger_ms: f64,
    /// Overshoot of the backout easing (default: 0.55).
    pub backout_amount: f64,
    /// Idle spin speed in symbols per second (default: 18).
    pub idle_speed: f64,
    /// Delay between successive reels entering idle spin, in milliseconds (default: 50).
    pub idle_start_stagger_ms: f64,
    /// Largest frame delta honoured by idle motion, in milliseconds (default: 100).
    pub max_frame_delta_ms: f64,
    /// Treat a target column missing from a strip as a hard error instead of falling back.
    pub strict_stops: bool,
    /// Seed for the symbol RNG. `None` uses a fixed default seed; hosts pass their own entropy.
    pub seed: Option<u64>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            num_rows: 4,
            symbol_size: 144.0,
            gap: 8.0,
            reel_width: None,
            spin_cycles: 12,
            cycle_stagger: 2,
            cycle_jitter: 2,
            base_duration_ms: 1600.0,
            stop_stagger_ms: 220.0,
            backout_amount: 0.55,
            idle_speed: 18.0,
            idle_start_stagger_ms: 50.0,
            max_frame_delta_ms: 100.0,
            strict_stops: false,
            seed: None,
        }
    }
}

impl ReelConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ReelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject values that would make the layout or the timing degenerate.
    pub fn validate(&self) -> Result<(), ReelError> {
        if self.num_rows == 0 {
            return Err(ReelError::InvalidConfig("num_rows must be at least 1"));
        }
        if !(self.symbol_size > 0.0) {
            return Err(ReelError::InvalidConfig("symbol_size must be positive"));
        }
        if !(self.gap >= 0.0) {
            return Err(ReelError::InvalidConfig("gap must not be negative"));
        }
        if matches!(self.reel_width, Some(w) if !(w > 0.0)) {
            return Err(ReelError::InvalidConfig("reel_width must be positive"));
        }
        if !(self.base_duration_ms > 0.0) || !(self.stop_stagger_ms >= 0.0) {
            return Err(ReelError::InvalidConfig("spin durations must be positive"));
        }
        if !(self.backout_amount >= 0.0) {
            return Err(ReelError::InvalidConfig("backout_amount must not be negative"));
        }
        if !(self.idle_speed >= 0.0) || !(self.max_frame_delta_ms > 0.0) {
            return Err(ReelError::InvalidConfig("idle timing must be positive"));
        }
        Ok(())
    }

    /// Pixel layout derived from this configuration.
    pub fn layout(&self, reel_count: usize) -> ReelLayout {
        ReelLayout::new(self, reel_count)
    }
}

/// Pixel geometry shared by the frame driver, the settle snap and the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelLayout {
    pub reels: usize,
    pub rows: usize,
    pub symbol_size: f64,
    /// Distance between reel origins.
    pub step_x: f64,
    /// Distance between row origins.
    pub step_y: f64,
    pub content_width: f64,
    pub content_height: f64,
}

impl ReelLayout {
    pub fn new(config: &ReelConfig, reels: usize) -> Self {
        let rows = config.num_rows;
        let size = config.symbol_size;
        let gap = config.gap;
        let gaps_x = reels.saturating_sub(1) as f64;
        let gaps_y = rows.saturating_sub(1) as f64;
        Self {
            reels,
            rows,
            symbol_size: size,
            step_x: config.reel_width.unwrap_or(size + gap),
            step_y: size + gap,
            content_width: reels as f64 * size + gaps_x * gap,
            content_height: rows as f64 * size + gaps_y * gap,
        }
    }

    /// Number of sprite slots per reel: the visible rows plus one spare.
    #[inline]
    pub fn virtual_len(&self) -> usize {
        self.rows + 1
    }

    /// Vertical pixel offset of slot `slot` for a reel at `position`.
    #[inline]
    pub fn slot_offset(&self, position: f64, slot: usize) -> f64 {
        let virtual_len = self.virtual_len() as f64;
        (position + slot as f64).rem_euclid(virtual_len) * self.step_y - self.step_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_layout() {
        let layout = ReelConfig::default().layout(6);
        assert_eq!(layout.step_x, 152.0);
        assert_eq!(layout.step_y, 152.0);
        assert_eq!(layout.content_width, 6.0 * 144.0 + 5.0 * 8.0);
        assert_eq!(layout.content_height, 4.0 * 144.0 + 3.0 * 8.0);
        assert_eq!(layout.virtual_len(), 5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ReelConfig::from_json(r#"{ "numRows": 3, "strictStops": true }"#).unwrap();
        assert_eq!(config.num_rows, 3);
        assert!(config.strict_stops);
        assert_eq!(config.spin_cycles, 12);
        assert_eq!(config.backout_amount, 0.55);
    }

    #[test]
    fn zero_rows_rejected() {
        let config = ReelConfig { num_rows: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ReelError::InvalidConfig(_))));
    }

    #[test]
    fn slot_offsets_wrap_through_virtual_buffer() {
        let layout = ReelConfig { num_rows: 3, symbol_size: 90.0, gap: 10.0, ..Default::default() }.layout(1);
        // virtual length 4, step 100
        assert_eq!(layout.slot_offset(0.0, 0), -100.0);
        assert_eq!(layout.slot_offset(0.0, 1), 0.0);
        assert_eq!(layout.slot_offset(0.0, 3), 200.0);
        assert_eq!(layout.slot_offset(1.0, 3), -100.0);
        assert_eq!(layout.slot_offset(0.5, 3), 250.0);
    }
}
