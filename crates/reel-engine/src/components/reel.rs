use crate::api::config::ReelLayout;
use crate::api::error::ReelError;
use crate::api::types::SymbolId;
use crate::assets::registry::TextureRegistry;
use crate::components::sprite::{SymbolSprite, SymbolTexture};
use crate::core::strip::ReelStrip;

/// What currently drives a reel's position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReelMotion {
    /// Not moving. Whole after a landing, possibly fractional after an idle stop.
    #[default]
    Resting,
    /// Free spinning, advanced by the frame driver once `delay_ms` has run out.
    Idle { delay_ms: f64 },
    /// Owned by a spin-to-target tween.
    Targeted,
}

/// One reel column: a continuous rotation coordinate and the sprite slots projected from it.
///
/// Slot `j` sits at viewport row `((position + j) mod (rows + 1)) - 1`, so one slot is
/// always parked just outside the viewport, ready to scroll in.
#[derive(Debug, Clone)]
pub struct Reel {
    /// Continuous rotation in symbol steps.
    pub position: f64,
    /// Position at the previous frame.
    pub previous_position: f64,
    /// `rows + 1` recycled sprites.
    pub slots: Vec<SymbolSprite>,
    pub motion: ReelMotion,
}

impl Reel {
    /// A resting reel at position 0 showing `strip[0..rows)`, spare slot holding `strip[rows]`.
    pub fn new(strip: &ReelStrip, textures: &TextureRegistry, layout: &ReelLayout) -> Result<Self, ReelError> {
        let virtual_len = layout.virtual_len();
        let mut slots = Vec::with_capacity(virtual_len);
        for slot in 0..virtual_len {
            // slot 0 is row -1 at position 0
            let row = slot as i64 - 1;
            let symbol = if row < 0 { strip.at(layout.rows as i64) } else { strip.at(row) };
            let texture = textures.get(symbol)?;
            slots.push(SymbolSprite::new(symbol, texture, layout.symbol_size, layout.slot_offset(0.0, slot)));
        }
        Ok(Self {
            position: 0.0,
            previous_position: 0.0,
            slots,
            motion: ReelMotion::Resting,
        })
    }

    /// Slot occupying viewport `row` (`-1` is the spare above the viewport) at the
    /// nearest whole position.
    pub fn slot_for_row(&self, row: i64) -> usize {
        let virtual_len = self.slots.len() as i64;
        let aligned = self.position.round() as i64;
        (row + 1 - aligned).rem_euclid(virtual_len) as usize
    }

    /// Symbols currently in the visible rows, top to bottom.
    pub fn visible_symbols(&self, rows: usize) -> Vec<SymbolId> {
        (0..rows as i64)
            .map(|row| self.slots[self.slot_for_row(row)].symbol)
            .collect()
    }

    /// Final snap after a spin: whole position, each visible row forced to `column`,
    /// the spare slot parked at row -1 showing `spare`.
    pub fn land(
        &mut self,
        column: &[(SymbolId, SymbolTexture)],
        spare: (SymbolId, SymbolTexture),
        layout: &ReelLayout,
    ) {
        self.position = self.position.round();
        self.previous_position = self.position;
        self.motion = ReelMotion::Resting;

        for (row, &(symbol, texture)) in column.iter().enumerate() {
            let slot = self.slot_for_row(row as i64);
            let sprite = &mut self.slots[slot];
            if sprite.symbol != symbol || sprite.texture != texture {
                sprite.retexture(symbol, texture, layout.symbol_size);
            }
            sprite.offset.y = row as f64 * layout.step_y;
        }

        let slot = self.slot_for_row(-1);
        let sprite = &mut self.slots[slot];
        sprite.retexture(spare.0, spare.1, layout.symbol_size);
        sprite.offset.y = -layout.step_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ReelConfig;
    use crate::assets::manifest::SymbolManifest;
    use crate::api::types::SymbolId::*;

    fn setup() -> (ReelStrip, TextureRegistry, ReelLayout) {
        let strip = ReelStrip::new(vec![Ace, King, Queen, Jack, Ten, Wild]);
        let textures = TextureRegistry::from_manifest(&SymbolManifest::uniform("s.png", 144));
        let layout = ReelConfig { num_rows: 3, ..Default::default() }.layout(1);
        (strip, textures, layout)
    }

    #[test]
    fn new_reel_shows_strip_window() {
        let (strip, textures, layout) = setup();
        let reel = Reel::new(&strip, &textures, &layout).unwrap();
        assert_eq!(reel.slots.len(), 4);
        assert_eq!(reel.visible_symbols(3), vec![Ace, King, Queen]);
        assert_eq!(reel.slots[reel.slot_for_row(-1)].symbol, Jack);
        assert_eq!(reel.slots[0].offset.y, -layout.step_y);
    }

    #[test]
    fn rows_rotate_with_position() {
        let (strip, textures, layout) = setup();
        let mut reel = Reel::new(&strip, &textures, &layout).unwrap();
        reel.position = 1.0;
        // row 0 is now held by what was the spare slot
        assert_eq!(reel.slot_for_row(0), 0);
        assert_eq!(reel.slot_for_row(-1), 3);
    }

    #[test]
    fn land_forces_column_and_parks_spare() {
        let (strip, textures, layout) = setup();
        let mut reel = Reel::new(&strip, &textures, &layout).unwrap();
        reel.position = 6.999_999_7;
        reel.motion = ReelMotion::Targeted;

        let column: Vec<_> = [Wolf, Crown, Scatter]
            .iter()
            .map(|&s| (s, textures.get(s).unwrap()))
            .collect();
        reel.land(&column, (Dragon, textures.get(Dragon).unwrap()), &layout);

        assert_eq!(reel.position, 7.0);
        assert_eq!(reel.motion, ReelMotion::Resting);
        assert_eq!(reel.visible_symbols(3), vec![Wolf, Crown, Scatter]);
        for row in 0..3 {
            let slot = reel.slot_for_row(row);
            assert_eq!(reel.slots[slot].offset.y, layout.slot_offset(7.0, slot));
        }
        let spare = reel.slot_for_row(-1);
        assert_eq!(reel.slots[spare].symbol, Dragon);
        assert_eq!(reel.slots[spare].offset.y, layout.slot_offset(7.0, spare));
    }
}
