use crate::api::config::ReelLayout;
use crate::assets::registry::TextureRegistry;
use crate::components::reel::{Reel, ReelMotion};
use crate::core::rng::SymbolRng;
use crate::core::strip::StripStore;

/// Per-frame reel update: advance idle motion, then re-project every slot from its
/// reel's position. Sprites are never authoritative; this runs every frame whether
/// or not anything is tweening. Returns the number of slots that wrapped.
pub fn drive_reels(
    reels: &mut [Reel],
    strips: &StripStore,
    textures: &TextureRegistry,
    layout: &ReelLayout,
    rng: &mut dyn SymbolRng,
    dt_ms: f64,
    idle_speed: f64,
) -> usize {
    let mut wrapped = 0;

    for (index, reel) in reels.iter_mut().enumerate() {
        reel.previous_position = reel.position;
        advance_idle(reel, dt_ms, idle_speed);
        wrapped += project_reel(reel, index, strips, textures, layout, rng);
    }

    wrapped
}

/// Move an idle reel forward by `dt_ms`, spending its start delay first.
fn advance_idle(reel: &mut Reel, dt_ms: f64, idle_speed: f64) {
    if let ReelMotion::Idle { delay_ms } = &mut reel.motion {
        let mut remaining = dt_ms;
        if *delay_ms > 0.0 {
            let spent = delay_ms.min(remaining);
            *delay_ms -= spent;
            remaining -= spent;
        }
        reel.position += idle_speed * remaining / 1000.0;
    }
}

/// Place every slot of one reel and resample the ones that wrapped back to the
/// entering edge. Returns how many wrapped.
fn project_reel(
    reel: &mut Reel,
    index: usize,
    strips: &StripStore,
    textures: &TextureRegistry,
    layout: &ReelLayout,
    rng: &mut dyn SymbolRng,
) -> usize {
    let strip = strips.strip_for(index);
    // A wrap is a drop of roughly the whole virtual span; forward motion and the
    // settle-back of an overshoot only ever move a slot a fraction of that.
    let wrap_drop = layout.step_y * layout.virtual_len() as f64 / 2.0;
    let mut wrapped = 0;

    for slot in 0..reel.slots.len() {
        let sprite = &mut reel.slots[slot];
        let previous = sprite.offset.y;
        let offset = layout.slot_offset(reel.position, slot);
        sprite.offset.y = offset;

        if offset < 0.0 && previous - offset > wrap_drop {
            let symbol = strip.at(rng.next_below(strip.len() as u32) as i64);
            if let Ok(texture) = textures.get(symbol) {
                sprite.retexture(symbol, texture, layout.symbol_size);
            }
            log::trace!("reel {} slot {} wrapped to {:?}", index, slot, symbol);
            wrapped += 1;
        }
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ReelConfig;
    use crate::api::types::SymbolId::*;
    use crate::assets::manifest::SymbolManifest;
    use crate::core::rng::SequenceRng;
    use crate::core::strip::ReelStrip;

    struct Rig {
        reels: Vec<Reel>,
        strips: StripStore,
        textures: TextureRegistry,
        layout: ReelLayout,
    }

    fn rig() -> Rig {
        let strips = StripStore::new(vec![ReelStrip::new(vec![Ace, King, Queen, Jack, Ten, Wild])]).unwrap();
        let textures = TextureRegistry::from_manifest(&SymbolManifest::uniform("s.png", 144));
        let layout = ReelConfig { num_rows: 3, symbol_size: 90.0, gap: 10.0, ..Default::default() }.layout(1);
        let reels = vec![Reel::new(strips.strip_for(0), &textures, &layout).unwrap()];
        Rig { reels, strips, textures, layout }
    }

    #[test]
    fn resting_reel_stays_put() {
        let mut rig = rig();
        let mut rng = SequenceRng::new(vec![0]);
        let before = rig.reels[0].visible_symbols(3);
        let wrapped = drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 16.0, 18.0);
        assert_eq!(wrapped, 0);
        assert_eq!(rig.reels[0].position, 0.0);
        assert_eq!(rig.reels[0].visible_symbols(3), before);
    }

    #[test]
    fn idle_reel_moves_after_delay() {
        let mut rig = rig();
        let mut rng = SequenceRng::new(vec![0]);
        rig.reels[0].motion = ReelMotion::Idle { delay_ms: 50.0 };

        drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 40.0, 10.0);
        assert_eq!(rig.reels[0].position, 0.0);

        drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 60.0, 10.0);
        assert!((rig.reels[0].position - 0.5).abs() < 1e-9);
        assert_eq!(rig.reels[0].previous_position, 0.0);
    }

    #[test]
    fn slots_follow_position() {
        let mut rig = rig();
        let mut rng = SequenceRng::new(vec![0]);
        rig.reels[0].position = 0.25;
        drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 0.0, 0.0);
        let offsets: Vec<f64> = rig.reels[0].slots.iter().map(|s| s.offset.y).collect();
        assert_eq!(offsets, vec![-75.0, 25.0, 125.0, 225.0]);
    }

    #[test]
    fn wrapping_slot_is_resampled_from_strip() {
        let mut rig = rig();
        // index 5 → Wild
        let mut rng = SequenceRng::new(vec![5]);
        rig.reels[0].position = 0.9;
        drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 0.0, 0.0);

        // slot 3 sits at (0.9 + 3) mod 4 = 3.9 → just below the viewport
        rig.reels[0].position = 1.1;
        let wrapped = drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 0.0, 0.0);
        assert_eq!(wrapped, 1);
        assert_eq!(rig.reels[0].slots[3].symbol, Wild);
        assert!(rig.reels[0].slots[3].offset.y < 0.0);
    }

    #[test]
    fn settle_back_does_not_wrap() {
        let mut rig = rig();
        let mut rng = SequenceRng::new(vec![5]);
        rig.reels[0].position = 4.2;
        drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 0.0, 0.0);
        rig.reels[0].position = 4.0;
        let wrapped = drive_reels(&mut rig.reels, &rig.strips, &rig.textures, &rig.layout, &mut rng, 0.0, 0.0);
        assert_eq!(wrapped, 0);
    }
}
