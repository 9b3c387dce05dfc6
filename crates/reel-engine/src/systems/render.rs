use crate::api::config::ReelLayout;
use crate::components::reel::Reel;
use crate::renderer::instance::{RenderBuffer, SymbolInstance};

/// Build the render buffer from the reels' sprite slots.
/// Slots entirely outside the viewport (the parked spare, mostly) are masked out.
/// Reels are emitted left to right, slots top to bottom by row, without allocating.
pub fn build_render_buffer(reels: &[Reel], layout: &ReelLayout, buffer: &mut RenderBuffer) {
    buffer.clear();
    buffer.viewport_width = layout.content_width as f32;
    buffer.viewport_height = layout.content_height as f32;

    for (index, reel) in reels.iter().enumerate() {
        let origin_x = index as f64 * layout.step_x;

        // row -1 is the spare slot above the viewport
        let last_row = reel.slots.len() as i64 - 1;
        for row in -1..last_row {
            let sprite = &reel.slots[reel.slot_for_row(row)];
            let top = sprite.offset.y;
            if top + layout.symbol_size <= 0.0 || top >= layout.content_height {
                continue;
            }
            let size = sprite.size();
            buffer.push(SymbolInstance {
                x: (origin_x + sprite.offset.x) as f32,
                y: top as f32,
                width: size.x as f32,
                height: size.y as f32,
                sprite_col: sprite.texture.col,
                atlas_row: sprite.texture.row,
                atlas: sprite.texture.atlas.0 as f32,
                reel: index as f32,
            });
        }
    }
}
