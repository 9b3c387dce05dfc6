use glam::DVec2;
use crate::api::types::SymbolId;

/// Identifies which texture atlas a symbol image lives in.
/// Index into the SymbolManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// A loaded symbol image: its atlas cell and native pixel size.
/// Shared read-only by every sprite showing that symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolTexture {
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Native image width in pixels.
    pub width: f64,
    /// Native image height in pixels.
    pub height: f64,
}

impl SymbolTexture {
    /// Uniform scale that fits the image inside a `cell` × `cell` square.
    pub fn fit_scale(&self, cell: f64) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 1.0;
        }
        (cell / self.width).min(cell / self.height)
    }

    /// Whole-pixel horizontal offset that centres the fitted image in its cell.
    pub fn centre_offset(&self, cell: f64) -> f64 {
        ((cell - self.width * self.fit_scale(cell)) / 2.0).round()
    }
}

/// One visible slot of a reel. Owned by its reel and recycled: wrapping swaps
/// the texture in place instead of allocating a new sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSprite {
    pub symbol: SymbolId,
    pub texture: SymbolTexture,
    /// x: centring offset inside the reel column, y: vertical offset from the viewport top.
    pub offset: DVec2,
    /// Scale applied to the native image size.
    pub scale: f64,
}

impl SymbolSprite {
    pub fn new(symbol: SymbolId, texture: SymbolTexture, cell: f64, offset_y: f64) -> Self {
        let mut sprite = Self {
            symbol,
            texture,
            offset: DVec2::new(0.0, offset_y),
            scale: 1.0,
        };
        sprite.retexture(symbol, texture, cell);
        sprite
    }

    /// Show a different symbol, re-centring for its aspect ratio.
    pub fn retexture(&mut self, symbol: SymbolId, texture: SymbolTexture, cell: f64) {
        self.symbol = symbol;
        self.texture = texture;
        self.scale = texture.fit_scale(cell);
        self.offset.x = texture.centre_offset(cell);
    }

    /// Rendered size in pixels.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.texture.width, self.texture.height) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(width: f64, height: f64) -> SymbolTexture {
        SymbolTexture { atlas: AtlasId(0), col: 0.0, row: 0.0, width, height }
    }

    #[test]
    fn wide_image_fills_width() {
        let tex = texture(288.0, 144.0);
        assert_eq!(tex.fit_scale(144.0), 0.5);
        assert_eq!(tex.centre_offset(144.0), 0.0);
    }

    #[test]
    fn tall_image_is_centred() {
        let sprite = SymbolSprite::new(SymbolId::Wild, texture(100.0, 200.0), 144.0, 0.0);
        assert_eq!(sprite.scale, 0.72);
        assert_eq!(sprite.size(), DVec2::new(72.0, 144.0));
        assert_eq!(sprite.offset.x, 36.0);
    }

    #[test]
    fn retexture_keeps_vertical_offset() {
        let mut sprite = SymbolSprite::new(SymbolId::Ace, texture(144.0, 144.0), 144.0, 152.0);
        sprite.retexture(SymbolId::Crown, texture(100.0, 200.0), 144.0);
        assert_eq!(sprite.symbol, SymbolId::Crown);
        assert_eq!(sprite.offset.y, 152.0);
        assert_eq!(sprite.offset.x, 36.0);
    }
}
