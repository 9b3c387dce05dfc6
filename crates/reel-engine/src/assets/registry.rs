use std::collections::HashMap;
use crate::api::error::ReelError;
use crate::api::types::SymbolId;
use crate::assets::manifest::SymbolManifest;
use crate::components::sprite::{AtlasId, SymbolTexture};
use crate::core::strip::StripStore;

/// Registry of symbol textures, built from a SymbolManifest.
/// Loaded once and shared read-only by every reel.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: HashMap<SymbolId, SymbolTexture>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed SymbolManifest.
    pub fn from_manifest(manifest: &SymbolManifest) -> Self {
        let mut textures = HashMap::with_capacity(manifest.symbols.len());
        for (&symbol, desc) in &manifest.symbols {
            textures.insert(symbol, SymbolTexture {
                atlas: AtlasId(desc.atlas),
                col: desc.col as f32,
                row: desc.row as f32,
                width: desc.width as f64,
                height: desc.height as f64,
            });
        }
        Self { textures }
    }

    pub fn insert(&mut self, symbol: SymbolId, texture: SymbolTexture) {
        self.textures.insert(symbol, texture);
    }

    /// Look up a symbol's texture.
    pub fn get(&self, symbol: SymbolId) -> Result<SymbolTexture, ReelError> {
        self.textures
            .get(&symbol)
            .copied()
            .ok_or(ReelError::MissingTexture(symbol))
    }

    /// Fail on the first strip symbol that has no texture.
    pub fn check_strips(&self, strips: &StripStore) -> Result<(), ReelError> {
        for strip in strips.iter() {
            for &symbol in strip.symbols() {
                self.get(symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::strip::ReelStrip;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "symbols", "cols": 16, "rows": 8, "path": "symbols.png" }
            ],
            "symbols": {
                "DRAGON": { "atlas": 0, "col": 3, "row": 5, "width": 200, "height": 100 }
            }
        }"#;
        let manifest = SymbolManifest::from_json(json).unwrap();
        let reg = TextureRegistry::from_manifest(&manifest);

        let dragon = reg.get(SymbolId::Dragon).expect("dragon should exist");
        assert_eq!(dragon.atlas, AtlasId(0));
        assert_eq!(dragon.col, 3.0);
        assert_eq!(dragon.row, 5.0);
        assert_eq!(dragon.width, 200.0);
    }

    #[test]
    fn unknown_symbol_is_missing_texture() {
        let reg = TextureRegistry::new();
        assert!(matches!(reg.get(SymbolId::Ace), Err(ReelError::MissingTexture(SymbolId::Ace))));
    }

    #[test]
    fn strip_check_names_first_gap() {
        let mut reg = TextureRegistry::new();
        let tex = SymbolTexture { atlas: AtlasId(0), col: 0.0, row: 0.0, width: 1.0, height: 1.0 };
        reg.insert(SymbolId::Ace, tex);
        let strips = StripStore::new(vec![ReelStrip::new(vec![SymbolId::Ace, SymbolId::Wolf])]).unwrap();
        assert!(matches!(reg.check_strips(&strips), Err(ReelError::MissingTexture(SymbolId::Wolf))));
    }
}
