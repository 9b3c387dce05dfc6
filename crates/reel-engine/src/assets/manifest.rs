use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::error::ReelError;
use crate::api::types::SymbolId;

/// Asset manifest describing the symbol atlases of a machine.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolManifest {
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Symbol lookup: symbol → atlas index + cell coordinates + native size.
    #[serde(default)]
    pub symbols: HashMap<SymbolId, SymbolDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "symbols").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file (e.g., "symbols.png").
    pub path: String,
}

/// Describes where one symbol image sits and how large it natively is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
    /// Native image width in pixels (default: 256).
    #[serde(default = "default_extent")]
    pub width: u32,
    /// Native image height in pixels (default: 256).
    #[serde(default = "default_extent")]
    pub height: u32,
}

fn default_extent() -> u32 {
    256
}

impl SymbolManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ReelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Manifest for a single square-cell atlas holding every symbol, one per column.
    pub fn uniform(path: impl Into<String>, extent: u32) -> Self {
        let symbols = SymbolId::ALL
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                (symbol, SymbolDescriptor {
                    atlas: 0,
                    col: i as u32,
                    row: 0,
                    width: extent,
                    height: extent,
                })
            })
            .collect();
        Self {
            atlases: vec![AtlasDescriptor {
                name: "symbols".into(),
                cols: SymbolId::ALL.len() as u32,
                rows: 1,
                path: path.into(),
            }],
            symbols,
        }
    }
}
