use crate::api::types::SymbolId;

/// Errors surfaced by the reel machine. The per-frame path never produces one.
#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    #[error("machine needs at least one reel strip")]
    NoReels,

    #[error("strip for reel {reel} is empty")]
    EmptyStrip { reel: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("no texture registered for symbol {0:?}")]
    MissingTexture(SymbolId),

    #[error("target grid has {reels} columns with row counts {rows:?}, expected {expected_reels} columns of {expected_rows}")]
    GridShape {
        expected_reels: usize,
        expected_rows: usize,
        reels: usize,
        rows: Vec<usize>,
    },

    #[error("column {column:?} does not occur on the strip of reel {reel}")]
    StopNotFound { reel: usize, column: Vec<SymbolId> },

    #[error("a spin is already in flight")]
    AlreadySpinning,

    #[error("reel {reel} position is already driven by another tween")]
    PropertyBusy { reel: usize },

    #[error("reel machine has been torn down")]
    TornDown,

    #[error("JSON parse error: {0}")]
    Manifest(#[from] serde_json::Error),
}
