use serde::{Deserialize, Serialize};
use crate::api::error::ReelError;
use crate::api::types::SymbolId;

/// The fixed, cyclic symbol sequence of one reel. Indexing wraps modulo its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelStrip {
    symbols: Vec<SymbolId>,
}

impl ReelStrip {
    pub fn new(symbols: Vec<SymbolId>) -> Self {
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `index`, wrapping in both directions. Panics on an empty strip;
    /// `StripStore` refuses to hold one.
    #[inline]
    pub fn at(&self, index: i64) -> SymbolId {
        let len = self.symbols.len() as i64;
        self.symbols[index.rem_euclid(len) as usize]
    }

    /// `len` consecutive symbols starting at `start`, wrapping past the end.
    pub fn window(&self, start: i64, len: usize) -> Vec<SymbolId> {
        (0..len as i64).map(|r| self.at(start + r)).collect()
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }
}

impl From<Vec<SymbolId>> for ReelStrip {
    fn from(symbols: Vec<SymbolId>) -> Self {
        Self::new(symbols)
    }
}

/// One strip per reel, fixed for the lifetime of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StripStore {
    strips: Vec<ReelStrip>,
}

impl StripStore {
    /// Build a store, rejecting an empty reel set or an empty strip.
    pub fn new(strips: Vec<ReelStrip>) -> Result<Self, ReelError> {
        if strips.is_empty() {
            return Err(ReelError::NoReels);
        }
        if let Some(reel) = strips.iter().position(ReelStrip::is_empty) {
            return Err(ReelError::EmptyStrip { reel });
        }
        Ok(Self { strips })
    }

    /// Parse strips from JSON: an array of arrays of symbol names.
    pub fn from_json(json: &str) -> Result<Self, ReelError> {
        let strips: Vec<ReelStrip> = serde_json::from_str(json)?;
        Self::new(strips)
    }

    /// Strip for `reel`. Reel indices come from this store, so they are always in range.
    #[inline]
    pub fn strip_for(&self, reel: usize) -> &ReelStrip {
        &self.strips[reel]
    }

    pub fn reel_count(&self) -> usize {
        self.strips.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReelStrip> {
        self.strips.iter()
    }

    /// The six 34-symbol strips of the production game (4 visible rows).
    pub fn classic() -> Self {
        use SymbolId::*;
        let strips = vec![
            vec![
                King, Crown, QueenCard, Ten, Ace, Wolf, Stone, Queen, Ten, Jack, QueenCard, King,
                Ace, Leopard, Dragon, Jack, Ten, Jack, QueenCard, King, Ace, Wolf, Stone, Ten,
                Jack, QueenCard, King, Ace, Wild, Ten, Jack, QueenCard, King, Scatter,
            ],
            vec![
                Ten, Stone, Queen, King, Ace, Wolf, Stone, QueenCard, Ten, Jack, QueenCard, King,
                Ace, Leopard, Dragon, Crown, Ten, Jack, QueenCard, King, Ace, Wolf, Jack, Ten,
                Jack, QueenCard, King, Ace, Wild, Ten, Jack, QueenCard, King, Scatter,
            ],
            vec![
                Wild, Ace, Wolf, Stone, Ace, QueenCard, Stone, Queen, Ten, Jack, QueenCard, King,
                Ace, Leopard, Dragon, Crown, Ten, Jack, QueenCard, King, Ace, Wolf, King, Ten,
                Jack, QueenCard, King, Jack, Wild, Ten, Jack, QueenCard, King, Scatter,
            ],
            vec![
                Ten, Jack, QueenCard, King, Ace, Wolf, Stone, Queen, Ten, Jack, QueenCard, King,
                Ace, Leopard, Dragon, Crown, Ten, Jack, QueenCard, King, Ace, Wolf, Stone, Ten,
                Jack, QueenCard, King, Ace, Wild, Ten, Jack, QueenCard, King, Scatter,
            ],
            vec![
                Dragon, Wild, Leopard, Jack, Ace, Wolf, Stone, Queen, Ten, Jack, QueenCard, King,
                Ace, QueenCard, Ten, Crown, Ten, Jack, QueenCard, King, Ace, Wolf, Stone, Ten,
                Jack, QueenCard, King, Ace, King, Ten, Jack, QueenCard, King, Scatter,
            ],
            vec![
                Jack, Scatter, King, QueenCard, Ace, Wolf, Stone, Queen, Ten, Jack, QueenCard, King,
                Ace, Leopard, Dragon, Crown, Ten, Jack, QueenCard, King, Ace, Wolf, Stone, Ten,
                Jack, QueenCard, King, Ace, Wild, Ten, Jack, QueenCard, King, Ten,
            ],
        ];
        Self {
            strips: strips.into_iter().map(ReelStrip::new).collect(),
        }
    }
}
