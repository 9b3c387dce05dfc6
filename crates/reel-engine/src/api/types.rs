use serde::{Deserialize, Serialize};

/// One symbol of the fixed game symbol set.
/// Serialized in the results service's SCREAMING_SNAKE_CASE form (e.g. `"QUEEN_CARD"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolId {
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Wolf,
    Stone,
    Leopard,
    Dragon,
    Crown,
    QueenCard,
    Wild,
    Scatter,
}

impl SymbolId {
    /// Every symbol, in declaration order.
    pub const ALL: [SymbolId; 13] = [
        SymbolId::Ten,
        SymbolId::Jack,
        SymbolId::Queen,
        SymbolId::King,
        SymbolId::Ace,
        SymbolId::Wolf,
        SymbolId::Stone,
        SymbolId::Leopard,
        SymbolId::Dragon,
        SymbolId::Crown,
        SymbolId::QueenCard,
        SymbolId::Wild,
        SymbolId::Scatter,
    ];

    /// Manifest key for this symbol (same spelling as the wire format).
    pub fn name(self) -> &'static str {
        match self {
            SymbolId::Ten => "TEN",
            SymbolId::Jack => "JACK",
            SymbolId::Queen => "QUEEN",
            SymbolId::King => "KING",
            SymbolId::Ace => "ACE",
            SymbolId::Wolf => "WOLF",
            SymbolId::Stone => "STONE",
            SymbolId::Leopard => "LEOPARD",
            SymbolId::Dragon => "DRAGON",
            SymbolId::Crown => "CROWN",
            SymbolId::QueenCard => "QUEEN_CARD",
            SymbolId::Wild => "WILD",
            SymbolId::Scatter => "SCATTER",
        }
    }
}

/// Index of a reel column, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReelId(pub usize);

/// Identifies one `spin_to` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinId(pub u32);

/// Notifications emitted by the machine, drained by the host once per frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReelEvent {
    /// All reels committed to their targets and started moving.
    SpinStarted { spin: SpinId },
    /// One reel finished its tween and was snapped to its target column.
    ReelLanded { spin: SpinId, reel: ReelId },
    /// Every reel of the spin has landed.
    SpinSettled { spin: SpinId },
    /// The wanted column does not occur on the reel's strip; the reel fell back to offset 0.
    StopMismatch { spin: SpinId, reel: ReelId, column: Vec<SymbolId> },
}
