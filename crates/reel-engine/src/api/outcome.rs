use serde::{Deserialize, Serialize};
use crate::api::error::ReelError;
use crate::api::types::SymbolId;

/// One winning payline as reported by the results service.
/// Carried through untouched; the reels never interpret payouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningLine {
    pub payline_index: u32,
    pub symbol: SymbolId,
    pub count: u32,
    pub payout: f64,
    #[serde(default)]
    pub line: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterWin {
    pub count: u32,
    pub triggered_free_spins: bool,
}

/// Result of one game round: the grid the reels must land on plus payout data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOutcome {
    /// One column per reel, top to bottom.
    pub grid: Vec<Vec<SymbolId>>,
    #[serde(default)]
    pub winning_lines: Vec<WinningLine>,
    #[serde(default)]
    pub total_win: f64,
    #[serde(default)]
    pub scatter_win: ScatterWin,
}

impl SpinOutcome {
    pub fn from_json(json: &str) -> Result<Self, ReelError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_payload() {
        let json = r#"{
            "totalWin": 12.5,
            "winningLines": [
                { "paylineIndex": 2, "symbol": "WOLF", "count": 3, "payout": 12.5, "line": [1, 1, 1, 0, 0, 0] }
            ],
            "scatterWin": { "count": 1, "triggeredFreeSpins": false },
            "grid": [["TEN", "WOLF"], ["SCATTER", "QUEEN_CARD"]]
        }"#;
        let outcome = SpinOutcome::from_json(json).unwrap();
        assert_eq!(outcome.grid[1][1], SymbolId::QueenCard);
        assert_eq!(outcome.winning_lines[0].symbol, SymbolId::Wolf);
        assert_eq!(outcome.total_win, 12.5);
    }

    #[test]
    fn grid_only_payload_is_enough() {
        let outcome = SpinOutcome::from_json(r#"{ "grid": [["ACE"]] }"#).unwrap();
        assert!(outcome.winning_lines.is_empty());
        assert_eq!(outcome.scatter_win, ScatterWin::default());
    }

    #[test]
    fn unknown_symbol_is_a_parse_error() {
        let err = SpinOutcome::from_json(r#"{ "grid": [["JOKER"]] }"#).unwrap_err();
        assert!(matches!(err, ReelError::Manifest(_)));
    }
}
