//! Stop resolution: which rotation of a strip puts a wanted column in the viewport.

use crate::api::error::ReelError;
use crate::api::types::SymbolId;
use crate::core::strip::ReelStrip;

/// Outcome of resolving one reel's stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResolution {
    /// `strip[offset + r] == column[r]` for every row.
    Exact(usize),
    /// The column does not occur on the strip; the reel lands at offset 0 and its
    /// rows are overwritten with the wanted column anyway.
    Fallback,
}

impl StopResolution {
    pub fn offset(self) -> usize {
        match self {
            StopResolution::Exact(offset) => offset,
            StopResolution::Fallback => 0,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, StopResolution::Exact(_))
    }
}

/// First offset `i` in `[0, strip.len())` whose wrapping window matches `column`.
/// Linear scan, O(strip length × rows); runs once per reel per spin.
pub fn find_stop_offset(strip: &ReelStrip, column: &[SymbolId]) -> Option<usize> {
    (0..strip.len()).find(|&i| {
        column
            .iter()
            .enumerate()
            .all(|(r, &symbol)| strip.at((i + r) as i64) == symbol)
    })
}

/// Resolve a stop, degrading to offset 0 when the column is absent.
pub fn resolve_stop(strip: &ReelStrip, column: &[SymbolId]) -> StopResolution {
    match find_stop_offset(strip, column) {
        Some(offset) => StopResolution::Exact(offset),
        None => StopResolution::Fallback,
    }
}

/// Strict variant: an absent column is a configuration error.
pub fn require_stop(reel: usize, strip: &ReelStrip, column: &[SymbolId]) -> Result<usize, ReelError> {
    find_stop_offset(strip, column).ok_or_else(|| ReelError::StopNotFound {
        reel,
        column: column.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SymbolId::*;

    // A B C D
    fn abcd() -> ReelStrip {
        ReelStrip::new(vec![Ace, King, Queen, Jack])
    }

    #[test]
    fn finds_plain_window() {
        assert_eq!(find_stop_offset(&abcd(), &[Queen, Jack]), Some(2));
    }

    #[test]
    fn finds_wrapping_window() {
        assert_eq!(find_stop_offset(&abcd(), &[Jack, Ace]), Some(3));
    }

    #[test]
    fn absent_symbol_falls_back_to_zero() {
        let resolution = resolve_stop(&abcd(), &[Queen, Wild]);
        assert_eq!(resolution, StopResolution::Fallback);
        assert_eq!(resolution.offset(), 0);
        assert!(!resolution.is_exact());
    }

    #[test]
    fn present_symbols_in_wrong_order_are_absent() {
        assert_eq!(find_stop_offset(&abcd(), &[Jack, Queen]), None);
    }

    #[test]
    fn strict_names_reel_and_column() {
        let err = require_stop(4, &abcd(), &[Wild]).unwrap_err();
        match err {
            ReelError::StopNotFound { reel, column } => {
                assert_eq!(reel, 4);
                assert_eq!(column, vec![Wild]);
            }
            other => panic!("expected StopNotFound, got {:?}", other),
        }
    }

    #[test]
    fn first_match_wins_on_repeated_windows() {
        let strip = ReelStrip::new(vec![Ten, Ace, Ten, Ace]);
        assert_eq!(find_stop_offset(&strip, &[Ace, Ten]), Some(1));
    }

    #[test]
    fn every_window_of_classic_strips_resolves() {
        let store = crate::core::strip::StripStore::classic();
        for strip in store.iter() {
            for start in 0..strip.len() {
                let column = strip.window(start as i64, 4);
                let offset = find_stop_offset(strip, &column).expect("window must resolve");
                assert_eq!(strip.window(offset as i64, 4), column);
            }
        }
    }
}
