use tessera_core::{Board, Direction, Position};

use crate::MatchDetector;

/// An adjacent swap that creates at least one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidSwap {
    /// Lower-left cell of the pair.
    pub a: Position,
    /// The cell above or to the right of `a`.
    pub b: Position,
}

/// Lists every adjacent swap that would create a match, in row-major order of `a`.
///
/// Swaps between two tiles of the same kind and swaps involving vacant cells
/// are skipped. An empty result means the board has no legal move.
///
/// # Examples
///
/// ```
/// use tessera_core::{Board, Position};
/// use tessera_matcher::{ValidSwap, find_valid_swaps};
///
/// let board: Board = "
///     CAD
///     ABA
/// "
/// .parse()?;
///
/// let swaps = find_valid_swaps(&board);
/// assert_eq!(
///     swaps,
///     vec![ValidSwap { a: Position::new(0, 1), b: Position::new(1, 1) }]
/// );
/// # Ok::<(), tessera_core::ParseBoardError>(())
/// ```
#[must_use]
pub fn find_valid_swaps(board: &Board) -> Vec<ValidSwap> {
    let detector = MatchDetector::new();
    let mut scratch = board.clone();
    let mut swaps = Vec::new();

    for a in board.positions() {
        let Some(kind_a) = board.tile(a) else {
            continue;
        };
        for direction in [Direction::Right, Direction::Up] {
            let Some(b) = a.neighbor(direction) else {
                continue;
            };
            match board.tile(b) {
                Some(kind_b) if kind_b != kind_a => {}
                _ => continue,
            }
            if scratch.swap(a, b).is_err() {
                continue;
            }
            if detector.has_match_at(&scratch, a) || detector.has_match_at(&scratch, b) {
                swaps.push(ValidSwap { a, b });
            }
            let restored = scratch.swap(a, b);
            debug_assert!(restored.is_ok(), "{a} <-> {b} swapped once already");
        }
    }

    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_moves_on_dead_board() {
        let board: Board = "
            ABAB
            CDCD
            ABAB
        "
        .parse()
        .unwrap();
        assert!(find_valid_swaps(&board).is_empty());
    }

    #[test]
    fn test_swaps_do_not_mutate_board() {
        let board: Board = "
            ABCA
            BAAC
            CCBA
        "
        .parse()
        .unwrap();
        let before = board.clone();
        let swaps = find_valid_swaps(&board);
        assert_eq!(board, before);
        assert!(!swaps.is_empty());

        let detector = MatchDetector::new();
        for swap in swaps {
            let mut board = board.clone();
            board.swap(swap.a, swap.b).unwrap();
            assert!(detector.has_match_at(&board, swap.a) || detector.has_match_at(&board, swap.b));
        }
    }

    #[test]
    fn test_edge_neighbors_are_skipped_and_board_restored() {
        let board: Board = "ABAA".parse().unwrap();
        let swaps = find_valid_swaps(&board);
        assert_eq!(
            swaps,
            [ValidSwap {
                a: Position::new(0, 0),
                b: Position::new(0, 1),
            }]
        );
        assert_eq!(board.to_string(), "ABAA\n");
    }

    #[test]
    fn test_vacant_cells_are_skipped() {
        let board: Board = "
            A.A
            BAB
        "
        .parse()
        .unwrap();
        assert!(find_valid_swaps(&board).is_empty());
    }
}
