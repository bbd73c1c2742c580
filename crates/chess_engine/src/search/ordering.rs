//! Move ordering for alpha-beta pruning
//!
//! Captures first, then quiet moves. Relative order inside each group is the
//! order the rules adapter generated them in.

use shakmaty::Move;

/// Order moves for better alpha-beta pruning
pub fn order_moves(moves: Vec<Move>) -> Vec<Move> {
    let (mut captures, quiets): (Vec<Move>, Vec<Move>) =
        moves.into_iter().partition(|mv| mv.is_capture());
    captures.extend(quiets);
    captures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{move_to_uci, Game};

    #[test]
    fn test_order_moves_puts_captures_first() {
        // White can take on d5 with the pawn or the queen
        let game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/3QK3 w - - 0 1").unwrap();
        let ordered = order_moves(game.legal_moves());

        let capture_count = ordered.iter().filter(|mv| mv.is_capture()).count();
        assert_eq!(capture_count, 2);
        assert!(
            ordered[..capture_count].iter().all(|mv| mv.is_capture()),
            "All captures should precede quiet moves"
        );
        assert!(ordered[capture_count..].iter().all(|mv| !mv.is_capture()));
    }

    #[test]
    fn test_order_moves_is_stable_within_groups() {
        let game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/3QK3 w - - 0 1").unwrap();
        let generated = game.legal_moves();
        let ordered = order_moves(generated.clone());

        let captures: Vec<String> = generated
            .iter()
            .filter(|mv| mv.is_capture())
            .map(move_to_uci)
            .collect();
        let quiets: Vec<String> = generated
            .iter()
            .filter(|mv| !mv.is_capture())
            .map(move_to_uci)
            .collect();
        let expected: Vec<String> = captures.into_iter().chain(quiets).collect();

        let actual: Vec<String> = ordered.iter().map(move_to_uci).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_capture_prefix_matches_capture_moves() {
        let game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/3QK3 w - - 0 1").unwrap();
        let captures = game.capture_moves();
        let ordered = order_moves(game.legal_moves());

        assert_eq!(
            &ordered[..captures.len()],
            captures.as_slice(),
            "Ordering and the capture generator agree on what a capture is"
        );
    }

    #[test]
    fn test_order_moves_starting_position() {
        let game = Game::startpos();
        let ordered = order_moves(game.legal_moves());
        assert_eq!(ordered.len(), 20, "Ordering must not drop or add moves");
    }
}
