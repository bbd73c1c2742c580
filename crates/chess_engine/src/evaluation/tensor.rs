//! Board tensor encoding
//!
//! Layout is row-major `[row][file][plane]` with row 0 = rank 8, matching
//! the `(8, 8, 17)` input the value models were trained on:
//!
//! | Planes | Meaning                                         |
//! |--------|-------------------------------------------------|
//! | 0-5    | White pawn, knight, bishop, rook, queen, king   |
//! | 6-11   | Black pieces, same order                        |
//! | 12     | Side to move (1.0 = White)                      |
//! | 13-16  | Castling: White K, White Q, Black K, Black Q    |

use shakmaty::{CastlingSide, Chess, Color, Position, Role};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardTensor {
    data: Vec<f32>,
}

impl BoardTensor {
    pub fn zeros() -> Self {
        Self {
            data: vec![0.0; TENSOR_LEN],
        }
    }

    pub fn encode(position: &Chess) -> Self {
        let mut tensor = Self::zeros();
        let board = position.board();

        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                let index = usize::from(square);
                let row = BOARD_DIM - 1 - index / BOARD_DIM;
                let file = index % BOARD_DIM;
                let offset = if piece.color == Color::White { 0 } else { 6 };
                tensor.set(row, file, role_plane(piece.role) + offset, 1.0);
            }
        }

        if position.turn() == Color::White {
            tensor.fill_plane(PLANE_SIDE_TO_MOVE, 1.0);
        }

        let castles = position.castles();
        let rights = [
            (PLANE_WHITE_KINGSIDE, Color::White, CastlingSide::KingSide),
            (PLANE_WHITE_QUEENSIDE, Color::White, CastlingSide::QueenSide),
            (PLANE_BLACK_KINGSIDE, Color::Black, CastlingSide::KingSide),
            (PLANE_BLACK_QUEENSIDE, Color::Black, CastlingSide::QueenSide),
        ];
        for (plane, color, side) in rights {
            if castles.has(color, side) {
                tensor.fill_plane(plane, 1.0);
            }
        }

        tensor
    }

    #[inline]
    fn offset(row: usize, file: usize, plane: usize) -> usize {
        (row * BOARD_DIM + file) * TENSOR_PLANES + plane
    }

    pub fn get(&self, row: usize, file: usize, plane: usize) -> f32 {
        self.data[Self::offset(row, file, plane)]
    }

    pub fn set(&mut self, row: usize, file: usize, plane: usize, value: f32) {
        self.data[Self::offset(row, file, plane)] = value;
    }

    fn fill_plane(&mut self, plane: usize, value: f32) {
        for row in 0..BOARD_DIM {
            for file in 0..BOARD_DIM {
                self.set(row, file, plane, value);
            }
        }
    }

    /// Sum of one feature plane (piece count for planes 0-11)
    pub fn plane_sum(&self, plane: usize) -> f32 {
        self.data
            .iter()
            .skip(plane)
            .step_by(TENSOR_PLANES)
            .sum()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

fn role_plane(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Game;

    #[test]
    fn test_startpos_piece_planes() {
        let tensor = BoardTensor::encode(Game::startpos().position());

        assert_eq!(tensor.as_slice().len(), TENSOR_LEN);
        assert_eq!(tensor.plane_sum(0), 8.0, "Eight white pawns");
        assert_eq!(tensor.plane_sum(6), 8.0, "Eight black pawns");
        assert_eq!(tensor.plane_sum(5), 1.0, "One white king");
        assert_eq!(tensor.plane_sum(11), 1.0, "One black king");

        // White king on e1: row 7 (rank 1), file 4
        assert_eq!(tensor.get(7, 4, 5), 1.0);
        // Black queen on d8: row 0, file 3, plane 6 + 4
        assert_eq!(tensor.get(0, 3, 10), 1.0);
    }

    #[test]
    fn test_side_to_move_and_castling_planes() {
        let white = BoardTensor::encode(Game::startpos().position());
        assert_eq!(white.plane_sum(PLANE_SIDE_TO_MOVE), 64.0);
        for plane in PLANE_WHITE_KINGSIDE..=PLANE_BLACK_QUEENSIDE {
            assert_eq!(white.plane_sum(plane), 64.0, "All castling rights present");
        }

        let black = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();
        let tensor = BoardTensor::encode(black.position());
        assert_eq!(tensor.plane_sum(PLANE_SIDE_TO_MOVE), 0.0, "Black to move");
        assert_eq!(tensor.plane_sum(PLANE_WHITE_KINGSIDE), 64.0);
        assert_eq!(tensor.plane_sum(PLANE_WHITE_QUEENSIDE), 0.0);
        assert_eq!(tensor.plane_sum(PLANE_BLACK_KINGSIDE), 0.0);
        assert_eq!(tensor.plane_sum(PLANE_BLACK_QUEENSIDE), 64.0);
    }
}
