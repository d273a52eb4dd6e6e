//! Position trajectories: replaying SAN move lists into scored board
//! snapshots.
//!
//! The feature extractor talks to this module through one stable contract,
//! [`PositionScorer`]: a method to turn a move list into a bounded sequence
//! of board snapshots, and a method to score a single snapshot. The shipped
//! implementation is [`MaterialScorer`].
//!
//! Score convention: positive favors White, in pawn units. The convention is
//! fixed here; consumers carry the value through unchanged.

use chess::{ChessMove, Color, Piece};
// Board appears in the `PositionScorer` signatures, so implementors outside
// this crate need it by name.
pub use chess::Board;

/// A SAN token could not be applied to the current position.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrajectoryError {
    #[display("invalid move '{token}' at ply {ply}")]
    InvalidMove { ply: usize, token: String },
}

/// Produces board snapshots from a move list and scores single snapshots.
pub trait PositionScorer: Send + Sync {
    /// Applies SAN tokens from the starting position, collecting the board
    /// after each ply.
    ///
    /// At most `horizon` snapshots are produced; the sequence is shorter for
    /// short games and empty for an empty move list. The first token that
    /// does not parse as a legal move fails the whole trajectory.
    fn positions_from_moves(
        &self,
        moves: &[&str],
        horizon: usize,
    ) -> Result<Vec<Board>, TrajectoryError>;

    /// Scores a single board snapshot, positive favoring White, in pawns.
    fn evaluate(&self, board: &Board) -> f64;
}

/// Piece values in centipawns. Kings carry no material value.
const PIECE_VALUES: [(Piece, i32); 5] = [
    (Piece::Pawn, 100),
    (Piece::Knight, 320),
    (Piece::Bishop, 330),
    (Piece::Rook, 500),
    (Piece::Queen, 900),
];

/// Material-count position scorer.
///
/// Stateless; the score of a board is the White-minus-Black material balance
/// converted to pawn units. The starting position scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl PositionScorer for MaterialScorer {
    fn positions_from_moves(
        &self,
        moves: &[&str],
        horizon: usize,
    ) -> Result<Vec<Board>, TrajectoryError> {
        let mut snapshots = Vec::with_capacity(moves.len().min(horizon));
        let mut board = Board::default();
        for (ply, token) in moves.iter().take(horizon).enumerate() {
            let mv = ChessMove::from_san(&board, token).map_err(|_| {
                TrajectoryError::InvalidMove {
                    ply,
                    token: (*token).to_owned(),
                }
            })?;
            board = board.make_move_new(mv);
            snapshots.push(board);
        }
        Ok(snapshots)
    }

    fn evaluate(&self, board: &Board) -> f64 {
        let mut centipawns = 0_i32;
        for (piece, value) in PIECE_VALUES {
            let pieces = board.pieces(piece);
            let white = (pieces & board.color_combined(Color::White)).popcnt();
            let black = (pieces & board.color_combined(Color::Black)).popcnt();
            #[expect(clippy::cast_possible_wrap)]
            let diff = white as i32 - black as i32;
            centipawns += value * diff;
        }
        f64::from(centipawns) / 100.0
    }
}
