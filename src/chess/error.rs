use super::square::Square;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Square out of bounds: {0}")]
    OutOfBoundsSquare(String),

    #[error("Invalid promotion choice: {0}")]
    InvalidPromotionChoice(String),

    #[error("Promotion pending on {0}")]
    PromotionPending(Square),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid piece type: {0}")]
    InvalidPieceType(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}
