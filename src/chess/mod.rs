// Re-export all public items
pub use self::error::ChessError;
pub use self::fen::STARTING_FEN;
pub use self::game::{
    choose_promotion, is_in_check, new_game, propose_move, submit_move, ControllerState, Game,
    MoveResult,
};
pub use self::moves::{LastMove, Move};
pub use self::piece::{Color, Piece, PieceType};
pub use self::position::{CastlingRights, CastlingSide, Position};
pub use self::rules::{MoveKind, ValidatedMove};
pub use self::square::Square;

pub mod attack;
pub mod executor;
pub mod game;
pub mod rules;

mod error;
mod fen;
mod moves;
mod piece;
mod position;
mod square;
