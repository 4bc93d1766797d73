use crate::chess::{rules, submit_move, Move, MoveResult, Position, Square};
use serde::{Deserialize, Serialize};

/// Outcome of checking one move against a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveVerdict {
    pub chess_move: String,
    pub legal: bool,
    /// Why the move was refused
    pub reason: Option<String>,
    /// Position after the move, or the unchanged position when refused
    pub fen: String,
    pub pending_promotion: Option<String>,
    /// The side to move afterwards is in check
    pub check: bool,
}

/// Parse `notation` for the side to move and run it through the controller
pub fn check_move(position: &Position, notation: &str) -> MoveVerdict {
    let rejected = |reason: String| MoveVerdict {
        chess_move: notation.trim().to_string(),
        legal: false,
        reason: Some(reason),
        fen: position.to_fen(),
        pending_promotion: None,
        check: false,
    };

    let mv = match Move::from_str_with_color(notation, position.turn()) {
        Ok(mv) => mv,
        Err(err) => return rejected(err.to_string()),
    };

    match submit_move(position, mv) {
        MoveResult::Rejected(err) => rejected(err.to_string()),
        MoveResult::Applied(next) => MoveVerdict {
            chess_move: mv.to_string(),
            legal: true,
            reason: None,
            fen: next.to_fen(),
            pending_promotion: None,
            check: crate::chess::is_in_check(&next, next.turn()),
        },
        MoveResult::AppliedPendingPromotion(next, square) => MoveVerdict {
            chess_move: mv.to_string(),
            legal: true,
            reason: None,
            fen: next.to_fen(),
            pending_promotion: Some(square.to_string()),
            check: false,
        },
    }
}

impl std::fmt::Display for MoveVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.legal {
            write!(f, "{}: legal", self.chess_move)?;
            if self.check {
                write!(f, " (check)")?;
            }
            if let Some(square) = &self.pending_promotion {
                write!(f, " (promotion pending on {})", square)?;
            }
        } else {
            write!(f, "{}: illegal", self.chess_move)?;
            if let Some(reason) = &self.reason {
                write!(f, " ({})", reason)?;
            }
        }
        write!(f, "\n{}", self.fen)
    }
}

/// Legal destinations of the piece on `square`, as algebraic names
pub fn list_destinations(position: &Position, square: Square) -> Vec<String> {
    rules::legal_destinations(position, square)
        .into_iter()
        .map(|sq| sq.to_string())
        .collect()
}
