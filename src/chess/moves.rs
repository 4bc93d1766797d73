use super::error::ChessError;
use super::piece::{Color, PieceType};
use super::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A move intent: where a piece starts, where it lands, and optionally what a
/// pawn reaching the last rank becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    /// Create a new move with validation
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>) -> Result<Self, ChessError> {
        if from == to {
            return Err(ChessError::InvalidMove(
                "Source and destination squares cannot be the same".to_string(),
            ));
        }

        if let Some(piece_type) = promotion {
            if !piece_type.is_promotion_choice() {
                return Err(ChessError::InvalidPromotionChoice(format!(
                    "Cannot promote to {:?}",
                    piece_type
                )));
            }
        }

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Create a new move without validation (for internal use when validity is guaranteed)
    pub const fn new_unchecked(from: Square, to: Square, promotion: Option<PieceType>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Create a promotion move
    pub fn promotion(from: Square, to: Square, promotion: PieceType) -> Result<Self, ChessError> {
        Self::new(from, to, Some(promotion))
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Parse move string with color context for proper castling disambiguation
    pub fn from_str_with_color(s: &str, color: Color) -> Result<Self, ChessError> {
        let s = s.trim();
        let rank = color.back_rank();

        match s.to_uppercase().as_str() {
            "O-O" | "0-0" => {
                return Ok(Move::new_unchecked(
                    Square::new_unchecked(4, rank),
                    Square::new_unchecked(6, rank),
                    None,
                ));
            }
            "O-O-O" | "0-0-0" => {
                return Ok(Move::new_unchecked(
                    Square::new_unchecked(4, rank),
                    Square::new_unchecked(2, rank),
                    None,
                ));
            }
            _ => {}
        }

        if !s.is_ascii() {
            return Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling."
            )));
        }

        match s.len() {
            4 => {
                let from = s[0..2].parse::<Square>()?;
                let to = s[2..4].parse::<Square>()?;
                Self::new(from, to, None)
            }
            5 => {
                let from = s[0..2].parse::<Square>()?;
                let to = s[2..4].parse::<Square>()?;
                let promotion = s[4..5].parse::<PieceType>().map_err(|_| {
                    ChessError::InvalidPromotionChoice(format!(
                        "'{}' is not one of q, r, b, n",
                        &s[4..5]
                    ))
                })?;
                Self::new(from, to, Some(promotion))
            }
            _ => Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling."
            ))),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    /// Castling shorthand resolves to White here; use `from_str_with_color`
    /// when the side to move is known.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_color(s, Color::White)
    }
}

/// The most recently completed move, kept only to decide en passant eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LastMove {
    pub piece_type: PieceType,
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    pub fn new(piece_type: PieceType, from: Square, to: Square) -> Self {
        Self {
            piece_type,
            from,
            to,
        }
    }

    /// True for a pawn advancing two squares from its start rank
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece_type == PieceType::Pawn
            && self.from.file == self.to.file
            && self.from.rank.abs_diff(self.to.rank) == 2
    }

    /// Square a double-pushed pawn passed over, where an en passant capture lands
    pub fn en_passant_target(&self) -> Option<Square> {
        if !self.is_double_pawn_push() {
            return None;
        }
        Some(Square::new_unchecked(
            self.to.file,
            (self.from.rank + self.to.rank) / 2,
        ))
    }
}
