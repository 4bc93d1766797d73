use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank this color's pawns start on
    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Farthest rank, where this color's pawns promote
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank holding this color's king and rooks at the start
    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Color {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(ChessError::InvalidColor(format!(
                "Expected 'white' or 'black', got '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Kinds a pawn may promote to
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn is_promotion_choice(&self) -> bool {
        Self::PROMOTIONS.contains(self)
    }

    /// Uppercase letter used in FEN and move notation
    pub fn letter(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PieceType {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" | "PAWN" => Ok(PieceType::Pawn),
            "R" | "ROOK" => Ok(PieceType::Rook),
            "N" | "KNIGHT" => Ok(PieceType::Knight),
            "B" | "BISHOP" => Ok(PieceType::Bishop),
            "Q" | "QUEEN" => Ok(PieceType::Queen),
            "K" | "KING" => Ok(PieceType::King),
            _ => Err(ChessError::InvalidPieceType(format!(
                "Expected one of: P, R, N, B, Q, K, got '{}'",
                s
            ))),
        }
    }
}

/// A colored piece. Its square is the slot it occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.piece_type.letter(),
            Color::Black => self.piece_type.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Result<Piece, ChessError> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = c.to_string().parse::<PieceType>()?;
        Ok(Piece::new(piece_type, color))
    }

    pub fn unicode_symbol(&self) -> char {
        match (self.color, self.piece_type) {
            (Color::White, PieceType::Pawn) => '♙',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::King) => '♔',
            (Color::Black, PieceType::Pawn) => '♟',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::King) => '♚',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unicode_symbol())
    }
}
