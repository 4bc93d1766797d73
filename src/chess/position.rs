use super::moves::LastMove;
use super::{ChessError, Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which wing a castle goes toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// Side implied by a king landing on `to_file`
    pub fn from_king_destination(to_file: u8) -> Option<Self> {
        match to_file {
            6 => Some(CastlingSide::KingSide),
            2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// File the rook starts on
    pub fn rook_home_file(&self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// File the rook lands on, adjacent to the castled king
    pub fn rook_castled_file(&self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }
}

/// Castling rights for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// Create new castling rights with all castling available
    pub fn new() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn has(&self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => self.white_kingside,
            (Color::White, CastlingSide::QueenSide) => self.white_queenside,
            (Color::Black, CastlingSide::KingSide) => self.black_kingside,
            (Color::Black, CastlingSide::QueenSide) => self.black_queenside,
        }
    }

    pub fn set(&mut self, color: Color, side: CastlingSide, allowed: bool) {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => self.white_kingside = allowed,
            (Color::White, CastlingSide::QueenSide) => self.white_queenside = allowed,
            (Color::Black, CastlingSide::KingSide) => self.black_kingside = allowed,
            (Color::Black, CastlingSide::QueenSide) => self.black_queenside = allowed,
        }
    }

    /// Create castling rights from FEN notation (e.g., "KQkq", "Kq", "-")
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut rights = Self::none();
        if fen == "-" {
            return Ok(rights);
        }

        for c in fen.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastlingSide::KingSide),
                'Q' => (Color::White, CastlingSide::QueenSide),
                'k' => (Color::Black, CastlingSide::KingSide),
                'q' => (Color::Black, CastlingSide::QueenSide),
                _ => {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid castling rights character '{c}' (valid: K, Q, k, q, or - for none)"
                    )))
                }
            };
            if rights.has(color, side) {
                return Err(ChessError::InvalidFen(format!(
                    "Duplicate character '{c}' in castling rights '{fen}'"
                )));
            }
            rights.set(color, side, true);
        }

        Ok(rights)
    }

    /// Convert to FEN notation
    pub fn to_fen(&self) -> String {
        let mut result = String::new();

        if self.white_kingside {
            result.push('K');
        }
        if self.white_queenside {
            result.push('Q');
        }
        if self.black_kingside {
            result.push('k');
        }
        if self.black_queenside {
            result.push('q');
        }

        if result.is_empty() {
            "-".to_string()
        } else {
            result
        }
    }

    /// Remove castling rights for a color (when king moves)
    pub fn remove_all_for_color(&mut self, color: Color) {
        self.set(color, CastlingSide::KingSide, false);
        self.set(color, CastlingSide::QueenSide, false);
    }

    /// Remove the right tied to a rook home square (rook moved or was captured there)
    pub fn remove_rook_rights(&mut self, rook_square: Square) {
        match (rook_square.file, rook_square.rank) {
            (0, 0) => self.white_queenside = false, // a1
            (7, 0) => self.white_kingside = false,  // h1
            (0, 7) => self.black_queenside = false, // a8
            (7, 7) => self.black_kingside = false,  // h8
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete board state: piece placement plus everything legality depends on.
///
/// Positions are values. Validators and the executor read them by reference
/// and hand back new positions; only the game controller replaces its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// squares[rank][file] where rank 0 = rank 1, file 0 = file a
    squares: [[Option<Piece>; 8]; 8],

    /// Side to move
    turn: Color,

    castling_rights: CastlingRights,

    /// Last completed move, consulted for en passant
    last_move: Option<LastMove>,

    /// Square of a pawn waiting for its promotion choice
    pending_promotion: Option<Square>,

    /// Halfmove counter for the 50-move rule (resets on pawn moves and captures)
    halfmove_clock: u16,

    /// Move counter (increments after Black's move)
    fullmove_number: u16,
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Position {
    /// Standard starting position, White to move
    pub fn new() -> Self {
        let mut position = Self::empty();
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            position.squares[0][file] = Some(Piece::new(piece_type, Color::White));
            position.squares[1][file] = Some(Piece::new(PieceType::Pawn, Color::White));
            position.squares[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
            position.squares[7][file] = Some(Piece::new(piece_type, Color::Black));
        }
        position.castling_rights = CastlingRights::new();
        position
    }

    /// A board with no pieces and no castling rights. Callers placing pieces
    /// by hand are responsible for putting both kings down.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            turn: Color::White,
            castling_rights: CastlingRights::none(),
            last_move: None,
            pending_promotion: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub(crate) fn from_parts(
        squares: [[Option<Piece>; 8]; 8],
        turn: Color,
        castling_rights: CastlingRights,
        last_move: Option<LastMove>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        Self {
            squares,
            turn,
            castling_rights,
            last_move,
            pending_promotion: None,
            halfmove_clock,
            fullmove_number,
        }
    }

    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        if square.file > 7 || square.rank > 7 {
            return None;
        }
        self.squares[square.rank as usize][square.file as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Result<(), ChessError> {
        if square.file > 7 || square.rank > 7 {
            return Err(ChessError::OutOfBoundsSquare(format!(
                "Square ({},{}) is out of bounds",
                square.file, square.rank
            )));
        }
        self.squares[square.rank as usize][square.file as usize] = piece;
        Ok(())
    }

    /// Unchecked placement for squares already known to be on the board
    pub(crate) fn put(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank as usize][square.file as usize] = piece;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    /// Every occupied square with its piece, rank by rank from a1
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get_piece(sq).map(|piece| (sq, piece)))
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn set_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub(crate) fn set_pending_promotion(&mut self, square: Option<Square>) {
        self.pending_promotion = square;
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Display the board as ASCII art from White's perspective
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();
        result.push_str("  a b c d e f g h\n");

        for rank in (0..8).rev() {
            let rank_number = rank + 1;
            result.push_str(&format!("{rank_number} "));

            let row: Vec<String> = self.squares[rank]
                .iter()
                .map(|square| match square {
                    Some(piece) => piece.fen_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            result.push_str(&row.join(" "));

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");
        result
    }

    /// Hash of the complete state. Equal positions always hash equal.
    pub fn hash_state(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii())
    }
}
