//! Forsyth-Edwards Notation import and export.
//!
//! FEN's en passant field has no direct counterpart in [`Position`]; the
//! engine keeps the last move instead. A target square such as `e3` is read
//! back as the double pawn push `e2e4` that created it, and written out again
//! from the last move when that move was a double push.

use super::attack;
use super::moves::LastMove;
use super::position::{CastlingRights, CastlingSide, Position};
use super::{ChessError, Color, Piece, PieceType, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Create a position from a FEN string
    /// FEN format: piece_placement active_color castling_rights en_passant halfmove fullmove
    pub fn from_fen(fen: &str) -> Result<Position, ChessError> {
        let fen = fen.trim();
        if fen.is_empty() {
            return Err(ChessError::InvalidFen(
                "FEN string cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [piece_placement, active_color, castling, en_passant, halfmove_str, fullmove_str] =
            parts.as_slice()
        else {
            let found_count = parts.len();
            return Err(ChessError::InvalidFen(format!(
                "FEN must have exactly 6 fields (piece_placement active_color castling_rights en_passant halfmove fullmove), found {found_count}"
            )));
        };

        let squares = parse_piece_placement(piece_placement)?;

        let turn = match *active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid active color '{active_color}' (must be 'w' for White or 'b' for Black)"
                )))
            }
        };

        let castling_rights = CastlingRights::from_fen(castling)?;
        let last_move = parse_en_passant(en_passant, turn)?;

        let halfmove_clock = halfmove_str.parse::<u16>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid halfmove clock '{halfmove_str}' (must be a non-negative integer): {e}"
            ))
        })?;

        let fullmove_number = fullmove_str.parse::<u16>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid fullmove number '{fullmove_str}' (must be a positive integer): {e}"
            ))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        let position = Position::from_parts(
            squares,
            turn,
            castling_rights,
            last_move,
            halfmove_clock,
            fullmove_number,
        );
        validate_placement(&position)?;
        Ok(position)
    }

    /// Converts the position to FEN notation
    pub fn to_fen(&self) -> String {
        let piece_placement = self.piece_placement();
        let active_color = match self.turn() {
            Color::White => "w",
            Color::Black => "b",
        };
        let castling_rights = self.castling_rights().to_fen();
        let en_passant = match self.last_move().and_then(|m| m.en_passant_target()) {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };
        let halfmove = self.halfmove_clock();
        let fullmove = self.fullmove_number();

        format!(
            "{piece_placement} {active_color} {castling_rights} {en_passant} {halfmove} {fullmove}"
        )
    }

    fn piece_placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for rank in (0..8).rev() {
            let mut rank_string = String::new();
            let mut empty_count = 0;

            for file in 0..8 {
                match self.get_piece(Square::new_unchecked(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            rank_string.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        rank_string.push(piece.fen_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                rank_string.push_str(&empty_count.to_string());
            }
            ranks.push(rank_string);
        }

        ranks.join("/")
    }
}

fn parse_piece_placement(placement: &str) -> Result<[[Option<Piece>; 8]; 8], ChessError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        let found_ranks = ranks.len();
        return Err(ChessError::InvalidFen(format!(
            "Piece placement must have exactly 8 ranks separated by '/', found {found_ranks}"
        )));
    }

    let mut squares = [[None; 8]; 8];

    // FEN lists rank 8 first
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - rank_idx;
        let fen_rank_number = 8 - rank_idx;
        let mut file = 0;

        for c in rank_str.chars() {
            if file >= 8 {
                return Err(ChessError::InvalidFen(format!(
                    "Rank {fen_rank_number} has more than 8 squares (found character '{c}')"
                )));
            }

            if let Some(empty_squares) = c.to_digit(10) {
                let empty_squares = empty_squares as usize;
                if empty_squares == 0 || file + empty_squares > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid empty square count '{c}' in rank {fen_rank_number}"
                    )));
                }
                file += empty_squares;
            } else {
                let piece = Piece::from_fen_char(c).map_err(|_| {
                    ChessError::InvalidFen(format!(
                        "Invalid piece character '{c}' in rank {fen_rank_number} (valid pieces: KQRBNPkqrbnp)"
                    ))
                })?;
                squares[board_rank][file] = Some(piece);
                file += 1;
            }
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "Rank {fen_rank_number} must represent exactly 8 squares, found {file}"
            )));
        }
    }

    Ok(squares)
}

/// The en passant target becomes the opponent's double push that produced it
fn parse_en_passant(field: &str, turn: Color) -> Result<Option<LastMove>, ChessError> {
    if field == "-" {
        return Ok(None);
    }

    let target = field.parse::<Square>().map_err(|_| {
        ChessError::InvalidFen(format!(
            "Invalid en passant target '{field}' (must be a square like 'e3' or '-' for none)"
        ))
    })?;

    // The pushing side is the one not to move
    let pusher = turn.opposite();
    let expected_rank = (pusher.pawn_start_rank() as i8 + pusher.pawn_direction()) as u8;
    if target.rank != expected_rank {
        return Err(ChessError::InvalidFen(format!(
            "En passant target '{field}' must be on rank {} when {} is to move",
            expected_rank + 1,
            turn
        )));
    }

    let from = Square::new_unchecked(target.file, pusher.pawn_start_rank());
    let to = Square::new_unchecked(
        target.file,
        (pusher.pawn_start_rank() as i8 + 2 * pusher.pawn_direction()) as u8,
    );
    Ok(Some(LastMove::new(PieceType::Pawn, from, to)))
}

fn validate_placement(position: &Position) -> Result<(), ChessError> {
    for color in [Color::White, Color::Black] {
        let kings = position
            .pieces()
            .filter(|(_, piece)| piece.is(PieceType::King, color))
            .count();
        if kings != 1 {
            return Err(ChessError::InvalidFen(format!(
                "{color} must have exactly one king, found {kings}"
            )));
        }
    }

    if let Some((square, _)) = position
        .pieces()
        .find(|(sq, piece)| piece.piece_type == PieceType::Pawn && (sq.rank == 0 || sq.rank == 7))
    {
        return Err(ChessError::InvalidFen(format!(
            "Pawn on {square} cannot stand on the first or last rank"
        )));
    }

    let rights = position.castling_rights();
    for color in [Color::White, Color::Black] {
        for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
            if !rights.has(color, side) {
                continue;
            }
            let rank = color.back_rank();
            let king_home = position.get_piece(Square::new_unchecked(4, rank));
            let rook_home = position.get_piece(Square::new_unchecked(side.rook_home_file(), rank));
            let king_ok = king_home.is_some_and(|p| p.is(PieceType::King, color));
            let rook_ok = rook_home.is_some_and(|p| p.is(PieceType::Rook, color));
            if !king_ok || !rook_ok {
                return Err(ChessError::InvalidFen(format!(
                    "{color} {side:?} castling right requires king and rook on their home squares"
                )));
            }
        }
    }

    if let Some(last_move) = position.last_move() {
        let pusher = position.turn().opposite();
        let pawn_there = position
            .get_piece(last_move.to)
            .is_some_and(|p| p.is(PieceType::Pawn, pusher));
        if !pawn_there {
            return Err(ChessError::InvalidFen(format!(
                "En passant target requires a {pusher} pawn on {}",
                last_move.to
            )));
        }
    }

    let waiting = position.turn().opposite();
    if attack::is_in_check(position, waiting) {
        return Err(ChessError::InvalidFen(format!(
            "{waiting} is in check but it is {}'s move",
            position.turn()
        )));
    }

    Ok(())
}
