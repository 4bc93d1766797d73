//! Move legality.
//!
//! Each piece has a geometry rule (`pawn_rule`, `rook_rule`, ...) that checks
//! how it may travel and refuses to land on a friendly piece. [`validate`]
//! combines the rule for the moving piece with the king safety gate: the move
//! is played on a scratch copy of the position and rejected if the mover's
//! own king is attacked afterwards.

use super::attack::{self, bishop_reaches, king_adjacent, knight_reaches, rook_reaches};
use super::executor;
use super::position::{CastlingSide, Position};
use super::{ChessError, Color, Move, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a legal move changes the board beyond moving one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Onto an empty square
    Quiet,
    /// Onto an opponent piece, which is removed
    Capture,
    /// Pawn advancing two squares from its start rank
    DoublePawnPush,
    /// Pawn capture of the pawn on `captured`, landing behind it
    EnPassant { captured: Square },
    /// King travels two files and the rook jumps next to it
    Castle(CastlingSide),
}

/// A move that passed every rule for the position it was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub mv: Move,
    pub piece: Piece,
    pub kind: MoveKind,
    /// The pawn lands on its last rank and must become another piece
    pub promotes: bool,
}

fn mover(position: &Position, from: Square) -> Option<Piece> {
    position.get_piece(from)
}

fn lands_on_friend(position: &Position, color: Color, to: Square) -> bool {
    position.get_piece(to).is_some_and(|p| p.color == color)
}

fn quiet_or_capture(position: &Position, to: Square) -> MoveKind {
    if position.is_empty(to) {
        MoveKind::Quiet
    } else {
        MoveKind::Capture
    }
}

/// Pawn rule, including the double step and en passant
pub fn pawn_rule(position: &Position, from: Square, to: Square) -> Option<MoveKind> {
    let pawn = mover(position, from)?;
    if lands_on_friend(position, pawn.color, to) {
        return None;
    }

    let direction = pawn.color.pawn_direction();
    let (df, dr) = from.delta(&to);

    // Straight ahead onto empty squares
    if df == 0 {
        if dr == direction && position.is_empty(to) {
            return Some(MoveKind::Quiet);
        }
        if dr == 2 * direction && from.rank == pawn.color.pawn_start_rank() {
            let passed = from.offset(0, direction)?;
            if position.is_empty(passed) && position.is_empty(to) {
                return Some(MoveKind::DoublePawnPush);
            }
        }
        return None;
    }

    if df.abs() != 1 || dr != direction {
        return None;
    }

    if position.get_piece(to).is_some() {
        return Some(MoveKind::Capture);
    }

    // En passant: only right after the opposing pawn's double step beside us
    let last = position.last_move()?;
    let victim = Square::new_unchecked(to.file, from.rank);
    let victim_is_pawn = position
        .get_piece(victim)
        .is_some_and(|p| p.is(PieceType::Pawn, pawn.color.opposite()));
    if last.is_double_pawn_push() && last.to == victim && victim_is_pawn {
        return Some(MoveKind::EnPassant { captured: victim });
    }
    None
}

pub fn rook_rule(position: &Position, from: Square, to: Square) -> bool {
    mover(position, from).is_some_and(|p| !lands_on_friend(position, p.color, to))
        && rook_reaches(position, from, to)
}

pub fn knight_rule(position: &Position, from: Square, to: Square) -> bool {
    mover(position, from).is_some_and(|p| !lands_on_friend(position, p.color, to))
        && knight_reaches(from, to)
}

pub fn bishop_rule(position: &Position, from: Square, to: Square) -> bool {
    mover(position, from).is_some_and(|p| !lands_on_friend(position, p.color, to))
        && bishop_reaches(position, from, to)
}

pub fn queen_rule(position: &Position, from: Square, to: Square) -> bool {
    rook_rule(position, from, to) || bishop_rule(position, from, to)
}

/// King rule: one step onto a square the opponent will not attack once the
/// king stands there, or a castle.
pub fn king_rule(position: &Position, from: Square, to: Square) -> Option<MoveKind> {
    let king = mover(position, from)?;
    if lands_on_friend(position, king.color, to) {
        return None;
    }

    if king_adjacent(from, to) {
        let mut after = position.clone();
        after.put(from, None);
        after.put(to, Some(king));
        if attack::is_attacked(&after, to, king.color.opposite()) {
            return None;
        }
        return Some(quiet_or_capture(position, to));
    }

    castle_rule(position, king, from, to).map(MoveKind::Castle)
}

fn castle_rule(position: &Position, king: Piece, from: Square, to: Square) -> Option<CastlingSide> {
    let (df, dr) = from.delta(&to);
    if df.abs() != 2 || dr != 0 {
        return None;
    }

    let color = king.color;
    let rank = color.back_rank();
    if from != Square::new_unchecked(4, rank) {
        return None;
    }

    let side = CastlingSide::from_king_destination(to.file)?;
    if !position.castling_rights().has(color, side) {
        return None;
    }

    let rook_square = Square::new_unchecked(side.rook_home_file(), rank);
    let rook_home = position
        .get_piece(rook_square)
        .is_some_and(|p| p.is(PieceType::Rook, color));
    debug_assert!(
        rook_home,
        "castling right {:?} {:?} kept after its rook left {}",
        color, side, rook_square
    );
    if !rook_home {
        return None;
    }

    if !attack::path_clear(position, from, rook_square) {
        return None;
    }

    let opponent = color.opposite();
    let transit = from.offset(df.signum(), 0)?;
    let king_path_safe = [from, transit, to]
        .iter()
        .all(|&sq| !attack::is_attacked(position, sq, opponent));
    king_path_safe.then_some(side)
}

/// Geometry verdict for whatever piece stands on `from`
fn piece_rule(position: &Position, piece: Piece, from: Square, to: Square) -> Option<MoveKind> {
    let travels = |ok: bool| ok.then(|| quiet_or_capture(position, to));
    match piece.piece_type {
        PieceType::Pawn => pawn_rule(position, from, to),
        PieceType::Rook => travels(rook_rule(position, from, to)),
        PieceType::Knight => travels(knight_rule(position, from, to)),
        PieceType::Bishop => travels(bishop_rule(position, from, to)),
        PieceType::Queen => travels(queen_rule(position, from, to)),
        PieceType::King => king_rule(position, from, to),
    }
}

fn in_bounds(square: Square) -> Result<Square, ChessError> {
    Square::new(square.file, square.rank)
}

/// Full legality check for `mv` in `position`.
///
/// A move with no promotion kind that lands a pawn on its last rank is legal;
/// the executor then leaves a pending promotion on the board.
pub fn validate(position: &Position, mv: Move) -> Result<ValidatedMove, ChessError> {
    let from = in_bounds(mv.from)?;
    let to = in_bounds(mv.to)?;

    if let Some(square) = position.pending_promotion() {
        return Err(ChessError::PromotionPending(square));
    }

    if from == to {
        return Err(ChessError::IllegalMove(format!(
            "{mv}: source and destination are the same square"
        )));
    }

    let piece = position
        .get_piece(from)
        .ok_or_else(|| ChessError::IllegalMove(format!("{mv}: no piece on {from}")))?;

    if piece.color != position.turn() {
        return Err(ChessError::IllegalMove(format!(
            "{mv}: cannot move a {} piece on {}'s turn",
            piece.color,
            position.turn()
        )));
    }

    if let Some(target) = position.get_piece(to) {
        if target.color == piece.color {
            return Err(ChessError::IllegalMove(format!(
                "{mv}: {to} holds a friendly piece"
            )));
        }
        if target.piece_type == PieceType::King {
            return Err(ChessError::IllegalMove(format!(
                "{mv}: kings cannot be captured"
            )));
        }
    }

    let kind = piece_rule(position, piece, from, to).ok_or_else(|| {
        ChessError::IllegalMove(format!(
            "{mv}: a {:?} cannot move from {from} to {to}",
            piece.piece_type
        ))
    })?;

    let promotes = piece.piece_type == PieceType::Pawn && to.rank == piece.color.promotion_rank();
    if let Some(choice) = mv.promotion {
        if !promotes {
            return Err(ChessError::InvalidPromotionChoice(format!(
                "{mv}: only a pawn reaching the last rank can promote"
            )));
        }
        if !choice.is_promotion_choice() {
            return Err(ChessError::InvalidPromotionChoice(format!(
                "{mv}: cannot promote to {:?}",
                choice
            )));
        }
    }

    let validated = ValidatedMove {
        mv: Move::new_unchecked(from, to, mv.promotion),
        piece,
        kind,
        promotes,
    };

    let after = executor::simulate(position, &validated);
    if attack::is_in_check(&after, piece.color) {
        return Err(ChessError::IllegalMove(format!(
            "{mv}: leaves the {} king in check",
            piece.color
        )));
    }

    debug!("{} validated as {:?}", mv, kind);
    Ok(validated)
}

pub fn is_legal(position: &Position, mv: Move) -> bool {
    validate(position, mv).is_ok()
}

/// Squares the piece on `from` may legally move to
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| to != from && is_legal(position, Move::new_unchecked(from, to, None)))
        .collect()
}

/// Every legal move for the side to move. Promotions appear once per
/// promotion kind.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let turn = position.turn();
    let mut moves = Vec::new();

    for (from, piece) in position.pieces().filter(|(_, p)| p.color == turn) {
        for to in legal_destinations(position, from) {
            let promotes =
                piece.piece_type == PieceType::Pawn && to.rank == turn.promotion_rank();
            if promotes {
                moves.extend(
                    PieceType::PROMOTIONS
                        .iter()
                        .map(|&kind| Move::new_unchecked(from, to, Some(kind))),
                );
            } else {
                moves.push(Move::new_unchecked(from, to, None));
            }
        }
    }

    moves
}
