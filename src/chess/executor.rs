//! Move execution: turns a validated move into the next position.
//!
//! Nothing here re-checks legality. Callers obtain a [`ValidatedMove`] from
//! [`rules::validate`](super::rules::validate) against the same position.

use super::moves::LastMove;
use super::position::{CastlingRights, Position};
use super::rules::{MoveKind, ValidatedMove};
use super::{ChessError, Color, Move, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything needed to take a move back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    /// The piece as it stood on `mv.from`, before any promotion
    pub piece: Piece,
    pub kind: MoveKind,
    pub captured: Option<(Square, Piece)>,
    pub prior_castling_rights: CastlingRights,
    pub prior_last_move: Option<LastMove>,
    pub prior_halfmove_clock: u16,
    pub prior_fullmove_number: u16,
}

/// The result of applying a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub position: Position,
    pub record: MoveRecord,
}

impl Applied {
    /// Square of a pawn still waiting for its promotion choice
    pub fn pending_promotion(&self) -> Option<Square> {
        self.position.pending_promotion()
    }
}

/// Move the pieces only, returning what was captured and where
fn relocate(position: &mut Position, validated: &ValidatedMove) -> Option<(Square, Piece)> {
    let Move { from, to, .. } = validated.mv;

    let captured_on = match validated.kind {
        MoveKind::EnPassant { captured } => captured,
        _ => to,
    };
    let captured = position.get_piece(captured_on).map(|p| (captured_on, p));
    position.put(captured_on, None);

    position.put(from, None);
    position.put(to, Some(validated.piece));

    if let MoveKind::Castle(side) = validated.kind {
        let rook_from = Square::new_unchecked(side.rook_home_file(), from.rank);
        let rook_to = Square::new_unchecked(side.rook_castled_file(), from.rank);
        let rook = position.get_piece(rook_from);
        position.put(rook_from, None);
        position.put(rook_to, rook);
    }

    captured
}

/// Piece placement after `validated`, with no other state touched. Used by
/// the legality gate to look for self-check.
pub(crate) fn simulate(position: &Position, validated: &ValidatedMove) -> Position {
    let mut next = position.clone();
    relocate(&mut next, validated);
    next
}

fn finish_turn(position: &mut Position) {
    let mover = position.turn();
    if mover == Color::Black {
        let (halfmove, fullmove) = (position.halfmove_clock(), position.fullmove_number());
        position.set_clocks(halfmove, fullmove.saturating_add(1));
    }
    position.set_turn(mover.opposite());
}

/// Apply a validated move and return the next position.
///
/// A pawn reaching its last rank without a promotion kind is left on that
/// square with a pending promotion; the turn passes only once
/// [`complete_promotion`] supplies the kind.
pub fn apply(position: &Position, validated: &ValidatedMove) -> Applied {
    let mut next = position.clone();
    let Move { from, to, promotion } = validated.mv;
    let piece = validated.piece;

    let record = MoveRecord {
        mv: validated.mv,
        piece,
        kind: validated.kind,
        captured: None,
        prior_castling_rights: position.castling_rights(),
        prior_last_move: position.last_move(),
        prior_halfmove_clock: position.halfmove_clock(),
        prior_fullmove_number: position.fullmove_number(),
    };

    let captured = relocate(&mut next, validated);

    let mut rights = next.castling_rights();
    match piece.piece_type {
        PieceType::King => rights.remove_all_for_color(piece.color),
        PieceType::Rook => rights.remove_rook_rights(from),
        _ => {}
    }
    if let Some((square, taken)) = captured {
        if taken.piece_type == PieceType::Rook {
            rights.remove_rook_rights(square);
        }
    }
    next.set_castling_rights(rights);

    next.set_last_move(Some(LastMove::new(piece.piece_type, from, to)));

    let halfmove = if piece.piece_type == PieceType::Pawn || captured.is_some() {
        0
    } else {
        position.halfmove_clock().saturating_add(1)
    };
    next.set_clocks(halfmove, position.fullmove_number());

    if validated.promotes {
        match promotion {
            Some(kind) => {
                next.put(to, Some(Piece::new(kind, piece.color)));
                finish_turn(&mut next);
            }
            None => next.set_pending_promotion(Some(to)),
        }
    } else {
        finish_turn(&mut next);
    }

    debug!(
        "Applied {} ({:?}){}",
        validated.mv,
        validated.kind,
        captured
            .map(|(sq, p)| format!(", captured {:?} on {}", p.piece_type, sq))
            .unwrap_or_default()
    );

    Applied {
        position: next,
        record: MoveRecord { captured, ..record },
    }
}

/// Replace the pawn waiting on `square` with `kind` and pass the turn
pub fn complete_promotion(
    position: &Position,
    square: Square,
    kind: PieceType,
) -> Result<Position, ChessError> {
    if position.pending_promotion() != Some(square) {
        return Err(ChessError::InvalidPromotionChoice(format!(
            "No promotion pending on {square}"
        )));
    }
    if !kind.is_promotion_choice() {
        return Err(ChessError::InvalidPromotionChoice(format!(
            "Cannot promote to {:?} (choose Queen, Rook, Bishop or Knight)",
            kind
        )));
    }

    let pawn = position
        .get_piece(square)
        .filter(|p| p.piece_type == PieceType::Pawn)
        .ok_or_else(|| {
            ChessError::InvalidPromotionChoice(format!("No pawn waiting on {square}"))
        })?;

    let mut next = position.clone();
    next.put(square, Some(Piece::new(kind, pawn.color)));
    next.set_pending_promotion(None);
    finish_turn(&mut next);

    debug!("{} pawn on {} promoted to {:?}", pawn.color, square, kind);
    Ok(next)
}

/// Rebuild the position a record was applied to. `position` must be the
/// direct result of that application (promoted or still pending).
pub fn revert(position: &Position, record: &MoveRecord) -> Position {
    let mut prev = position.clone();
    let Move { from, to, .. } = record.mv;

    prev.put(to, None);
    prev.put(from, Some(record.piece));

    if let MoveKind::Castle(side) = record.kind {
        let rook_from = Square::new_unchecked(side.rook_home_file(), from.rank);
        let rook_to = Square::new_unchecked(side.rook_castled_file(), from.rank);
        let rook = prev.get_piece(rook_to);
        prev.put(rook_to, None);
        prev.put(rook_from, rook);
    }

    if let Some((square, piece)) = record.captured {
        prev.put(square, Some(piece));
    }

    prev.set_turn(record.piece.color);
    prev.set_castling_rights(record.prior_castling_rights);
    prev.set_last_move(record.prior_last_move);
    prev.set_clocks(record.prior_halfmove_clock, record.prior_fullmove_number);
    prev.set_pending_promotion(None);
    prev
}
