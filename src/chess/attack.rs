//! Attack oracle: which squares a side's pieces bear on.
//!
//! Attacks use piece geometry only. Whether the attacker could legally move
//! (its own king safety) is ignored, so kings attack their eight neighbours
//! and the oracle never recurses into the legality gate.

use super::position::Position;
use super::{Color, Piece, PieceType, Square};
use tracing::trace;

/// True when nothing stands strictly between `from` and `to`
pub fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    from.between(&to).into_iter().all(|sq| position.is_empty(sq))
}

/// Rook geometry: shared rank or file with an empty line between
pub fn rook_reaches(position: &Position, from: Square, to: Square) -> bool {
    from != to && (from.same_rank(&to) || from.same_file(&to)) && path_clear(position, from, to)
}

/// Bishop geometry: shared diagonal with an empty line between
pub fn bishop_reaches(position: &Position, from: Square, to: Square) -> bool {
    from != to && from.same_diagonal(&to) && path_clear(position, from, to)
}

pub fn knight_reaches(from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(&to);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

pub fn king_adjacent(from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(&to);
    from != to && df.abs() <= 1 && dr.abs() <= 1
}

/// Whether `piece` standing on `from` attacks `target`.
///
/// Pawns attack only their two forward diagonals, never straight ahead.
pub fn piece_attacks(position: &Position, piece: Piece, from: Square, target: Square) -> bool {
    match piece.piece_type {
        PieceType::Pawn => {
            let (df, dr) = from.delta(&target);
            df.abs() == 1 && dr == piece.color.pawn_direction()
        }
        PieceType::Knight => knight_reaches(from, target),
        PieceType::Bishop => bishop_reaches(position, from, target),
        PieceType::Rook => rook_reaches(position, from, target),
        PieceType::Queen => {
            rook_reaches(position, from, target) || bishop_reaches(position, from, target)
        }
        PieceType::King => king_adjacent(from, target),
    }
}

/// Squares holding pieces of `by` that attack `square`
pub fn attackers(position: &Position, square: Square, by: Color) -> Vec<Square> {
    position
        .pieces()
        .filter(|(from, piece)| piece.color == by && piece_attacks(position, *piece, *from, square))
        .map(|(from, _)| from)
        .collect()
}

/// Is `square` attacked by any piece of `by`?
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    let hit = position
        .pieces()
        .find(|(from, piece)| piece.color == by && piece_attacks(position, *piece, *from, square));

    if let Some((from, piece)) = hit {
        trace!("{} attacked by {:?} on {}", square, piece, from);
        return true;
    }
    false
}

pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    position
        .pieces()
        .find(|(_, piece)| piece.is(PieceType::King, color))
        .map(|(square, _)| square)
}

/// Is `color`'s king attacked by the opponent? A board without that king is
/// never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    king_square(position, color)
        .map(|king| is_attacked(position, king, color.opposite()))
        .unwrap_or(false)
}
