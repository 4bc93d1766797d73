//! Game controller: owns the current position and sequences turns.
//!
//! The free functions ([`new_game`], [`propose_move`], [`choose_promotion`],
//! [`is_in_check`]) are the stateless boundary a UI can drive with positions
//! it keeps itself. [`Game`] wraps the same calls around a single owned
//! position with a move history.

use super::executor::{self, MoveRecord};
use super::position::Position;
use super::rules;
use super::{attack, ChessError, Color, Move, PieceType, Square};
use tracing::debug;

/// Where the controller is between user intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    AwaitingSelection,
    /// A pawn stands on `Square` and no move is accepted until it is promoted
    AwaitingPromotionChoice(Square),
}

/// Verdict for a proposed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// The move was refused; the caller keeps its previous position
    Rejected(ChessError),
    Applied(Position),
    /// The move landed a pawn on its last rank; call `choose_promotion` next
    AppliedPendingPromotion(Position, Square),
}

impl MoveResult {
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveResult::Rejected(_))
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            MoveResult::Rejected(_) => None,
            MoveResult::Applied(position) | MoveResult::AppliedPendingPromotion(position, _) => {
                Some(position)
            }
        }
    }

    pub fn rejection(&self) -> Option<&ChessError> {
        match self {
            MoveResult::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Standard initial layout, White to move
pub fn new_game() -> Position {
    Position::new()
}

fn play(position: &Position, mv: Move) -> Result<executor::Applied, ChessError> {
    let validated = rules::validate(position, mv)?;
    Ok(executor::apply(position, &validated))
}

fn verdict(applied: Result<executor::Applied, ChessError>) -> MoveResult {
    match applied {
        Ok(applied) => match applied.pending_promotion() {
            Some(square) => MoveResult::AppliedPendingPromotion(applied.position, square),
            None => MoveResult::Applied(applied.position),
        },
        Err(err) => MoveResult::Rejected(err),
    }
}

pub fn propose_move(position: &Position, from: Square, to: Square) -> MoveResult {
    submit_move(position, Move::new_unchecked(from, to, None))
}

/// Like [`propose_move`], but a promotion kind may be given up front
pub fn submit_move(position: &Position, mv: Move) -> MoveResult {
    verdict(play(position, mv))
}

pub fn choose_promotion(
    position: &Position,
    square: Square,
    kind: PieceType,
) -> Result<Position, ChessError> {
    executor::complete_promotion(position, square, kind)
}

pub fn is_in_check(position: &Position, color: Color) -> bool {
    attack::is_in_check(position, color)
}

/// A game in progress: the single mutable position plus its history
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    state: ControllerState,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(new_game())
    }

    pub fn from_position(position: Position) -> Self {
        let state = match position.pending_promotion() {
            Some(square) => ControllerState::AwaitingPromotionChoice(square),
            None => ControllerState::AwaitingSelection,
        };
        Self {
            position,
            state,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.position, color)
    }

    /// Try to move the piece on `from` to `to`
    pub fn propose_move(&mut self, from: Square, to: Square) -> MoveResult {
        self.submit(Move::new_unchecked(from, to, None))
    }

    /// Try a full move intent, possibly carrying its promotion kind
    pub fn submit(&mut self, mv: Move) -> MoveResult {
        if let ControllerState::AwaitingPromotionChoice(square) = self.state {
            debug!("Ignoring {} while promotion on {} is pending", mv, square);
            return MoveResult::Rejected(ChessError::PromotionPending(square));
        }

        debug!("{} proposed {}", self.turn(), mv);
        let applied = match play(&self.position, mv) {
            Ok(applied) => applied,
            Err(err) => {
                debug!("Rejected {}: {}", mv, err);
                return MoveResult::Rejected(err);
            }
        };

        self.history.push(applied.record);
        self.position = applied.position.clone();
        self.state = match applied.pending_promotion() {
            Some(square) => {
                debug!("Awaiting promotion choice on {}", square);
                ControllerState::AwaitingPromotionChoice(square)
            }
            None => ControllerState::AwaitingSelection,
        };

        verdict(Ok(applied))
    }

    /// Supply the piece a pending pawn becomes
    pub fn choose_promotion(&mut self, kind: PieceType) -> Result<&Position, ChessError> {
        let ControllerState::AwaitingPromotionChoice(square) = self.state else {
            return Err(ChessError::InvalidPromotionChoice(
                "No promotion is pending".to_string(),
            ));
        };

        self.position = choose_promotion(&self.position, square, kind)?;
        if let Some(record) = self.history.last_mut() {
            record.mv.promotion = Some(kind);
        }
        self.state = ControllerState::AwaitingSelection;
        Ok(&self.position)
    }

    /// Take back the most recent move, including one still awaiting promotion
    pub fn undo(&mut self) -> Result<Move, ChessError> {
        let record = self
            .history
            .pop()
            .ok_or_else(|| ChessError::InvalidMove("No moves to undo".to_string()))?;

        self.position = executor::revert(&self.position, &record);
        self.state = ControllerState::AwaitingSelection;
        debug!("Took back {}", record.mv);
        Ok(record.mv)
    }

    /// Legal destinations for the piece on `from` in the current position
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        rules::legal_destinations(&self.position, from)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
