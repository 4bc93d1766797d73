use crate::chess::{ChessError, ControllerState, Game, Move, MoveResult, PieceType, Square};
use crate::cli::display::{render_board, render_move_history, render_status, RenderOptions};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  e2e4, e7e8q, O-O, O-O-O   make a move (coordinate notation)
  q | r | b | n             choose the promotion piece when asked
  promote <piece>           same, with the piece spelled out
  moves <square>            list legal destinations, e.g. 'moves g1'
  undo                      take back the last move
  board                     show the board
  fen                       print the position as FEN
  history                   show the moves played
  help                      show this help
  quit                      leave the session";

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Move(Move),
    Promote(PieceType),
    Moves(Square),
    Undo,
    Board,
    Fen,
    History,
    Help,
    Quit,
}

/// What the session wants done after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue(String),
    Quit,
}

/// Interactive game over any line-oriented input and output
pub struct Session {
    game: Game,
    options: RenderOptions,
}

impl Session {
    pub fn new(game: Game, options: RenderOptions) -> Self {
        Self { game, options }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Parse a line in the context of the current game
    pub fn parse(&self, line: &str) -> Result<SessionCommand, ChessError> {
        let line = line.trim();
        let lower = line.to_lowercase();
        let mut words = lower.split_whitespace();

        let command = match (words.next(), words.next()) {
            (Some("quit" | "exit"), None) => SessionCommand::Quit,
            (Some("help" | "?"), None) => SessionCommand::Help,
            (Some("board"), None) => SessionCommand::Board,
            (Some("fen"), None) => SessionCommand::Fen,
            (Some("history"), None) => SessionCommand::History,
            (Some("undo"), None) => SessionCommand::Undo,
            (Some("moves"), Some(square)) => SessionCommand::Moves(square.parse()?),
            (Some("promote"), Some(kind)) => SessionCommand::Promote(kind.parse()?),
            (Some(kind @ ("q" | "r" | "b" | "n")), None)
                if matches!(
                    self.game.state(),
                    ControllerState::AwaitingPromotionChoice(_)
                ) =>
            {
                SessionCommand::Promote(kind.parse()?)
            }
            (Some(_), None) => SessionCommand::Move(Move::from_str_with_color(
                line,
                self.game.turn(),
            )?),
            _ => {
                return Err(ChessError::InvalidMove(format!(
                    "Unrecognized command '{line}'. Type 'help' for the command list."
                )))
            }
        };

        Ok(command)
    }

    fn board_and_status(&self) -> String {
        format!(
            "{}\n{}",
            render_board(self.game.position(), self.options),
            render_status(self.game.position())
        )
    }

    /// Carry out one command and describe the result
    pub fn execute(&mut self, command: SessionCommand) -> Reply {
        let text = match command {
            SessionCommand::Quit => return Reply::Quit,
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Board => self.board_and_status(),
            SessionCommand::Fen => self.game.position().to_fen(),
            SessionCommand::History => render_move_history(self.game.history()),
            SessionCommand::Moves(square) => {
                let targets = self.game.legal_destinations(square);
                if targets.is_empty() {
                    format!("No legal moves from {}", square)
                } else {
                    let names: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
                    format!("{}: {}", square, names.join(" "))
                }
            }
            SessionCommand::Undo => match self.game.undo() {
                Ok(mv) => format!("Took back {}\n{}", mv, self.board_and_status()),
                Err(err) => err.to_string(),
            },
            SessionCommand::Promote(kind) => match self.game.choose_promotion(kind) {
                Ok(_) => self.board_and_status(),
                Err(err) => err.to_string(),
            },
            SessionCommand::Move(mv) => match self.game.submit(mv) {
                MoveResult::Rejected(err) => err.to_string(),
                MoveResult::Applied(_) | MoveResult::AppliedPendingPromotion(_, _) => {
                    self.board_and_status()
                }
            },
        };
        Reply::Continue(text)
    }

    /// Parse and execute a raw input line
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::Continue(String::new());
        }
        match self.parse(line) {
            Ok(command) => {
                debug!("Session command {:?}", command);
                self.execute(command)
            }
            Err(err) => Reply::Continue(err.to_string()),
        }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.board_and_status())?;

        let mut lines = input.lines();
        loop {
            write!(output, "{}> ", self.game.turn())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("Failed to read input: {}", err);
                    return Err(err);
                }
            };

            match self.handle_line(&line) {
                Reply::Quit => break,
                Reply::Continue(text) if text.is_empty() => {}
                Reply::Continue(text) => writeln!(output, "{}", text)?,
            }
        }

        writeln!(output, "Goodbye.")?;
        Ok(())
    }
}
