use crate::common::test_helpers::{position, sq};
use rookery::chess::{Color, ControllerState, Game, PieceType};
use rookery::cli::{RenderOptions, Reply, Session, SessionCommand};
use std::io::Cursor;

fn ascii_session(game: Game) -> Session {
    Session::new(
        game,
        RenderOptions {
            unicode: false,
            show_coordinates: true,
            perspective: Color::White,
        },
    )
}

fn reply_text(reply: Reply) -> String {
    match reply {
        Reply::Continue(text) => text,
        Reply::Quit => panic!("session quit unexpectedly"),
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let session = ascii_session(Game::new());
        assert_eq!(session.parse("quit").unwrap(), SessionCommand::Quit);
        assert_eq!(session.parse("  HELP ").unwrap(), SessionCommand::Help);
        assert_eq!(session.parse("undo").unwrap(), SessionCommand::Undo);
        assert_eq!(
            session.parse("moves g1").unwrap(),
            SessionCommand::Moves(sq("g1"))
        );
        assert_eq!(
            session.parse("promote knight").unwrap(),
            SessionCommand::Promote(PieceType::Knight)
        );
        assert!(matches!(session.parse("e2e4").unwrap(), SessionCommand::Move(_)));
        assert!(session.parse("moves z9").is_err());
        assert!(session.parse("dance now please").is_err());
    }

    #[test]
    fn test_single_letter_promotion_only_when_pending() {
        let session = ascii_session(Game::new());
        assert!(session.parse("q").is_err());

        let mut game = Game::from_position(position("8/4P3/8/8/8/8/k7/4K3 w - - 0 1"));
        game.propose_move(sq("e7"), sq("e8"));
        let session = ascii_session(game);
        assert_eq!(
            session.parse("q").unwrap(),
            SessionCommand::Promote(PieceType::Queen)
        );
    }

    #[test]
    fn test_moves_and_rejections() {
        let mut session = ascii_session(Game::new());

        let text = reply_text(session.handle_line("e2e4"));
        assert!(text.contains("To move: Black"));

        let text = reply_text(session.handle_line("e2e4"));
        assert!(text.starts_with("Illegal move"));

        let text = reply_text(session.handle_line("moves g8"));
        assert_eq!(text, "g8: f6 h6");

        assert_eq!(reply_text(session.handle_line("   ")), "");
    }

    #[test]
    fn test_promotion_through_session() {
        let game = Game::from_position(position("8/4P3/8/8/8/8/k7/4K3 w - - 0 1"));
        let mut session = ascii_session(game);

        let text = reply_text(session.handle_line("e7e8"));
        assert!(text.contains("must promote"));
        assert!(matches!(
            session.game().state(),
            ControllerState::AwaitingPromotionChoice(_)
        ));

        reply_text(session.handle_line("n"));
        assert_eq!(session.game().state(), ControllerState::AwaitingSelection);
        assert_eq!(session.game().turn(), Color::Black);
        assert!(session
            .game()
            .position()
            .get_piece(sq("e8"))
            .is_some_and(|p| p.piece_type == PieceType::Knight));
    }

    #[test]
    fn test_undo_and_fen() {
        let mut session = ascii_session(Game::new());
        assert!(reply_text(session.handle_line("undo")).contains("No moves to undo"));

        session.handle_line("d2d4");
        let text = reply_text(session.handle_line("undo"));
        assert!(text.starts_with("Took back d2d4"));
        assert_eq!(
            reply_text(session.handle_line("fen")),
            rookery::chess::STARTING_FEN
        );
    }

    #[test]
    fn test_run_until_quit() {
        let mut session = ascii_session(Game::new());
        let input = Cursor::new("e2e4\ne7e5\nhistory\nquit\nd2d4\n");
        let mut output = Vec::new();
        session.run(input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("White> "));
        assert!(text.contains("Black> "));
        assert!(text.contains("e7e5"));
        assert!(text.trim_end().ends_with("Goodbye."));
        assert_eq!(session.game().history().len(), 2);
    }

    #[test]
    fn test_run_until_end_of_input() {
        let mut session = ascii_session(Game::new());
        let mut output = Vec::new();
        session.run(Cursor::new("g1f3\n"), &mut output).unwrap();
        assert_eq!(session.game().turn(), Color::Black);
        assert!(String::from_utf8(output).unwrap().ends_with("Goodbye.\n"));
    }
}
