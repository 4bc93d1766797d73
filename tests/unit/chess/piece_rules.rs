use crate::common::test_helpers::{mv_for, position, sq};
use rookery::chess::rules::{is_legal, legal_destinations, legal_moves, validate};
use rookery::chess::{ChessError, Color, Move, Piece, PieceType, Position, Square};

#[cfg(test)]
mod piece_rule_tests {
    use super::*;

    #[test]
    fn test_knight_moves() {
        let start = Position::new();
        assert!(is_legal(&start, mv_for(&start, "g1f3")));
        assert!(!is_legal(&start, mv_for(&start, "g1e2")));
        assert!(!is_legal(&start, mv_for(&start, "g1g3")));
        assert_eq!(legal_destinations(&start, sq("g1")), vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn test_bishop_needs_open_diagonal() {
        let start = Position::new();
        assert!(!is_legal(&start, mv_for(&start, "f1c4")));

        let opened = position("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2");
        assert!(is_legal(&opened, mv_for(&opened, "f1c4")));
        assert!(is_legal(&opened, mv_for(&opened, "f1a6")));
        assert!(!is_legal(&opened, mv_for(&opened, "f1f3")));
    }

    #[test]
    fn test_rook_moves_along_lines() {
        let pos = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(is_legal(&pos, mv_for(&pos, "a1a8")));
        assert!(is_legal(&pos, mv_for(&pos, "a1d1")));
        assert!(!is_legal(&pos, mv_for(&pos, "a1e1")));
        assert!(!is_legal(&pos, mv_for(&pos, "a1b2")));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let pos = position("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1");
        assert!(is_legal(&pos, mv_for(&pos, "d4h8")));
        assert!(is_legal(&pos, mv_for(&pos, "d4d8")));
        assert!(is_legal(&pos, mv_for(&pos, "d4a4")));
        assert!(!is_legal(&pos, mv_for(&pos, "d4e6")));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let pos = position("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        assert!(!is_legal(&pos, mv_for(&pos, "e1e2")));
        assert!(!is_legal(&pos, mv_for(&pos, "e1d2")));
        assert!(is_legal(&pos, mv_for(&pos, "e1f1")));
    }

    #[test]
    fn test_king_captures_only_unprotected_pieces() {
        let loose = position("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
        assert!(is_legal(&loose, mv_for(&loose, "e1d2")));

        let protected = position("3rk3/8/8/8/8/8/3q4/4K3 w - - 0 1");
        assert!(!is_legal(&protected, mv_for(&protected, "e1d2")));
        assert!(is_legal(&protected, mv_for(&protected, "e1f1")));
    }

    #[test]
    fn test_kings_are_never_captured() {
        // Not reachable through FEN, so place the pieces by hand
        let mut pos = Position::empty();
        pos.set_piece(sq("a8"), Some(Piece::new(PieceType::Rook, Color::White)))
            .unwrap();
        pos.set_piece(sq("e8"), Some(Piece::new(PieceType::King, Color::Black)))
            .unwrap();
        pos.set_piece(sq("e1"), Some(Piece::new(PieceType::King, Color::White)))
            .unwrap();
        let result = validate(&pos, mv_for(&pos, "a8e8"));
        assert!(matches!(result, Err(ChessError::IllegalMove(msg)) if msg.contains("kings cannot be captured")));
    }

    #[test]
    fn test_basic_rejections() {
        let start = Position::new();

        let wrong_turn = validate(&start, mv_for(&start, "e7e5"));
        assert!(matches!(wrong_turn, Err(ChessError::IllegalMove(msg)) if msg.contains("turn")));

        let empty = validate(&start, mv_for(&start, "e3e4"));
        assert!(matches!(empty, Err(ChessError::IllegalMove(msg)) if msg.contains("no piece")));

        let friendly = validate(&start, mv_for(&start, "a1a2"));
        assert!(matches!(friendly, Err(ChessError::IllegalMove(msg)) if msg.contains("friendly")));

        let same = validate(&start, Move::new_unchecked(sq("e2"), sq("e2"), None));
        assert!(matches!(same, Err(ChessError::IllegalMove(_))));

        let off_board = validate(
            &start,
            Move::new_unchecked(Square::new_unchecked(8, 1), sq("e4"), None),
        );
        assert!(matches!(off_board, Err(ChessError::OutOfBoundsSquare(_))));
    }

    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let pos = position("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        let result = validate(&pos, mv_for(&pos, "e2c3"));
        assert!(matches!(result, Err(ChessError::IllegalMove(msg)) if msg.contains("leaves the White king in check")));
        assert!(legal_destinations(&pos, sq("e2")).is_empty());
    }

    #[test]
    fn test_check_must_be_answered() {
        let pos = position("4k3/4r3/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(!is_legal(&pos, mv_for(&pos, "a1a2")));
        assert!(is_legal(&pos, mv_for(&pos, "e1d1")));
        assert!(!is_legal(&pos, mv_for(&pos, "e1e2")));
    }

    #[test]
    fn test_legal_moves_counts() {
        assert_eq!(legal_moves(&Position::new()).len(), 20);

        // Four promotion kinds for the single pawn push, plus king moves
        let pos = position("8/4P3/8/8/8/k7/8/K7 w - - 0 1");
        let moves = legal_moves(&pos);
        let promotions = moves.iter().filter(|m| m.is_promotion()).count();
        assert_eq!(promotions, 4);
    }
}
