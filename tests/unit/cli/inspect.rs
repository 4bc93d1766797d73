use crate::common::test_helpers::{position, sq};
use rookery::chess::Position;
use rookery::cli::{check_move, list_destinations};

#[cfg(test)]
mod inspect_tests {
    use super::*;

    #[test]
    fn test_legal_move_verdict() {
        let verdict = check_move(&Position::new(), "e2e4");
        assert!(verdict.legal);
        assert_eq!(verdict.chess_move, "e2e4");
        assert_eq!(verdict.reason, None);
        assert_eq!(
            verdict.fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(!verdict.check);
        assert_eq!(verdict.to_string().lines().next(), Some("e2e4: legal"));
    }

    #[test]
    fn test_illegal_move_verdict() {
        let start = Position::new();
        let verdict = check_move(&start, "e2e5");
        assert!(!verdict.legal);
        assert!(verdict.reason.is_some());
        assert_eq!(verdict.fen, start.to_fen());
        assert!(verdict.to_string().starts_with("e2e5: illegal ("));

        let garbage = check_move(&start, "hello");
        assert!(!garbage.legal);
    }

    #[test]
    fn test_check_and_pending_promotion() {
        let pos = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let verdict = check_move(&pos, "a1a8");
        assert!(verdict.legal);
        assert!(verdict.check);
        assert!(verdict.to_string().contains("(check)"));

        let pawn = position("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let verdict = check_move(&pawn, "e7e8");
        assert_eq!(verdict.pending_promotion.as_deref(), Some("e8"));

        let verdict = check_move(&pawn, "e7e8n");
        assert_eq!(verdict.pending_promotion, None);
        assert!(verdict.fen.starts_with("4N3/"));
    }

    #[test]
    fn test_verdict_json() {
        let verdict = check_move(&Position::new(), "g1f3");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["legal"], true);
        assert_eq!(json["chess_move"], "g1f3");
    }

    #[test]
    fn test_list_destinations() {
        let start = Position::new();
        assert_eq!(list_destinations(&start, sq("b1")), vec!["a3", "c3"]);
        assert!(list_destinations(&start, sq("d4")).is_empty());
    }
}
