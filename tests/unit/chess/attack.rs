use crate::common::test_helpers::{position, sq};
use rookery::chess::attack::{attackers, is_attacked, is_in_check, king_square, path_clear};
use rookery::chess::{Color, Position};

#[cfg(test)]
mod attack_oracle_tests {
    use super::*;

    #[test]
    fn test_starting_position_attacks() {
        let start = Position::new();
        assert!(is_attacked(&start, sq("e3"), Color::White));
        assert!(is_attacked(&start, sq("f3"), Color::White));
        assert!(!is_attacked(&start, sq("e4"), Color::White));
        assert!(is_attacked(&start, sq("e6"), Color::Black));
        assert!(!is_attacked(&start, sq("e5"), Color::Black));
    }

    #[test]
    fn test_pawns_attack_diagonally_only() {
        let pos = position("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(is_attacked(&pos, sq("d5"), Color::White));
        assert!(is_attacked(&pos, sq("f5"), Color::White));
        assert!(!is_attacked(&pos, sq("e5"), Color::White));
        assert!(!is_attacked(&pos, sq("d3"), Color::White));
    }

    #[test]
    fn test_sliding_pieces_are_blocked() {
        let pos = position("4k3/8/8/8/R2p3r/8/8/4K3 w - - 0 1");
        assert!(is_attacked(&pos, sq("d4"), Color::White));
        assert!(!is_attacked(&pos, sq("e4"), Color::White));
        assert!(is_attacked(&pos, sq("e4"), Color::Black));
        assert!(path_clear(&pos, sq("h4"), sq("e4")));
        assert!(!path_clear(&pos, sq("a4"), sq("e4")));
    }

    #[test]
    fn test_attackers_lists_every_attacker() {
        let pos = position("4k3/8/8/8/8/2N5/6B1/4K3 w - - 0 1");
        assert_eq!(attackers(&pos, sq("e4"), Color::White), vec![sq("g2"), sq("c3")]);
        assert!(attackers(&pos, sq("e4"), Color::Black).is_empty());
    }

    #[test]
    fn test_king_attacks_neighbours() {
        let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(is_attacked(&pos, sq("d2"), Color::White));
        assert!(is_attacked(&pos, sq("f1"), Color::White));
        assert!(!is_attacked(&pos, sq("e3"), Color::White));
    }

    #[test]
    fn test_is_in_check() {
        let pos = position("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
        assert!(is_in_check(&pos, Color::White));
        assert!(!is_in_check(&pos, Color::Black));
        assert!(!is_in_check(&Position::new(), Color::White));
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let empty = Position::empty();
        assert_eq!(king_square(&empty, Color::White), None);
        assert!(!is_in_check(&empty, Color::White));
        assert!(!is_in_check(&empty, Color::Black));
        assert_eq!(king_square(&Position::new(), Color::Black), Some(sq("e8")));
    }
}
