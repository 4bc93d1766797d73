use crate::common::test_helpers::{game_after, position};
use rookery::chess::executor::MoveRecord;
use rookery::chess::{Move, Position};

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[test]
    fn test_position_json() {
        let pos = position("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 4 20");
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
        assert_eq!(back.to_fen(), pos.to_fen());
    }

    #[test]
    fn test_position_bincode() {
        let pos = game_after(&["e2e4", "c7c5", "g1f3"]).position().clone();
        let bytes = bincode::serialize(&pos).unwrap();
        let back: Position = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_history_json() {
        let game = game_after(&["e2e4", "d7d5", "e4d5"]);
        let json = serde_json::to_string(game.history()).unwrap();
        let back: Vec<MoveRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_slice(), game.history());
        assert!(back[2].captured.is_some());
    }

    #[test]
    fn test_move_json_shape() {
        let mv: Move = "e7e8q".parse().unwrap();
        let value = serde_json::to_value(mv).unwrap();
        assert_eq!(value["promotion"], "Queen");
        assert_eq!(value["from"]["file"], 4);
        assert_eq!(value["from"]["rank"], 6);
    }
}
