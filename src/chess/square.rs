use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 64 board squares.
///
/// Rank 0 is White's back rank, rank 7 is Black's. Both coordinates are
/// always within 0-7; use [`Square::new`] to validate untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub file: u8, // 0-7 corresponding to a-h
    pub rank: u8, // 0-7 corresponding to 1-8
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file > 7 {
            return Err(ChessError::OutOfBoundsSquare(format!(
                "File must be 0-7, got {}",
                file
            )));
        }
        if rank > 7 {
            return Err(ChessError::OutOfBoundsSquare(format!(
                "Rank must be 0-7, got {}",
                rank
            )));
        }

        Ok(Self { file, rank })
    }

    /// Create a square without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Create a square from signed coordinates, `None` when off the board
    pub fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new_unchecked(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Create a square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::OutOfBoundsSquare(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::OutOfBoundsSquare(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Square {
            file: file_lower as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }

    /// The square shifted by `(file_delta, rank_delta)`, if still on the board
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        Self::from_coords(self.file as i8 + file_delta, self.rank as i8 + rank_delta)
    }

    pub fn file_char(&self) -> char {
        b'a'.wrapping_add(self.file) as char
    }

    pub fn rank_char(&self) -> char {
        b'1'.wrapping_add(self.rank) as char
    }

    /// Signed `(file, rank)` difference from `self` to `other`
    pub fn delta(&self, other: &Square) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    pub fn same_rank(&self, other: &Square) -> bool {
        self.rank == other.rank
    }

    pub fn same_file(&self, other: &Square) -> bool {
        self.file == other.file
    }

    pub fn same_diagonal(&self, other: &Square) -> bool {
        let (df, dr) = self.delta(other);
        df.abs() == dr.abs()
    }

    /// Squares strictly between `self` and `other` along a shared rank, file
    /// or diagonal. Empty when the squares are not aligned or adjacent.
    pub fn between(&self, other: &Square) -> Vec<Square> {
        let (df, dr) = self.delta(other);
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if !aligned || (df == 0 && dr == 0) {
            return Vec::new();
        }

        let (step_f, step_r) = (df.signum(), dr.signum());
        let distance = df.abs().max(dr.abs());
        (1..distance)
            .filter_map(|i| self.offset(step_f * i, step_r * i))
            .collect()
    }

    /// Get all squares on the board
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [file, rank] => Self::from_chars(*file, *rank),
            _ => Err(ChessError::OutOfBoundsSquare(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
