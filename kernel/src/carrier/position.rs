//! Integer 2D positions and the Manhattan metric.

use crate::carrier::cost::Cost;

/// A 2D integer position.
///
/// Ordering is `(x, y)` lexicographic, which fixes the iteration order of
/// position-keyed sets at serialization boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|` as a finite [`Cost`].
    #[must_use]
    pub fn manhattan(self, other: Position) -> Cost {
        let d = self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y));
        Cost::finite(i64::try_from(d).unwrap_or(i64::MAX - 1))
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
