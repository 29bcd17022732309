use serde::{Deserialize, Serialize};

/// Absolute compass direction on the grid.
///
/// Unit vectors: East = (1,0), South = (0,1), West = (-1,0), North = (0,-1).
/// y grows downwards, so "left" of East is North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    East,
    South,
    West,
    North,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
        CardinalDirection::North,
    ];

    /// (dx, dy) of one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::East => (1, 0),
            CardinalDirection::South => (0, 1),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::North => (0, -1),
        }
    }

    /// Inverse of `delta`; None for anything that is not a unit vector
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(CardinalDirection::East),
            (0, 1) => Some(CardinalDirection::South),
            (-1, 0) => Some(CardinalDirection::West),
            (0, -1) => Some(CardinalDirection::North),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
            CardinalDirection::North => CardinalDirection::South,
        }
    }

    /// Heading after a 90° turn to the left: (dx, dy) -> (dy, -dx)
    pub fn rotate_left(self) -> Self {
        let (dx, dy) = self.delta();
        Self::rotated(dy, -dx)
    }

    /// Heading after a 90° turn to the right: (dx, dy) -> (-dy, dx)
    pub fn rotate_right(self) -> Self {
        let (dx, dy) = self.delta();
        Self::rotated(-dy, dx)
    }

    /// Resolve a direction relative to this heading into an absolute one
    pub fn resolve(self, relative: Direction) -> Self {
        match relative {
            Direction::Forward => self,
            Direction::Backward => self.opposite(),
            Direction::Left => self.rotate_left(),
            Direction::Right => self.rotate_right(),
        }
    }

    /// Bit index used by per-cell wall masks
    pub(crate) fn bit(self) -> u8 {
        match self {
            CardinalDirection::East => 1,
            CardinalDirection::South => 2,
            CardinalDirection::West => 4,
            CardinalDirection::North => 8,
        }
    }

    fn rotated(dx: i32, dy: i32) -> Self {
        // Rotating a unit vector always yields a unit vector
        Self::from_delta(dx, dy).unwrap_or(CardinalDirection::East)
    }
}

/// Direction relative to the robot's current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];
}

/// Rotation on the spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
    Around,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_of_east_is_north() {
        assert_eq!(CardinalDirection::East.rotate_left(), CardinalDirection::North);
        assert_eq!(CardinalDirection::East.rotate_right(), CardinalDirection::South);
    }

    #[test]
    fn test_four_turns_return_home() {
        for cd in CardinalDirection::ALL {
            let mut left = cd;
            let mut right = cd;
            for _ in 0..4 {
                left = left.rotate_left();
                right = right.rotate_right();
            }
            assert_eq!(left, cd);
            assert_eq!(right, cd);
            assert_eq!(cd.rotate_left().rotate_right(), cd);
        }
    }

    #[test]
    fn test_resolve_relative() {
        let heading = CardinalDirection::South;
        assert_eq!(heading.resolve(Direction::Forward), CardinalDirection::South);
        assert_eq!(heading.resolve(Direction::Backward), CardinalDirection::North);
        assert_eq!(heading.resolve(Direction::Left), CardinalDirection::East);
        assert_eq!(heading.resolve(Direction::Right), CardinalDirection::West);
    }

    #[test]
    fn test_delta_roundtrip() {
        for cd in CardinalDirection::ALL {
            let (dx, dy) = cd.delta();
            assert_eq!(CardinalDirection::from_delta(dx, dy), Some(cd));
        }
        assert_eq!(CardinalDirection::from_delta(1, 1), None);
    }
}
