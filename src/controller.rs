use crate::direction::CardinalDirection;
use crate::maze::MazeConfiguration;
use log::{debug, trace};
use std::sync::Arc;

/// Source of truth for where the robot is and which way it faces.
///
/// The robot never tracks position itself; it issues movement commands
/// and reads the result back from here.
pub trait MazeController {
    fn maze(&self) -> &MazeConfiguration;

    /// May lie outside the grid once the exit has been passed
    fn current_position(&self) -> (i32, i32);

    fn current_direction(&self) -> CardinalDirection;

    fn turn_left(&mut self);

    fn turn_right(&mut self);

    /// Advance one cell if no wall blocks the way. Returns whether it moved.
    fn step_forward(&mut self) -> bool;
}

/// Headless controller: a position and heading over a shared maze
#[derive(Debug, Clone)]
pub struct MazeWalker {
    maze: Arc<MazeConfiguration>,
    x: i32,
    y: i32,
    heading: CardinalDirection,
    finished: bool,
}

impl MazeWalker {
    /// Start at the maze entrance, facing the first open side
    /// (East if the entrance is closed in).
    pub fn new(maze: Arc<MazeConfiguration>) -> Self {
        let (x, y) = maze.entrance();
        let heading = CardinalDirection::ALL
            .into_iter()
            .find(|&cd| !maze.has_wall(x, y, cd))
            .unwrap_or(CardinalDirection::East);
        MazeWalker::at(maze, x, y, heading)
    }

    pub fn at(maze: Arc<MazeConfiguration>, x: i32, y: i32, heading: CardinalDirection) -> Self {
        MazeWalker {
            maze,
            x,
            y,
            heading,
            finished: false,
        }
    }

    /// True once the walker has stepped out through the exit
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl MazeController for MazeWalker {
    fn maze(&self) -> &MazeConfiguration {
        &self.maze
    }

    fn current_position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn current_direction(&self) -> CardinalDirection {
        self.heading
    }

    fn turn_left(&mut self) {
        self.heading = self.heading.rotate_left();
    }

    fn turn_right(&mut self) {
        self.heading = self.heading.rotate_right();
    }

    fn step_forward(&mut self) -> bool {
        if self.finished || self.maze.has_wall(self.x, self.y, self.heading) {
            trace!("Step blocked at ({}, {}) facing {:?}", self.x, self.y, self.heading);
            return false;
        }
        let (dx, dy) = self.heading.delta();
        self.x += dx;
        self.y += dy;
        if !self.maze.is_valid_position(self.x, self.y) {
            debug!("Walked out through the exit to ({}, {})", self.x, self.y);
            self.finished = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Wall};

    fn corridor() -> Arc<MazeConfiguration> {
        // 3x1, open East-West, exit on the East end
        let mut grid = Grid::new(3, 1);
        grid.delete_wall(&Wall::new(0, 0, CardinalDirection::East));
        grid.delete_wall(&Wall::new(1, 0, CardinalDirection::East));
        grid.set_exit_position(2, 0, CardinalDirection::East);
        Arc::new(MazeConfiguration::from_grid(grid))
    }

    #[test]
    fn test_walker_faces_open_side() {
        let walker = MazeWalker::new(corridor());
        assert_eq!(walker.current_position(), (0, 0));
        assert_eq!(walker.current_direction(), CardinalDirection::East);
    }

    #[test]
    fn test_walls_block_steps() {
        let mut walker = MazeWalker::at(corridor(), 1, 0, CardinalDirection::North);
        assert!(!walker.step_forward());
        assert_eq!(walker.current_position(), (1, 0));
        walker.turn_right();
        assert_eq!(walker.current_direction(), CardinalDirection::East);
        assert!(walker.step_forward());
        assert_eq!(walker.current_position(), (2, 0));
    }

    #[test]
    fn test_stepping_through_exit_finishes() {
        let mut walker = MazeWalker::at(corridor(), 2, 0, CardinalDirection::East);
        assert!(walker.step_forward());
        assert!(walker.is_finished());
        assert_eq!(walker.current_position(), (3, 0));
        assert!(!walker.step_forward());
    }
}
