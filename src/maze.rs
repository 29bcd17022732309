use crate::builder::Builder;
use crate::direction::CardinalDirection;
use crate::grid::Grid;

/// A finished maze as delivered to an order. Read-only once built.
#[derive(Clone, Debug)]
pub struct MazeConfiguration {
    grid: Grid,
    entrance: (i32, i32),
    exit: (i32, i32),
    perfect: bool,
    builder: Builder,
    skill_level: u8,
}

impl MazeConfiguration {
    pub fn new(
        grid: Grid,
        entrance: (i32, i32),
        exit: (i32, i32),
        perfect: bool,
        builder: Builder,
        skill_level: u8,
    ) -> Self {
        MazeConfiguration {
            grid,
            entrance,
            exit,
            perfect,
            builder,
            skill_level,
        }
    }

    /// Wrap a hand-carved grid. The grid must already have its exit set;
    /// the entrance defaults to (0, 0).
    pub fn from_grid(grid: Grid) -> Self {
        let exit = grid.exit_position().unwrap_or((0, 0));
        MazeConfiguration::new(grid, (0, 0), exit, false, Builder::default(), 0)
    }

    pub fn with_entrance(mut self, x: i32, y: i32) -> Self {
        self.entrance = (x, y);
        self
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entrance(&self) -> (i32, i32) {
        self.entrance
    }

    pub fn exit(&self) -> (i32, i32) {
        self.exit
    }

    pub fn is_perfect(&self) -> bool {
        self.perfect
    }

    pub fn builder(&self) -> Builder {
        self.builder
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.grid.is_valid_position(x, y)
    }

    pub fn has_wall(&self, x: i32, y: i32, direction: CardinalDirection) -> bool {
        self.grid.has_wall(x, y, direction)
    }

    pub fn is_exit_position(&self, x: i32, y: i32) -> bool {
        self.grid.is_exit_position(x, y)
    }

    pub fn is_in_room(&self, x: i32, y: i32) -> bool {
        self.grid.is_in_room(x, y)
    }
}
