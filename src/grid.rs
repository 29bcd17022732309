use crate::direction::CardinalDirection;

/// A removable wall: the side `direction` of cell (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wall {
    pub x: i32,
    pub y: i32,
    pub direction: CardinalDirection,
}

impl Wall {
    pub fn new(x: i32, y: i32, direction: CardinalDirection) -> Self {
        Wall { x, y, direction }
    }

    pub fn neighbor_x(&self) -> i32 {
        self.x + self.direction.delta().0
    }

    pub fn neighbor_y(&self) -> i32 {
        self.y + self.direction.delta().1
    }
}

/// Grid structure for storing the walls of a maze
///
/// Every cell keeps a wall bit per cardinal direction. Walls on the outer
/// perimeter are additionally flagged as border and can only be opened
/// through `set_exit_position`. A fresh grid has every wall up.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    walls: Vec<u8>,
    borders: Vec<u8>,
    rooms: Vec<bool>,
    exit: Option<(i32, i32)>,
}

impl Grid {
    /// Create a new grid with every wall present
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let count = (width * height) as usize;
        let mut grid = Grid {
            width,
            height,
            walls: vec![0b1111; count],
            borders: vec![0; count],
            rooms: vec![false; count],
            exit: None,
        };

        for y in 0..height {
            for x in 0..width {
                let id = grid.get_id(x, y) as usize;
                for cd in CardinalDirection::ALL {
                    let (dx, dy) = cd.delta();
                    if !grid.is_valid_position(x + dx, y + dy) {
                        grid.borders[id] |= cd.bit();
                    }
                }
            }
        }
        grid
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.width
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.width, id / self.width)
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Check for a wall on side `direction` of (x, y)
    pub fn has_wall(&self, x: i32, y: i32, direction: CardinalDirection) -> bool {
        if !self.is_valid_position(x, y) {
            return true; // Out of bounds is considered walled in
        }
        self.walls[self.get_id(x, y) as usize] & direction.bit() != 0
    }

    /// Check whether side `direction` of (x, y) lies on the outer perimeter
    pub fn has_border(&self, x: i32, y: i32, direction: CardinalDirection) -> bool {
        if !self.is_valid_position(x, y) {
            return false;
        }
        self.borders[self.get_id(x, y) as usize] & direction.bit() != 0
    }

    /// Tear down an internal wall on both sides. Border walls are left alone.
    pub fn delete_wall(&mut self, wall: &Wall) {
        if !self.is_valid_position(wall.x, wall.y)
            || self.has_border(wall.x, wall.y, wall.direction)
        {
            return;
        }
        let (nx, ny) = (wall.neighbor_x(), wall.neighbor_y());
        self.clear_bit(wall.x, wall.y, wall.direction);
        self.clear_bit(nx, ny, wall.direction.opposite());
    }

    /// True if the wall could be removed to join (x, y) with a neighbor
    /// that is not yet reachable through it: neighbor inside the grid,
    /// wall still standing, not part of the border.
    pub fn can_go(&self, wall: &Wall) -> bool {
        self.is_valid_position(wall.x, wall.y)
            && self.is_valid_position(wall.neighbor_x(), wall.neighbor_y())
            && self.has_wall(wall.x, wall.y, wall.direction)
            && !self.has_border(wall.x, wall.y, wall.direction)
    }

    /// Open the border wall of (x, y) facing `direction` and mark it as the exit.
    /// Returns false if that side is not on the border.
    pub fn set_exit_position(&mut self, x: i32, y: i32, direction: CardinalDirection) -> bool {
        if !self.has_border(x, y, direction) {
            return false;
        }
        if let Some((ex, ey)) = self.exit.take() {
            // Re-close the previous exit so exactly one border opening exists
            let id = self.get_id(ex, ey) as usize;
            self.walls[id] |= self.borders[id];
        }
        self.clear_bit(x, y, direction);
        self.exit = Some((x, y));
        true
    }

    pub fn exit_position(&self) -> Option<(i32, i32)> {
        self.exit
    }

    pub fn is_exit_position(&self, x: i32, y: i32) -> bool {
        self.exit == Some((x, y))
    }

    /// The opened border side of the exit cell, if an exit is set
    pub fn exit_direction(&self) -> Option<CardinalDirection> {
        let (x, y) = self.exit?;
        CardinalDirection::ALL
            .into_iter()
            .find(|&cd| self.has_border(x, y, cd) && !self.has_wall(x, y, cd))
    }

    pub fn set_in_room(&mut self, x: i32, y: i32) {
        if self.is_valid_position(x, y) {
            let id = self.get_id(x, y) as usize;
            self.rooms[id] = true;
        }
    }

    pub fn is_in_room(&self, x: i32, y: i32) -> bool {
        self.is_valid_position(x, y) && self.rooms[self.get_id(x, y) as usize]
    }

    /// Number of internal walls that have been torn down
    pub fn open_internal_walls(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                // East and South only, so every shared wall is counted once
                for cd in [CardinalDirection::East, CardinalDirection::South] {
                    if !self.has_border(x, y, cd) && !self.has_wall(x, y, cd) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    fn clear_bit(&mut self, x: i32, y: i32, direction: CardinalDirection) {
        if self.is_valid_position(x, y) {
            let id = self.get_id(x, y) as usize;
            self.walls[id] &= !direction.bit();
        }
    }
}
