#![allow(dead_code)]

use amaze::builder::construct_with_size;
use amaze::{Builder, CardinalDirection, Grid, MazeConfiguration, MazeWalker, Wall};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;

/// Build a maze of explicit size synchronously, discarding progress
pub fn build_maze(builder: Builder, width: i32, height: i32, perfect: bool, seed: u64) -> MazeConfiguration {
    let mut rng = StdRng::seed_from_u64(seed);
    construct_with_size(builder, width, height, 0, perfect, &mut rng, &mut |_| {})
}

/// Number of cells reachable from (x, y) through open internal walls
pub fn reachable_cells(grid: &Grid, x: i32, y: i32) -> usize {
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    seen[grid.get_id(x, y) as usize] = true;
    queue.push_back((x, y));
    let mut count = 0;

    while let Some((cx, cy)) = queue.pop_front() {
        count += 1;
        for cd in CardinalDirection::ALL {
            if grid.has_wall(cx, cy, cd) {
                continue;
            }
            let (dx, dy) = cd.delta();
            let (nx, ny) = (cx + dx, cy + dy);
            if !grid.is_valid_position(nx, ny) {
                continue;
            }
            let id = grid.get_id(nx, ny) as usize;
            if !seen[id] {
                seen[id] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    count
}

/// Every open side that leads off the grid, as (x, y, direction)
pub fn border_openings(grid: &Grid) -> Vec<(i32, i32, CardinalDirection)> {
    let mut openings = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            for cd in CardinalDirection::ALL {
                let (dx, dy) = cd.delta();
                if !grid.is_valid_position(x + dx, y + dy) && !grid.has_wall(x, y, cd) {
                    openings.push((x, y, cd));
                }
            }
        }
    }
    openings
}

/// Straight West-to-East corridor of `length` cells with the exit at the East end
pub fn corridor(length: i32) -> Arc<MazeConfiguration> {
    let mut grid = Grid::new(length, 1);
    for x in 0..length - 1 {
        grid.delete_wall(&Wall::new(x, 0, CardinalDirection::East));
    }
    grid.set_exit_position(length - 1, 0, CardinalDirection::East);
    Arc::new(MazeConfiguration::from_grid(grid))
}

pub fn walker_at(maze: &Arc<MazeConfiguration>, x: i32, y: i32, heading: CardinalDirection) -> MazeWalker {
    MazeWalker::at(Arc::clone(maze), x, y, heading)
}
