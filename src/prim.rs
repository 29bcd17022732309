use crate::builder::{random_start, MazeBuilder};
use crate::direction::CardinalDirection;
use crate::disjoint_set::DisjointSet;
use crate::grid::{Grid, Wall};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Randomized Prim: grow one region from a random cell, picking random
/// frontier walls whose far side is still outside the region.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

impl Prim {
    fn push_walls(grid: &Grid, x: i32, y: i32, frontier: &mut Vec<Wall>) {
        for cd in CardinalDirection::ALL {
            let wall = Wall::new(x, y, cd);
            if grid.can_go(&wall) {
                frontier.push(wall);
            }
        }
    }
}

impl MazeBuilder for Prim {
    fn generate_pathways(
        &self,
        grid: &mut Grid,
        sets: &mut DisjointSet,
        rng: &mut StdRng,
        progress: &mut dyn FnMut(usize, usize),
    ) {
        let total = grid.cell_count();
        let start = random_start(grid, rng);
        let (sx, sy) = grid.get_coords(start as i32);
        let mut frontier = Vec::new();
        Self::push_walls(grid, sx, sy, &mut frontier);

        let report_every = (total / 20).max(1);
        let mut joined = 1;

        while !frontier.is_empty() {
            let index = rng.gen_range(0..frontier.len());
            let wall = frontier.swap_remove(index);
            let (nx, ny) = (wall.neighbor_x(), wall.neighbor_y());
            let neighbor = grid.get_id(nx, ny) as usize;
            if sets.is_connected(start, neighbor) {
                continue;
            }

            grid.delete_wall(&wall);
            sets.union(grid.get_id(wall.x, wall.y) as usize, neighbor);
            Self::push_walls(grid, nx, ny, &mut frontier);

            joined += 1;
            if joined % report_every == 0 {
                progress(joined.min(total), total);
            }
        }
        progress(total, total);

        debug!("Prim carved {} passages", grid.open_internal_walls());
    }
}
