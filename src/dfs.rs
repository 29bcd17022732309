use crate::builder::{random_start, MazeBuilder};
use crate::direction::CardinalDirection;
use crate::disjoint_set::DisjointSet;
use crate::grid::{Grid, Wall};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Depth-first backtracker with an explicit stack.
///
/// A cell counts as visited once it shares a set with the start cell, so
/// entering any cell of a room visits the whole room.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl MazeBuilder for Dfs {
    fn generate_pathways(
        &self,
        grid: &mut Grid,
        sets: &mut DisjointSet,
        rng: &mut StdRng,
        progress: &mut dyn FnMut(usize, usize),
    ) {
        let total = grid.cell_count();
        let start = random_start(grid, rng);
        let mut stack = vec![grid.get_coords(start as i32)];
        let mut visited = 1;
        let report_every = (total / 20).max(1);

        while let Some(&(x, y)) = stack.last() {
            let open: Vec<Wall> = CardinalDirection::ALL
                .into_iter()
                .map(|cd| Wall::new(x, y, cd))
                .filter(|wall| {
                    grid.can_go(wall)
                        && !sets.is_connected(
                            start,
                            grid.get_id(wall.neighbor_x(), wall.neighbor_y()) as usize,
                        )
                })
                .collect();

            if open.is_empty() {
                stack.pop();
                continue;
            }

            let wall = open[rng.gen_range(0..open.len())];
            grid.delete_wall(&wall);
            sets.union(
                grid.get_id(x, y) as usize,
                grid.get_id(wall.neighbor_x(), wall.neighbor_y()) as usize,
            );
            stack.push((wall.neighbor_x(), wall.neighbor_y()));

            visited += 1;
            if visited % report_every == 0 {
                progress(visited.min(total), total);
            }
        }
        progress(total, total);

        debug!("DFS carved {} passages", grid.open_internal_walls());
    }
}
