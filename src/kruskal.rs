use crate::builder::MazeBuilder;
use crate::direction::CardinalDirection;
use crate::disjoint_set::DisjointSet;
use crate::grid::{Grid, Wall};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Randomized Kruskal: every removable wall is a candidate; candidates are
/// drawn uniformly without replacement and a wall is torn down iff the two
/// cells it separates are in different sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kruskal;

impl Kruskal {
    /// Every wall of every cell that `can_go` currently allows removing.
    ///
    /// Each internal wall shows up twice, once from each side. The second
    /// copy is always rejected because its cells are already joined or the
    /// first copy was rejected for the same reason.
    pub fn candidates(grid: &Grid) -> Vec<Wall> {
        let mut candidates = Vec::new();
        for x in 0..grid.width {
            for y in 0..grid.height {
                for cd in CardinalDirection::ALL {
                    let wall = Wall::new(x, y, cd);
                    if grid.can_go(&wall) {
                        candidates.push(wall);
                    }
                }
            }
        }
        candidates
    }

    /// Remove and return a uniformly chosen candidate
    fn extract_randomly(candidates: &mut Vec<Wall>, rng: &mut StdRng) -> Wall {
        let index = rng.gen_range(0..candidates.len());
        candidates.swap_remove(index)
    }
}

impl MazeBuilder for Kruskal {
    fn generate_pathways(
        &self,
        grid: &mut Grid,
        sets: &mut DisjointSet,
        rng: &mut StdRng,
        progress: &mut dyn FnMut(usize, usize),
    ) {
        let mut candidates = Self::candidates(grid);
        let total = candidates.len();
        let report_every = (total / 20).max(1);
        let mut removed = 0;

        while !candidates.is_empty() {
            let wall = Self::extract_randomly(&mut candidates, rng);
            let cell = grid.get_id(wall.x, wall.y) as usize;
            let neighbor = grid.get_id(wall.neighbor_x(), wall.neighbor_y()) as usize;

            // union() refuses cells that already share a root
            if sets.union(cell, neighbor) {
                grid.delete_wall(&wall);
                removed += 1;
            }

            let done = total - candidates.len();
            if done % report_every == 0 {
                progress(done, total);
            }
        }
        progress(total, total);

        debug!(
            "Kruskal processed {} candidates, removed {} walls, {} sets left",
            total,
            removed,
            sets.set_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_candidates_on_fresh_grid() {
        // Every internal wall is listed from both sides
        let grid = Grid::new(3, 2);
        let internal = 2 * 2 + 3; // (w-1)*h + w*(h-1)
        assert_eq!(Kruskal::candidates(&grid).len(), internal * 2);
    }

    #[test]
    fn test_single_cell_has_no_candidates() {
        let grid = Grid::new(1, 1);
        assert!(Kruskal::candidates(&grid).is_empty());
    }

    #[test]
    fn test_spanning_tree_wall_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(7, 5);
        let mut sets = DisjointSet::new(grid.cell_count());
        Kruskal.generate_pathways(&mut grid, &mut sets, &mut rng, &mut |_, _| {});
        assert_eq!(grid.open_internal_walls(), 7 * 5 - 1);
        assert_eq!(sets.set_count(), 1);
    }

    #[test]
    fn test_progress_reaches_total() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(4, 4);
        let mut sets = DisjointSet::new(grid.cell_count());
        let mut reports = Vec::new();
        Kruskal.generate_pathways(&mut grid, &mut sets, &mut rng, &mut |done, total| {
            reports.push((done, total));
        });
        let (last_done, last_total) = *reports.last().unwrap();
        assert_eq!(last_done, last_total);
        assert!(reports.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
