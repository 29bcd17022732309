use crate::dfs::Dfs;
use crate::direction::CardinalDirection;
use crate::disjoint_set::DisjointSet;
use crate::grid::{Grid, Wall};
use crate::kruskal::Kruskal;
use crate::maze::MazeConfiguration;
use crate::prim::Prim;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maze width per skill level
pub const SKILL_X: [i32; 16] = [4, 12, 15, 20, 25, 25, 35, 35, 40, 60, 70, 80, 90, 110, 150, 300];
/// Maze height per skill level
pub const SKILL_Y: [i32; 16] = [4, 12, 15, 15, 20, 25, 25, 35, 40, 60, 70, 75, 85, 105, 130, 250];
/// Upper bound on rooms per skill level (imperfect mazes only)
pub const SKILL_ROOMS: [usize; 16] = [0, 2, 2, 3, 4, 5, 10, 10, 20, 25, 30, 35, 40, 45, 50, 50];

pub const MAX_SKILL_LEVEL: u8 = 15;

const MIN_ROOM_SIDE: i32 = 3;
const MAX_ROOM_SIDE: i32 = 5;

/// A strategy that carves passages into a walled grid.
///
/// `sets` arrives with one set per cell, except that cells of a room are
/// already merged. On return every cell must be in a single set and each
/// accepted merge must correspond to exactly one deleted wall.
/// `progress` is called with (steps done, steps total).
pub trait MazeBuilder {
    fn generate_pathways(
        &self,
        grid: &mut Grid,
        sets: &mut DisjointSet,
        rng: &mut StdRng,
        progress: &mut dyn FnMut(usize, usize),
    );
}

/// Generation strategy selectable in an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Builder {
    #[default]
    Dfs,
    Prim,
    Kruskal,
}

impl Builder {
    /// Parse a builder name, case-insensitive. Unknown names fall back to DFS.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dfs" => Builder::Dfs,
            "prim" => Builder::Prim,
            "kruskal" => Builder::Kruskal,
            other => {
                warn!("Unknown builder '{}', falling back to DFS", other);
                Builder::Dfs
            }
        }
    }

    pub fn create(self) -> Box<dyn MazeBuilder + Send> {
        match self {
            Builder::Dfs => Box::new(Dfs),
            Builder::Prim => Box::new(Prim),
            Builder::Kruskal => Box::new(Kruskal),
        }
    }
}

/// Grid dimensions (width, height) for a skill level; levels above 15 clamp
pub fn dimensions_for(skill_level: u8) -> (i32, i32) {
    let level = skill_level.min(MAX_SKILL_LEVEL) as usize;
    (SKILL_X[level], SKILL_Y[level])
}

/// Run a full construction: rooms (imperfect only), pathways, loops
/// (imperfect only), exit and entrance.
///
/// `progress` receives percentages in 0..=90, never decreasing.
pub fn construct(
    builder: Builder,
    skill_level: u8,
    perfect: bool,
    rng: &mut StdRng,
    progress: &mut dyn FnMut(u8),
) -> MazeConfiguration {
    let (width, height) = dimensions_for(skill_level);
    construct_with_size(builder, width, height, skill_level, perfect, rng, progress)
}

/// Same as `construct` with explicit dimensions
pub fn construct_with_size(
    builder: Builder,
    width: i32,
    height: i32,
    skill_level: u8,
    perfect: bool,
    rng: &mut StdRng,
    progress: &mut dyn FnMut(u8),
) -> MazeConfiguration {
    let mut grid = Grid::new(width, height);
    let mut sets = DisjointSet::new(grid.cell_count());
    progress(0);

    let mut rooms = 0;
    if !perfect {
        let wanted = SKILL_ROOMS[skill_level.min(MAX_SKILL_LEVEL) as usize];
        rooms = place_rooms(&mut grid, &mut sets, wanted, rng);
    }
    progress(10);

    let strategy = builder.create();
    strategy.generate_pathways(&mut grid, &mut sets, rng, &mut |done, total| {
        let pct = if total == 0 { 80 } else { done * 80 / total };
        progress(10 + pct.min(80) as u8);
    });
    progress(90);

    if !perfect {
        add_loops(&mut grid, rooms.max(1), rng);
    }

    let exit = place_exit(&mut grid, rng);
    let entrance = place_entrance(&grid);
    debug!(
        "Constructed {}x{} maze with {:?}: {} passages, {} rooms, entrance {:?}, exit {:?}",
        width,
        height,
        builder,
        grid.open_internal_walls(),
        rooms,
        entrance,
        exit
    );

    MazeConfiguration::new(grid, entrance, exit, perfect, builder, skill_level)
}

/// Place up to `wanted` non-overlapping rectangular rooms. Room cells are
/// flagged, their internal walls removed and their sets merged.
/// Returns the number of rooms actually placed.
pub fn place_rooms(grid: &mut Grid, sets: &mut DisjointSet, wanted: usize, rng: &mut StdRng) -> usize {
    let mut placed = 0;
    let mut attempts = wanted * 10;

    while placed < wanted && attempts > 0 {
        attempts -= 1;
        let room_w = rng.gen_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE);
        let room_h = rng.gen_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE);
        // One free cell between the room and the border on every side
        if grid.width < room_w + 2 || grid.height < room_h + 2 {
            continue;
        }
        let x0 = rng.gen_range(1..=grid.width - room_w - 1);
        let y0 = rng.gen_range(1..=grid.height - room_h - 1);

        let touches_room = (y0 - 1..=y0 + room_h)
            .any(|y| (x0 - 1..=x0 + room_w).any(|x| grid.is_in_room(x, y)));
        if touches_room {
            continue;
        }

        for y in y0..y0 + room_h {
            for x in x0..x0 + room_w {
                grid.set_in_room(x, y);
                let id = grid.get_id(x, y) as usize;
                if x + 1 < x0 + room_w {
                    grid.delete_wall(&Wall::new(x, y, CardinalDirection::East));
                    sets.union(id, grid.get_id(x + 1, y) as usize);
                }
                if y + 1 < y0 + room_h {
                    grid.delete_wall(&Wall::new(x, y, CardinalDirection::South));
                    sets.union(id, grid.get_id(x, y + 1) as usize);
                }
            }
        }
        debug!("Placed {}x{} room at ({}, {})", room_w, room_h, x0, y0);
        placed += 1;
    }

    placed
}

/// Random start cell for region-growing builders, never inside a room.
/// Rooms keep off the border, so a candidate always exists.
pub(crate) fn random_start(grid: &Grid, rng: &mut StdRng) -> usize {
    loop {
        let id = rng.gen_range(0..grid.cell_count());
        let (x, y) = grid.get_coords(id as i32);
        if !grid.is_in_room(x, y) {
            return id;
        }
    }
}

/// Knock down up to `count` extra internal walls to introduce cycles
pub fn add_loops(grid: &mut Grid, count: usize, rng: &mut StdRng) -> usize {
    let mut removed = 0;
    let mut attempts = count * 20;

    while removed < count && attempts > 0 {
        attempts -= 1;
        let x = rng.gen_range(0..grid.width);
        let y = rng.gen_range(0..grid.height);
        let cd = CardinalDirection::ALL[rng.gen_range(0..4)];
        let wall = Wall::new(x, y, cd);
        if grid.can_go(&wall) {
            grid.delete_wall(&wall);
            removed += 1;
        }
    }
    removed
}

/// Pick a random border cell and open one of its border sides
pub fn place_exit(grid: &mut Grid, rng: &mut StdRng) -> (i32, i32) {
    let mut border_cells = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if CardinalDirection::ALL.iter().any(|&cd| grid.has_border(x, y, cd)) {
                border_cells.push((x, y));
            }
        }
    }

    let (x, y) = border_cells[rng.gen_range(0..border_cells.len())];
    let sides: Vec<CardinalDirection> = CardinalDirection::ALL
        .into_iter()
        .filter(|&cd| grid.has_border(x, y, cd))
        .collect();
    let side = sides[rng.gen_range(0..sides.len())];
    grid.set_exit_position(x, y, side);
    (x, y)
}

/// The cell farthest from the exit through open passages.
/// Ties go to the lowest cell ID.
pub fn place_entrance(grid: &Grid) -> (i32, i32) {
    let Some((ex, ey)) = grid.exit_position() else {
        return (0, 0);
    };

    let mut distance: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    distance[grid.get_id(ex, ey) as usize] = Some(0);
    queue.push_back((ex, ey));

    while let Some((x, y)) = queue.pop_front() {
        let d = distance[grid.get_id(x, y) as usize].unwrap_or(0);
        for cd in CardinalDirection::ALL {
            if grid.has_wall(x, y, cd) {
                continue;
            }
            let (dx, dy) = cd.delta();
            let (nx, ny) = (x + dx, y + dy);
            if !grid.is_valid_position(nx, ny) {
                continue;
            }
            let nid = grid.get_id(nx, ny) as usize;
            if distance[nid].is_none() {
                distance[nid] = Some(d + 1);
                queue.push_back((nx, ny));
            }
        }
    }

    let mut best = (ex, ey);
    let mut best_distance = 0;
    for (id, d) in distance.iter().enumerate() {
        if let Some(d) = *d {
            if d > best_distance {
                best_distance = d;
                best = grid.get_coords(id as i32);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_from_name_falls_back_to_dfs() {
        assert_eq!(Builder::from_name("Kruskal"), Builder::Kruskal);
        assert_eq!(Builder::from_name(" prim "), Builder::Prim);
        assert_eq!(Builder::from_name("dfs"), Builder::Dfs);
        assert_eq!(Builder::from_name("eller"), Builder::Dfs);
        assert_eq!(Builder::from_name(""), Builder::Dfs);
    }

    #[test]
    fn test_dimensions_clamp() {
        assert_eq!(dimensions_for(0), (4, 4));
        assert_eq!(dimensions_for(15), (300, 250));
        assert_eq!(dimensions_for(200), (300, 250));
    }

    #[test]
    fn test_rooms_are_merged_and_separated() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(30, 30);
        let mut sets = DisjointSet::new(grid.cell_count());
        let placed = place_rooms(&mut grid, &mut sets, 5, &mut rng);
        assert!(placed > 0);

        for y in 0..grid.height {
            for x in 0..grid.width {
                if !grid.is_in_room(x, y) {
                    continue;
                }
                // Never on the border
                assert!(x > 0 && y > 0 && x < grid.width - 1 && y < grid.height - 1);
                if grid.is_in_room(x + 1, y) {
                    assert!(!grid.has_wall(x, y, CardinalDirection::East));
                    let a = grid.get_id(x, y) as usize;
                    let b = grid.get_id(x + 1, y) as usize;
                    assert!(sets.is_connected(a, b));
                }
            }
        }
    }

    #[test]
    fn test_rooms_skip_tiny_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(4, 4);
        let mut sets = DisjointSet::new(grid.cell_count());
        assert_eq!(place_rooms(&mut grid, &mut sets, 3, &mut rng), 0);
    }

    #[test]
    fn test_entrance_is_far_end_of_corridor() {
        let mut grid = Grid::new(5, 1);
        for x in 0..4 {
            grid.delete_wall(&Wall::new(x, 0, CardinalDirection::East));
        }
        grid.set_exit_position(4, 0, CardinalDirection::East);
        assert_eq!(place_entrance(&grid), (0, 0));
    }

    #[test]
    fn test_exit_sits_on_border() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut grid = Grid::new(6, 4);
            let (x, y) = place_exit(&mut grid, &mut rng);
            let dir = grid.exit_direction().unwrap();
            assert!(grid.has_border(x, y, dir));
            assert!(!grid.has_wall(x, y, dir));
        }
    }
}
