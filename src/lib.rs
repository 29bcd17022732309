pub mod builder;
pub mod config;
pub mod controller;
pub mod dfs;
pub mod direction;
pub mod disjoint_set;
pub mod error;
pub mod grid;
pub mod journey_log;
pub mod kruskal;
pub mod maze;
pub mod order;
pub mod prim;
pub mod robot;
pub mod wall_follower;

pub use builder::{Builder, MazeBuilder};
pub use controller::{MazeController, MazeWalker};
pub use direction::{CardinalDirection, Direction, Turn};
pub use disjoint_set::DisjointSet;
pub use error::{OrderError, RobotError};
pub use grid::{Grid, Wall};
pub use maze::MazeConfiguration;
pub use order::{MazeFactory, Order, OrderHandle};
pub use robot::{Robot, SensorSet};
pub use wall_follower::WallFollower;
