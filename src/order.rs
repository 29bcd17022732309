use crate::builder::{self, Builder, MAX_SKILL_LEVEL};
use crate::error::OrderError;
use crate::maze::MazeConfiguration;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What a consumer asks the factory for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub builder: Builder,
    /// 0..=15, larger means a bigger grid
    pub skill_level: u8,
    /// No cycles, no rooms
    pub perfect: bool,
    /// Fixed seed for reproducible mazes; None draws from entropy
    pub seed: Option<u64>,
}

impl Order {
    pub fn new(builder: Builder, skill_level: u8, perfect: bool) -> Self {
        Order {
            builder,
            skill_level: skill_level.min(MAX_SKILL_LEVEL),
            perfect,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Runs maze construction on worker threads
#[derive(Debug, Default)]
pub struct MazeFactory {
    submitted: usize,
}

impl MazeFactory {
    pub fn new() -> Self {
        MazeFactory { submitted: 0 }
    }

    /// Start building `order` on a fresh worker thread.
    ///
    /// Progress climbs monotonically while the worker runs. The worker
    /// delivers the maze exactly once and only then publishes 100.
    pub fn order(&mut self, order: Order) -> Result<OrderHandle, OrderError> {
        self.submitted += 1;
        let progress = Arc::new(AtomicU8::new(0));
        let (sender, receiver) = mpsc::sync_channel(1);

        info!(
            "Order #{} submitted: {:?}, skill {}, perfect {}",
            self.submitted, order.builder, order.skill_level, order.perfect
        );

        let worker_progress = Arc::clone(&progress);
        let worker = thread::Builder::new()
            .name(format!("maze-builder-{}", self.submitted))
            .spawn(move || {
                let mut rng = match order.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let maze = builder::construct(
                    order.builder,
                    order.skill_level,
                    order.perfect,
                    &mut rng,
                    &mut |pct| {
                        // Never publish 100 before delivery
                        worker_progress.fetch_max(pct.min(99), Ordering::AcqRel);
                    },
                );
                debug!("Delivering {}x{} maze", maze.width(), maze.height());

                deliver(&sender, maze);
                worker_progress.store(100, Ordering::Release);
            })?;

        Ok(OrderHandle {
            order,
            progress,
            receiver,
            delivered: None,
            worker: Some(worker),
        })
    }
}

/// Hand the finished maze to the consumer. False if its handle is gone.
fn deliver(sender: &SyncSender<Arc<MazeConfiguration>>, maze: MazeConfiguration) -> bool {
    if sender.send(Arc::new(maze)).is_err() {
        debug!("Order handle was dropped before delivery; discarding maze");
        return false;
    }
    true
}

/// Consumer side of a submitted order
#[derive(Debug)]
pub struct OrderHandle {
    order: Order,
    progress: Arc<AtomicU8>,
    receiver: Receiver<Arc<MazeConfiguration>>,
    delivered: Option<Arc<MazeConfiguration>>,
    worker: Option<JoinHandle<()>>,
}

impl OrderHandle {
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Latest published percentage (0..=100). No guarantee on update
    /// frequency, only that it never decreases.
    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::Acquire)
    }

    /// Non-blocking check for the delivered maze
    pub fn try_delivery(&mut self) -> Option<Arc<MazeConfiguration>> {
        if self.delivered.is_none() {
            if let Ok(maze) = self.receiver.try_recv() {
                self.delivered = Some(maze);
            }
        }
        self.delivered.clone()
    }

    /// Block until the maze is delivered and the worker has published 100
    pub fn wait_till_delivered(&mut self) -> Result<Arc<MazeConfiguration>, OrderError> {
        if self.delivered.is_none() {
            let maze = self.receiver.recv().map_err(|_| OrderError::WorkerLost)?;
            self.delivered = Some(maze);
        }

        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| OrderError::WorkerLost)?;
        }

        let maze = self.delivered.clone().ok_or(OrderError::WorkerLost)?;
        info!(
            "Order delivered: {}x{} maze, progress {}",
            maze.width(),
            maze.height(),
            self.progress()
        );
        Ok(maze)
    }

    /// The delivered maze, if `try_delivery` or `wait_till_delivered` has seen it
    pub fn maze_configuration(&self) -> Option<&Arc<MazeConfiguration>> {
        self.delivered.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clamps_skill() {
        let order = Order::new(Builder::Kruskal, 40, true);
        assert_eq!(order.skill_level, 15);
        assert_eq!(order.seed, None);
        assert_eq!(order.with_seed(5).seed, Some(5));
    }

    #[test]
    fn test_wait_ends_at_100() {
        let mut factory = MazeFactory::new();
        let mut handle = factory
            .order(Order::new(Builder::Kruskal, 0, true).with_seed(1))
            .unwrap();
        let maze = handle.wait_till_delivered().unwrap();
        assert_eq!(handle.progress(), 100);
        assert_eq!((maze.width(), maze.height()), (4, 4));
        assert!(handle.maze_configuration().is_some());
        assert!(handle.try_delivery().is_some());
    }

    #[test]
    fn test_delivery_to_dropped_handle_is_discarded() {
        let single = || MazeConfiguration::from_grid(crate::grid::Grid::new(1, 1));

        let (sender, receiver) = mpsc::sync_channel(1);
        assert!(deliver(&sender, single()));
        assert!(receiver.try_recv().is_ok());

        drop(receiver);
        assert!(!deliver(&sender, single()));
    }

    #[test]
    fn test_wait_twice_returns_same_maze() {
        let mut factory = MazeFactory::new();
        let mut handle = factory
            .order(Order::new(Builder::Prim, 1, true).with_seed(2))
            .unwrap();
        let first = handle.wait_till_delivered().unwrap();
        let second = handle.wait_till_delivered().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
