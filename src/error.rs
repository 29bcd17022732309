use crate::direction::Direction;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RobotError {
    #[error("no distance sensor facing {0:?}")]
    MissingSensor(Direction),

    #[error("no room sensor")]
    NoRoomSensor,

    #[error("battery depleted: {required} needed, {available} left")]
    InsufficientEnergy { required: f32, available: f32 },

    #[error("position ({x}, {y}) is outside the maze")]
    OutOfBounds { x: i32, y: i32 },

    #[error("driver has no robot to work with")]
    NoRobot,
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("failed to start maze worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("maze worker stopped before delivering")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, RobotError>;
