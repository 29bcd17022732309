use crate::controller::MazeController;
use crate::direction::{Direction, Turn};
use crate::error::{Result, RobotError};
use crate::robot::{Robot, DISTANCE_UNBOUNDED};
use log::{debug, info};

/// Left-hand-rule driver. Needs a robot with Forward and Left distance sensors.
///
/// Only guaranteed to reach the exit when every wall is connected to the
/// outer border. Loops and rooms in imperfect mazes can leave the robot
/// circling a free-standing wall island until its battery runs out.
pub struct WallFollower<C: MazeController> {
    robot: Option<Robot<C>>,
}

impl<C: MazeController> WallFollower<C> {
    /// Driver without a robot; `drive_to_exit` fails until `set_robot` is called
    pub fn new() -> Self {
        WallFollower { robot: None }
    }

    pub fn with_robot(robot: Robot<C>) -> Self {
        WallFollower { robot: Some(robot) }
    }

    pub fn set_robot(&mut self, robot: Robot<C>) {
        self.robot = Some(robot);
    }

    pub fn robot(&self) -> Option<&Robot<C>> {
        self.robot.as_ref()
    }

    pub fn into_robot(self) -> Option<Robot<C>> {
        self.robot
    }

    /// Drive until the robot has stepped through the exit or run dry.
    ///
    /// Returns Ok(true) when the robot left the maze, Ok(false) when it
    /// stopped first. Missing robot or sensors are reported before anything moves.
    /// Lining up with the exit costs one forward sense, even when the robot already faces it.
    pub fn drive_to_exit(&mut self) -> Result<bool> {
        let robot = self.robot.as_mut().ok_or(RobotError::NoRobot)?;
        for required in [Direction::Forward, Direction::Left] {
            if !robot.has_distance_sensor(required) {
                return Err(RobotError::MissingSensor(required));
            }
        }

        let mut iterations = 0u64;
        while !robot.is_at_exit() && !robot.has_stopped() {
            iterations += 1;
            match Self::follow_wall(robot) {
                Ok(()) => {}
                Err(RobotError::InsufficientEnergy { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        debug!("Wall follower loop ended after {} iterations", iterations);

        if !robot.is_at_exit() {
            info!(
                "Robot stopped before the exit: {} steps, {:.1} energy used",
                robot.odometer_reading(),
                robot.energy_consumed()
            );
            return Ok(false);
        }

        let escaped = Self::step_through_exit(robot)?;
        info!(
            "Robot {} the exit: {} steps, {:.1} energy used",
            if escaped { "passed" } else { "stalled at" },
            robot.odometer_reading(),
            robot.energy_consumed()
        );
        Ok(escaped)
    }

    /// Total energy used so far: initial charge minus battery
    pub fn energy_consumption(&self) -> f32 {
        self.robot.as_ref().map(|r| r.energy_consumed()).unwrap_or(0.0)
    }

    /// Cells travelled, as read from the odometer
    pub fn path_length(&self) -> u32 {
        self.robot.as_ref().map(|r| r.odometer_reading()).unwrap_or(0)
    }

    /// One decision of the left-hand rule
    fn follow_wall(robot: &mut Robot<C>) -> Result<()> {
        let forward = robot.distance_to_obstacle(Direction::Forward)?;
        if forward == DISTANCE_UNBOUNDED {
            robot.move_forward(1);
            return Ok(());
        }

        let left = robot.distance_to_obstacle(Direction::Left)?;
        if left == DISTANCE_UNBOUNDED {
            robot.rotate(Turn::Left);
            robot.move_forward(1);
        } else if left == 0 && forward != 0 {
            robot.move_forward(1);
        } else if left == 0 {
            // Dead end or corner: reassess next iteration
            robot.rotate(Turn::Right);
        } else {
            robot.rotate(Turn::Left);
            robot.move_forward(1);
        }
        Ok(())
    }

    /// Turn left until the exit is straight ahead, then walk out
    fn step_through_exit(robot: &mut Robot<C>) -> Result<bool> {
        for _ in 0..4 {
            match robot.can_see_exit(Direction::Forward) {
                Ok(true) => {
                    robot.move_forward(1);
                    return Ok(!robot.has_stopped());
                }
                Ok(false) => robot.rotate(Turn::Left),
                Err(RobotError::InsufficientEnergy { .. }) => return Ok(false),
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }
}

impl<C: MazeController> Default for WallFollower<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MazeWalker;
    use crate::direction::CardinalDirection;
    use crate::grid::{Grid, Wall};
    use crate::journey_log::Operation;
    use crate::maze::MazeConfiguration;
    use crate::robot::{SensorSet, ENERGY_TO_SENSE_DISTANCE, ENERGY_TO_STEP_FORWARD};
    use std::sync::Arc;

    fn single_cell(heading: CardinalDirection) -> MazeWalker {
        let mut grid = Grid::new(1, 1);
        grid.set_exit_position(0, 0, CardinalDirection::South);
        MazeWalker::at(Arc::new(MazeConfiguration::from_grid(grid)), 0, 0, heading)
    }

    #[test]
    fn test_no_robot() {
        let mut driver: WallFollower<MazeWalker> = WallFollower::new();
        assert_eq!(driver.drive_to_exit(), Err(RobotError::NoRobot));
        assert_eq!(driver.path_length(), 0);
    }

    #[test]
    fn test_missing_left_sensor_fails_before_moving() {
        let sensors = SensorSet::ALL.without(Direction::Left);
        let robot = Robot::with_sensors(single_cell(CardinalDirection::South), sensors);
        let mut driver = WallFollower::with_robot(robot);
        assert_eq!(driver.drive_to_exit(), Err(RobotError::MissingSensor(Direction::Left)));
        assert_eq!(driver.energy_consumption(), 0.0);
    }

    #[test]
    fn test_single_cell_facing_exit() {
        let mut driver = WallFollower::with_robot(Robot::new(single_cell(CardinalDirection::South)));
        assert_eq!(driver.drive_to_exit(), Ok(true));
        assert_eq!(driver.path_length(), 1);
        // One step plus the sense that confirmed the exit ahead
        assert_eq!(
            driver.energy_consumption(),
            ENERGY_TO_STEP_FORWARD + ENERGY_TO_SENSE_DISTANCE
        );
    }

    #[test]
    fn test_alignment_sense_is_charged() {
        let robot = Robot::new(single_cell(CardinalDirection::South)).with_journey_log();
        let mut driver = WallFollower::with_robot(robot);
        assert_eq!(driver.drive_to_exit(), Ok(true));

        let entries = driver.robot().unwrap().journey().unwrap().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].operation,
            Operation::Sense { direction: Direction::Forward, distance: None }
        );
        assert_eq!(entries[1].operation, Operation::Step { x: 0, y: 1 });
    }

    #[test]
    fn test_circles_free_standing_island() {
        // Open 3x3 room: from the centre the left-hand rule loops around
        // (1,1) -> (0,1) -> (0,2) -> (1,2) and never reaches row 0
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.delete_wall(&Wall::new(x, y, CardinalDirection::East));
                grid.delete_wall(&Wall::new(x, y, CardinalDirection::South));
            }
        }
        grid.set_exit_position(2, 0, CardinalDirection::East);
        let walker = MazeWalker::at(Arc::new(MazeConfiguration::from_grid(grid)), 1, 1, CardinalDirection::North);
        let mut driver = WallFollower::with_robot(Robot::new(walker).with_initial_energy(500.0));

        assert_eq!(driver.drive_to_exit(), Ok(false));
        let robot = driver.robot().unwrap();
        assert!(robot.has_stopped());
        let (x, y) = robot.current_position().unwrap();
        assert!(y > 0 && x < 2);
    }

    #[test]
    fn test_single_cell_turns_to_exit() {
        let mut driver = WallFollower::with_robot(Robot::new(single_cell(CardinalDirection::North)));
        assert_eq!(driver.drive_to_exit(), Ok(true));
        let robot = driver.robot().unwrap();
        assert_eq!(robot.current_direction(), CardinalDirection::South);
        assert!(robot.controller().is_finished());
    }

    #[test]
    fn test_runs_dry_in_corridor() {
        let mut grid = Grid::new(6, 1);
        for x in 0..5 {
            grid.delete_wall(&Wall::new(x, 0, CardinalDirection::East));
        }
        grid.set_exit_position(5, 0, CardinalDirection::East);
        let walker = MazeWalker::at(Arc::new(MazeConfiguration::from_grid(grid)), 0, 0, CardinalDirection::East);
        let robot = Robot::new(walker).with_initial_energy(12.0);
        let mut driver = WallFollower::with_robot(robot);

        // sense 1 + step 5, twice, leaves nothing for the third step
        assert_eq!(driver.drive_to_exit(), Ok(false));
        assert_eq!(driver.path_length(), 2);
        assert_eq!(driver.energy_consumption(), 12.0);
    }
}
