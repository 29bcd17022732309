use crate::controller::MazeController;
use crate::direction::{CardinalDirection, Direction, Turn};
use crate::error::{Result, RobotError};
use crate::journey_log::{JourneyLog, Operation};
use log::{info, trace, warn};

/// Battery charge of a fresh robot
pub const INIT_ENERGY: f32 = 2500.0;
pub const ENERGY_TO_SENSE_DISTANCE: f32 = 1.0;
pub const ENERGY_TO_ROTATE_90: f32 = 3.0;
pub const ENERGY_TO_ROTATE_180: f32 = 6.0;
pub const ENERGY_FOR_FULL_ROTATION: f32 = 12.0;
pub const ENERGY_TO_STEP_FORWARD: f32 = 5.0;

/// Distance reported when the line of sight leaves the maze through the exit
pub const DISTANCE_UNBOUNDED: u32 = u32::MAX;

/// Set of relative directions the robot has a distance sensor for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSet(u8);

impl SensorSet {
    pub const NONE: SensorSet = SensorSet(0);
    pub const ALL: SensorSet = SensorSet(0b1111);

    pub fn of(directions: &[Direction]) -> Self {
        directions.iter().fold(Self::NONE, |set, &d| set.with(d))
    }

    pub fn with(self, direction: Direction) -> Self {
        SensorSet(self.0 | Self::bit(direction))
    }

    pub fn without(self, direction: Direction) -> Self {
        SensorSet(self.0 & !Self::bit(direction))
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Forward => 1,
            Direction::Backward => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }
}

impl Default for SensorSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Simulated robot with a battery, an odometer and distance sensors.
///
/// Every costed operation is charged up front and executes only if the
/// battery stays at or above zero afterwards. Otherwise nothing is charged,
/// the operation is suppressed and the robot is stopped for good.
pub struct Robot<C: MazeController> {
    controller: C,
    initial_energy: f32,
    battery: f32,
    odometer: u32,
    stopped: bool,
    sensors: SensorSet,
    room_sensor: bool,
    journey: Option<JourneyLog>,
}

impl<C: MazeController> Robot<C> {
    /// Robot with every sensor on
    pub fn new(controller: C) -> Self {
        Self::with_sensors(controller, SensorSet::ALL)
    }

    pub fn with_sensors(controller: C, sensors: SensorSet) -> Self {
        Robot {
            controller,
            initial_energy: INIT_ENERGY,
            battery: INIT_ENERGY,
            odometer: 0,
            stopped: false,
            sensors,
            room_sensor: true,
            journey: None,
        }
    }

    /// Start with a different charge; also becomes the reference for `energy_consumed`
    pub fn with_initial_energy(mut self, energy: f32) -> Self {
        self.initial_energy = energy;
        self.battery = energy;
        self
    }

    pub fn with_room_sensor(mut self, enabled: bool) -> Self {
        self.room_sensor = enabled;
        self
    }

    /// Record every executed operation in a journey log
    pub fn with_journey_log(mut self) -> Self {
        self.journey = Some(JourneyLog::new());
        self
    }

    /// Turn on the spot. Suppressed if stopped or the battery cannot cover it.
    pub fn rotate(&mut self, turn: Turn) {
        let cost = match turn {
            Turn::Left | Turn::Right => ENERGY_TO_ROTATE_90,
            Turn::Around => ENERGY_TO_ROTATE_180,
        };
        if !self.charge(cost) {
            return;
        }

        match turn {
            Turn::Left => self.controller.turn_left(),
            Turn::Right => self.controller.turn_right(),
            Turn::Around => {
                self.controller.turn_left();
                self.controller.turn_left();
            }
        }
        let heading = self.controller.current_direction();
        trace!("Rotated {:?}, now facing {:?}", turn, heading);
        self.record(Operation::Rotate { turn, heading });
    }

    /// Move forward up to `distance` cells, one at a time.
    ///
    /// Stops early when the battery cannot pay for the next step or a wall
    /// is in the way; only completed steps reach the odometer.
    pub fn move_forward(&mut self, distance: u32) {
        let mut remaining = distance;
        while remaining > 0 && !self.stopped {
            let (x, y) = self.controller.current_position();
            let heading = self.controller.current_direction();
            if self.controller.maze().has_wall(x, y, heading) {
                warn!("Robot ran into a wall at ({}, {}) facing {:?}", x, y, heading);
                self.stop();
                break;
            }
            if !self.charge(ENERGY_TO_STEP_FORWARD) {
                break;
            }

            self.controller.step_forward();
            self.odometer += 1;
            remaining -= 1;

            let (nx, ny) = self.controller.current_position();
            trace!("Stepped to ({}, {}), battery {:.1}", nx, ny, self.battery);
            self.record(Operation::Step { x: nx, y: ny });
        }
    }

    /// Number of open cells between the robot and the next wall in `direction`.
    /// `DISTANCE_UNBOUNDED` if the line of sight leaves the maze through the exit.
    pub fn distance_to_obstacle(&mut self, direction: Direction) -> Result<u32> {
        if !self.sensors.contains(direction) {
            return Err(RobotError::MissingSensor(direction));
        }
        if !self.charge(ENERGY_TO_SENSE_DISTANCE) {
            return Err(RobotError::InsufficientEnergy {
                required: ENERGY_TO_SENSE_DISTANCE,
                available: self.battery,
            });
        }

        let heading = self.controller.current_direction().resolve(direction);
        let (dx, dy) = heading.delta();
        let (mut x, mut y) = self.controller.current_position();
        let maze = self.controller.maze();
        let mut distance = 0;

        let result = loop {
            if maze.has_wall(x, y, heading) {
                break distance;
            }
            x += dx;
            y += dy;
            if !maze.is_valid_position(x, y) {
                break DISTANCE_UNBOUNDED;
            }
            distance += 1;
        };

        let sensed = if result == DISTANCE_UNBOUNDED { None } else { Some(result) };
        self.record(Operation::Sense { direction, distance: sensed });
        Ok(result)
    }

    /// True iff the exit is in a straight line of sight in `direction`
    pub fn can_see_exit(&mut self, direction: Direction) -> Result<bool> {
        Ok(self.distance_to_obstacle(direction)? == DISTANCE_UNBOUNDED)
    }

    pub fn is_at_exit(&self) -> bool {
        let (x, y) = self.controller.current_position();
        self.controller.maze().is_exit_position(x, y)
    }

    pub fn is_inside_room(&self) -> Result<bool> {
        if !self.room_sensor {
            return Err(RobotError::NoRoomSensor);
        }
        let (x, y) = self.controller.current_position();
        Ok(self.controller.maze().is_in_room(x, y))
    }

    /// Current cell; fails once the robot has left the grid
    pub fn current_position(&self) -> Result<(i32, i32)> {
        let (x, y) = self.controller.current_position();
        if !self.controller.maze().is_valid_position(x, y) {
            return Err(RobotError::OutOfBounds { x, y });
        }
        Ok((x, y))
    }

    pub fn current_direction(&self) -> CardinalDirection {
        self.controller.current_direction()
    }

    pub fn has_distance_sensor(&self, direction: Direction) -> bool {
        self.sensors.contains(direction)
    }

    pub fn has_room_sensor(&self) -> bool {
        self.room_sensor
    }

    pub fn battery_level(&self) -> f32 {
        self.battery
    }

    /// Overwrite the battery charge. Does not revive a stopped robot.
    pub fn set_battery_level(&mut self, level: f32) {
        self.battery = level;
    }

    pub fn initial_energy(&self) -> f32 {
        self.initial_energy
    }

    /// Initial charge minus current charge
    pub fn energy_consumed(&self) -> f32 {
        self.initial_energy - self.battery
    }

    pub fn odometer_reading(&self) -> u32 {
        self.odometer
    }

    pub fn reset_odometer(&mut self) {
        self.odometer = 0;
    }

    pub fn energy_for_full_rotation(&self) -> f32 {
        ENERGY_FOR_FULL_ROTATION
    }

    pub fn energy_for_step_forward(&self) -> f32 {
        ENERGY_TO_STEP_FORWARD
    }

    pub fn has_stopped(&self) -> bool {
        self.stopped
    }

    pub fn journey(&self) -> Option<&JourneyLog> {
        self.journey.as_ref()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Deduct `cost` if the robot is running and can afford it
    fn charge(&mut self, cost: f32) -> bool {
        if self.stopped {
            return false;
        }
        let remaining = self.battery - cost;
        if remaining < 0.0 {
            info!(
                "Battery exhausted: {:.1} left, {:.1} needed; robot stops",
                self.battery, cost
            );
            self.stop();
            return false;
        }
        self.battery = remaining;
        true
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.record(Operation::Stopped);
    }

    fn record(&mut self, operation: Operation) {
        let battery = self.battery;
        if let Some(journey) = self.journey.as_mut() {
            journey.record(operation, battery);
        }
    }
}
