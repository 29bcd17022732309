use amaze::config::Config;
use amaze::{MazeFactory, MazeWalker, Robot, WallFollower};
use log::{error, info};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

fn main() -> ExitCode {
    // Read before the logger exists; config's own log lines are dropped
    let config = Config::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    let order = config.maze.to_order();
    let mut factory = MazeFactory::new();
    let mut handle = match factory.order(order) {
        Ok(handle) => handle,
        Err(e) => {
            error!("Could not start maze production: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut last_progress = 0;
    while handle.try_delivery().is_none() {
        let progress = handle.progress();
        if progress != last_progress {
            info!("Generating maze: {}%", progress);
            last_progress = progress;
        }
        thread::sleep(Duration::from_millis(20));
    }

    let maze = match handle.wait_till_delivered() {
        Ok(maze) => maze,
        Err(e) => {
            error!("Maze production failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Maze {}x{} ({:?}, skill {}, {}), entrance {:?}, exit {:?}",
        maze.width(),
        maze.height(),
        maze.builder(),
        maze.skill_level(),
        if maze.is_perfect() { "perfect" } else { "with rooms" },
        maze.entrance(),
        maze.exit()
    );

    let mut robot = Robot::with_sensors(MazeWalker::new(maze), config.robot.sensors())
        .with_room_sensor(config.robot.room_sensor);
    if let Some(energy) = config.robot.initial_energy {
        robot = robot.with_initial_energy(energy);
    }
    if config.logging.journey_log {
        robot = robot.with_journey_log();
    }

    let mut driver = WallFollower::with_robot(robot);
    let escaped = match driver.drive_to_exit() {
        Ok(escaped) => escaped,
        Err(e) => {
            error!("Wall follower could not run: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\n=== Wall Follower ===");
    println!("Result: {}", if escaped { "escaped" } else { "stopped before the exit" });
    println!("Path length: {} cells", driver.path_length());
    println!("Energy consumed: {:.1}", driver.energy_consumption());
    if let Some(journey) = driver.robot().and_then(|r| r.journey()) {
        println!("{}", journey.summary());
    }

    if escaped {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
