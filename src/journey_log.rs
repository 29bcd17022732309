use crate::direction::{CardinalDirection, Direction, Turn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A costed robot operation that actually executed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Turned on the spot
    Rotate { turn: Turn, heading: CardinalDirection },
    /// Advanced one cell, now at (x, y)
    Step { x: i32, y: i32 },
    /// Distance sensed in a relative direction; None means the exit is in sight
    Sense { direction: Direction, distance: Option<u32> },
    /// Ran out of energy
    Stopped,
}

/// Logged operation with timestamp and the battery level after it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JourneyEntry {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub operation: Operation,
    pub battery: f32,
}

/// Journey telemetry for one robot run
#[derive(Debug)]
pub struct JourneyLog {
    start_time: Instant,
    entries: Vec<JourneyEntry>,
}

impl JourneyLog {
    pub fn new() -> Self {
        JourneyLog {
            start_time: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Append an operation with the current timestamp
    pub fn record(&mut self, operation: Operation, battery: f32) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.entries.push(JourneyEntry {
            timestamp_ms,
            operation,
            battery,
        });
    }

    pub fn entries(&self) -> &[JourneyEntry] {
        &self.entries
    }

    /// Serialize all entries as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut rotations = 0;
        let mut steps = 0;
        let mut senses = 0;
        let mut stopped = false;

        for entry in &self.entries {
            match entry.operation {
                Operation::Rotate { .. } => rotations += 1,
                Operation::Step { .. } => steps += 1,
                Operation::Sense { .. } => senses += 1,
                Operation::Stopped => stopped = true,
            }
        }

        let duration = self.entries.last().map(|e| e.timestamp_ms).unwrap_or(0);
        let battery = self.entries.last().map(|e| e.battery);

        format!(
            "Journey Duration: {}ms\n\
             Total Events: {}\n\
             Operations: {} steps, {} rotations, {} sensor readings\n\
             Final Battery: {}{}",
            duration,
            self.entries.len(),
            steps,
            rotations,
            senses,
            battery.map(|b| format!("{:.1}", b)).unwrap_or_else(|| "n/a".to_string()),
            if stopped { " (stopped)" } else { "" }
        )
    }
}

impl Default for JourneyLog {
    fn default() -> Self {
        Self::new()
    }
}
