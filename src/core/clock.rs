use crate::core::enclosure::Partition;
use serde::{Deserialize, Serialize};

/// Start/pause gate of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Elapsed time, run gate and the one-way partition transition.
///
/// Elapsed time is derived from the tick count so it never accumulates rounding drift.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    ticks: u64,
    dt: f64,
    door_open_time: f64,
    run_state: RunState,
    partition: Partition,
}

impl SimulationClock {
    pub fn new(dt: f64, door_open_time: f64) -> Self {
        Self {
            ticks: 0,
            dt,
            door_open_time,
            run_state: RunState::Paused,
            partition: Partition::Closed,
        }
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.ticks as f64 * self.dt
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    #[inline]
    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn door_open_time(&self) -> f64 {
        self.door_open_time
    }

    /// Paused → Running. Returns `true` if the state changed.
    pub fn start(&mut self) -> bool {
        let changed = self.run_state == RunState::Paused;
        self.run_state = RunState::Running;
        changed
    }

    /// Running → Paused. Returns `true` if the state changed.
    pub fn pause(&mut self) -> bool {
        let changed = self.run_state == RunState::Running;
        self.run_state = RunState::Paused;
        changed
    }

    /// Advance by one tick if running.
    ///
    /// Returns `true` exactly on the tick that opens the partition.
    pub fn advance(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.ticks += 1;
        if self.partition == Partition::Closed && self.elapsed_time() >= self.door_open_time {
            self.partition = Partition::Open;
            return true;
        }
        false
    }
}
