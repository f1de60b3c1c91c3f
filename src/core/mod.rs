//! Core simulation types for the two-chamber diffusion engine.
//!
//! Leaf-first: particles and enclosure geometry, the fixed-step integrator,
//! occupancy statistics, and the clock/controller that ties them together.

pub mod clock;
pub mod enclosure;
pub mod integrator;
pub mod particle;
pub mod sim;
pub mod tracker;

pub use clock::{RunState, SimulationClock};
pub use enclosure::{Chamber, Enclosure, Partition};
pub use particle::{Ensemble, Particle};
pub use sim::{Simulation, Snapshot};
pub use tracker::{entropy, DistributionHistogram, HistogramBin};
