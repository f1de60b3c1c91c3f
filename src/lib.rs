//! Two-chamber particle diffusion with a running Shannon-entropy measure.
//!
//! N point particles bounce inside a square box split by a partition. After a
//! configured time the partition opens, particles mix, and every tick the
//! left/right occupancy is recorded in a histogram. The crate exposes plain state
//! and a [`Simulation::tick`] call; drawing is left to the caller.
//!
//! ```
//! use entropysim::{Simulation, SimulationConfig};
//!
//! let cfg = SimulationConfig::new(10, 10.0, 5.0, 1.0, 30.0).with_seed(42);
//! let mut sim = Simulation::new(cfg)?;
//! sim.start();
//! let snap = sim.run_ticks(120);
//! assert_eq!(snap.partition, entropysim::Partition::Open);
//! assert!(snap.histogram.total() > 0 && snap.histogram.total() < snap.tick);
//! # Ok::<(), entropysim::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::SimulationConfig;
pub use crate::core::{entropy, DistributionHistogram, Partition, RunState, Simulation, Snapshot};
pub use crate::error::{Error, Result};
