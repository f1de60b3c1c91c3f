use crate::config::SimulationConfig;
use crate::core::clock::{RunState, SimulationClock};
use crate::core::enclosure::{Chamber, Enclosure, Partition};
use crate::core::integrator;
use crate::core::particle::{Ensemble, Particle, DIM};
use crate::core::tracker::{entropy, DistributionHistogram};
use crate::error::Result;
use log::{debug, info, warn};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Externally observable state after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks delivered while running.
    pub tick: u64,
    pub elapsed_time: f64,
    pub positions: Vec<[f64; DIM]>,
    pub left_count: usize,
    pub right_count: usize,
    /// Binary entropy of the current left/right split.
    pub entropy: f64,
    pub partition: Partition,
    /// Configured temperature label.
    pub temperature: f64,
    pub histogram: DistributionHistogram,
}

/// Two-chamber diffusion simulation: ensemble, clock and occupancy statistics.
///
/// Starts paused with the partition closed. Drive it with [`start`](Self::start) and
/// one [`tick`](Self::tick) per frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    enclosure: Enclosure,
    ensemble: Ensemble,
    clock: SimulationClock,
    histogram: DistributionHistogram,
}

impl Simulation {
    /// Validate `config` and build the initial state.
    ///
    /// The left chamber receives ⌈N/2⌉ particles, the right chamber the rest; both are
    /// kept `placement_margin` away from the partition. Every particle gets a uniformly
    /// random direction at `speed`; right-chamber particles never start moving towards
    /// the closed partition.
    ///
    /// Errors: `Error::InvalidConfig` on any invalid parameter. Nothing is built in that case.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(s) => s,
            None => rng().random(),
        };
        let enclosure = Enclosure::new(config.size);
        let ensemble = populate(&config, &enclosure, seed)?;
        debug!(
            "initialized {} particles in box of size {} (seed {seed})",
            ensemble.len(),
            config.size
        );
        Ok(Self {
            clock: SimulationClock::new(config.dt(), config.door_open_time),
            histogram: DistributionHistogram::new(config.num_particles),
            config,
            seed,
            enclosure,
            ensemble,
        })
    }

    /// Paused → Running. No effect on time or the partition.
    pub fn start(&mut self) {
        if self.clock.start() {
            info!("simulation started at t = {:.3}", self.clock.elapsed_time());
        }
    }

    /// Running → Paused. Resuming continues exactly where the state was left.
    pub fn pause(&mut self) {
        if self.clock.pause() {
            info!("simulation paused at t = {:.3}", self.clock.elapsed_time());
        }
    }

    /// Advance one step of `dt = 1 / fps`.
    ///
    /// While paused (including before the first [`start`](Self::start)) this is a no-op that
    /// returns the current snapshot. Otherwise: advance the clock (opening the partition once
    /// `elapsed_time >= door_open_time`), integrate, and record the occupancy in the histogram
    /// if the partition is open.
    pub fn tick(&mut self) -> Snapshot {
        if !self.clock.is_running() {
            return self.snapshot();
        }
        if self.clock.advance() {
            info!(
                "partition opened at t = {:.3} (tick {})",
                self.clock.elapsed_time(),
                self.clock.ticks()
            );
        }
        let partition = self.clock.partition();
        integrator::step(&mut self.ensemble, &self.enclosure, partition, self.clock.dt());

        if partition.is_passable() {
            let (left, right) = self.split();
            if let Err(e) = self.histogram.record_sample(left, right) {
                warn!("dropped occupancy sample: {e}");
            }
        }
        self.snapshot()
    }

    /// Deliver `n` ticks and return the last snapshot.
    pub fn run_ticks(&mut self, n: u64) -> Snapshot {
        for _ in 0..n {
            self.tick();
        }
        self.snapshot()
    }

    /// Rebuild ensemble, clock and histogram under the construction rules.
    ///
    /// The simulation returns to paused with the partition closed. A configured seed
    /// reproduces the initial state exactly; without one a fresh seed is drawn.
    pub fn reset(&mut self) -> Result<()> {
        let seed = match self.config.seed {
            Some(s) => s,
            None => rng().random(),
        };
        self.ensemble = populate(&self.config, &self.enclosure, seed)?;
        self.seed = seed;
        self.clock = SimulationClock::new(self.config.dt(), self.config.door_open_time);
        self.histogram = DistributionHistogram::new(self.config.num_particles);
        debug!("simulation reset (seed {seed})");
        Ok(())
    }

    /// Current observable state.
    pub fn snapshot(&self) -> Snapshot {
        let (left_count, right_count) = self.split();
        Snapshot {
            tick: self.clock.ticks(),
            elapsed_time: self.clock.elapsed_time(),
            positions: self.ensemble.positions(),
            left_count,
            right_count,
            entropy: entropy(left_count, self.ensemble.len()),
            partition: self.clock.partition(),
            temperature: self.config.temperature,
            histogram: self.histogram.clone(),
        }
    }

    /// Entropy of the current split.
    pub fn entropy(&self) -> f64 {
        let (left, _) = self.split();
        entropy(left, self.ensemble.len())
    }

    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed_time()
    }

    pub fn partition(&self) -> Partition {
        self.clock.partition()
    }

    pub fn run_state(&self) -> RunState {
        self.clock.run_state()
    }

    /// Whether the configured `duration` has elapsed. Ticking past it is still allowed.
    pub fn is_finished(&self) -> bool {
        self.clock.ticks() >= self.config.total_ticks()
    }

    pub fn num_particles(&self) -> usize {
        self.ensemble.len()
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    pub fn histogram(&self) -> &DistributionHistogram {
        &self.histogram
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the current ensemble was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn split(&self) -> (usize, usize) {
        let left = self.ensemble.count_in_left_half(self.enclosure.size());
        (left, self.ensemble.len() - left)
    }
}

// ============ Internal helpers ============

fn populate(config: &SimulationConfig, enclosure: &Enclosure, seed: u64) -> Result<Ensemble> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = config.num_particles;
    let n_left = n.div_ceil(2);
    let mid = enclosure.partition_x();
    let size = enclosure.size();
    let margin = config.placement_margin;

    let mut particles = Vec::with_capacity(n);
    for i in 0..n {
        let chamber = if i < n_left { Chamber::Left } else { Chamber::Right };
        let x = match chamber {
            Chamber::Left => sample(&mut rng, 0.0, mid - margin),
            Chamber::Right => sample(&mut rng, mid + margin, size),
        };
        let y = sample(&mut rng, 0.0, size);

        let theta = rng.random_range(0.0..TAU);
        let mut v = [config.speed * theta.cos(), config.speed * theta.sin()];
        if chamber == Chamber::Right && v[0] < 0.0 {
            v[0] = -v[0];
        }
        particles.push(Particle::new([x, y], v, chamber)?);
    }
    Ok(Ensemble::new(particles))
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty range.
fn sample(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
