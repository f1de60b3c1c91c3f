//! Simulation configuration.
//!
//! Defaults reproduce the classic demo: six particles in a 10×10 box, door
//! opening after five seconds, 30 ticks per second for a 100 s run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for building a [`Simulation`](crate::core::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total number of particles N.
    pub num_particles: usize,
    /// Edge length of the square enclosure.
    pub size: f64,
    /// Elapsed time at which the partition opens.
    pub door_open_time: f64,
    /// Nominal run length; drivers use it to decide how many ticks to deliver.
    pub duration: f64,
    /// Ticks per simulated second (dt = 1 / fps).
    pub fps: f64,
    /// Speed magnitude given to every particle.
    pub speed: f64,
    /// Reported temperature. Purely a label, it does not influence velocities.
    pub temperature: f64,
    /// Gap kept free on both sides of the partition when placing particles.
    pub placement_margin: f64,
    /// RNG seed; `None` draws one from the OS generator.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_particles: 6,
            size: 10.0,
            door_open_time: 5.0,
            duration: 100.0,
            fps: 30.0,
            speed: 10.0,
            temperature: 300.0,
            placement_margin: 0.1,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Shorthand for the five core parameters; the rest keep their defaults.
    pub fn new(num_particles: usize, size: f64, speed: f64, door_open_time: f64, fps: f64) -> Self {
        Self {
            num_particles,
            size,
            speed,
            door_open_time,
            fps,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_placement_margin(mut self, margin: f64) -> Self {
        self.placement_margin = margin;
        self
    }

    /// Fixed time step, `1 / fps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.fps
    }

    /// Number of ticks needed to cover `duration`.
    pub fn total_ticks(&self) -> u64 {
        (self.duration * self.fps).round() as u64
    }

    /// Check every parameter, failing on the first invalid one.
    ///
    /// Errors: `Error::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size < f64::MIN_POSITIVE {
            return Err(Error::InvalidConfig(
                "size must be finite and at least f64::MIN_POSITIVE".into(),
            ));
        }
        if !self.door_open_time.is_finite() || self.door_open_time < 0.0 {
            return Err(Error::InvalidConfig(
                "door_open_time must be finite and >= 0".into(),
            ));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(Error::InvalidConfig("fps must be finite and > 0".into()));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(Error::InvalidConfig("speed must be finite and >= 0".into()));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(Error::InvalidConfig(
                "duration must be finite and >= 0".into(),
            ));
        }
        if !self.placement_margin.is_finite()
            || self.placement_margin < 0.0
            || self.placement_margin >= 0.5 * self.size
        {
            return Err(Error::InvalidConfig(format!(
                "placement_margin must lie in [0, {}) for size {}",
                0.5 * self.size,
                self.size
            )));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        let cfg = SimulationConfig::default();
        cfg.validate()?;
        assert_eq!(cfg.total_ticks(), 3000);
        assert!((cfg.dt() - 1.0 / 30.0).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn rejects_bad_fields() {
        let cases = [
            (SimulationConfig::new(4, 0.0, 1.0, 1.0, 30.0), "size"),
            (SimulationConfig::new(4, 10.0, 1.0, -1.0, 30.0), "door_open_time"),
            (SimulationConfig::new(4, 10.0, 1.0, 1.0, 0.0), "fps"),
            (SimulationConfig::new(4, 10.0, f64::NAN, 1.0, 30.0), "speed"),
            (
                SimulationConfig::new(4, 10.0, 1.0, 1.0, 30.0).with_placement_margin(5.0),
                "placement_margin",
            ),
        ];
        for (cfg, field) in cases {
            let err = cfg.validate().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)));
            assert!(err.to_string().contains(field), "{err} should mention {field}");
        }
    }

    #[test]
    fn subnormal_size_is_rejected() {
        let cfg = SimulationConfig::new(2, 1e-310, 1.0, 1000.0, 30.0).with_placement_margin(0.0);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("size"));
        SimulationConfig::new(2, f64::MIN_POSITIVE, 1.0, 1000.0, 30.0)
            .with_placement_margin(0.0)
            .validate()
            .expect("smallest normal size is accepted");
    }

    #[test]
    fn toml_partial_document_uses_defaults() -> Result<()> {
        let cfg = SimulationConfig::from_toml_str(
            "num_particles = 40\nseed = 7\ndoor_open_time = 2.5\n",
        )?;
        assert_eq!(cfg.num_particles, 40);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.door_open_time, 2.5);
        assert_eq!(cfg.size, 10.0);
        assert_eq!(cfg.fps, 30.0);
        Ok(())
    }

    #[test]
    fn toml_invalid_values_are_rejected() {
        let err = SimulationConfig::from_toml_str("fps = -3.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        let err = SimulationConfig::from_toml_str("fps = \"fast\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
