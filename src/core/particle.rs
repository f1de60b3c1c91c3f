use crate::core::enclosure::Chamber;
use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A point particle in the plane.
///
/// Fields:
/// - `r`: position [x, y]
/// - `v`: velocity [vx, vy]
/// - `chamber`: the half the particle is confined to while the partition is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Chamber of origin; follows the position once the partition is open.
    pub chamber: Chamber,
}

impl Particle {
    /// Create a new particle after validating that all components are finite.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any position or velocity component is NaN/inf.
    pub fn new(r: [f64; DIM], v: [f64; DIM], chamber: Chamber) -> Result<Self> {
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self { r, v, chamber })
    }

    /// Speed |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v.iter().map(|&c| c * c).sum::<f64>().sqrt()
    }

    /// Kinetic energy with unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * vsq
    }
}

/// The complete set of simulated particles.
///
/// Read-only from outside the crate; only the integrator moves particles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ensemble {
    particles: Vec<Particle>,
}

impl Ensemble {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Number of particles N.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of particles strictly left of the partition line `size / 2`.
    pub fn count_in_left_half(&self, size: f64) -> usize {
        let mid = 0.5 * size;
        self.particles.iter().filter(|p| p.r[0] < mid).count()
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}
