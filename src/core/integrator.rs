//! Fixed-step integrator with specular reflection at the walls and the partition.

use crate::core::enclosure::{Chamber, Enclosure, Partition};
use crate::core::particle::{Ensemble, Particle, DIM};

/// Advance every particle by `dt`.
///
/// Per particle: linear drift, reflection off the four outer walls, then (only while the
/// partition is closed) reflection off the partition plane back into its own chamber.
/// Reflection sets the sign of the normal velocity component from the wall alone, so
/// evaluating the rule again at the same boundary changes nothing.
pub fn step(ensemble: &mut Ensemble, enclosure: &Enclosure, partition: Partition, dt: f64) {
    for p in ensemble.particles_mut() {
        drift(p, dt);
        reflect_outer_walls(p, enclosure.size());
        if partition.is_passable() {
            p.chamber = enclosure.chamber_of(p.r[0]);
        } else {
            reflect_partition(p, enclosure);
        }
    }
}

#[inline]
fn drift(p: &mut Particle, dt: f64) {
    for k in 0..DIM {
        p.r[k] += p.v[k] * dt;
    }
}

fn reflect_outer_walls(p: &mut Particle, size: f64) {
    for k in 0..DIM {
        if p.r[k] <= 0.0 {
            p.r[k] = 0.0;
            p.v[k] = p.v[k].abs();
        } else if p.r[k] >= size {
            p.r[k] = size;
            p.v[k] = -p.v[k].abs();
        }
    }
}

fn reflect_partition(p: &mut Particle, enclosure: &Enclosure) {
    let mid = enclosure.partition_x();
    match p.chamber {
        Chamber::Left if p.r[0] >= mid => {
            // Mirror the overshoot back and keep the particle strictly left of the plane.
            p.r[0] = (2.0 * mid - p.r[0]).clamp(0.0, enclosure.left_limit());
            p.v[0] = -p.v[0].abs();
        }
        Chamber::Right if p.r[0] < mid => {
            p.r[0] = (2.0 * mid - p.r[0]).clamp(mid, enclosure.size());
            p.v[0] = p.v[0].abs();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn single(r: [f64; 2], v: [f64; 2], chamber: Chamber) -> Result<Ensemble> {
        Ok(Ensemble::new(vec![Particle::new(r, v, chamber)?]))
    }

    #[test]
    fn free_drift() -> Result<()> {
        let mut ens = single([2.0, 3.0], [1.0, -2.0], Chamber::Left)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Closed, 0.5);
        let p = ens.particles()[0];
        assert!((p.r[0] - 2.5).abs() < 1e-12);
        assert!((p.r[1] - 2.0).abs() < 1e-12);
        assert_eq!(p.v, [1.0, -2.0]);
        Ok(())
    }

    #[test]
    fn outer_wall_reflects_and_clamps() -> Result<()> {
        let mut ens = single([0.1, 9.9], [-1.0, 1.0], Chamber::Left)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Closed, 0.5);
        let p = ens.particles()[0];
        assert_eq!(p.r, [0.0, 10.0]);
        assert_eq!(p.v, [1.0, -1.0]);
        Ok(())
    }

    #[test]
    fn resting_on_wall_is_idempotent() -> Result<()> {
        // Already reflected, sitting on the wall: zero-length steps must not flip it back.
        let mut ens = single([0.0, 5.0], [2.0, 0.0], Chamber::Left)?;
        let enc = Enclosure::new(10.0);
        for _ in 0..3 {
            step(&mut ens, &enc, Partition::Closed, 0.0);
        }
        let p = ens.particles()[0];
        assert_eq!(p.r, [0.0, 5.0]);
        assert_eq!(p.v, [2.0, 0.0]);
        Ok(())
    }

    #[test]
    fn closed_partition_reflects_left_particle() -> Result<()> {
        let mut ens = single([4.9, 5.0], [1.0, 0.0], Chamber::Left)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Closed, 0.2);
        let p = ens.particles()[0];
        // Overshoot of 0.1 mirrored back to 4.9.
        assert!((p.r[0] - 4.9).abs() < 1e-12);
        assert_eq!(p.v[0], -1.0);
        assert_eq!(ens.count_in_left_half(10.0), 1);
        Ok(())
    }

    #[test]
    fn landing_exactly_on_partition_stays_left() -> Result<()> {
        let mut ens = single([4.0, 5.0], [1.0, 0.0], Chamber::Left)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Closed, 1.0);
        let p = ens.particles()[0];
        assert!(p.r[0] < 5.0);
        assert_eq!(p.v[0], -1.0);
        Ok(())
    }

    #[test]
    fn closed_partition_reflects_right_particle() -> Result<()> {
        let mut ens = single([5.1, 5.0], [-1.0, 0.0], Chamber::Right)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Closed, 0.2);
        let p = ens.particles()[0];
        assert!((p.r[0] - 5.1).abs() < 1e-12);
        assert_eq!(p.v[0], 1.0);
        Ok(())
    }

    #[test]
    fn open_partition_lets_particles_through() -> Result<()> {
        let mut ens = single([4.9, 5.0], [1.0, 0.0], Chamber::Left)?;
        step(&mut ens, &Enclosure::new(10.0), Partition::Open, 0.2);
        let p = ens.particles()[0];
        assert!((p.r[0] - 5.1).abs() < 1e-12);
        assert_eq!(p.v[0], 1.0);
        assert_eq!(p.chamber, Chamber::Right);
        Ok(())
    }

    #[test]
    fn tiny_enclosure_keeps_particles_in_their_halves() -> Result<()> {
        // Steps overshoot the whole box every tick; wall and partition clamps must still hold.
        for size in [4.0 * f64::MIN_POSITIVE, 1e-300] {
            let enc = Enclosure::new(size);
            let mid = enc.partition_x();
            let mut ens = Ensemble::new(vec![
                Particle::new([0.25 * size, 0.5 * size], [1.0, 1.0], Chamber::Left)?,
                Particle::new([0.75 * size, 0.5 * size], [-1.0, -1.0], Chamber::Right)?,
            ]);
            for _ in 0..10 {
                step(&mut ens, &enc, Partition::Closed, 1.0 / 30.0);
                let ps = ens.particles();
                assert!(ps[0].r[0] < mid && ps[0].r[0] >= 0.0);
                assert!(ps[1].r[0] >= mid && ps[1].r[0] <= size);
                assert!(ps.iter().all(|p| enc.contains(&p.r)));
            }
        }
        Ok(())
    }

    #[test]
    fn speed_is_conserved() -> Result<()> {
        let mut ens = Ensemble::new(vec![
            Particle::new([1.0, 1.0], [3.0, 4.0], Chamber::Left)?,
            Particle::new([8.0, 2.0], [-4.0, 3.0], Chamber::Right)?,
        ]);
        let enc = Enclosure::new(10.0);
        let e0 = ens.kinetic_energy();
        for _ in 0..500 {
            step(&mut ens, &enc, Partition::Closed, 1.0 / 30.0);
        }
        assert!((ens.kinetic_energy() - e0).abs() < 1e-9);
        for p in ens.particles() {
            assert!(enc.contains(&p.r));
        }
        Ok(())
    }
}
