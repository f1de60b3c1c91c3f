//! Headless driver for the two-chamber simulation.
//!
//! Runs the configured duration and prints the final occupancy histogram as JSON.
//!
//! Run with: cargo run --release --bin entropy_run [config.toml]

use entropysim::{Simulation, SimulationConfig};
use log::info;

fn main() -> entropysim::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let total = config.total_ticks();
    let report_every = report_interval(config.fps);

    let mut sim = Simulation::new(config)?;
    sim.start();
    for _ in 0..total {
        let snap = sim.tick();
        if snap.tick % report_every == 0 {
            info!(
                "t = {:.1}s  split {}/{}  entropy {:.2}  temperature {}K",
                snap.elapsed_time, snap.left_count, snap.right_count, snap.entropy, snap.temperature
            );
        }
    }

    let hist = sim.histogram();
    if let Some(top) = hist.most_frequent() {
        info!("most frequent split: {} ({} samples)", top.label(), top.count);
    }
    info!("mean entropy after opening: {:.3}", hist.mean_entropy());
    println!("{}", hist.to_json()?);
    Ok(())
}

/// Ticks between progress lines: ten simulated seconds, at least one tick.
fn report_interval(fps: f64) -> u64 {
    (fps.round() as u64).max(1).saturating_mul(10)
}
