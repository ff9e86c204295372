//! Burst emission demo.
//!
//! Runs a quiet low-rate plume and fires a burst every two simulated
//! seconds, showing the population spike and decay.
//!
//! Run with: `cargo run --example burst`

use plume::prelude::*;

fn main() {
    let mut system = ParticleSystem::builder()
        .with_emission_rate(5.0)
        .with_burst_duration(2.0)
        .with_seed(7)
        .build()
        .expect("valid configuration");

    println!("=== Plume burst demo ===");

    let dt = 0.033;
    let mut elapsed = 0.0f32;
    let mut next_burst = 2.0;

    while elapsed < 12.0 {
        system.step(dt);
        elapsed += dt;

        if elapsed >= next_burst {
            let spawned = system.trigger_burst();
            println!("t={:>5.2}s  burst of {spawned:<3}  population={}", elapsed, system.particle_count());
            next_burst += 2.0;
        }
    }
}
