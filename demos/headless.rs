//! Headless simulation loop.
//!
//! Steps the reference plume for a few simulated seconds and prints the
//! population and buffer sizes once per simulated second.
//!
//! Run with: `cargo run --example headless`

use plume::prelude::*;

fn main() {
    let mut system = ParticleSystem::builder()
        .with_seed(2024)
        .build()
        .expect("reference configuration is valid");

    let mut clock = FrameClock::new().with_time_scale(0.5);
    clock.set_fixed_delta(Some(0.016));

    println!("=== Plume headless demo ===");
    println!("rate: {} particles/s", system.emitter().rate());
    println!();

    let mut next_report = 1.0;
    while clock.elapsed() < 10.0 {
        let dt = clock.tick();
        system.step(dt);

        if clock.elapsed() >= next_report {
            let buffers = system.buffers();
            println!(
                "t={:>4.1}s  particles={:<4}  positions={:<5}  colors={:<5}",
                clock.elapsed(),
                system.particle_count(),
                buffers.positions().len(),
                buffers.colors().len(),
            );
            next_report += 1.0;
        }
    }
}
