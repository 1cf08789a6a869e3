//! Regime sweep example.
//!
//! Runs the four sweep commands for one distance/speed pair on a real-time
//! paced simulator, polling the delivery channel while each command runs.
//!
//! Usage: `cargo run --example regime_sweep -- [distance] [speed]`

use std::thread;
use std::time::Duration;

use stepper_sim::{Command, MotorSimulator, Pacing, Trajectory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let distance: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1000);
    let speed: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(100);

    println!("=== Regime Sweep: distance={} speed={} ===\n", distance, speed);

    let mut motor = MotorSimulator::builder().pacing(Pacing::Realtime).build()?;

    for (i, command) in Command::sweep(distance, speed).into_iter().enumerate() {
        motor.submit(command)?;

        let mut trajectory = Trajectory::new();
        while motor.is_running() {
            let chunk = motor.drain();
            if !chunk.is_empty() {
                println!("  command {}: +{} samples", i + 1, chunk.len());
            }
            trajectory.append(chunk);
            thread::sleep(Duration::from_millis(50));
        }

        let summary = motor.join()?;
        trajectory.append(motor.drain());

        println!(
            "Command {} ({}): {} samples, final position {:?}",
            i + 1,
            command.regime().name(),
            trajectory.len(),
            trajectory.last()
        );
        if let Some(summary) = summary {
            println!("  simulated time: {:.2}s", summary.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
