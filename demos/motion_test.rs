// Base motion test: short duration movements in each cardinal direction,
// then a per-wheel spin check.
//
// Usage: cargo run --example motion_test -- [port]
//
// The firmware stops on its own after each duration movement, so a crash
// mid-sequence leaves the base stationary.

use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use scrubbot_runtime::base::{MotionDirection, WheelController, WheelDirection, WheelIndex};
use scrubbot_runtime::transport::SerialTransport;

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().eq_ignore_ascii_case("y")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyACM1".to_string());

    println!("Wheel controller test on {}", port);
    println!("The base WILL move. Clear about one meter around the robot.");
    if !confirm("Proceed?") {
        return Ok(());
    }

    let mut wheels = WheelController::new(SerialTransport::open(&port)?);

    let moves = [
        ("Forward", MotionDirection::Forward, 15, 1500),
        ("Right", MotionDirection::Right, 20, 1500),
        ("Backward", MotionDirection::Backward, 15, 1500),
        ("Left", MotionDirection::Left, 20, 1500),
        ("Clockwise", MotionDirection::Clockwise, 15, 1000),
        ("Anticlockwise", MotionDirection::AntiClockwise, 15, 1000),
    ];

    for (name, direction, speed, duration_ms) in moves {
        println!("  {} for {}ms...", name, duration_ms);
        let vector = wheels.move_for_duration(direction, speed, duration_ms)?;
        println!("    wheel vector: {:?}", vector.as_array());
        sleep(Duration::from_millis(duration_ms as u64 + 500));
    }

    if confirm("Run per-wheel spin check (each wheel alone, off the ground)?") {
        for wheel in [
            WheelIndex::FrontLeft,
            WheelIndex::FrontRight,
            WheelIndex::BackLeft,
            WheelIndex::BackRight,
        ] {
            println!("  Spinning {:?}...", wheel);
            wheels.update_single_wheel(WheelDirection::Forward, 15, wheel, true)?;
            sleep(Duration::from_millis(800));
            wheels.update_single_wheel(WheelDirection::Forward, 0, wheel, false)?;
            sleep(Duration::from_millis(300));
        }
    }

    wheels.stop_all()?;
    println!("Motion test complete.");
    Ok(())
}
