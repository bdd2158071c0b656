// Keyboard teleop: WASD move, Z/X rotate, R/F speed, Space stop, Q quit
//
// Drives the same motion state machine as the gamepad binary, so speed
// changes re-issue the current direction exactly as they do on the pad.
//
// Usage: cargo run --example keyboard_teleop -- [wheels port]

use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::info;

use scrubbot_runtime::base::{EncoderReader, MotionDirection, WheelController};
use scrubbot_runtime::teleop::{Action, Teleop};
use scrubbot_runtime::tools::ToolController;
use scrubbot_runtime::transport::{MockTransport, SerialTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyACM1".to_string());

    let wheels = WheelController::new(SerialTransport::open(&port)?);

    // Bench setup: no tool or encoder boards attached. Dead-end transports
    // route those actions to the logged failure paths.
    let absent = MockTransport::new();
    absent.fail_sends();
    absent.fail_reads();
    let mut teleop = Teleop::new(
        wheels,
        ToolController::new(absent.clone()),
        EncoderReader::new(absent),
    );

    info!("Controls: WASD=move, Z/X=rotate, R/F=speed, Space=stop, Q=quit");

    enable_raw_mode()?;
    let result = run(&mut teleop);
    disable_raw_mode()?;
    result
}

fn run(
    teleop: &mut Teleop<SerialTransport, MockTransport, MockTransport>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if !event::poll(Duration::from_millis(20))? {
            continue;
        }
        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press && kind != KeyEventKind::Repeat {
            continue;
        }

        let action = match code {
            KeyCode::Char('w') => Some(Action::Drive(MotionDirection::Forward)),
            KeyCode::Char('s') => Some(Action::Drive(MotionDirection::Backward)),
            KeyCode::Char('a') => Some(Action::Drive(MotionDirection::Left)),
            KeyCode::Char('d') => Some(Action::Drive(MotionDirection::Right)),
            KeyCode::Char('z') => Some(Action::Drive(MotionDirection::AntiClockwise)),
            KeyCode::Char('x') => Some(Action::Drive(MotionDirection::Clockwise)),
            KeyCode::Char('r') => Some(Action::SpeedUp),
            KeyCode::Char('f') => Some(Action::SlowDown),
            KeyCode::Char(' ') => Some(Action::Stop),
            KeyCode::Char('q') | KeyCode::Esc => {
                teleop.apply(Action::Stop);
                return Ok(());
            }
            _ => None,
        };

        if let Some(action) = action {
            teleop.apply(action);
        }
    }
}
