// Gamepad teleop loop
//
// Maps pad events to actions against the wheel and tool controllers.
// Motion state (current heading + speed magnitude) persists across events
// so that a speed change re-issues the current movement command.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use gilrs::{Axis, Button, EventType, Gilrs};
use tracing::{info, warn};

use crate::base::{EncoderReader, EncoderReading, MotionDirection, WheelController};
use crate::config::{
    DEFAULT_SPEED, GAMEPAD_MODEL, LOOP_IDLE_SLEEP, SETUP_RETRY_DELAY, SETUP_TRIES, SPEED_STEP,
};
use crate::tools::{ToolController, ToolId};
use crate::transport::Transport;

/// Error types for teleop startup and shutdown
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("gamepad backend failed: {0}")]
    Backend(String),

    #[error("no \"{model}\" found after {tries} attempts")]
    SetupTimeout { model: String, tries: u32 },
}

/// Where the base is currently headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    Stopped,
    Moving(MotionDirection),
}

/// Persistent motion state of one teleop session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionState {
    pub heading: Heading,
    pub speed: u8,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            heading: Heading::Stopped,
            speed: DEFAULT_SPEED,
        }
    }
}

/// Everything an input event can ask of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Drive(MotionDirection),
    Stop,
    SpeedUp,
    SlowDown,
    ReadSpeeds,
    ToggleTool(ToolId),
}

/// Fixed pad layout (XInput naming, Logitech F710).
///
/// D-pad drives the cardinal directions, bumpers rotate, East stops,
/// West/South step the speed, North dumps encoder telemetry, triggers
/// toggle the wet tools. Anything else is ignored.
pub fn map_button(button: Button) -> Option<Action> {
    match button {
        Button::DPadUp => Some(Action::Drive(MotionDirection::Forward)),
        Button::DPadDown => Some(Action::Drive(MotionDirection::Backward)),
        Button::DPadLeft => Some(Action::Drive(MotionDirection::Left)),
        Button::DPadRight => Some(Action::Drive(MotionDirection::Right)),
        Button::LeftTrigger => Some(Action::Drive(MotionDirection::AntiClockwise)),
        Button::RightTrigger => Some(Action::Drive(MotionDirection::Clockwise)),
        Button::East => Some(Action::Stop),
        Button::West => Some(Action::SpeedUp),
        Button::South => Some(Action::SlowDown),
        Button::North => Some(Action::ReadSpeeds),
        Button::LeftTrigger2 => Some(Action::ToggleTool(ToolId::WaterPump)),
        Button::RightTrigger2 => Some(Action::ToggleTool(ToolId::BrushMotor)),
        _ => None,
    }
}

/// Hat mapping for backends that report the D-pad as an axis pair.
/// Negative Y is up; the release edge (0.0) is ignored.
pub fn map_axis(axis: Axis, value: f32) -> Option<Action> {
    match axis {
        Axis::DPadY if value < 0.0 => Some(Action::Drive(MotionDirection::Forward)),
        Axis::DPadY if value > 0.0 => Some(Action::Drive(MotionDirection::Backward)),
        Axis::DPadX if value < 0.0 => Some(Action::Drive(MotionDirection::Left)),
        Axis::DPadX if value > 0.0 => Some(Action::Drive(MotionDirection::Right)),
        _ => None,
    }
}

fn map_event(event: &EventType) -> Option<Action> {
    match event {
        EventType::ButtonPressed(button, _) => map_button(*button),
        EventType::AxisChanged(axis, value, _) => map_axis(*axis, *value),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct TeleopConfig {
    pub gamepad_model: String,
    pub setup_tries: u32,
    pub setup_retry_delay: Duration,
    pub idle_sleep: Duration,
    pub speed_step: u8,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            gamepad_model: GAMEPAD_MODEL.to_string(),
            setup_tries: SETUP_TRIES,
            setup_retry_delay: SETUP_RETRY_DELAY,
            idle_sleep: LOOP_IDLE_SLEEP,
            speed_step: SPEED_STEP,
        }
    }
}

pub struct Teleop<W: Transport, T: Transport, E: Transport> {
    wheels: WheelController<W>,
    tools: ToolController<T>,
    encoders: EncoderReader<E>,
    state: MotionState,
    config: TeleopConfig,
}

impl<W: Transport, T: Transport, E: Transport> Teleop<W, T, E> {
    pub fn new(
        wheels: WheelController<W>,
        tools: ToolController<T>,
        encoders: EncoderReader<E>,
    ) -> Self {
        Self::with_config(wheels, tools, encoders, TeleopConfig::default())
    }

    pub fn with_config(
        wheels: WheelController<W>,
        tools: ToolController<T>,
        encoders: EncoderReader<E>,
        config: TeleopConfig,
    ) -> Self {
        Self {
            wheels,
            tools,
            encoders,
            state: MotionState::default(),
            config,
        }
    }

    pub fn motion_state(&self) -> MotionState {
        self.state
    }

    /// Run until the pad disconnects or `cancel` is set. Checked once per
    /// iteration, so cancellation never interrupts a transaction.
    pub fn run(&mut self, cancel: &AtomicBool) -> Result<(), TeleopError> {
        let mut gilrs = Gilrs::new().map_err(|e| TeleopError::Backend(e.to_string()))?;
        let pad_id = wait_for_gamepad(&mut gilrs, &self.config)?;
        info!("Controller ready");

        while !cancel.load(Ordering::Relaxed) {
            while let Some(event) = gilrs.next_event() {
                if event.id != pad_id {
                    continue;
                }
                if let EventType::Disconnected = event.event {
                    info!("Controller disconnected. Exiting.");
                    self.quiesce();
                    return Ok(());
                }
                if let Some(action) = map_event(&event.event) {
                    self.apply(action);
                }
            }
            sleep(self.config.idle_sleep);
        }

        info!("Interrupt requested. Exiting.");
        self.quiesce();
        Ok(())
    }

    /// Dispatch one action. Command-write failures are logged and
    /// swallowed: a dropped actuator command is recovered by the next
    /// input event.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Drive(direction) => {
                info!("Moving {:?}", direction);
                self.state.heading = Heading::Moving(direction);
                self.issue_current();
            }
            Action::Stop => {
                info!("Stop");
                self.state.heading = Heading::Stopped;
                self.issue_current();
            }
            Action::SpeedUp => self.adjust_speed(self.config.speed_step as i16),
            Action::SlowDown => self.adjust_speed(-(self.config.speed_step as i16)),
            Action::ReadSpeeds => match self.encoders.read() {
                EncoderReading::Velocities(rates) => info!(
                    "Wheel speeds (rad/s): fl={} fr={} bl={} br={}",
                    rates.front_left, rates.front_right, rates.back_left, rates.back_right
                ),
                EncoderReading::NoData => warn!("No encoder data"),
            },
            Action::ToggleTool(id) => match self.tools.toggle(id) {
                Ok(status) => info!("{} -> {:?}", id.name(), status),
                Err(e) => warn!("Tool command failed: {}", e),
            },
        }
    }

    /// Step the speed magnitude and re-issue the current heading's command
    /// so the new speed takes effect immediately. Direction is untouched;
    /// a stopped base re-issues stop.
    fn adjust_speed(&mut self, delta: i16) {
        let limits = self.wheels.limits();
        self.state.speed =
            (self.state.speed as i16 + delta).clamp(limits.min as i16, limits.max as i16) as u8;
        info!("Speed {}", self.state.speed);
        self.issue_current();
    }

    fn issue_current(&mut self) {
        let result = match self.state.heading {
            Heading::Stopped => self.wheels.stop_all(),
            Heading::Moving(direction) => self
                .wheels
                .move_continuous(direction, self.state.speed)
                .map(|_| ()),
        };
        if let Err(e) = result {
            warn!("Wheel command failed: {}", e);
        }
    }

    /// Best-effort stop of wheels and tools on the way out.
    fn quiesce(&mut self) {
        if let Err(e) = self.wheels.stop_all() {
            warn!("Failed to stop wheels on exit: {}", e);
        }
        if let Err(e) = self.tools.stop_all_tools() {
            warn!("Failed to stop tools on exit: {}", e);
        }
    }
}

/// Scan for the required pad model, retrying a bounded number of times
/// with a fixed delay. Exhaustion is fatal: there is no actuator control
/// without a confirmed input device.
fn wait_for_gamepad(gilrs: &mut Gilrs, config: &TeleopConfig) -> Result<gilrs::GamepadId, TeleopError> {
    for attempt in 1..=config.setup_tries {
        // Drain pending events so freshly plugged pads are visible.
        while gilrs.next_event().is_some() {}

        if let Some((id, pad)) = gilrs
            .gamepads()
            .find(|(_, pad)| pad.name().contains(&config.gamepad_model))
        {
            info!("Found {}", pad.name());
            return Ok(id);
        }

        warn!(
            "Gamepad not found, attempt {}/{}",
            attempt, config.setup_tries
        );
        sleep(config.setup_retry_delay);
    }

    Err(TeleopError::SetupTimeout {
        model: config.gamepad_model.clone(),
        tries: config.setup_tries,
    })
}
