// High-level wheel controller
//
// Turns semantic motion directives into drive frames for the wheel
// controller board. The controller itself is stateless; remembered
// direction and speed live in the teleop layer.

use tracing::debug;

use super::kinematics::{MotionDirection, SignTable, SpeedLimits, WheelVector};
use crate::protocol::{encode_drive_frame, DriveCommand};
use crate::transport::{Result, Transport};

/// Wheel position on the chassis, as indexed by the wheel firmware.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelIndex {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

/// Spin direction of an individual wheel.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Forward = 0,
    Backward = 1,
}

/// Per-deployment drive configuration.
#[derive(Debug, Clone, Default)]
pub struct DriveConfig {
    pub limits: SpeedLimits,
    pub table: SignTable,
}

pub struct WheelController<T: Transport> {
    transport: T,
    config: DriveConfig,
}

impl<T: Transport> WheelController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DriveConfig::default())
    }

    pub fn with_config(transport: T, config: DriveConfig) -> Self {
        Self { transport, config }
    }

    /// Move in `direction` for `duration_ms`, after which the firmware
    /// stops on its own. Returns the per-wheel vector the firmware will
    /// apply, for logging and telemetry cross-checks.
    pub fn move_for_duration(
        &mut self,
        direction: MotionDirection,
        speed: u8,
        duration_ms: u16,
    ) -> Result<WheelVector> {
        let speed = self.config.limits.clamp(speed);
        let vector = self.config.table.wheel_vector(direction, speed as i16);
        debug!(
            "Duration movement: {:?} at {} for {}ms -> {:?}",
            direction, speed, duration_ms, vector
        );
        self.transport.send_frame(&encode_drive_frame(
            DriveCommand::MoveWithDuration,
            direction.wire_value() as i32,
            speed as i32,
            duration_ms as i32,
        ))?;
        Ok(vector)
    }

    /// Move in `direction` until the next command.
    pub fn move_continuous(&mut self, direction: MotionDirection, speed: u8) -> Result<WheelVector> {
        let speed = self.config.limits.clamp(speed);
        let vector = self.config.table.wheel_vector(direction, speed as i16);
        debug!(
            "Continuous movement: {:?} at {} -> {:?}",
            direction, speed, vector
        );
        self.transport.send_frame(&encode_drive_frame(
            DriveCommand::MoveContinuous,
            direction.wire_value() as i32,
            speed as i32,
            0,
        ))?;
        Ok(vector)
    }

    /// Stop all wheels (zero vector on the firmware side).
    pub fn stop_all(&mut self) -> Result<()> {
        debug!("Stopping all wheels");
        self.transport
            .send_frame(&encode_drive_frame(DriveCommand::StopWheels, 0, 0, 0))
    }

    /// Drive one wheel on its own, e.g. during commissioning. A disabled
    /// wheel is commanded to speed 0; the drive frame has no separate
    /// status field.
    pub fn update_single_wheel(
        &mut self,
        wheel_direction: WheelDirection,
        speed: u8,
        wheel: WheelIndex,
        enabled: bool,
    ) -> Result<()> {
        let speed = if enabled { speed } else { 0 };
        debug!(
            "Single wheel update: {:?} {:?} at {}",
            wheel, wheel_direction, speed
        );
        self.transport.send_frame(&encode_drive_frame(
            DriveCommand::UpdateSingleWheel,
            wheel_direction as i32,
            speed as i32,
            wheel as i32,
        ))
    }

    /// Speed bounds applied to movement commands.
    pub fn limits(&self) -> SpeedLimits {
        self.config.limits
    }
}
