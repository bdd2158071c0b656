// Wheel base control for the Scrubbot mecanum chassis
//
// Provides:
// - Semantic direction -> per-wheel velocity mapping (sign table + clamp)
// - High-level wheel controller speaking the drive frame protocol
// - Encoder telemetry reader

mod encoders;
pub mod kinematics;
mod wheels;

pub use encoders::{EncoderConfig, EncoderReader, EncoderReading, WheelRates};
pub use kinematics::{MotionDirection, SignTable, SpeedLimits, WheelVector};
pub use wheels::{DriveConfig, WheelController, WheelDirection, WheelIndex};
