// Scrubbot base runtime
//
// Host-side control stack for the Scrubbot cleaning robot:
// - ASCII command protocol shared by the tool and wheel microcontrollers
// - Serial / I2C transports behind one capability trait
// - Tool, wheel and encoder controllers
// - Gamepad teleop loop with persistent motion state

pub mod base;
pub mod config;
pub mod protocol;
pub mod teleop;
pub mod tools;
pub mod transport;

pub use base::{
    DriveConfig, EncoderConfig, EncoderReader, EncoderReading, MotionDirection, SignTable,
    SpeedLimits, WheelController, WheelDirection, WheelIndex, WheelRates, WheelVector,
};
pub use teleop::{Action, Heading, MotionState, Teleop, TeleopConfig, TeleopError};
pub use tools::{SpinDirection, ToolController, ToolError, ToolId, ToolStatus};
pub use transport::{I2cTransport, MockTransport, SerialTransport, Transport, TransportError};
