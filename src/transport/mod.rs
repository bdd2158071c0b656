// Byte-level transports for the microcontroller links
//
// One capability trait with three implementations:
// - SerialTransport: point-to-point USB serial line
// - I2cTransport: shared I2C bus, block transfers at a fixed register
// - MockTransport: in-memory, for tests and bench rigs

mod i2c;
mod mock;
mod serial;

pub use i2c::I2cTransport;
pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Error types for transport communication
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("device not found: {device}")]
    DeviceNotFound { device: String },

    #[error("bus error on {device}: {reason}")]
    Bus { device: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Byte-level access to one microcontroller.
///
/// A transport value is owned by exactly one controller and carries at most
/// one outstanding transaction. When tools and wheels share a physical line
/// the caller serializes access (one owner, or a mutex around the handle).
pub trait Transport {
    /// Transmit a complete frame. Either the whole frame goes out or this
    /// fails; there is no silent partial write.
    fn send_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Read exactly `len` bytes, or fail.
    fn read_block(&mut self, len: usize) -> Result<Vec<u8>>;
}
