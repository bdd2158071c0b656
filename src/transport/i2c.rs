use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use tracing::debug;

use super::{Result, Transport, TransportError};
use crate::config::COMMAND_REGISTER;

/// One 7-bit address on a Linux I2C bus. All transfers are SMBus block
/// reads/writes at the board's single command register.
pub struct I2cTransport {
    dev: LinuxI2CDevice,
    device: String,
}

impl I2cTransport {
    /// Open `/dev/i2c-<bus>` addressing the board at `addr`.
    pub fn open(bus: u8, addr: u16) -> Result<Self> {
        let path = format!("/dev/i2c-{}", bus);
        let device = format!("{} addr 0x{:02X}", path, addr);
        debug!("Opening I2C device {}", device);

        let dev = LinuxI2CDevice::new(&path, addr).map_err(|e| TransportError::DeviceNotFound {
            device: format!("{}: {}", device, e),
        })?;

        Ok(Self { dev, device })
    }
}

impl Transport for I2cTransport {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.dev
            .smbus_write_i2c_block_data(COMMAND_REGISTER, frame)
            .map_err(|e| TransportError::Bus {
                device: self.device.clone(),
                reason: e.to_string(),
            })
    }

    fn read_block(&mut self, len: usize) -> Result<Vec<u8>> {
        // SMBus block transfers cap at 32 bytes; longer telemetry widths
        // only exist on serial boards.
        let block = self
            .dev
            .smbus_read_i2c_block_data(COMMAND_REGISTER, len as u8)
            .map_err(|e| TransportError::Bus {
                device: self.device.clone(),
                reason: e.to_string(),
            })?;

        if block.len() != len {
            return Err(TransportError::Bus {
                device: self.device.clone(),
                reason: format!("short read: {} of {} bytes", block.len(), len),
            });
        }
        Ok(block)
    }
}
