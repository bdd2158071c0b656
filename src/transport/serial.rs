use std::io::{Read, Write};

use serialport::SerialPort;
use tracing::debug;

use super::{Result, Transport, TransportError};
use crate::config::{DEFAULT_BAUD_RATE, SERIAL_READ_TIMEOUT};

/// Serial line to one controller board.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open at the fleet-default baud rate.
    pub fn open(port_name: &str) -> Result<Self> {
        Self::open_with_baud_rate(port_name, DEFAULT_BAUD_RATE)
    }

    /// Open with an explicit baud rate (boards in the field run 9600,
    /// 115200 or 2000000 depending on firmware revision).
    pub fn open_with_baud_rate(port_name: &str, baud_rate: u32) -> Result<Self> {
        debug!("Opening serial port {} at {} baud", port_name, baud_rate);
        let port = serialport::new(port_name, baud_rate)
            .timeout(SERIAL_READ_TIMEOUT)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => TransportError::DeviceNotFound {
                    device: port_name.to_string(),
                },
                _ => TransportError::Bus {
                    device: port_name.to_string(),
                    reason: e.to_string(),
                },
            })?;

        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port.write_all(frame)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_block(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut block = vec![0u8; len];
        self.port.read_exact(&mut block)?;
        Ok(block)
    }
}
