// Encoder telemetry reader
//
// Telemetry is best-effort: transport and parse failures both become
// `NoData` so that a dropped reply never halts the control loop.

use tracing::warn;

use crate::config::DEFAULT_TELEMETRY_LEN;
use crate::protocol::decode_telemetry;
use crate::transport::Transport;

/// Measured wheel angular velocities in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelRates {
    pub front_left: f32,
    pub front_right: f32,
    pub back_left: f32,
    pub back_right: f32,
}

/// One telemetry read. `NoData` stands in for any unparsable or failed
/// reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncoderReading {
    Velocities(WheelRates),
    NoData,
}

/// Per-deployment telemetry configuration.
#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    /// Fixed reply width of the deployed encoder firmware (31 or 35
    /// bytes in the field).
    pub block_len: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            block_len: DEFAULT_TELEMETRY_LEN,
        }
    }
}

pub struct EncoderReader<T: Transport> {
    transport: T,
    config: EncoderConfig,
}

impl<T: Transport> EncoderReader<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EncoderConfig::default())
    }

    pub fn with_config(transport: T, config: EncoderConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch one telemetry block and parse it. Never fails: telemetry loss
    /// is reported as `NoData` and logged.
    pub fn read(&mut self) -> EncoderReading {
        let block = match self.transport.read_block(self.config.block_len) {
            Ok(block) => block,
            Err(e) => {
                warn!("Encoder read failed: {}", e);
                return EncoderReading::NoData;
            }
        };

        match decode_telemetry(&block) {
            Ok([front_left, front_right, back_left, back_right]) => {
                EncoderReading::Velocities(WheelRates {
                    front_left,
                    front_right,
                    back_left,
                    back_right,
                })
            }
            Err(e) => {
                warn!("Unparsable telemetry block: {}", e);
                EncoderReading::NoData
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_read_velocities() {
        let mock = MockTransport::new();
        mock.queue_read(b"12.3,45.6,7.8,9.1".to_vec());
        let mut encoders = EncoderReader::new(mock);

        assert_eq!(
            encoders.read(),
            EncoderReading::Velocities(WheelRates {
                front_left: 12.3,
                front_right: 45.6,
                back_left: 7.8,
                back_right: 9.1,
            })
        );
    }

    #[test]
    fn test_short_field_count_is_no_data() {
        let mock = MockTransport::new();
        mock.queue_read(b"1.0,2.0,3.0".to_vec());
        let mut encoders = EncoderReader::new(mock);
        assert_eq!(encoders.read(), EncoderReading::NoData);
    }

    #[test]
    fn test_transport_failure_is_no_data() {
        let mock = MockTransport::new();
        mock.fail_reads();
        let mut encoders = EncoderReader::new(mock);
        assert_eq!(encoders.read(), EncoderReading::NoData);
    }

    #[test]
    fn test_custom_block_len() {
        let mock = MockTransport::new();
        mock.queue_read(b"0.1,0.2,0.3,0.4".to_vec());
        let mut encoders =
            EncoderReader::with_config(mock.clone(), EncoderConfig { block_len: 35 });
        assert!(matches!(encoders.read(), EncoderReading::Velocities(_)));
    }
}
