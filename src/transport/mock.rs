use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{Result, Transport, TransportError};

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    reads: VecDeque<Vec<u8>>,
    fail_sends: bool,
    fail_reads: bool,
}

/// In-memory transport for tests and bench rigs.
///
/// Records every sent frame and replays queued telemetry blocks. Clones
/// share state, so a test can keep a handle while a controller owns the
/// other.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a telemetry block for the next `read_block` call.
    pub fn queue_read(&self, block: impl Into<Vec<u8>>) {
        self.state.lock().unwrap().reads.push_back(block.into());
    }

    /// Make every subsequent send fail with a bus error.
    pub fn fail_sends(&self) {
        self.state.lock().unwrap().fail_sends = true;
    }

    /// Make every subsequent read fail with a bus error.
    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }

    /// All frames sent so far, oldest first.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Sent frames as ASCII strings, for wire-level assertions.
    pub fn sent_ascii(&self) -> Vec<String> {
        self.sent_frames()
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect()
    }
}

impl Transport for MockTransport {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_sends {
            return Err(TransportError::Bus {
                device: "mock".into(),
                reason: "sends disabled".into(),
            });
        }
        state.sent.push(frame.to_vec());
        Ok(())
    }

    fn read_block(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(TransportError::Bus {
                device: "mock".into(),
                reason: "reads disabled".into(),
            });
        }
        match state.reads.pop_front() {
            Some(mut block) => {
                // Firmware pads replies to the fixed block width with NULs.
                block.resize(len, 0);
                Ok(block)
            }
            None => Err(TransportError::Bus {
                device: "mock".into(),
                reason: "no queued read".into(),
            }),
        }
    }
}
