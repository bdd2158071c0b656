// Cleaning tool controller
//
// Four actuated tools share one transport to the tool controller board.
// Every setter mutates local state and then transmits the tool's full
// snapshot; the firmware has no partial-field update.

use tracing::debug;

use crate::protocol::encode_tool_frame;
use crate::transport::{Transport, TransportError};

/// The four tools on the chassis, with their wire ids.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolId {
    BrushServo = 1,
    BrushMotor = 2,
    WaterPump = 3,
    SoapPump = 4,
}

impl ToolId {
    pub const ALL: [ToolId; 4] = [
        ToolId::BrushServo,
        ToolId::BrushMotor,
        ToolId::WaterPump,
        ToolId::SoapPump,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolId::BrushServo => "Brush Servo",
            ToolId::BrushMotor => "Brush Motor",
            ToolId::WaterPump => "Water Pump",
            ToolId::SoapPump => "Soap Pump",
        }
    }

    pub fn wire_value(self) -> u8 {
        self as u8
    }

    /// Look up a tool by its wire id, for callers holding raw ids.
    pub fn from_wire(id: u8) -> Result<ToolId> {
        ToolId::ALL
            .into_iter()
            .find(|t| t.wire_value() == id)
            .ok_or(ToolError::UnknownTool { id })
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolStatus {
    #[default]
    Off = 0,
    On = 1,
}

impl ToolStatus {
    pub fn toggled(self) -> Self {
        match self {
            ToolStatus::Off => ToolStatus::On,
            ToolStatus::On => ToolStatus::Off,
        }
    }
}

/// Spin direction of a reversible tool motor.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinDirection {
    #[default]
    A = 0,
    B = 1,
}

/// Error types for tool control
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("no tool with id {id}")]
    UnknownTool { id: u8 },

    #[error("speed {speed} out of range 0..=100")]
    InvalidSpeed { speed: u8 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Mutable state of one tool. Id and name are fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct ToolState {
    pub id: ToolId,
    pub status: ToolStatus,
    pub direction: SpinDirection,
    pub speed: u8,
}

impl ToolState {
    fn new(id: ToolId) -> Self {
        Self {
            id,
            status: ToolStatus::Off,
            direction: SpinDirection::A,
            speed: 0,
        }
    }
}

pub struct ToolController<T: Transport> {
    transport: T,
    tools: [ToolState; 4],
}

impl<T: Transport> ToolController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tools: ToolId::ALL.map(ToolState::new),
        }
    }

    /// Current state snapshot of one tool.
    pub fn tool(&self, id: ToolId) -> ToolState {
        self.tools[id as usize - 1]
    }

    pub fn set_status(&mut self, id: ToolId, status: ToolStatus) -> Result<()> {
        self.tools[id as usize - 1].status = status;
        self.transmit(id)
    }

    pub fn set_direction(&mut self, id: ToolId, direction: SpinDirection) -> Result<()> {
        self.tools[id as usize - 1].direction = direction;
        self.transmit(id)
    }

    pub fn set_speed(&mut self, id: ToolId, speed: u8) -> Result<()> {
        check_speed(speed)?;
        self.tools[id as usize - 1].speed = speed;
        self.transmit(id)
    }

    /// Update status, direction and speed together, with one transmit.
    pub fn set_all(
        &mut self,
        id: ToolId,
        status: ToolStatus,
        direction: SpinDirection,
        speed: u8,
    ) -> Result<()> {
        check_speed(speed)?;
        let tool = &mut self.tools[id as usize - 1];
        tool.status = status;
        tool.direction = direction;
        tool.speed = speed;
        self.transmit(id)
    }

    /// Flip a tool between off and on, keeping direction and speed.
    pub fn toggle(&mut self, id: ToolId) -> Result<ToolStatus> {
        let status = self.tool(id).status.toggled();
        self.set_status(id, status)?;
        Ok(status)
    }

    /// Apply a batch of `(id, status, direction, speed)` commands in input
    /// order, one transmit each. Duplicate targets are each applied and
    /// transmitted; the last one wins on final state.
    pub fn set_all_tools(
        &mut self,
        commands: &[(ToolId, ToolStatus, SpinDirection, u8)],
    ) -> Result<()> {
        for &(id, status, direction, speed) in commands {
            self.set_all(id, status, direction, speed)?;
        }
        Ok(())
    }

    /// Switch every tool off, in declaration order, one transmit per tool.
    pub fn stop_all_tools(&mut self) -> Result<()> {
        for id in ToolId::ALL {
            self.set_status(id, ToolStatus::Off)?;
        }
        Ok(())
    }

    fn transmit(&mut self, id: ToolId) -> Result<()> {
        let tool = self.tools[id as usize - 1];
        debug!(
            "{}: status={:?} direction={:?} speed={}",
            id.name(),
            tool.status,
            tool.direction,
            tool.speed
        );
        self.transport.send_frame(&encode_tool_frame(
            tool.id.wire_value(),
            tool.status as u8,
            tool.direction as u8,
            tool.speed,
        ))?;
        Ok(())
    }
}

fn check_speed(speed: u8) -> Result<()> {
    if speed > 100 {
        return Err(ToolError::InvalidSpeed { speed });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn controller() -> (ToolController<MockTransport>, MockTransport) {
        let mock = MockTransport::new();
        (ToolController::new(mock.clone()), mock)
    }

    #[test]
    fn test_setter_sends_full_snapshot() {
        let (mut tools, mock) = controller();
        tools.set_speed(ToolId::BrushMotor, 40).unwrap();
        tools.set_status(ToolId::BrushMotor, ToolStatus::On).unwrap();
        // Speed set earlier rides along with the later status update.
        assert_eq!(mock.sent_ascii(), vec!["2,0,0,40\n", "2,1,0,40\n"]);
    }

    #[test]
    fn test_set_all_single_transmit() {
        let (mut tools, mock) = controller();
        tools
            .set_all(ToolId::BrushMotor, ToolStatus::On, SpinDirection::A, 90)
            .unwrap();
        assert_eq!(mock.sent_ascii(), vec!["2,1,0,90\n"]);
    }

    #[test]
    fn test_batch_applied_in_input_order() {
        let (mut tools, mock) = controller();
        tools
            .set_all_tools(&[
                (ToolId::BrushMotor, ToolStatus::On, SpinDirection::A, 90),
                (ToolId::WaterPump, ToolStatus::On, SpinDirection::A, 90),
            ])
            .unwrap();
        assert_eq!(mock.sent_ascii(), vec!["2,1,0,90\n", "3,1,0,90\n"]);
    }

    #[test]
    fn test_batch_duplicates_each_transmitted() {
        let (mut tools, mock) = controller();
        tools
            .set_all_tools(&[
                (ToolId::SoapPump, ToolStatus::On, SpinDirection::A, 50),
                (ToolId::SoapPump, ToolStatus::On, SpinDirection::B, 70),
            ])
            .unwrap();
        assert_eq!(mock.sent_ascii(), vec!["4,1,0,50\n", "4,1,1,70\n"]);
        assert_eq!(tools.tool(ToolId::SoapPump).speed, 70);
    }

    #[test]
    fn test_stop_all_tools_in_declaration_order() {
        let (mut tools, mock) = controller();
        tools
            .set_all(ToolId::WaterPump, ToolStatus::On, SpinDirection::A, 60)
            .unwrap();
        tools.stop_all_tools().unwrap();

        let frames = mock.sent_ascii();
        // One On frame, then one Off frame per tool in id order. Speed and
        // direction survive the stop.
        assert_eq!(
            &frames[1..],
            &["1,0,0,0\n", "2,0,0,0\n", "3,0,0,60\n", "4,0,0,0\n"]
        );
    }

    #[test]
    fn test_invalid_speed_rejected_without_transmit() {
        let (mut tools, mock) = controller();
        assert!(matches!(
            tools.set_speed(ToolId::BrushMotor, 101),
            Err(ToolError::InvalidSpeed { speed: 101 })
        ));
        assert!(mock.sent_ascii().is_empty());
    }

    #[test]
    fn test_toggle() {
        let (mut tools, mock) = controller();
        assert_eq!(tools.toggle(ToolId::WaterPump).unwrap(), ToolStatus::On);
        assert_eq!(tools.toggle(ToolId::WaterPump).unwrap(), ToolStatus::Off);
        assert_eq!(mock.sent_ascii(), vec!["3,1,0,0\n", "3,0,0,0\n"]);
    }

    #[test]
    fn test_unknown_wire_id() {
        assert!(matches!(
            ToolId::from_wire(7),
            Err(ToolError::UnknownTool { id: 7 })
        ));
        assert_eq!(ToolId::from_wire(3).unwrap(), ToolId::WaterPump);
    }
}
