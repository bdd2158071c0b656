// ASCII command protocol shared by the tool and wheel controller boards
//
// Frames are comma-separated base-10 fields terminated by '\n':
//   tool frame:  "toolId,status,direction,speed\n"
//   drive frame: "commandKind,param1,param2,param3\n"
// Telemetry replies are a fixed-width block holding four comma-separated
// floats (wheel angular velocities in rad/s), NUL-padded to the width.
//
// Field ranges (tool id 1..=4, status/direction 0/1, speed 0..=100) are a
// caller contract; the codec encodes what it is given.

/// Error types for telemetry decoding
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("telemetry block is not ASCII text")]
    NotAscii,

    #[error("expected 4 telemetry fields, got {got}")]
    FieldCount { got: usize },

    #[error("telemetry field {field} is not a float: {text:?}")]
    BadFloat { field: usize, text: String },
}

/// Command identifiers understood by the wheel controller firmware
/// (first field of a drive frame).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCommand {
    MoveWithDuration = 1,
    MoveContinuous = 2,
    StopWheels = 3,
    UpdateSingleWheel = 4,
}

/// Encode a full tool state snapshot.
pub fn encode_tool_frame(id: u8, status: u8, direction: u8, speed: u8) -> Vec<u8> {
    debug_assert!((1..=4).contains(&id));
    debug_assert!(status <= 1);
    debug_assert!(direction <= 1);
    debug_assert!(speed <= 100);
    format!("{},{},{},{}\n", id, status, direction, speed).into_bytes()
}

/// Encode a wheel controller command. Unused parameters are sent as 0,
/// matching what the firmware's 4-field parser expects.
pub fn encode_drive_frame(kind: DriveCommand, p1: i32, p2: i32, p3: i32) -> Vec<u8> {
    format!("{},{},{},{}\n", kind as u8, p1, p2, p3).into_bytes()
}

/// Decode a tool frame back into `(id, status, direction, speed)`.
///
/// The controllers never receive tool frames; this is the firmware side of
/// the codec, used by tests and bench-rig simulators.
pub fn decode_tool_frame(frame: &[u8]) -> Result<(u8, u8, u8, u8), ParseError> {
    let text = std::str::from_utf8(frame).map_err(|_| ParseError::NotAscii)?;
    let fields: Vec<&str> = text.trim_end_matches('\n').split(',').collect();
    if fields.len() != 4 {
        return Err(ParseError::FieldCount { got: fields.len() });
    }
    let mut values = [0u8; 4];
    for (i, field) in fields.iter().enumerate() {
        values[i] = field.parse().map_err(|_| ParseError::BadFloat {
            field: i,
            text: (*field).to_string(),
        })?;
    }
    Ok((values[0], values[1], values[2], values[3]))
}

/// Decode a fixed-width telemetry block into the four wheel angular
/// velocities `(front_left, front_right, back_left, back_right)` in rad/s.
pub fn decode_telemetry(block: &[u8]) -> Result<[f32; 4], ParseError> {
    let text = std::str::from_utf8(block).map_err(|_| ParseError::NotAscii)?;
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());

    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 4 {
        return Err(ParseError::FieldCount { got: fields.len() });
    }

    let mut rates = [0.0f32; 4];
    for (i, field) in fields.iter().enumerate() {
        rates[i] = field.trim().parse().map_err(|_| ParseError::BadFloat {
            field: i,
            text: (*field).to_string(),
        })?;
    }
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_frame_encoding() {
        assert_eq!(encode_tool_frame(2, 1, 0, 90), b"2,1,0,90\n");
        assert_eq!(encode_tool_frame(1, 0, 0, 0), b"1,0,0,0\n");
        assert_eq!(encode_tool_frame(4, 1, 1, 100), b"4,1,1,100\n");
    }

    #[test]
    fn test_tool_frame_round_trip() {
        for id in 1..=4u8 {
            for status in 0..=1u8 {
                for direction in 0..=1u8 {
                    for speed in [0u8, 15, 50, 100] {
                        let frame = encode_tool_frame(id, status, direction, speed);
                        let decoded = decode_tool_frame(&frame).unwrap();
                        assert_eq!(decoded, (id, status, direction, speed));
                    }
                }
            }
        }
    }

    #[test]
    fn test_drive_frame_encoding() {
        assert_eq!(
            encode_drive_frame(DriveCommand::MoveWithDuration, 0, 15, 1500),
            b"1,0,15,1500\n"
        );
        assert_eq!(
            encode_drive_frame(DriveCommand::MoveContinuous, 3, 20, 0),
            b"2,3,20,0\n"
        );
        assert_eq!(encode_drive_frame(DriveCommand::StopWheels, 0, 0, 0), b"3,0,0,0\n");
    }

    #[test]
    fn test_telemetry_decoding() {
        let rates = decode_telemetry(b"12.3,45.6,7.8,9.1").unwrap();
        assert_eq!(rates, [12.3, 45.6, 7.8, 9.1]);
    }

    #[test]
    fn test_telemetry_nul_padding() {
        let mut block = b"0.5,-1.25,0.0,3.75".to_vec();
        block.resize(31, 0);
        let rates = decode_telemetry(&block).unwrap();
        assert_eq!(rates, [0.5, -1.25, 0.0, 3.75]);
    }

    #[test]
    fn test_telemetry_field_count() {
        assert_eq!(
            decode_telemetry(b"1.0,2.0,3.0"),
            Err(ParseError::FieldCount { got: 3 })
        );
        assert_eq!(
            decode_telemetry(b"1.0,2.0,3.0,4.0,5.0"),
            Err(ParseError::FieldCount { got: 5 })
        );
    }

    #[test]
    fn test_telemetry_bad_float() {
        let err = decode_telemetry(b"1.0,garbage,3.0,4.0").unwrap_err();
        assert_eq!(
            err,
            ParseError::BadFloat {
                field: 1,
                text: "garbage".to_string()
            }
        );
    }
}
