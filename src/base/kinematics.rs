// Mecanum kinematics for the 4-wheel base
// Maps a semantic motion direction and scalar speed to signed per-wheel
// PWM velocities.

use crate::config::{MAX_SPEED, MIN_SPEED};

/// Semantic motion directions, with the discriminant used on the wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionDirection {
    Forward = 0,
    Backward = 1,
    Left = 2,
    Right = 3,
    ForwardRight = 4,
    ForwardLeft = 5,
    BackwardRight = 6,
    BackwardLeft = 7,
    Clockwise = 8,
    AntiClockwise = 9,
}

impl MotionDirection {
    pub const ALL: [MotionDirection; 10] = [
        MotionDirection::Forward,
        MotionDirection::Backward,
        MotionDirection::Left,
        MotionDirection::Right,
        MotionDirection::ForwardRight,
        MotionDirection::ForwardLeft,
        MotionDirection::BackwardRight,
        MotionDirection::BackwardLeft,
        MotionDirection::Clockwise,
        MotionDirection::AntiClockwise,
    ];

    /// Wire discriminant (second field of a movement frame).
    pub fn wire_value(self) -> u8 {
        self as u8
    }
}

/// Signed per-wheel velocities `(front_left, front_right, back_left,
/// back_right)`. Transient: recomputed for every command, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelVector {
    pub front_left: i16,
    pub front_right: i16,
    pub back_left: i16,
    pub back_right: i16,
}

impl WheelVector {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Velocities as `[front_left, front_right, back_left, back_right]`.
    pub fn as_array(&self) -> [i16; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }
}

/// Per-direction sign quadruples `(fl, fr, bl, br)`.
///
/// Kept as data rather than code: wheel firmware revisions disagree on the
/// LEFT/RIGHT convention, so the table is per-deployment configuration
/// instead of a hard-coded match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTable {
    rows: [[i16; 4]; 10],
}

impl SignTable {
    /// Convention used by the current mecanum wheel firmware. Diagonals
    /// zero the wheel pair that is perpendicular to the travel direction.
    pub fn mecanum() -> Self {
        Self {
            rows: [
                [1, 1, 1, 1],     // forward
                [-1, -1, -1, -1], // backward
                [-1, 1, 1, -1],   // left
                [1, -1, -1, 1],   // right
                [1, 0, 0, 1],     // forward-right
                [0, 1, 1, 0],     // forward-left
                [0, -1, -1, 0],   // backward-right
                [-1, 0, 0, -1],   // backward-left
                [1, -1, 1, -1],   // clockwise
                [-1, 1, -1, 1],   // anticlockwise
            ],
        }
    }

    /// Replace the row for one direction. For boards whose firmware uses a
    /// flipped lateral convention.
    pub fn with_row(mut self, direction: MotionDirection, signs: [i16; 4]) -> Self {
        self.rows[direction as usize] = signs;
        self
    }

    pub fn row(&self, direction: MotionDirection) -> [i16; 4] {
        self.rows[direction as usize]
    }

    /// Per-wheel velocities for `direction` at `speed`.
    pub fn wheel_vector(&self, direction: MotionDirection, speed: i16) -> WheelVector {
        let [fl, fr, bl, br] = self.row(direction);
        WheelVector {
            front_left: fl * speed,
            front_right: fr * speed,
            back_left: bl * speed,
            back_right: br * speed,
        }
    }
}

impl Default for SignTable {
    fn default() -> Self {
        Self::mecanum()
    }
}

/// Inclusive PWM magnitude bounds applied to every movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedLimits {
    pub min: u8,
    pub max: u8,
}

impl SpeedLimits {
    pub fn new(min: u8, max: u8) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    pub fn clamp(&self, speed: u8) -> u8 {
        speed.clamp(self.min, self.max)
    }
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self::new(MIN_SPEED, MAX_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i16 = 20;

    fn vector(direction: MotionDirection) -> [i16; 4] {
        SignTable::mecanum().wheel_vector(direction, S).as_array()
    }

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(vector(MotionDirection::Forward), [S, S, S, S]);
        assert_eq!(vector(MotionDirection::Backward), [-S, -S, -S, -S]);
        assert_eq!(vector(MotionDirection::Right), [S, -S, -S, S]);
        assert_eq!(vector(MotionDirection::Left), [-S, S, S, -S]);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(vector(MotionDirection::Clockwise), [S, -S, S, -S]);
        assert_eq!(vector(MotionDirection::AntiClockwise), [-S, S, -S, S]);
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(vector(MotionDirection::ForwardRight), [S, 0, 0, S]);
        assert_eq!(vector(MotionDirection::ForwardLeft), [0, S, S, 0]);
        assert_eq!(vector(MotionDirection::BackwardRight), [0, -S, -S, 0]);
        assert_eq!(vector(MotionDirection::BackwardLeft), [-S, 0, 0, -S]);
    }

    #[test]
    fn test_left_right_are_negations() {
        for (l, r) in vector(MotionDirection::Left)
            .iter()
            .zip(vector(MotionDirection::Right).iter())
        {
            assert_eq!(*l, -*r);
        }
    }

    #[test]
    fn test_custom_row_override() {
        let table = SignTable::mecanum().with_row(MotionDirection::Right, [-1, 1, 1, -1]);
        assert_eq!(
            table.wheel_vector(MotionDirection::Right, S).as_array(),
            [-S, S, S, -S]
        );
        // Other rows untouched
        assert_eq!(
            table.wheel_vector(MotionDirection::Forward, S).as_array(),
            [S, S, S, S]
        );
    }

    #[test]
    fn test_speed_limits_clamp() {
        let limits = SpeedLimits::new(13, 25);
        assert_eq!(limits.clamp(5), 13);
        assert_eq!(limits.clamp(13), 13);
        assert_eq!(limits.clamp(15), 15);
        assert_eq!(limits.clamp(25), 25);
        assert_eq!(limits.clamp(80), 25);
    }
}
