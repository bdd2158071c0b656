// Transport, protocol and teleop defaults
use std::time::Duration;

// Serial defaults. The deployed controller boards are not uniform: 9600,
// 115200 and 2000000 baud units all exist, so baud stays a constructor
// parameter and this is only the common case.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const SERIAL_READ_TIMEOUT: Duration = Duration::from_millis(1000);

// All commands and telemetry go through one register on the I2C boards.
pub const COMMAND_REGISTER: u8 = 0x00;

// Default I2C addresses (7-bit) as flashed on the microcontrollers.
pub const TOOLS_I2C_ADDR: u16 = 0x60;
pub const WHEELS_I2C_ADDR: u16 = 0x70;
pub const ENCODERS_I2C_ADDR: u16 = 0x65;

// Telemetry reply width in bytes. Two firmware builds are in the field:
// 31 (fits the SMBus 32-byte block limit) and 35 (serial-only boards).
pub const DEFAULT_TELEMETRY_LEN: usize = 31;

// Teleop speed state: PWM duty magnitude sent with movement commands.
pub const DEFAULT_SPEED: u8 = 15;
pub const MIN_SPEED: u8 = 13;
pub const MAX_SPEED: u8 = 25;
pub const SPEED_STEP: u8 = 2;

// Gamepad discovery: bounded retries, then fatal.
pub const GAMEPAD_MODEL: &str = "Logitech Gamepad F710";
pub const SETUP_TRIES: u32 = 5;
pub const SETUP_RETRY_DELAY: Duration = Duration::from_secs(3);

// Idle sleep between event-drain passes of the teleop loop.
pub const LOOP_IDLE_SLEEP: Duration = Duration::from_millis(10);
