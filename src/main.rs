use std::sync::atomic::AtomicBool;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scrubbot_runtime::base::{EncoderConfig, EncoderReader, WheelController};
use scrubbot_runtime::config::{
    DEFAULT_BAUD_RATE, DEFAULT_TELEMETRY_LEN, ENCODERS_I2C_ADDR, TOOLS_I2C_ADDR, WHEELS_I2C_ADDR,
};
use scrubbot_runtime::teleop::Teleop;
use scrubbot_runtime::tools::ToolController;
use scrubbot_runtime::transport::{I2cTransport, MockTransport, SerialTransport};

/// Gamepad teleop for the Scrubbot cleaning robot.
#[derive(Parser, Debug)]
#[command(name = "scrubbot-teleop")]
struct Args {
    /// I2C bus index. When set, all boards are reached over I2C.
    #[arg(long, conflicts_with_all = ["tools_port", "wheels_port", "encoders_port"])]
    i2c_bus: Option<u8>,

    /// 7-bit I2C address of the tool controller board
    #[arg(long, default_value_t = TOOLS_I2C_ADDR)]
    tools_addr: u16,

    /// 7-bit I2C address of the wheel controller board
    #[arg(long, default_value_t = WHEELS_I2C_ADDR)]
    wheels_addr: u16,

    /// 7-bit I2C address of the encoder board
    #[arg(long, default_value_t = ENCODERS_I2C_ADDR)]
    encoders_addr: u16,

    /// Serial port of the tool controller board
    #[arg(long, required_unless_present = "i2c_bus")]
    tools_port: Option<String>,

    /// Serial port of the wheel controller board
    #[arg(long, required_unless_present = "i2c_bus")]
    wheels_port: Option<String>,

    /// Serial port of the encoder board; omit if no encoder board is
    /// fitted
    #[arg(long)]
    encoders_port: Option<String>,

    /// Baud rate for serial boards
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Telemetry reply width of the deployed encoder firmware (31 or 35)
    #[arg(long, default_value_t = DEFAULT_TELEMETRY_LEN)]
    telemetry_len: usize,
}

fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();
    let cancel = AtomicBool::new(false);

    let result = match args.i2c_bus {
        Some(bus) => run_i2c(&args, bus, &cancel),
        None => run_serial(&args, &cancel),
    };

    if let Err(e) = result {
        eprintln!("Teleop error: {}", e);
        std::process::exit(1);
    }
}

fn run_i2c(
    args: &Args,
    bus: u8,
    cancel: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let wheels = WheelController::new(I2cTransport::open(bus, args.wheels_addr)?);
    let tools = ToolController::new(I2cTransport::open(bus, args.tools_addr)?);
    let encoders = EncoderReader::with_config(
        I2cTransport::open(bus, args.encoders_addr)?,
        EncoderConfig {
            block_len: args.telemetry_len,
        },
    );

    Teleop::new(wheels, tools, encoders).run(cancel)?;
    Ok(())
}

fn run_serial(
    args: &Args,
    cancel: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // required_unless_present guarantees both ports are set here
    let tools_port = args.tools_port.as_deref().expect("clap enforces presence");
    let wheels_port = args.wheels_port.as_deref().expect("clap enforces presence");

    let wheels =
        WheelController::new(SerialTransport::open_with_baud_rate(wheels_port, args.baud)?);
    let tools = ToolController::new(SerialTransport::open_with_baud_rate(tools_port, args.baud)?);

    match &args.encoders_port {
        Some(port) => {
            let encoders = EncoderReader::with_config(
                SerialTransport::open_with_baud_rate(port, args.baud)?,
                EncoderConfig {
                    block_len: args.telemetry_len,
                },
            );
            Teleop::new(wheels, tools, encoders).run(cancel)?;
        }
        None => {
            // No encoder board: a dead-end transport turns every read into
            // the NO DATA path.
            let absent = MockTransport::new();
            absent.fail_reads();
            Teleop::new(wheels, tools, EncoderReader::new(absent)).run(cancel)?;
        }
    }
    Ok(())
}
