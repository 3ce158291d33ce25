use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use motionsdk_client::{ProtocolClient, CONSOLE_PORT};
use motionsdk_format::{ChannelRequest, Service};

use crate::exit::{CliError, CliResult, TRANSPORT_ERROR, USAGE};
use crate::output::OutputFormat;

pub mod console;
pub mod info;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stream frames from a data service.
    Stream(StreamArgs),
    /// Run a Lua chunk on the console service.
    Console(ConsoleArgs),
    /// Connect and print the service description.
    Info(InfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Stream(args) => stream::run(args, format),
        Command::Console(args) => console::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Motion Service host.
    #[arg(long, default_value = "127.0.0.1", env = "MOTIONSDK_HOST")]
    pub host: String,
    /// Service port. Default: the standard port of --service.
    #[arg(long)]
    pub port: Option<u16>,
    /// Data service format.
    #[arg(long, default_value = "configurable")]
    pub service: Service,
    /// Configurable channels to request (comma-separated).
    #[arg(long, default_value = "Lq,c")]
    pub channels: ChannelRequest,
    /// Only stream nodes attached to a sensor.
    #[arg(long)]
    pub active_only: bool,
    /// Stop after N frames. Default: stream until interrupted.
    #[arg(long)]
    pub frames: Option<usize>,
    /// Print device and channel names as the first row.
    #[arg(long)]
    pub header: bool,
    /// Write rows to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Column separator for csv output.
    #[arg(long, default_value = ",")]
    pub separator: String,
    /// Time to wait for the stream to start (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

impl StreamArgs {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.service.default_port())
    }
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    /// Lua chunk to run. Use "-" to read it from stdin.
    pub chunk: String,
    /// Motion Service host.
    #[arg(long, default_value = "127.0.0.1", env = "MOTIONSDK_HOST")]
    pub host: String,
    /// Console service port.
    #[arg(long, default_value_t = CONSOLE_PORT)]
    pub port: u16,
    /// Reply timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Motion Service host.
    #[arg(long, default_value = "127.0.0.1", env = "MOTIONSDK_HOST")]
    pub host: String,
    /// Service port.
    #[arg(long, default_value_t = Service::Preview.default_port())]
    pub port: u16,
    /// Time to wait for the service description (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Fail with the recorded connect error if `client` is not connected.
pub fn ensure_connected(client: &ProtocolClient, host: &str, port: u16) -> CliResult<()> {
    if client.is_connected() {
        return Ok(());
    }
    let reason = client.error_string().unwrap_or("not connected");
    Err(CliError::new(
        TRANSPORT_ERROR,
        format!("failed to connect to Motion Service on {host}:{port}: {reason}"),
    ))
}

pub fn parse_timeout(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "timeout must not be empty"));
    }

    let (number, millis) = match input.strip_suffix("ms") {
        Some(number) => (number, true),
        None => (input.strip_suffix('s').unwrap_or(input), false),
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid timeout value: {input}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "timeout must be greater than zero"));
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}
