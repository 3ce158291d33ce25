mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "motionsdk", version, about = "Motion Service streaming client")]
struct Cli {
    /// Output format (stdout).
    #[arg(long, value_name = "FORMAT", default_value = "csv", global = true)]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.command, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use motionsdk_format::Service;

    use super::*;

    #[test]
    fn parses_stream_subcommand() {
        let cli = Cli::try_parse_from([
            "motionsdk",
            "stream",
            "--service",
            "preview",
            "--frames",
            "10",
            "--header",
        ])
        .expect("stream args should parse");

        let Command::Stream(args) = cli.command else {
            panic!("expected stream command");
        };
        assert_eq!(args.service, Service::Preview);
        assert_eq!(args.port(), 32079);
        assert_eq!(args.frames, Some(10));
        assert!(args.header);
        assert_eq!(args.channels.channels(), ["Lq", "c"]);
    }

    #[test]
    fn rejects_unknown_service() {
        let err = Cli::try_parse_from(["motionsdk", "stream", "--service", "video"])
            .expect_err("unknown service should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_invalid_channel() {
        let err = Cli::try_parse_from(["motionsdk", "stream", "--channels", "Lq,<c>"])
            .expect_err("invalid channel should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_console_subcommand() {
        let cli = Cli::try_parse_from(["motionsdk", "--format", "json", "console", "print(1)"])
            .expect("console args should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        let Command::Console(args) = cli.command else {
            panic!("expected console command");
        };
        assert_eq!(args.port, 32075);
        assert_eq!(args.chunk, "print(1)");
    }

    #[test]
    fn info_defaults_to_preview_port() {
        let cli = Cli::try_parse_from(["motionsdk", "info"]).expect("info args should parse");
        let Command::Info(args) = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(args.port, 32079);
    }
}
