use std::io::{self, Read};

use motionsdk_client::{send_chunk, ClientConfig, ProtocolClient, ResultCode, Timeout};
use serde::Serialize;

use crate::cmd::{ensure_connected, parse_timeout, ConsoleArgs};
use crate::exit::{console_error, io_error, CliResult, CONTINUE, FAILURE, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ReplyOutput<'a> {
    code: String,
    output: &'a str,
}

pub fn run(args: ConsoleArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_timeout(&args.timeout)?;
    let chunk = if args.chunk == "-" {
        let mut chunk = String::new();
        io::stdin()
            .read_to_string(&mut chunk)
            .map_err(|err| io_error("failed to read chunk from stdin", err))?;
        chunk
    } else {
        args.chunk
    };

    let config = ClientConfig {
        wait_timeout: timeout,
        ..ClientConfig::default()
    };
    let mut client = ProtocolClient::connect_with_config(&args.host, args.port, config);
    ensure_connected(&client, &args.host, args.port)?;

    let reply = send_chunk(&mut client, &chunk, Timeout::After(timeout)).map_err(console_error)?;

    match format {
        OutputFormat::Json => {
            let out = ReplyOutput {
                code: reply.code.to_string(),
                output: &reply.output,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Csv | OutputFormat::Table => match reply.code {
            ResultCode::Success => print!("{}", reply.output),
            ResultCode::Failure => eprint!("command failed: {}", reply.output),
            ResultCode::Continue => eprint!("incomplete Lua chunk: {}", reply.output),
        },
    }

    Ok(match reply.code {
        ResultCode::Success => SUCCESS,
        ResultCode::Failure => FAILURE,
        ResultCode::Continue => CONTINUE,
    })
}
