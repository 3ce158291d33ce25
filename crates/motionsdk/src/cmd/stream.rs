use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use motionsdk_client::{ClientConfig, ClientError, ProtocolClient, Timeout};
use motionsdk_format::{decode_any, parse_name_map, AnyElement, ChannelRequest, Service};
use tracing::{debug, info};

use crate::cmd::{ensure_connected, parse_timeout, StreamArgs};
use crate::exit::{client_error, io_error, CliError, CliResult, DATA_INVALID, INTERNAL, SUCCESS, USAGE};
use crate::output::{FramePrinter, OutputFormat};

const PREVIEW_CHANNELS: [&str; 14] = [
    "Gqw", "Gqx", "Gqy", "Gqz", "Lqw", "Lqx", "Lqy", "Lqz", "rx", "ry", "rz", "ax", "ay", "az",
];

const SENSOR_CHANNELS: [&str; 9] = ["ax", "ay", "az", "mx", "my", "mz", "gx", "gy", "gz"];

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    let wait = parse_timeout(&args.timeout)?;
    let port = args.port();
    let config = ClientConfig {
        wait_timeout: wait,
        ..ClientConfig::default()
    };

    let mut client = ProtocolClient::connect_with_config(&args.host, port, config);
    ensure_connected(&client, &args.host, port)?;
    info!(host = %args.host, port, service = %args.service, "streaming");

    if args.service == Service::Configurable {
        let request = args.channels.clone().inactive(!args.active_only);
        let xml = request
            .to_xml()
            .map_err(|err| CliError::new(USAGE, err.to_string()))?;
        client
            .write_data(xml.as_bytes(), Timeout::Default)
            .map_err(|err| client_error("failed to send channel list request", err))?;
    }

    client
        .wait_for_data(Timeout::Default)
        .map_err(|err| client_error("no active data stream available", err))?;

    let names = client.xml_string().map(parse_name_map).unwrap_or_default();
    debug!(devices = names.len(), "name map");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let out: Box<dyn Write> = match &args.file {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|err| io_error("failed to open output file", err))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut printer = FramePrinter::new(out, format, args.separator.clone());
    let mut print_header = args.header;

    while running.load(Ordering::SeqCst) {
        let message = match client.read_data(Timeout::Default) {
            Ok(message) => message,
            Err(ClientError::Timeout) if !running.load(Ordering::SeqCst) => break,
            Err(err) => return Err(client_error("data stream interrupted or timed out", err)),
        };

        let elements = decode_any(args.service, &message);
        if elements.is_empty() {
            return Err(CliError::new(DATA_INVALID, "unknown data format in stream"));
        }

        if print_header {
            let columns = header_columns(&elements, &names, &args.channels)?;
            printer.header(&columns).map_err(|err| io_error("write failed", err))?;
            print_header = false;
        }

        printer
            .frame(&elements, &names)
            .map_err(|err| io_error("write failed", err))?;

        if args.frames.is_some_and(|frames| printer.frames() >= frames) {
            break;
        }
    }

    info!(frames = printer.frames(), "stream finished");
    Ok(SUCCESS)
}

/// `Device.channel` labels for every column of a frame.
fn header_columns(
    elements: &[AnyElement],
    names: &BTreeMap<u32, String>,
    request: &ChannelRequest,
) -> CliResult<Vec<String>> {
    let mut columns = Vec::new();
    for element in elements {
        let name = names.get(&element.key()).ok_or_else(|| {
            CliError::new(
                DATA_INVALID,
                format!("device {} missing from name map, unable to print header", element.key()),
            )
        })?;
        let labels = channel_labels(element, request);
        columns.extend(labels.into_iter().map(|label| format!("{name}.{label}")));
    }
    Ok(columns)
}

fn channel_labels(element: &AnyElement, request: &ChannelRequest) -> Vec<String> {
    let fixed: &[&str] = match element {
        AnyElement::Preview(_) => &PREVIEW_CHANNELS,
        AnyElement::Sensor(_) | AnyElement::Raw(_) => &SENSOR_CHANNELS,
        AnyElement::Configurable(_) => &[],
    };

    let labels: Vec<String> = if fixed.is_empty() {
        request
            .channels()
            .iter()
            .flat_map(|channel| {
                component_suffixes(channel)
                    .iter()
                    .map(move |suffix| format!("{channel}{suffix}"))
            })
            .collect()
    } else {
        fixed.iter().map(ToString::to_string).collect()
    };

    if labels.len() == element.len() {
        labels
    } else {
        (0..element.len()).map(|index| index.to_string()).collect()
    }
}

/// Component names of a Configurable channel.
fn component_suffixes(channel: &str) -> &'static [&'static str] {
    match channel {
        "Gq" | "Lq" | "Bq" | "c" => &["w", "x", "y", "z"],
        _ => &["x", "y", "z"],
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
