use motionsdk_client::{ClientConfig, ProtocolClient};
use motionsdk_format::Service;

use crate::cmd::{ensure_connected, parse_timeout, InfoArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_fields, OutputFormat};

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ClientConfig {
        wait_timeout: parse_timeout(&args.timeout)?,
        ..ClientConfig::default()
    };
    let client = ProtocolClient::connect_with_config(&args.host, args.port, config);
    ensure_connected(&client, &args.host, args.port)?;

    let (host, port) = client.peer().unwrap_or((args.host.as_str(), args.port));
    let service = Service::ALL
        .into_iter()
        .find(|service| service.default_port() == port)
        .map_or_else(|| "unknown".to_string(), |service| service.to_string());

    let fields = [
        ("host", host.to_string()),
        ("port", port.to_string()),
        ("service", service),
        (
            "description",
            client.description().unwrap_or_default().to_string(),
        ),
        ("connected", client.is_connected().to_string()),
    ];
    print_fields(&fields, format);
    Ok(SUCCESS)
}
