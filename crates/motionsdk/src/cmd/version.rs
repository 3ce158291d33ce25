use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("motionsdk {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: motionsdk");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("MOTIONSDK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "services: {}",
        motionsdk_format::Service::ALL
            .iter()
            .map(|service| format!("{}={}", service.name().to_lowercase(), service.default_port()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("console: {}", motionsdk_client::CONSOLE_PORT);

    Ok(SUCCESS)
}
