use clap::Parser;
use mdns_responder_application::use_cases::{ProcessQueryUseCase, RegisterServicesUseCase};
use mdns_responder_domain::config::LogFormat;
use mdns_responder_domain::CliOverrides;
use mdns_responder_infrastructure::mdns::{MdnsServer, UdpMulticastTransport};
use mdns_responder_infrastructure::system::SystemHostIdentity;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;

#[derive(Parser, Debug)]
#[command(name = "mdns-responder")]
#[command(version)]
#[command(about = "Multicast DNS responder advertising a host and its DNS-SD services")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Hostname to advertise as <NAME>.local
    #[arg(short = 'n', long, value_name = "NAME")]
    hostname: Option<String>,

    /// IPv4 address for the host A record
    #[arg(short = 'a', long)]
    address: Option<Ipv4Addr>,

    /// Interface address used to join the multicast group
    #[arg(short = 'i', long)]
    interface: Option<Ipv4Addr>,

    /// UDP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format '{}', expected text or json", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        hostname: cli.hostname,
        address: cli.address,
        interface: cli.interface,
        port: cli.port,
        log_level: cli.log_level,
        log_format: cli.log_format,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting mDNS responder v{}", env!("CARGO_PKG_VERSION"));

    let identity = Arc::new(SystemHostIdentity::new(config.server.interface));
    let responder = RegisterServicesUseCase::new(identity)
        .execute(&config)
        .await?;

    let transport = Arc::new(UdpMulticastTransport::bind(&config.server)?);
    let process_query =
        ProcessQueryUseCase::new(responder, transport, config.server.buffer_size);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let handled = MdnsServer::new(process_query)
        .with_cancellation(shutdown)
        .run()
        .await;

    info!(handled, "Responder shutdown complete");
    Ok(())
}
