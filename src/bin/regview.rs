//! Regview command runner
//!
//! Runs one read or write against a serial Modbus device and prints the result.
//!
//! Usage: regview [--config regview.json] [--json] <function-code> <address> [args...]
//! Examples:
//!   regview 0x03 0x0004 4        # read 4 holding registers from 0x0004
//!   regview 0x10 4 1 0xFF b1010  # write three holding registers from 4
//!   regview 0x0F 0 1 0 1         # write three coils from 0

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use modbus_regview::{
    render_table, ClientTransport, Outcome, RegisterAccessService, SessionConfig,
};

#[derive(Debug, Parser)]
#[command(name = "regview", version, about = "Read and write named Modbus registers")]
struct Args {
    /// Session configuration file (JSON)
    #[arg(short, long, env = "REGVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Override the serial device from the configuration
    #[arg(short, long)]
    port: Option<String>,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Function code: 0x01-0x04 to read, 0x0F/0x10 to write
    function: String,

    /// Start address followed by a quantity (reads) or values (writes)
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(port) = args.port {
        config.serial.port = port;
    }

    let names = Arc::new(config.load_name_table()?);
    info!(
        "Connecting to {} (slave {}, {} byte order, {} named addresses)",
        config.serial.port,
        config.slave_id,
        config.endianness,
        names.len()
    );

    let transport = ClientTransport::open_serial(&config.serial, config.slave_id)?;
    let mut service = RegisterAccessService::from_config(transport, &config, names);

    let outcome = service.execute(&args.function, &args.args.join(" ")).await;

    if let Err(e) = service.transport_mut().close().await {
        warn!("Close error: {}", e);
    }

    match outcome? {
        Outcome::Rows(rows) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_table(&rows));
            }
        }
        Outcome::Written {
            function,
            address,
            count,
        } => {
            println!(
                "{}: wrote {} value(s) at {}",
                function,
                count,
                modbus_regview::to_hex_display(address)
            );
        }
    }

    Ok(())
}
