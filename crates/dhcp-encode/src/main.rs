mod config;
mod message_file;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, OutputFormat};
use dhcp_wire::v4::DhcpMessageEncoder;
use dhcp_wire::v6::Dhcp6MessageEncoder;
use dhcp_wire::{OptionRegistry, WireBuffer};
use message_file::{Message, MessageFile};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "/etc/dhcp-encode/config.yaml";

/// DHCP message encoder - turns message descriptions into wire bytes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a message description file (YAML, or JSON with a .json extension)
    Encode {
        /// Message description file
        message: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Output format (overrides the configuration file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Buffer limit in bytes (overrides the configuration file)
        #[arg(long)]
        buffer_limit: Option<usize>,
    },
    /// List the options that can be given by name
    Options {
        /// Protocol version
        #[arg(value_parser = ["v4", "v6"])]
        protocol: String,
    },
}

fn load_config(path: &str) -> Config {
    if !std::path::Path::new(path).exists() {
        debug!("No configuration at {}, using defaults", path);
        return Config::default();
    }
    match Config::from_file(path) {
        Ok(cfg) => {
            info!("Loaded configuration from {}", path);
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration from {}: {}", path, e);
            info!("Using default configuration");
            Config::default()
        }
    }
}

fn encode(message: Message, limit: usize) -> Result<Vec<u8>> {
    let mut buf = WireBuffer::with_limit(limit);
    match message {
        Message::V4(mut message) => {
            info!("Encoding {}", message);
            DhcpMessageEncoder::new().encode(&mut buf, &mut message)?;
        }
        Message::V6(message) => {
            info!("Encoding {}", message);
            Dhcp6MessageEncoder::new().encode(&mut buf, &message)?;
        }
    }
    Ok(buf.freeze().to_vec())
}

fn list_options(protocol: &str) {
    let registry = if protocol == "v6" {
        OptionRegistry::v6()
    } else {
        OptionRegistry::v4()
    };
    for codec in registry.entries() {
        println!("{:>5}  {:<26} {:?}", codec.tag, codec.name, codec.kind);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for encoded output
    let default_filter = if cli.verbose {
        "dhcp_encode=debug,dhcp_wire=trace"
    } else {
        "dhcp_encode=info,dhcp_wire=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Options { protocol } => list_options(&protocol),
        Commands::Encode {
            message,
            output,
            format,
            buffer_limit,
        } => {
            let config = load_config(&cli.config);
            let limit = buffer_limit.unwrap_or(config.buffer_limit);
            let format = format.unwrap_or(config.output_format);

            let parsed = MessageFile::from_file(&message)?.into_message()?;
            let bytes = encode(parsed, limit)
                .with_context(|| format!("Failed to encode {}", message))?;
            info!("Encoded {} bytes", bytes.len());

            match output {
                Some(path) => {
                    let mut file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create {}", path))?;
                    output::write_output(&mut file, &bytes, format, config.hex_line_width)?;
                    info!("Wrote {}", path);
                }
                None => {
                    let stdout = std::io::stdout();
                    output::write_output(&mut stdout.lock(), &bytes, format, config.hex_line_width)?;
                }
            }
        }
    }

    Ok(())
}
