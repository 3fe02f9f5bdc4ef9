//! Santa server
//!
//! Serves the assignment API over HTTP.

use clap::Parser;
use santa_core::{DrawConfig, Roster, DEFAULT_MAX_ATTEMPTS, DEFAULT_PARTICIPANTS};
use santa_server::{AssignmentServer, ServerConfig, DEFAULT_DATA_FILE};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Serve the Secret-Santa assignment API.
#[derive(Parser, Debug)]
#[command(name = "santa-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// JSON file holding the assignment
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Participants, comma separated
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_PARTICIPANTS)]
    participants: Vec<String>,

    /// Maximum shuffles per draw
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let roster = Roster::new(&args.participants)?;
    let config = ServerConfig::new(SocketAddr::new(args.bind, args.port))
        .with_data_file(args.data_file)
        .with_draw(
            DrawConfig::new()
                .with_roster(roster)
                .with_max_attempts(args.max_attempts),
        );

    AssignmentServer::new(config).serve().await?;
    Ok(())
}
