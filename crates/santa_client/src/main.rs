//! Santa client
//!
//! Command-line front end for drawing and looking up assignments.
//!
//! # Commands
//!
//! - `check` - Submit text: the reset keyword draws, a name looks up
//! - `show` - Load the assignment from the server or the local cache
//! - `import` - Upload the local assignment to an empty server

mod commands;

use clap::{Parser, Subcommand};
use santa_client::{
    ClientConfig, DrawClient, SyncMode, DEFAULT_CACHE_FILE, DEFAULT_SERVER_URL, RESET_KEYWORD,
};
use santa_core::{DrawConfig, Roster, DEFAULT_PARTICIPANTS};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Secret-Santa client with local cache and server sync.
#[derive(Parser)]
#[command(name = "santa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(global = true, long, env = "SANTA_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Never contact the server
    #[arg(global = true, long)]
    local_only: bool,

    /// Local cache file
    #[arg(global = true, long, default_value = DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// Participants, comma separated
    #[arg(global = true, long, value_delimiter = ',', default_values = DEFAULT_PARTICIPANTS)]
    participants: Vec<String>,

    /// Request timeout in seconds
    #[arg(global = true, long, default_value_t = 5)]
    timeout_secs: u64,

    /// Input that triggers a new draw
    #[arg(global = true, long, default_value = RESET_KEYWORD)]
    reset_keyword: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit text: the reset keyword draws anew, a name shows its pairing
    Check {
        /// Text to submit
        text: String,
    },

    /// Show the current assignment
    Show,

    /// Upload the local assignment to the server
    Import,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.local_only {
        SyncMode::LocalOnly
    } else {
        SyncMode::ServerSync
    };
    let config = ClientConfig::new(cli.server)
        .with_mode(mode)
        .with_cache_path(cli.cache)
        .with_draw(DrawConfig::new().with_roster(Roster::new(&cli.participants)?))
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_reset_keyword(cli.reset_keyword);
    let client = DrawClient::new(config);

    match cli.command {
        Commands::Check { text } => commands::check::run(&client, &text)?,
        Commands::Show => commands::show::run(&client)?,
        Commands::Import => commands::import::run(&client)?,
        Commands::Version => {
            println!("santa v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
