//! Zipfinder CLI - ZIP code to service provider lookup
//!
//! # Main Commands
//!
//! ```bash
//! zipfinder serve                   # Load reference tables and serve HTTP (port 8000)
//! zipfinder lookup 90001            # Print the by-zip response for one ZIP
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! zipfinder columns input.csv       # Show raw and normalized headers
//! zipfinder summary                 # Load everything and print the health report
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zipfinder::{
    load_snapshot, lookup, parse_csv_file_auto, parse_zip_query, server::start_server,
    DataPaths, HealthResponse, ProvidersByZipResponse, ServerConfig,
};

#[derive(Parser)]
#[command(name = "zipfinder")]
#[command(about = "Look up service providers operating in a ZIP code", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load reference tables and start the HTTP server
    Serve {
        #[command(flatten)]
        paths: DataPaths,

        #[command(flatten)]
        server: ServerConfig,
    },

    /// Print providers and counties for a ZIP code as JSON
    Lookup {
        /// ZIP code (3-10 characters)
        zip: String,

        #[command(flatten)]
        paths: DataPaths,
    },

    /// Show how a CSV file's headers normalize
    Columns {
        /// Input CSV file
        input: PathBuf,
    },

    /// Load reference tables and print the health report
    Summary {
        #[command(flatten)]
        paths: DataPaths,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zipfinder=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { paths, server } => cmd_serve(&paths, &server).await,
        Commands::Lookup { zip, paths } => cmd_lookup(&zip, &paths),
        Commands::Columns { input } => cmd_columns(&input),
        Commands::Summary { paths } => cmd_summary(&paths),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(paths: &DataPaths, server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(paths);
    tracing::info!(
        providers = snapshot.directory.len(),
        zips = snapshot.index.providers.len(),
        source = %snapshot.source,
        "reference data loaded"
    );
    start_server(server, snapshot).await?;
    Ok(())
}

fn cmd_lookup(zip: &str, paths: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    let zip = parse_zip_query(Some(zip))?;
    let snapshot = load_snapshot(paths);
    let response = ProvidersByZipResponse::from(lookup(&snapshot, &zip));
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn cmd_columns(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = parse_csv_file_auto(input)?;

    eprintln!("File: {}", input.display());
    eprintln!("   Encoding: {}", table.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(table.delimiter));
    eprintln!("   Rows: {}", table.len());

    for (raw, normalized) in table.raw_headers.iter().zip(&table.headers) {
        println!("{:<40} -> {}", format!("{:?}", raw), normalized);
    }
    Ok(())
}

fn cmd_summary(paths: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(paths);
    let report = HealthResponse::from(&snapshot);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
