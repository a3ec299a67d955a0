use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use litesizer_services::{
    config, logging, routes,
    services::{file_processor::FileProcessor, litesizer::records_to_dataframe},
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "litesizer", about = "Extract Litesizer 500 xlsx exports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Extract every LS*.xlsx file in a directory and print the JSON report
    Extract {
        directory: PathBuf,
        /// Process files one after another
        #[arg(long)]
        sequential: bool,
        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Extract { directory, sequential, output } => {
            let processor = FileProcessor::from_config(&config).with_parallel(!sequential);
            let report = tokio::task::spawn_blocking(move || processor.process_dir(&directory))
                .await??;

            let records: Vec<_> = report.records().cloned().collect();
            tracing::info!("Extracted samples:\n{}", records_to_dataframe(&records)?);

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?,
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}

async fn serve(config: config::Config) -> Result<()> {
    let addr = config.bind_addr;

    // Build our application state
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .merge(routes::routes())
        .with_state(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
