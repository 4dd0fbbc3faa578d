//! s3etl CLI: configure the presign/list endpoints, upload files through a
//! presigned POST, and show the raw and processed file tables.
//!
//! Settings come from S3ETL_* environment variables (or `.env`); the endpoint
//! URLs persist in the store file (S3ETL_STORE_PATH).

use anyhow::Context;
use clap::{Parser, Subcommand};
use s3etl_api_client::{ConfigAction, RefreshOutcome, Session, UploadFile, UploadOutcome};
use s3etl_cli::{
    init_tracing, open_session, write_json, write_listing, ConsoleNotifier, ConsoleSubmitControl,
    OutputFormat,
};
use s3etl_core::{ClientConfig, FileStore};
use std::io;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "s3etl", about = "Upload files to the s3etl pipeline and list the results")]
struct Cli {
    /// Skip endpoint discovery when opening a session
    #[arg(long, global = true)]
    no_discover: bool,

    /// Output format for file tables and configuration
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore saved endpoints, discover fresh ones, and list files
    Open,
    /// Endpoint configuration: load, save, clear, or show
    Config {
        /// Action to run
        action: String,
        /// Presign endpoint URL to store (with `save`)
        #[arg(long)]
        presign: Option<String>,
        /// List endpoint URL to store (with `save`)
        #[arg(long)]
        list: Option<String>,
    },
    /// Upload a file through the presign endpoint
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
    },
    /// Show raw and processed files
    List,
}

fn print_listing(session: &Session<FileStore>, format: OutputFormat) -> anyhow::Result<()> {
    write_listing(session.tables(), format, &mut io::stdout().lock())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Invalid S3ETL_* configuration")?;

    let store = FileStore::open(&config.store_path).with_context(|| {
        format!(
            "Failed to open configuration store {}",
            config.store_path.display()
        )
    })?;

    let mut session = Session::new(
        &config,
        store,
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleSubmitControl),
    )
    .context("Failed to create HTTP client")?;

    tracing::debug!(
        base_url = %session.resolver().base_url(),
        store = %config.store_path.display(),
        "Session created"
    );

    match cli.command.unwrap_or(Commands::Open) {
        Commands::Open => {
            let discover = config.discover_on_start && !cli.no_discover;
            open_session(&mut session, discover, cli.format, &mut io::stdout().lock()).await?;
        }
        Commands::Config {
            action,
            presign,
            list,
        } => {
            session.restore();

            if action == "show" {
                match cli.format {
                    OutputFormat::Json => {
                        write_json(session.endpoints(), &mut io::stdout().lock())?
                    }
                    OutputFormat::Table => {
                        println!("presign: {}", session.endpoints().presign_url);
                        println!("list:    {}", session.endpoints().list_url);
                    }
                }
                return Ok(());
            }

            let action: ConfigAction = action.parse()?;
            if presign.is_some() || list.is_some() {
                if action != ConfigAction::Save {
                    anyhow::bail!("--presign and --list only apply to `config save`");
                }
                let endpoints = session.endpoints_mut();
                if let Some(url) = presign {
                    endpoints.presign_url = url;
                }
                if let Some(url) = list {
                    endpoints.list_url = url;
                }
            }

            session.apply(action).await?;
        }
        Commands::Upload { file } => {
            session.restore();
            let upload = UploadFile::from_path(&file).await?;
            match session.upload(upload).await? {
                UploadOutcome::Uploaded { .. } => print_listing(&session, cli.format)?,
                UploadOutcome::NotConfigured => {
                    anyhow::bail!("No presign endpoint configured")
                }
            }
        }
        Commands::List => {
            session.restore();
            match session.refresh().await? {
                RefreshOutcome::Rendered { .. } => print_listing(&session, cli.format)?,
                RefreshOutcome::NotConfigured => anyhow::bail!("No list endpoint configured"),
            }
        }
    }

    Ok(())
}
