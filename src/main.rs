use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod fetch;
mod models;
mod parse;
mod report;
mod transform;

use config::{
    ExportConfig, DEFAULT_AS_OF, DEFAULT_LEGISLATORS_URL, DEFAULT_OUTPUT, DEFAULT_SOCIAL_MEDIA_URL,
};
use models::OutputRow;

#[derive(Parser)]
#[command(name = "congress-contacts")]
#[command(about = "Contact list of current members of Congress, one CSV row per member", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download both rosters and write the contact table
    Export {
        #[arg(long, env = "CONGRESS_LEGISLATORS_URL", default_value = DEFAULT_LEGISLATORS_URL)]
        legislators_url: String,
        #[arg(long, env = "CONGRESS_SOCIAL_MEDIA_URL", default_value = DEFAULT_SOCIAL_MEDIA_URL)]
        social_media_url: String,
        /// Directory the rosters are stored in while the run lasts
        #[arg(long, default_value = ".")]
        download_dir: PathBuf,
        #[arg(long, env = "CONGRESS_CONTACTS_OUT", default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        /// Drop members whose last term ended before this date
        #[arg(long, env = "CONGRESS_CONTACTS_AS_OF", default_value = DEFAULT_AS_OF)]
        as_of: NaiveDate,
    },
    /// Build the contact table from rosters already on disk
    Convert {
        #[arg(long)]
        legislators: PathBuf,
        #[arg(long)]
        social_media: Option<PathBuf>,
        #[arg(long, env = "CONGRESS_CONTACTS_OUT", default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        #[arg(long, env = "CONGRESS_CONTACTS_AS_OF", default_value = DEFAULT_AS_OF)]
        as_of: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let result = run(Cli::parse()).await;
    if let Err(err) = &result {
        if let Some(export_error) = err.downcast_ref::<error::ExportError>() {
            error!(stage = export_error.stage(), "run aborted");
        }
    }
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            legislators_url,
            social_media_url,
            download_dir,
            out,
            as_of,
        } => {
            let config = ExportConfig {
                legislators_url,
                social_media_url,
                download_dir,
                output: out,
                as_of,
            };
            let rows = export(&config).await?;
            print_summary(&rows, &config.output, config.as_of);
        }
        Commands::Convert {
            legislators,
            social_media,
            out,
            as_of,
        } => {
            let rows = convert(&legislators, social_media.as_deref(), &out, as_of)?;
            print_summary(&rows, &out, as_of);
        }
    }

    Ok(())
}

/// Downloads both rosters, then builds and writes the table.
///
/// The downloaded files are removed when this returns, whether or not it succeeded.
async fn export(config: &ExportConfig) -> anyhow::Result<Vec<OutputRow>> {
    info!(as_of = %config.as_of, out = %config.output.display(), "starting export");
    let client = reqwest::Client::new();

    let legislators_file = fetch::download_document(
        &client,
        &config.legislators_url,
        config.download_path(&config.legislators_url),
    )
    .await
    .context("failed to download legislator roster")?;
    let social_media_file = fetch::download_document(
        &client,
        &config.social_media_url,
        config.download_path(&config.social_media_url),
    )
    .await
    .context("failed to download social media roster")?;

    convert(
        legislators_file.path(),
        Some(social_media_file.path()),
        &config.output,
        config.as_of,
    )
}

fn convert(
    legislators_path: &Path,
    social_media_path: Option<&Path>,
    out: &Path,
    as_of: NaiveDate,
) -> anyhow::Result<Vec<OutputRow>> {
    let legislators = parse::load_legislators(legislators_path)
        .context("failed to load legislator roster")?;
    let social_media = match social_media_path {
        Some(path) => {
            parse::load_social_media(path).context("failed to load social media roster")?
        }
        None => Vec::new(),
    };

    let rows = transform::build_rows(&legislators, &social_media, as_of);
    info!(
        legislators = legislators.len(),
        current = rows.len(),
        "built contact rows"
    );

    report::write_csv_file(&rows, out).context("failed to write contact table")?;
    Ok(rows)
}

fn print_summary(rows: &[OutputRow], out: &Path, as_of: NaiveDate) {
    if rows.is_empty() {
        println!("No members serving as of {as_of}; wrote header only to {}.", out.display());
        return;
    }

    println!("Successfully created {} with {} entries.", out.display(), rows.len());
    let (senators, representatives) = report::chamber_counts(rows);
    println!("{senators} senators, {representatives} representatives and delegates");
    for summary in report::summarize_by_party(rows) {
        let party = if summary.party.is_empty() {
            "(none)"
        } else {
            summary.party.as_str()
        };
        println!("- {}: {}", party, summary.count);
    }
}
