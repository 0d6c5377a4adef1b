use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use notion_sync::config::Settings;
use notion_sync::parser::ContentMode;
use notion_sync::publisher::{self, PublishOptions, Publisher};
use notion_sync::sources::TitleStyle;

#[derive(Parser)]
#[command(name = "notion_sync", about = "Publish Markdown files as Notion database pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one Notion page per watched Markdown file
    Publish {
        /// Page body: link only, summary, or full conversion
        #[arg(short, long, value_enum, default_value_t = ContentMode::Full)]
        mode: ContentMode,
        /// How the file name is turned into a page title
        #[arg(short, long, value_enum, default_value_t = TitleStyle::Prefix)]
        title_style: TitleStyle,
        /// Max requests in flight (1 = one file at a time)
        #[arg(short = 'j', long, default_value = "1")]
        concurrency: usize,
        /// Stop on network errors and exit non-zero if any file failed
        #[arg(long)]
        strict: bool,
        /// Repository-relative Markdown paths; unwatched paths are ignored
        files: Vec<PathBuf>,
    },
    /// Print the request body for one file without sending it
    Preview {
        #[arg(short, long, value_enum, default_value_t = ContentMode::Full)]
        mode: ContentMode,
        #[arg(short, long, value_enum, default_value_t = TitleStyle::Prefix)]
        title_style: TitleStyle,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Publish {
            mode,
            title_style,
            concurrency,
            strict,
            files,
        } => {
            let settings = Settings::from_env().context("failed to load settings")?;
            let publisher = Arc::new(Publisher::new(settings)?);
            let opts = PublishOptions {
                mode,
                title_style,
                concurrency: concurrency.max(1),
                strict,
            };

            let stats = publisher::publish_all(publisher, &files, today, opts).await?;
            if stats.total > 0 {
                println!(
                    "Done: {} files ({} published, {} rejected, {} skipped, {} failed) in {:.1}s",
                    stats.total,
                    stats.ok,
                    stats.rejected,
                    stats.skipped,
                    stats.failed,
                    t0.elapsed().as_secs_f64()
                );
            }
            if stats.aborted {
                println!("Stopped after a network error; remaining files were not attempted.");
            }
            if strict && stats.has_failures() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Preview {
            mode,
            title_style,
            file,
        } => {
            let settings = Settings::from_env().context("failed to load settings")?;
            let markdown = publisher::read_source(&file).await?;
            let opts = PublishOptions {
                mode,
                title_style,
                ..Default::default()
            };
            let request = publisher::build_request(&settings, &file, &markdown, today, &opts);
            let database_id = if settings.database_id.trim().is_empty() {
                "<NOTION_DATABASE_ID>"
            } else {
                settings.database_id.as_str()
            };
            let json = serde_json::to_string_pretty(&request.to_body(database_id))?;
            println!("{json}");
            Ok(())
        }
    }
}
