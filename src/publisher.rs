use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::notion::{CreatedPage, PageRequest};
use crate::parser::{self, ContentMode};
use crate::sources::{self, TitleStyle};

const NOTION_VERSION_HEADER: HeaderName = HeaderName::from_static("notion-version");

/// Per-run choices that are not credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    pub mode: ContentMode,
    pub title_style: TitleStyle,
    /// Max requests in flight; 1 means strictly sequential.
    pub concurrency: usize,
    /// Abort on transport errors and report any failure through the exit code.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published {
        title: String,
        page_id: Option<String>,
    },
    Rejected {
        title: String,
        status: u16,
        body: String,
    },
    Skipped {
        path: PathBuf,
        reason: String,
    },
}

/// Batch totals returned after completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishStats {
    pub total: usize,
    pub ok: usize,
    pub rejected: usize,
    pub skipped: usize,
    /// Transport errors, reported with a status line each.
    pub failed: usize,
    /// A strict run stopped starting new files after a transport error.
    pub aborted: bool,
}

impl PublishStats {
    pub fn has_failures(&self) -> bool {
        self.rejected + self.skipped + self.failed > 0
    }

    fn record(&mut self, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Published { .. } => self.ok += 1,
            PublishOutcome::Rejected { .. } => self.rejected += 1,
            PublishOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Assemble the page for one file. No I/O.
pub fn build_request(
    settings: &Settings,
    path: &Path,
    markdown: &str,
    date: NaiveDate,
    opts: &PublishOptions,
) -> PageRequest {
    let name = sources::file_name(path);
    PageRequest {
        title: sources::page_title(&name, opts.title_style, &settings.title_label),
        date,
        link: sources::source_link(&settings.link_base, path),
        blocks: parser::page_blocks(markdown, opts.mode, &settings.summary_marker),
    }
}

pub struct Publisher {
    client: reqwest::Client,
    endpoint: String,
    settings: Settings,
}

impl Publisher {
    /// Validates credentials and builds the HTTP client. Nothing is sent yet.
    pub fn new(settings: Settings) -> Result<Self> {
        let settings = settings.validate()?;

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", settings.token.trim());
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth)?);
        headers.insert(
            NOTION_VERSION_HEADER,
            HeaderValue::from_str(&settings.notion_version)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()?;
        let endpoint = format!("{}/v1/pages", settings.api_base.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// POST one page. Non-200 responses come back as `Rejected`, not errors.
    pub async fn send(&self, request: &PageRequest) -> Result<PublishOutcome> {
        let body = serde_json::to_vec(&request.to_body(&self.settings.database_id))?;
        debug!(
            title = %request.title,
            blocks = request.blocks.len(),
            bytes = body.len(),
            "sending create-page request"
        );

        let response = self.client.post(&self.endpoint).body(body).send().await?;
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    title = %request.title,
                    status = status.as_u16(),
                    "failed to read response body: {}",
                    e
                );
                String::new()
            }
        };

        if status == StatusCode::OK {
            let page_id = serde_json::from_str::<CreatedPage>(&text).ok().map(|p| p.id);
            info!(title = %request.title, page_id = ?page_id, "page created");
            Ok(PublishOutcome::Published {
                title: request.title.clone(),
                page_id,
            })
        } else {
            warn!(title = %request.title, status = status.as_u16(), "Notion rejected page");
            Ok(PublishOutcome::Rejected {
                title: request.title.clone(),
                status: status.as_u16(),
                body: text,
            })
        }
    }

    /// Read, convert and send one file. Read failures become `Skipped`.
    pub async fn publish(
        &self,
        path: &Path,
        date: NaiveDate,
        opts: &PublishOptions,
    ) -> Result<PublishOutcome> {
        let markdown = match read_source(path).await {
            Ok(md) => md,
            Err(e) => {
                warn!("{}", e);
                return Ok(PublishOutcome::Skipped {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let request = build_request(&self.settings, path, &markdown, date, opts);
        self.send(&request).await
    }
}

pub async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SyncError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Human-readable status line for one outcome.
pub fn status_line(outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Published { title, .. } => format!("Published to Notion: {}", title),
        PublishOutcome::Rejected { title, status, body } => {
            format!("Failed to publish {}: {}, {}", title, status, body)
        }
        PublishOutcome::Skipped { path, reason } => {
            format!("Skipped {}: {}", path.display(), reason)
        }
    }
}

/// Publish every watched file in `paths`, in order unless `concurrency > 1`.
pub async fn publish_all(
    publisher: Arc<Publisher>,
    paths: &[PathBuf],
    date: NaiveDate,
    opts: PublishOptions,
) -> Result<PublishStats> {
    let prefix = publisher.settings().watch_prefix.clone();
    let files: Vec<PathBuf> =
        sources::filter_publishable(paths.iter().map(PathBuf::as_path), &prefix)
            .into_iter()
            .map(Path::to_path_buf)
            .collect();

    let mut stats = PublishStats {
        total: files.len(),
        ..Default::default()
    };
    if files.is_empty() {
        println!("No files to publish.");
        return Ok(stats);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len}")?
            .progress_chars("=> "),
    );

    if opts.concurrency <= 1 {
        for path in &files {
            let result = publisher.publish(path, date, &opts).await;
            if handle_result(result, path, &opts, &mut stats, &pb) {
                break;
            }
        }
    } else {
        publish_pooled(publisher, files, date, opts, &mut stats, &pb).await;
    }

    pb.finish_and_clear();
    info!(
        "Published {} of {} files ({} rejected, {} skipped, {} failed)",
        stats.ok, stats.total, stats.rejected, stats.skipped, stats.failed
    );
    Ok(stats)
}

async fn publish_pooled(
    publisher: Arc<Publisher>,
    files: Vec<PathBuf>,
    date: NaiveDate,
    opts: PublishOptions,
    stats: &mut PublishStats,
    pb: &ProgressBar,
) {
    let semaphore = Arc::new(Semaphore::new(opts.concurrency));
    let (tx, mut rx) = tokio::sync::mpsc::channel(opts.concurrency * 2);

    for path in files {
        let publisher = Arc::clone(&publisher);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            // Closed semaphore means the batch was aborted.
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let result = publisher.publish(&path, date, &opts).await;
            let _ = tx.send((path, result)).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    // After an abort, requests already in flight still land on Notion, so
    // keep draining until every started task has reported.
    while let Some((path, result)) = rx.recv().await {
        if handle_result(result, &path, &opts, stats, pb) {
            semaphore.close();
        }
    }
}

/// Report one result. Returns true once the batch should stop starting files.
fn handle_result(
    result: Result<PublishOutcome>,
    path: &Path,
    opts: &PublishOptions,
    stats: &mut PublishStats,
    pb: &ProgressBar,
) -> bool {
    match result {
        Ok(outcome) => {
            pb.suspend(|| println!("{}", status_line(&outcome)));
            stats.record(&outcome);
        }
        Err(e) => {
            warn!("Publishing {} failed: {}", path.display(), e);
            pb.suspend(|| println!("Failed to publish {}: {}", path.display(), e));
            stats.failed += 1;
            if opts.strict {
                stats.aborted = true;
            }
        }
    }
    pb.inc(1);
    stats.aborted
}
