//! Input path filtering and per-file metadata.

use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

const MARKDOWN_EXT: &str = ".md";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TitleStyle {
    /// `<name>`
    Plain,
    /// `<label> - <name>`
    #[default]
    Prefix,
    /// `<name> - <label>`
    Suffix,
}

/// Repository-relative path with forward slashes and no leading `./`.
fn repo_path(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    s.trim_start_matches("./").to_string()
}

/// True if `path` sits under `prefix` and is a Markdown file.
pub fn is_publishable(path: &Path, prefix: &str) -> bool {
    let p = repo_path(path);
    p.starts_with(prefix) && p.ends_with(MARKDOWN_EXT)
}

/// Keep only publishable paths, preserving input order.
pub fn filter_publishable<'a, I>(paths: I, prefix: &str) -> Vec<&'a Path>
where
    I: IntoIterator<Item = &'a Path>,
{
    paths
        .into_iter()
        .filter(|p| {
            let keep = is_publishable(p, prefix);
            if !keep {
                debug!(path = %p.display(), prefix, "ignoring path");
            }
            keep
        })
        .collect()
}

/// File name without directory or `.md` extension, e.g. `2025-12-30`.
pub fn file_name(path: &Path) -> String {
    let p = repo_path(path);
    let base = p.rsplit('/').next().unwrap_or(&p);
    base.strip_suffix(MARKDOWN_EXT).unwrap_or(base).to_string()
}

pub fn page_title(name: &str, style: TitleStyle, label: &str) -> String {
    match style {
        TitleStyle::Plain => name.to_string(),
        TitleStyle::Prefix => format!("{} - {}", label, name),
        TitleStyle::Suffix => format!("{} - {}", name, label),
    }
}

/// Link to the file in its source repository.
pub fn source_link(base: &str, path: &Path) -> String {
    format!("{}/{}", base.trim_end_matches('/'), repo_path(path))
}
