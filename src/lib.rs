//! Publish Markdown files from a content repository as Notion database pages.

pub mod config;
pub mod error;
pub mod notion;
pub mod parser;
pub mod publisher;
pub mod sources;

pub use error::{Result, SyncError};
