pub mod blocks;
pub mod summary;

use clap::ValueEnum;

use blocks::Block;

/// How much of the document ends up in the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ContentMode {
    /// Title, date and link only; no body.
    Link,
    /// A heading plus the extracted summary paragraph.
    Summary,
    /// Every line converted to a block.
    #[default]
    Full,
}

/// Build the page body for `markdown` under the given mode.
pub fn page_blocks(markdown: &str, mode: ContentMode, summary_marker: &str) -> Vec<Block> {
    match mode {
        ContentMode::Link => Vec::new(),
        ContentMode::Summary => summary::summary_blocks(markdown, summary_marker),
        ContentMode::Full => blocks::classify_lines(markdown),
    }
}
