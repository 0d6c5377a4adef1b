use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,})(.*)$").unwrap());
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:\d+\.|[-*])\s+(.*)$").unwrap());

/// Notion rejects rich text longer than this.
pub const MAX_TEXT_CHARS: usize = 2000;
/// Notion accepts at most this many children in a create-page call.
pub const MAX_BLOCKS: usize = 100;

const FENCE_MARKERS: &[&str] = &["```", "~~~"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    ListItem(String),
    Quote(String),
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } => text,
            Block::ListItem(t) | Block::Quote(t) | Block::Paragraph(t) => t,
        }
    }
}

/// Classify each non-blank line of `markdown` into a [`Block`], keeping at
/// most [`MAX_BLOCKS`] of them.
pub fn classify_lines(markdown: &str) -> Vec<Block> {
    markdown
        .lines()
        .filter_map(classify_line)
        .take(MAX_BLOCKS)
        .collect()
}

fn classify_line(raw: &str) -> Option<Block> {
    let line = raw.trim();

    if line.is_empty() {
        return None;
    }

    // ── Fence lines carry no content ──
    if FENCE_MARKERS.iter().any(|m| line.starts_with(m)) {
        return None;
    }

    // ── Heading: ## text / ### text (deeper collapses to 3) ──
    if let Some(caps) = HEADING_RE.captures(line) {
        let level = if caps[1].len() >= 3 { 3 } else { 2 };
        return Some(Block::Heading {
            level,
            text: truncate_text(caps[2].trim()),
        });
    }

    // ── List item: "1. x", "- x", "* x" ──
    if let Some(caps) = LIST_RE.captures(line) {
        return Some(Block::ListItem(truncate_text(caps[1].trim())));
    }

    // ── Quote: > text ──
    if let Some(rest) = line.strip_prefix('>') {
        return Some(Block::Quote(truncate_text(rest.trim())));
    }

    Some(Block::Paragraph(truncate_text(line)))
}

/// Cut `s` to at most [`MAX_TEXT_CHARS`] characters.
pub fn truncate_text(s: &str) -> String {
    match s.char_indices().nth(MAX_TEXT_CHARS) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels() {
        let blocks = classify_lines("## Title\n### Sub\n#### Deeper");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 2, text: "Title".into() },
                Block::Heading { level: 3, text: "Sub".into() },
                Block::Heading { level: 3, text: "Deeper".into() },
            ]
        );
    }

    #[test]
    fn single_hash_is_paragraph() {
        let blocks = classify_lines("# Top");
        assert_eq!(blocks, vec![Block::Paragraph("# Top".into())]);
    }

    #[test]
    fn list_items() {
        for line in ["- item", "* item", "1. item", "12.   item"] {
            let blocks = classify_lines(line);
            assert_eq!(blocks, vec![Block::ListItem("item".into())], "line: {line}");
        }
    }

    #[test]
    fn marker_without_space_is_paragraph() {
        let blocks = classify_lines("-dash\n1.5 percent");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("-dash".into()),
                Block::Paragraph("1.5 percent".into()),
            ]
        );
    }

    #[test]
    fn quote() {
        let blocks = classify_lines("> quoted");
        assert_eq!(blocks, vec![Block::Quote("quoted".into())]);
    }

    #[test]
    fn heading_wins_over_list() {
        let blocks = classify_lines("## - not a list");
        assert!(matches!(&blocks[0], Block::Heading { level: 2, text } if text == "- not a list"));
    }

    #[test]
    fn fences_and_blanks_skipped() {
        let md = "```rust\nlet x = 1;\n```\n\n   \n~~~\ntext";
        let blocks = classify_lines(md);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("let x = 1;".into()),
                Block::Paragraph("text".into()),
            ]
        );
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let blocks = classify_lines("   ##   Spaced   \n\t- tabbed");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 2, text: "Spaced".into() },
                Block::ListItem("tabbed".into()),
            ]
        );
    }

    #[test]
    fn long_line_truncated() {
        let line = "é".repeat(MAX_TEXT_CHARS + 500);
        let blocks = classify_lines(&line);
        assert_eq!(blocks[0].text().chars().count(), MAX_TEXT_CHARS);

        let item = format!("- {}", "x".repeat(5000));
        let blocks = classify_lines(&item);
        assert_eq!(blocks[0].text().chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn capped_at_max_blocks() {
        let md: String = (0..150).map(|i| format!("line {i}\n")).collect();
        let blocks = classify_lines(&md);
        assert_eq!(blocks.len(), MAX_BLOCKS);
        assert_eq!(blocks[99], Block::Paragraph("line 99".into()));
    }

    #[test]
    fn one_block_per_content_line() {
        let md = "a\n\nb\n```\nc\n\n\nd";
        assert_eq!(classify_lines(md).len(), 4);
    }

    #[test]
    fn mixed_document() {
        let blocks = classify_lines("## Intro\n\nHello world\n- point one\n> note");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 2, text: "Intro".into() },
                Block::Paragraph("Hello world".into()),
                Block::ListItem("point one".into()),
                Block::Quote("note".into()),
            ]
        );
    }

    #[test]
    fn empty_string() {
        assert!(classify_lines("").is_empty());
    }

    #[test]
    fn daily_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/2025-12-30.md").unwrap();
        let blocks = classify_lines(&md);
        assert!(blocks.iter().any(|b| matches!(b, Block::Heading { level: 2, .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Heading { level: 3, .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::ListItem(_))));
        assert!(blocks.iter().any(|b| matches!(b, Block::Quote(_))));
        assert!(blocks.iter().all(|b| !b.text().starts_with("```")));
    }

    #[test]
    fn long_fixture_capped() {
        let md = std::fs::read_to_string("tests/fixtures/long.md").unwrap();
        let blocks = classify_lines(&md);
        assert_eq!(blocks.len(), MAX_BLOCKS);
        assert!(blocks.iter().all(|b| b.text().chars().count() <= MAX_TEXT_CHARS));
    }
}
