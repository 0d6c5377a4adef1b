use super::blocks::{truncate_text, Block};

/// Characters taken from the start of the document when no marker is found.
pub const FALLBACK_CHARS: usize = 200;

const SUMMARY_HEADING: &str = "Summary";

/// Text following `marker` up to the next blank-line paragraph break, or the
/// first [`FALLBACK_CHARS`] characters of the document.
pub fn extract_summary(markdown: &str, marker: &str) -> String {
    let text = markdown.replace("\r\n", "\n");

    if !marker.is_empty() {
        if let Some(pos) = text.find(marker) {
            let after = text[pos + marker.len()..].trim_start_matches([':', '：', ' ', '\t']);
            let after = after.trim_start_matches('\n');
            let paragraph = after.split("\n\n").next().unwrap_or("").trim();
            if !paragraph.is_empty() {
                return paragraph.to_string();
            }
        }
    }

    text.trim().chars().take(FALLBACK_CHARS).collect()
}

/// Fixed two-block body: a "Summary" heading and the summary paragraph.
pub fn summary_blocks(markdown: &str, marker: &str) -> Vec<Block> {
    let summary = extract_summary(markdown, marker);
    vec![
        Block::Heading {
            level: 2,
            text: SUMMARY_HEADING.to_string(),
        },
        Block::Paragraph(truncate_text(&summary)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_after_marker() {
        let md = "# 2025-12-30\n\n## Summary\nModels got faster.\nAgents too.\n\n## Details\nmore";
        assert_eq!(extract_summary(md, "Summary"), "Models got faster.\nAgents too.");
    }

    #[test]
    fn inline_marker_with_colon() {
        let md = "intro\n\nTL;DR: short and sweet\n\nrest";
        assert_eq!(extract_summary(md, "TL;DR"), "short and sweet");
    }

    #[test]
    fn fallback_when_marker_missing() {
        let md = format!("  {}", "a".repeat(500));
        let s = extract_summary(&md, "Summary");
        assert_eq!(s, "a".repeat(FALLBACK_CHARS));
    }

    #[test]
    fn fallback_when_marker_at_end() {
        let md = "Body text here.\n\nSummary";
        assert_eq!(extract_summary(md, "Summary"), md);
    }

    #[test]
    fn fallback_counts_chars_not_bytes() {
        let md = "日".repeat(300);
        assert_eq!(extract_summary(&md, "摘要").chars().count(), FALLBACK_CHARS);
    }

    #[test]
    fn crlf_documents() {
        let md = "Summary\r\nline one\r\n\r\nnext";
        assert_eq!(extract_summary(md, "Summary"), "line one");
    }

    #[test]
    fn two_fixed_blocks() {
        let blocks = summary_blocks("Summary: hello\n\nbody", "Summary");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 2, text: "Summary".into() },
                Block::Paragraph("hello".into()),
            ]
        );
    }

    #[test]
    fn daily_fixture_summary() {
        let md = std::fs::read_to_string("tests/fixtures/2025-12-30.md").unwrap();
        let s = extract_summary(&md, "Summary");
        assert!(s.starts_with("Three model releases"), "got: {s}");
        assert!(!s.contains("\n\n"));
    }
}
