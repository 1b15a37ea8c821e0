//! Roadmap renderer. Turns the backend's loosely structured roadmap text into
//! an ordered sequence of display blocks.
//!
//! The input is markdown-like but not markdown: `#`/`##`/`###` headings,
//! "Phase N" / "Step N" / "Sprint N" headings without a marker, `-`/`*`/`•`
//! bullets and plain lines. Consecutive bullets are grouped into one list;
//! any blank, heading or paragraph line closes the list in progress.

pub mod line;

use line::{classify, LineKind};

/// A single renderable unit of roadmap content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    Heading { text: String },
    List { items: Vec<String> },
    Paragraph { text: String },
    /// Stands in for the whole document when it produced no other block.
    EmptyState,
}

/// Renders roadmap text into display blocks.
///
/// Total over all strings: never fails, never returns an empty vector.
pub fn render(document: &str) -> Vec<DisplayBlock> {
    let mut blocks = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for raw in document.lines() {
        match classify(trim_line(raw)) {
            LineKind::Blank => flush_list(&mut pending, &mut blocks),
            LineKind::Heading(text) => {
                flush_list(&mut pending, &mut blocks);
                blocks.push(DisplayBlock::Heading {
                    text: text.to_string(),
                });
            }
            LineKind::Bullet(item) => pending.push(item.to_string()),
            LineKind::Paragraph(text) => {
                flush_list(&mut pending, &mut blocks);
                blocks.push(DisplayBlock::Paragraph {
                    text: text.to_string(),
                });
            }
        }
    }

    flush_list(&mut pending, &mut blocks);

    if blocks.is_empty() {
        blocks.push(DisplayBlock::EmptyState);
    }
    blocks
}

/// Whitespace trim that also drops byte-order marks.
fn trim_line(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn flush_list(pending: &mut Vec<String>, blocks: &mut Vec<DisplayBlock>) {
    if !pending.is_empty() {
        blocks.push(DisplayBlock::List {
            items: std::mem::take(pending),
        });
    }
}
