//! Line classifier for roadmap text.

use std::sync::LazyLock;

use regex::Regex;

/// Headings the backend writes without a `#` marker, e.g. "Phase 2: Intermediate".
/// Only ASCII digits count as the phase number.
static NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:phase|step|sprint)\s+[0-9]+").expect("numbered heading pattern is valid")
});

const HASH_HEADING_PREFIXES: &[&str] = &["# ", "## ", "### "];
const BULLET_MARKERS: &[char] = &['-', '*', '•'];

/// What a single trimmed line contributes to the block sequence.
/// Borrowed text is already stripped of its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading(&'a str),
    Bullet(&'a str),
    Paragraph(&'a str),
}

/// Classifies an already-trimmed line. Heading detection runs before bullet detection.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }

    if HASH_HEADING_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return LineKind::Heading(line.trim_start_matches('#').trim_start());
    }

    if NUMBERED_HEADING.is_match(line) {
        return LineKind::Heading(line);
    }

    if let Some(item) = strip_bullet(line) {
        return LineKind::Bullet(item);
    }

    LineKind::Paragraph(line)
}

fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLET_MARKERS)?;
    rest.starts_with(' ').then(|| rest.trim_start())
}
