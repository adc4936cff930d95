//! Inline citation annotation.
//!
//! Finds each source's citation in an answer and appends a clickable marker
//! `[n]` after every occurrence. Annotation is textual and best-effort: a
//! citation the model paraphrased will not be found.
//!
//! Guarantees:
//! - sources are processed in order, each pass running on the output of the
//!   previous one;
//! - text already claimed by an earlier pass, or by an existing marker, is
//!   never matched again;
//! - an occurrence already followed by a marker (or a literal `[k]` index) is
//!   skipped, so annotating annotated text changes nothing;
//! - a match never ends or starts in the middle of an alphanumeric token, so
//!   `[2011] ZALAC 7` does not tag `[2011] ZALAC 71`.

use crate::source::Source;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

const MARKER_CLASS: &str = "citation-marker";

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"<a href="#" class="citation-marker" data-source-index="(\d+)">\[\d+\]</a>"##)
        .expect("marker pattern is valid")
});

// Four-digit bracketed years such as `[2002]` are citations, not indices.
static FOLLOWING_MARK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"^\s*(?:\[\d{1,3}\]|<a href="#" class="citation-marker")"##)
        .expect("guard pattern is valid")
});

/// Renders the marker for the source at 0-based `index`.
pub fn render_marker(index: usize) -> String {
    format!(
        r##"<a href="#" class="{MARKER_CLASS}" data-source-index="{index}">[{}]</a>"##,
        index + 1
    )
}

/// Reads the 0-based source index out of a rendered marker.
pub fn parse_marker_index(marker: &str) -> Option<usize> {
    MARKER_RE
        .captures(marker)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Source indices of every marker in `text`, in document order.
pub fn marker_indices(text: &str) -> Vec<usize> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect()
}

/// Builds the match pattern for one citation string.
///
/// Case-insensitive, any run of whitespace inside the citation matches any
/// other run, and the citation may be wrapped in parentheses with padding
/// inside them. Returns `None` for a blank citation.
pub fn citation_pattern(citation: &str) -> Option<Regex> {
    let words: Vec<String> = citation.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let body = words.join(r"\s+");

    match RegexBuilder::new(&format!(r"\(\s*{body}\s*\)|{body}"))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("[Citation] Skipping citation {:?}: {}", citation, e);
            None
        }
    }
}

/// Annotates `answer` with a marker after each occurrence of each source's
/// display citation.
pub fn annotate_citations(answer: &str, sources: &[Source]) -> String {
    let mut annotator = Annotator::new(answer);

    for (index, source) in sources.iter().enumerate() {
        let Some(citation) = source.display_citation() else {
            continue;
        };
        if let Some(pattern) = citation_pattern(citation) {
            annotator.tag_occurrences(&pattern, index);
        }
    }

    annotator.text
}

struct Annotator {
    text: String,
    /// Byte ranges (in `text`) that later passes must not touch.
    claimed: Vec<Range<usize>>,
}

impl Annotator {
    fn new(text: &str) -> Self {
        let claimed = MARKER_RE.find_iter(text).map(|m| m.range()).collect();
        Self {
            text: text.to_string(),
            claimed,
        }
    }

    fn overlaps_claim(&self, range: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|claim| range.start < claim.end && claim.start < range.end)
    }

    fn tag_occurrences(&mut self, pattern: &Regex, index: usize) {
        let marker = render_marker(index);
        let mut out = String::with_capacity(self.text.len() + marker.len());
        let mut inserted_at = Vec::new();
        let mut new_claims = Vec::new();
        let mut last = 0;

        for m in pattern.find_iter(&self.text) {
            let range = m.range();
            if self.overlaps_claim(&range)
                || splits_token(&self.text, &range)
                || FOLLOWING_MARK_RE.is_match(&self.text[range.end..])
            {
                continue;
            }

            out.push_str(&self.text[last..range.end]);
            let start = out.len() - range.len();
            out.push_str(&marker);
            new_claims.push(start..out.len());
            inserted_at.push(range.end);
            last = range.end;
        }

        if inserted_at.is_empty() {
            return;
        }
        out.push_str(&self.text[last..]);

        let shift =
            |pos: usize| pos + marker.len() * inserted_at.iter().filter(|&&p| p <= pos).count();
        for claim in &mut self.claimed {
            *claim = shift(claim.start)..shift(claim.end);
        }
        self.claimed.extend(new_claims);
        self.text = out;
    }
}

fn splits_token(text: &str, range: &Range<usize>) -> bool {
    let matched = &text[range.clone()];
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    let first = matched.chars().next();
    let last = matched.chars().next_back();

    let joins = |a: Option<char>, b: Option<char>| {
        matches!((a, b), (Some(a), Some(b)) if a.is_alphanumeric() && b.is_alphanumeric())
    };
    joins(before, first) || joins(last, after)
}
