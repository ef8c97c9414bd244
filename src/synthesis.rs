//! Final-answer synthesis for retrieval-augmented replies.

use crate::types::GenerationResult;
use std::collections::HashSet;

/// Append a "Sources:" block to a grounded answer.
///
/// Identity when the result carries no citations. Citations are deduplicated
/// by (title, uri) in first-seen order. When the answer text is empty the
/// citation block is emitted alone.
pub fn synthesize(result: &GenerationResult) -> String {
    if result.citations.is_empty() {
        return result.raw_text.clone();
    }

    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for citation in &result.citations {
        if seen.insert((citation.title.as_str(), citation.uri.as_str())) {
            lines.push(format!("- [{}]({})", citation.title, citation.uri));
        }
    }

    let sources = format!("Sources:\n{}", lines.join("\n"));
    if result.raw_text.is_empty() {
        sources
    } else {
        format!("{}\n\n{}", result.raw_text, sources)
    }
}
