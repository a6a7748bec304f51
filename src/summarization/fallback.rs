//! Local extractive summarizer used when no provider answers.
//!
//! Keeps the leading sentences of the input verbatim. Texts without any
//! recognizable sentence terminator are cut to a fixed character budget.

use regex::Regex;

/// Character budget for texts without sentence terminators.
pub const FALLBACK_MAX_CHARS: usize = 200;

/// Suffix appended when the character budget truncates the text.
const ELLIPSIS: &str = "...";

/// Deterministic extractive summarizer. Holds no mutable state.
#[derive(Clone, Debug)]
pub struct ExtractiveSummarizer {
    boundary: Regex,
}

impl ExtractiveSummarizer {
    /// Compile the sentence boundary rule.
    ///
    /// # Errors
    /// Returns an error if the boundary pattern is invalid.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Terminal punctuation followed by whitespace.
            boundary: Regex::new(r"[.!?]\s+")?,
        })
    }

    /// Summarize `text` into at most `max_sentences` leading sentences.
    #[must_use]
    pub fn summarize(&self, text: &str, max_sentences: usize) -> String {
        let text = text.trim();
        if !has_terminator(text) {
            return truncate_chars(text);
        }

        // A trimmed text holding a terminator yields at least one segment.
        self.split_sentences(text)
            .into_iter()
            .take(max_sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split after every terminator that is followed by whitespace.
    /// The whitespace run is dropped and empty segments are discarded.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for found in self.boundary.find_iter(text) {
            // Terminators are single-byte ASCII, keep them with the sentence.
            let end = found.start() + 1;
            push_non_empty(&mut sentences, &text[start..end]);
            start = found.end();
        }
        push_non_empty(&mut sentences, &text[start..]);

        sentences
    }
}

/// First [`FALLBACK_MAX_CHARS`] characters, with an ellipsis when something was cut.
fn truncate_chars(text: &str) -> String {
    let mut chars = text.chars();
    let mut out: String = chars.by_ref().take(FALLBACK_MAX_CHARS).collect();
    if chars.next().is_some() {
        out.push_str(ELLIPSIS);
    }
    out
}

fn has_terminator(text: &str) -> bool {
    text.contains(['.', '!', '?'])
}

fn push_non_empty<'a>(sentences: &mut Vec<&'a str>, segment: &'a str) {
    if !segment.is_empty() {
        sentences.push(segment);
    }
}
