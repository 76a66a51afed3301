//! Prompt composition for document risk analysis

use crate::models::ResponseLanguage;

const RISK_PROMPT: &str = include_str!("risk_prompt.md");

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values, not UTF-16 code units, so a character outside
/// the Basic Multilingual Plane (e.g. an emoji) counts once.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Embed the (already truncated) document and the answer language into the prompt.
pub fn build_risk_prompt(document: &str, language: ResponseLanguage) -> String {
    // Language goes in first so document text is never scanned for placeholders.
    RISK_PROMPT
        .replacen("{language}", language.label(), 1)
        .replacen("{document}", document, 1)
}
