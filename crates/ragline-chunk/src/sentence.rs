//! Sentence boundary splitting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Blank-line paragraph break.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("paragraph break regex"));

/// Sentence terminators: East-Asian full stops and Western ?/! marks.
const TERMINATORS: &[char] = &['。', '．', '！', '？', '?', '!'];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split text into sentences.
///
/// A sentence ends after each terminator character or at a blank-line
/// paragraph break, so a run like "?!" yields a one-character trailing
/// fragment. Fragments are trimmed and empty ones dropped; output order
/// equals input order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let mut buf = String::new();

        for c in paragraph.chars() {
            buf.push(c);
            if is_terminator(c) {
                let sentence = buf.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                buf.clear();
            }
        }

        let tail = buf.trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }

    sentences
}
