//! Greedy token-aware chunker.

use tracing::debug;

use ragline_core::{ChunkPayload, ChunkingConfig};

use crate::sentence::split_sentences;

/// Fast length-based token estimate used at chunk-boundary decisions.
///
/// True token accounting happens later in the prompt assembler with the
/// real tokenizer; this heuristic only has to be cheap and monotonic in
/// text length.
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() as f64 / 1.8) as usize
}

/// Greedy sentence-accumulating chunker with suffix overlap.
///
/// Sentences are never split mid-sentence: a single sentence longer than
/// `target_tokens` becomes an oversized singleton chunk.
pub struct GreedyChunker {
    config: ChunkingConfig,
}

impl GreedyChunker {
    /// Create a chunker with the given configuration.
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split `text` into chunks.
    ///
    /// Chunks shorter than `min_chars` are silently dropped, not padded.
    /// Output order equals input order; empty input yields empty output.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let sentences = split_sentences(text);

        let mut chunks: Vec<String> = Vec::new();
        let mut cur: Vec<String> = Vec::new();
        let mut cur_tokens = 0usize;

        for sentence in sentences {
            let tokens = estimate_tokens(&sentence);

            if cur_tokens + tokens > self.config.target_tokens && !cur.is_empty() {
                self.flush(&cur, &mut chunks);

                // Seed the next buffer with a suffix overlap: trailing
                // sentences of the flushed buffer, in original order, while
                // the overlap estimate stays within budget.
                let mut overlapped: Vec<String> = Vec::new();
                let mut overlap_tokens = 0usize;
                for prev in cur.iter().rev() {
                    let t = estimate_tokens(prev);
                    if overlap_tokens + t > self.config.overlap_tokens {
                        break;
                    }
                    overlapped.insert(0, prev.clone());
                    overlap_tokens += t;
                }

                overlapped.push(sentence);
                cur_tokens = overlapped.iter().map(|s| estimate_tokens(s)).sum();
                cur = overlapped;
            } else {
                cur.push(sentence);
                cur_tokens += tokens;
            }
        }

        if !cur.is_empty() {
            self.flush(&cur, &mut chunks);
        }

        debug!("Chunked text into {} chunks", chunks.len());
        chunks
    }

    /// Chunk a document and attach source metadata with sequential ids.
    pub fn chunk_document(&self, text: &str, source: &str) -> Vec<ChunkPayload> {
        self.chunk(text)
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| ChunkPayload::new(&chunk, source, i as u32))
            .collect()
    }

    fn flush(&self, buffer: &[String], chunks: &mut Vec<String>) {
        let chunk = buffer.concat().trim().to_string();
        if chunk.chars().count() >= self.config.min_chars {
            chunks.push(chunk);
        }
    }
}
