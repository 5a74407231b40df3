//! Core domain types for the retrieval and prompt-assembly pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// A chunk record as persisted in the vector index payload.
///
/// Produced by the chunker at ingest, immutable once created. `source` and
/// `chunk_id` together are not guaranteed globally unique across re-ingests;
/// the deduplicator's text-prefix key compensates for that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Chunk text content.
    #[serde(default)]
    pub text: String,

    /// Source document identifier (usually a file name or relative path).
    #[serde(default)]
    pub source: String,

    /// Index of this chunk within its source document (0-based).
    #[serde(default)]
    pub chunk_id: u32,

    /// Optional document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ChunkPayload {
    /// Create a new chunk payload.
    pub fn new(text: &str, source: &str, chunk_id: u32) -> Self {
        Self {
            text: text.to_string(),
            source: source.to_string(),
            chunk_id,
            title: None,
            page: None,
        }
    }

    /// Build a payload from a loose JSON mapping returned by the index.
    ///
    /// Each field defaults individually when absent or mistyped, so a single
    /// malformed candidate never aborts ranking of the rest.
    pub fn from_value(value: &Value) -> Self {
        Self {
            text: value
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            source: value
                .get("source")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            chunk_id: value
                .get("chunk_id")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32,
            title: value
                .get("title")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            page: value.get("page").and_then(Value::as_u64).map(|p| p as u32),
        }
    }
}

/// A point handed to the vector index at ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPoint {
    /// Unique identifier (ULID).
    pub id: Ulid,

    /// Embedding vector.
    pub vector: Vec<f32>,

    /// Chunk payload stored alongside the vector.
    pub payload: ChunkPayload,
}

impl IndexPoint {
    /// Create a new index point with a fresh ULID.
    pub fn new(vector: Vec<f32>, payload: ChunkPayload) -> Self {
        Self {
            id: Ulid::new(),
            vector,
            payload,
        }
    }
}

/// A raw hit from the vector index.
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    /// Similarity score as returned by the index.
    pub score: f32,

    /// Loose payload mapping; validated into [`ChunkPayload`] downstream.
    pub payload: Value,

    /// Raw vector, present when requested.
    pub vector: Option<Vec<f32>>,
}

/// A retrieval candidate, transient within one query's execution.
///
/// `score` is the raw ANN similarity; `vector` has the embedding
/// dimensionality (empty when the index withheld it, which cosine treats
/// as zero similarity).
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Raw ANN similarity score.
    pub score: f32,

    /// Validated chunk payload.
    pub payload: ChunkPayload,

    /// Candidate embedding vector.
    pub vector: Vec<f32>,
}

/// A candidate after diversification; the vector is no longer needed.
#[derive(Debug, Clone)]
pub struct RankedContext {
    /// Adjusted score (ANN similarity plus any lexical boost).
    pub score: f32,

    /// Chunk payload.
    pub payload: ChunkPayload,
}

/// One prompt-ready context unit. Ordering controls citation numbering.
#[derive(Debug, Clone)]
pub struct ContextBlock {
    /// Citation index (1-based).
    pub index: usize,

    /// Rendered block text, including the metadata line.
    pub rendered: String,

    /// Source identifier, kept for response metadata.
    pub source: String,
}

/// Message role in the generator conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A role-tagged message handed to the generator. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Message role.
    pub role: Role,

    /// Message content.
    pub content: String,
}

impl PromptMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
