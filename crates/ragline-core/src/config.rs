//! Configuration types for the ragline pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaglineConfig {
    /// Embedding provider configuration.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Vector index configuration.
    #[serde(default)]
    pub index: IndexConfig,

    /// Chunking configuration.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Retrieval and ranking configuration.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Prompt assembly configuration.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Generator configuration.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model identifier.
    #[serde(default = "default_embedding_model")]
    pub model_name: String,

    /// Batch size for document embedding.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Whether embeddings are L2-normalized (recommended for cosine).
    #[serde(default = "default_true")]
    pub normalize: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: default_embedding_model(),
            batch_size: 64,
            normalize: true,
        }
    }
}

/// Vector index connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Index port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 6333,
            collection: default_collection(),
        }
    }
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target estimated tokens per chunk.
    #[serde(default = "default_target_tokens")]
    pub target_tokens: usize,

    /// Estimated tokens of suffix overlap between adjacent chunks.
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,

    /// Minimum chunk length in characters; shorter chunks are dropped.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_tokens: 400,
            overlap_tokens: 60,
            min_chars: 150,
        }
    }
}

/// Retrieval and ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of contexts to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// MMR relevance/diversity trade-off; near 1.0 favors pure relevance.
    #[serde(default = "default_mmr_lambda")]
    pub mmr_lambda: f32,

    /// Additive score boost per lexical keyword hit.
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            mmr_lambda: 0.7,
            keyword_boost: 0.05,
        }
    }
}

/// Prompt assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Per-block character cap after whitespace compression.
    #[serde(default = "default_max_block_chars")]
    pub max_block_chars: usize,

    /// Token budget for the assembled prompt.
    #[serde(default = "default_token_budget")]
    pub token_budget: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_block_chars: 900,
            token_budget: 2300,
        }
    }
}

/// Generator configuration, resolved once at startup.
///
/// Tagged by `mode`; dispatch happens through the `Generator` trait, never
/// by re-inspecting these strings per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GeneratorConfig {
    /// Locally loaded model.
    Local {
        /// Model path or hub identifier.
        #[serde(default = "default_local_model")]
        model_path: String,

        /// Maximum tokens to generate.
        #[serde(default = "default_max_new_tokens")]
        max_new_tokens: usize,

        /// Sampling temperature.
        #[serde(default = "default_temperature")]
        temperature: f32,

        /// Nucleus sampling cutoff.
        #[serde(default = "default_top_p")]
        top_p: f32,
    },

    /// Hosted API model.
    Hosted {
        /// Hosted model name.
        model: String,

        /// Environment variable holding the API key.
        #[serde(default = "default_api_key_env")]
        api_key_env: String,

        /// Custom endpoint; empty means the provider default.
        #[serde(default)]
        base_url: String,

        /// Maximum tokens to generate.
        #[serde(default = "default_max_new_tokens")]
        max_new_tokens: usize,
    },
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::Local {
            model_path: default_local_model(),
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_batch_size() -> usize {
    64
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6333
}

fn default_collection() -> String {
    "rag_docs".to_string()
}

fn default_target_tokens() -> usize {
    400
}

fn default_overlap_tokens() -> usize {
    60
}

fn default_min_chars() -> usize {
    150
}

fn default_top_k() -> usize {
    5
}

fn default_mmr_lambda() -> f32 {
    0.7
}

fn default_keyword_boost() -> f32 {
    0.05
}

fn default_max_block_chars() -> usize {
    900
}

fn default_token_budget() -> usize {
    2300
}

fn default_local_model() -> String {
    "Qwen/Qwen2.5-0.5B-Instruct".to_string()
}

fn default_max_new_tokens() -> usize {
    512
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl RaglineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::RaglineError::Config {
                message: format!("Failed to parse config: {}", e),
            }
        })?;
        Ok(config)
    }

    /// Load configuration from default paths, falling back to defaults.
    pub fn load_default() -> crate::error::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("ragline").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let local_config = PathBuf::from("ragline.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        Ok(Self::default())
    }
}
