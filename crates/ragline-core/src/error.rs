//! Error types for the ragline pipeline.

use thiserror::Error;

/// Result type alias using RaglineError.
pub type Result<T> = std::result::Result<T, RaglineError>;

/// Errors that can occur in the ragline pipeline.
#[derive(Error, Debug)]
pub enum RaglineError {
    /// Query text was empty or whitespace-only.
    #[error("Empty query: query text must not be blank")]
    EmptyQuery,

    /// A provider handle failed to construct.
    ///
    /// Distinct from per-request failures: this means the process-lifetime
    /// embedder/generator could not be built at all.
    #[error("Provider '{provider}' failed to initialize: {message}")]
    ProviderInit { provider: String, message: String },

    /// Embedding call failed.
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// Vector index query or upsert failed.
    #[error("Index error: {message}")]
    Index { message: String },

    /// Generation call failed.
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Invalid argument provided.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RaglineError {
    /// Create a provider initialization error.
    pub fn provider_init(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderInit {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create an index error.
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
        }
    }

    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
