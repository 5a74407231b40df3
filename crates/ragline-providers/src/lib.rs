//! ragline-providers - Built-in pipeline providers
//!
//! This crate supplies working implementations of the core provider
//! traits: a deterministic hash embedder, an in-memory exact-scan vector
//! index, a heuristic token counter, and an echo generator. They back the
//! CLI and tests without requiring external model files or services.

mod echo;
mod hash;
mod memory;
mod resolve;

pub use echo::EchoGenerator;
pub use hash::{HashEmbedder, HeuristicTokenCounter};
pub use memory::InMemoryIndex;
pub use resolve::resolve_generator;
