//! ragline-prompt - Token-budgeted prompt assembly
//!
//! Renders ranked contexts into numbered citation blocks and packs them,
//! together with the query and a fixed instruction suffix, into a
//! system/user message pair that fits a token budget. When the budget is
//! exceeded, the lowest-ranked blocks are dropped one at a time; the
//! assembler degrades to a zero-block prompt rather than failing.

mod assembler;

pub use assembler::{compress_text, render_block, AssembledPrompt, PromptAssembler};

// Re-export for convenience
pub use ragline_core::{ContextBlock, PromptConfig, PromptMessage, RankedContext};
