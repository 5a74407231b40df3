//! Context block rendering and budget-constrained assembly.

use tracing::debug;

use ragline_chunk::split_sentences;
use ragline_core::{ContextBlock, PromptConfig, PromptMessage, RankedContext, TokenCounter};

/// Fixed system message.
const SYSTEM_PROMPT: &str = "You are an assistant faithful to the facts. Ground every answer in \
the provided context; if the context does not contain the answer, say you do not know rather \
than inventing one. End your answer by listing the source numbers you cited.";

/// Fixed instruction suffix appended after the context blocks.
const INSTRUCTION_SUFFIX: &str = "Instructions: answer strictly within the context above.";

/// Collapse whitespace and cap the text length.
///
/// Texts over `max_chars` are truncated at sentence boundaries, never
/// mid-sentence; the hard character cut is the fallback when not even one
/// whole sentence fits under the cap.
pub fn compress_text(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let sentences = split_sentences(&collapsed);
    let mut kept: Vec<String> = Vec::new();
    let mut length = 0usize;

    for sentence in sentences {
        let sentence_len = sentence.chars().count();
        // A joining space precedes every sentence after the first.
        let added = if kept.is_empty() { sentence_len } else { sentence_len + 1 };
        if length + added > max_chars {
            break;
        }
        length += added;
        kept.push(sentence);
    }

    if kept.is_empty() {
        // No sentence boundary under the cap: hard character cut.
        return collapsed.chars().take(max_chars).collect();
    }

    kept.join(" ")
}

/// Render one ranked context into a numbered citation block.
pub fn render_block(index: usize, context: &RankedContext, max_chars: usize) -> ContextBlock {
    let body = compress_text(&context.payload.text, max_chars);

    let mut meta: Vec<String> = vec![format!("source: {}", context.payload.source)];
    if let Some(title) = &context.payload.title {
        meta.push(format!("title: {}", title));
    }
    if let Some(page) = context.payload.page {
        meta.push(format!("page: {}", page));
    }
    meta.push(format!("chunk {}", context.payload.chunk_id));

    ContextBlock {
        index,
        rendered: format!("[{}] {}\n({})", index, body, meta.join(", ")),
        source: context.payload.source.clone(),
    }
}

/// An assembled prompt: the message pair plus the blocks that survived
/// the budget.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    /// Ordered system/user messages for the generator.
    pub messages: Vec<PromptMessage>,

    /// Context blocks included in the user message, in citation order.
    pub blocks: Vec<ContextBlock>,
}

/// Packs ranked contexts into a token-budgeted message pair.
pub struct PromptAssembler {
    config: PromptConfig,
}

impl PromptAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Assemble the prompt for `query_text` under `budget` tokens.
    ///
    /// Drops the last (lowest-ranked) block and re-renders while the
    /// counted prompt exceeds the budget; each iteration strictly reduces
    /// the block count, so the loop terminates. If not even one block
    /// fits, the zero-block prompt (query plus instructions) is returned
    /// rather than an error.
    pub fn assemble(
        &self,
        query_text: &str,
        contexts: &[RankedContext],
        counter: &dyn TokenCounter,
        budget: usize,
    ) -> AssembledPrompt {
        let mut count = contexts.len();

        loop {
            let blocks: Vec<ContextBlock> = contexts[..count]
                .iter()
                .enumerate()
                .map(|(i, ctx)| render_block(i + 1, ctx, self.config.max_block_chars))
                .collect();

            let messages = self.render_messages(query_text, &blocks);
            let tokens: usize = messages.iter().map(|m| counter.count_tokens(&m.content)).sum();

            if tokens <= budget || count == 0 {
                if count < contexts.len() {
                    debug!(
                        "Dropped {} context blocks to fit budget {}",
                        contexts.len() - count,
                        budget
                    );
                }
                return AssembledPrompt { messages, blocks };
            }

            count -= 1;
        }
    }

    /// Assemble using the configured default token budget.
    pub fn assemble_default(
        &self,
        query_text: &str,
        contexts: &[RankedContext],
        counter: &dyn TokenCounter,
    ) -> AssembledPrompt {
        self.assemble(query_text, contexts, counter, self.config.token_budget)
    }

    fn render_messages(&self, query_text: &str, blocks: &[ContextBlock]) -> Vec<PromptMessage> {
        let ctx = blocks
            .iter()
            .map(|b| b.rendered.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let user = format!(
            "# Question\n{}\n\n# Context (with sources)\n{}\n\n{}",
            query_text, ctx, INSTRUCTION_SUFFIX
        );

        vec![PromptMessage::system(SYSTEM_PROMPT), PromptMessage::user(user)]
    }
}
