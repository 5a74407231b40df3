//! Echo generator for dry runs.

use async_trait::async_trait;

use ragline_core::{Generator, PromptMessage, RaglineError, Result, Role};

/// Maximum characters of the user prompt echoed back.
const PREVIEW_CHARS: usize = 2000;

/// A generator that echoes the assembled prompt instead of answering.
///
/// Stands in when no model backend is configured, so the CLI can show
/// exactly what would be sent to a real generator.
pub struct EchoGenerator;

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, messages: &[PromptMessage]) -> Result<String> {
        let user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .ok_or_else(|| RaglineError::generation("prompt has no user message"))?;

        let preview: String = user.content.chars().take(PREVIEW_CHARS).collect();
        Ok(format!(
            "(no generation backend configured; assembled prompt follows)\n\n{}",
            preview
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echoes_user_message() {
        let messages = vec![
            PromptMessage::system("system text"),
            PromptMessage::user("# Question\nWhen is it due?"),
        ];
        let out = EchoGenerator.generate(&messages).await.unwrap();
        assert!(out.contains("When is it due?"));
        assert!(!out.contains("system text"));
    }

    #[tokio::test]
    async fn test_missing_user_message_is_error() {
        let messages = vec![PromptMessage::system("system only")];
        let err = EchoGenerator.generate(&messages).await.unwrap_err();
        assert!(matches!(err, RaglineError::Generation { .. }));
    }

    #[tokio::test]
    async fn test_preview_is_capped() {
        let messages = vec![PromptMessage::user("x".repeat(10_000))];
        let out = EchoGenerator.generate(&messages).await.unwrap();
        assert!(out.chars().count() < 2200);
    }
}
