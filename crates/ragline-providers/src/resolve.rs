//! Generator backend resolution.
//!
//! The configured generator mode is resolved into a trait object once at
//! startup; after this point the pipeline dispatches through `Generator`
//! and never re-inspects the configuration.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use ragline_core::{Generator, GeneratorConfig, RaglineError, Result};

use crate::echo::EchoGenerator;

/// Resolve a [`GeneratorConfig`] into a generator backend.
///
/// `Local` resolves to the echo backend: this build bundles no local
/// inference runtime, so prompts are echoed for inspection instead of
/// answered. `Hosted` fails with `ProviderInit` since no API client is
/// bundled either; the error carries the model name so misconfiguration
/// is visible at startup rather than at first request.
pub fn resolve_generator(config: &GeneratorConfig) -> Result<Arc<dyn Generator>> {
    match config {
        GeneratorConfig::Local { model_path, .. } => {
            if Path::new(model_path).exists() {
                warn!(
                    "Model file at {} found but no local inference runtime is bundled; \
                     prompts will be echoed",
                    model_path
                );
            }
            Ok(Arc::new(EchoGenerator))
        }
        GeneratorConfig::Hosted { model, .. } => Err(RaglineError::provider_init(
            "generator",
            format!("hosted model '{}' has no API backend in this build", model),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragline_core::{PromptMessage, ProviderCell};

    fn hosted() -> GeneratorConfig {
        GeneratorConfig::Hosted {
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: String::new(),
            max_new_tokens: 512,
        }
    }

    #[tokio::test]
    async fn test_local_resolves_to_echo() {
        let generator = resolve_generator(&GeneratorConfig::default()).unwrap();
        let out = generator
            .generate(&[PromptMessage::user("what is due?")])
            .await
            .unwrap();
        assert!(out.contains("what is due?"));
    }

    #[test]
    fn test_hosted_is_provider_init() {
        let err = resolve_generator(&hosted()).err().unwrap();
        match err {
            RaglineError::ProviderInit { provider, message } => {
                assert_eq!(provider, "generator");
                assert!(message.contains("gpt-4o-mini"));
            }
            other => panic!("expected ProviderInit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolution_through_provider_cell() {
        // A hosted failure leaves the cell empty; a later local config
        // fills it and the handle dispatches through the trait.
        let cell: ProviderCell<dyn Generator> = ProviderCell::new("generator");

        let err = cell
            .get_or_init(|| async { resolve_generator(&hosted()) })
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RaglineError::ProviderInit { .. }));
        assert!(cell.get().is_none());

        let generator = cell
            .get_or_init(|| async { resolve_generator(&GeneratorConfig::default()) })
            .await
            .unwrap();
        let out = generator
            .generate(&[PromptMessage::user("retry works")])
            .await
            .unwrap();
        assert!(out.contains("retry works"));
    }
}
