//! Top-level generation orchestration.
//!
//! Validates the request, selects the instruction variant via the prompt
//! builder, constructs the fallback chain from the caller's preferred model,
//! and drives the executor. Only terminal errors cross this boundary;
//! per-attempt failures are absorbed inside the executor.

use crate::error::GenerateError;
use crate::executor::{execute_chain, ModelInvoker};
use crate::extract::GeneratedContent;
use crate::gemini::GeminiClient;
use crate::models::{FallbackChain, GeminiModel};
use crate::prompt::build_prompt;
use crate::request::GenerationRequest;

/// Runs the full pipeline against an arbitrary backend.
///
/// The pipeline is stateless and reentrant; serializing concurrent calls is
/// the caller's concern, as is any timeout around the attempts.
pub async fn generate<I>(
    request: &GenerationRequest,
    preferred_model: GeminiModel,
    invoker: &I,
) -> Result<GeneratedContent, GenerateError>
where
    I: ModelInvoker + ?Sized,
{
    request.validate()?;

    let chain = FallbackChain::new(preferred_model);
    tracing::debug!(chain = ?chain.models(), "fallback chain constructed");

    let payload = build_prompt(request)?;
    execute_chain(&chain, &payload, invoker).await
}

/// Convenience entry point over the Gemini REST API.
///
/// A fresh transport is constructed per call; the API key is supplied by the
/// caller each time and never cached by the pipeline.
pub async fn generate_simulation_content(
    request: &GenerationRequest,
    api_key: &str,
    preferred_model: GeminiModel,
) -> Result<GeneratedContent, GenerateError> {
    let client = GeminiClient::new(api_key);
    generate(request, preferred_model, &client).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttemptError;
    use crate::prompt::PromptPayload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingInvoker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelInvoker for CountingInvoker {
        async fn invoke(
            &self,
            _model: &GeminiModel,
            _payload: &PromptPayload,
        ) -> Result<String, AttemptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_invalid_request_skips_backend() {
        let invoker = CountingInvoker {
            calls: AtomicUsize::new(0),
        };
        let request = GenerationRequest::from_topic("Vật lý", "", "Lớp 10");

        let err = generate(&request, GeminiModel::default(), &invoker)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRequest(_)));
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_file_mode_without_references_skips_backend() {
        let invoker = CountingInvoker {
            calls: AtomicUsize::new(0),
        };
        let request = GenerationRequest::from_references("Vật lý", "Lớp 10", Vec::new());

        let err = generate(&request, GeminiModel::default(), &invoker)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRequest(_)));
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_request_walks_whole_chain() {
        let invoker = CountingInvoker {
            calls: AtomicUsize::new(0),
        };
        let request = GenerationRequest::from_topic("Vật lý", "Con lắc đơn", "Lớp 10");

        let err = generate(&request, GeminiModel::default(), &invoker)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::GenerationFailed(_)));
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 3);
    }
}
