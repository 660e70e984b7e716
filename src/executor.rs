//! Sequential fallback execution over a model chain.
//!
//! Attempts are strictly sequential: each model call must fully resolve
//! before the next starts. Parallel speculative calls would multiply billed
//! usage, and a predictable attempt order matters more here than latency.

use async_trait::async_trait;

use crate::error::{AttemptError, GenerateError};
use crate::extract::{parse_generated, GeneratedContent};
use crate::models::{FallbackChain, GeminiModel};
use crate::prompt::PromptPayload;

/// A backend that can run one generation call against one model.
///
/// Implementations surface every failure as an [`AttemptError`]; the
/// executor decides whether to advance the chain or give up.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Runs a single generation call and returns the raw response text.
    async fn invoke(
        &self,
        model: &GeminiModel,
        payload: &PromptPayload,
    ) -> Result<String, AttemptError>;
}

/// Walks the chain in order until one model yields parseable content.
///
/// The first success short-circuits; every failure, including a parser
/// failure on an otherwise successful call, is recorded and advances the
/// chain. On exhaustion the last failure classifies the terminal error.
pub async fn execute_chain<I>(
    chain: &FallbackChain,
    payload: &PromptPayload,
    invoker: &I,
) -> Result<GeneratedContent, GenerateError>
where
    I: ModelInvoker + ?Sized,
{
    let mut last_error: Option<AttemptError> = None;

    for model in chain.iter() {
        tracing::info!(model = %model, "attempting generation");

        let raw = match invoker.invoke(model, payload).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(model = %model, error = %err, "model call failed");
                last_error = Some(err);
                continue;
            }
        };

        match parse_generated(&raw) {
            Ok(content) => {
                tracing::info!(model = %model, "generation succeeded");
                return Ok(content);
            }
            Err(err) => {
                tracing::warn!(model = %model, error = %err, "response unusable");
                last_error = Some(err);
            }
        }
    }

    tracing::error!("all models in the fallback chain failed");
    match last_error {
        Some(err) if err.is_quota_exhausted() => Err(GenerateError::QuotaExceeded),
        Some(err) => Err(GenerateError::GenerationFailed(err.to_string())),
        None => Err(GenerateError::GenerationFailed(
            "Empty model chain".to_string(),
        )),
    }
}
