//! Gemini REST transport.
//!
//! Concrete [`ModelInvoker`] over the `generateContent` endpoint. The API key
//! is held per client instance and a fresh client is constructed for every
//! `generate` call, so credentials are never cached process-wide. Image
//! references travel as inline base64 data with their media type preserved.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::AttemptError;
use crate::executor::ModelInvoker;
use crate::models::GeminiModel;
use crate::prompt::{PromptPart, PromptPayload};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    fn build_request(payload: &PromptPayload) -> GenerateContentRequest {
        let parts = payload
            .parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part::Text { text: text.clone() },
                PromptPart::InlineData { media_type, data } => Part::InlineData {
                    inline_data: InlineDataPayload {
                        mime_type: media_type.clone(),
                        data: BASE64_STANDARD.encode(data),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part::Text {
                    text: payload.system_instruction.clone(),
                }],
            }),
        }
    }

    async fn send_request(
        &self,
        model: &GeminiModel,
        body: &GenerateContentRequest,
    ) -> Result<String, AttemptError> {
        let url = format!(
            "{BASE_URL}/{model}:generateContent?key={api_key}",
            model = model.as_api_id(),
            api_key = self.api_key
        );

        let response =
            self.client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|err| AttemptError::Backend {
                    status_code: None,
                    message: format!("Gemini API request failed: {err}"),
                })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let body_text = response.text().await.map_err(|err| AttemptError::Backend {
            status_code: None,
            message: format!("Failed to read Gemini response body: {err}"),
        })?;

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body_text).map_err(|err| AttemptError::Backend {
                status_code: None,
                message: format!("Failed to parse Gemini response: {err}"),
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelInvoker for GeminiClient {
    async fn invoke(
        &self,
        model: &GeminiModel,
        payload: &PromptPayload,
    ) -> Result<String, AttemptError> {
        let request = Self::build_request(payload);
        tracing::debug!(model = %model, parts = payload.parts.len(), "sending generateContent request");
        self.send_request(model, &request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AttemptError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(AttemptError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> AttemptError {
    // Quota errors must stay recognizable: keep the RESOURCE_EXHAUSTED status
    // text in the message when the body carries it.
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    AttemptError::Backend {
        status_code: Some(status.as_u16()),
        message,
    }
}
