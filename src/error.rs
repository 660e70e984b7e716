//! Error taxonomy for the generation pipeline.
//!
//! Two layers: [`AttemptError`] describes why one model attempt failed and
//! stays internal to the fallback loop; [`GenerateError`] is the terminal,
//! user-facing classification of a whole request. Attempt failures never
//! escape directly, they are folded into a `GenerateError` once the chain is
//! exhausted.

use thiserror::Error;

/// Failure of a single model attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Transport or HTTP-level failure reported by the backend.
    #[error("{message}")]
    Backend {
        /// HTTP status when the request reached the server.
        status_code: Option<u16>,
        message: String,
    },

    /// The call succeeded but the response carried no text candidates.
    #[error("Gemini API returned no text in the response candidates")]
    EmptyResponse,

    /// The response text carried no usable simulation HTML.
    #[error("Model trả về dữ liệu không hợp lệ (Missing HTML)")]
    MissingSimulationMarkup,
}

impl AttemptError {
    /// Whether this failure signals API quota exhaustion.
    ///
    /// Matches on the HTTP status when present, and on the `429` /
    /// `RESOURCE_EXHAUSTED` markers the Gemini error body carries otherwise.
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            AttemptError::Backend {
                status_code,
                message,
            } => {
                *status_code == Some(429)
                    || message.contains("429")
                    || message.contains("RESOURCE_EXHAUSTED")
            }
            _ => false,
        }
    }
}

/// Terminal outcome of a generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request failed validation before any model was called.
    #[error("Thiếu thông tin bắt buộc: {0}")]
    InvalidRequest(String),

    /// The chain was exhausted and the last failure was quota exhaustion.
    #[error("Đã dừng do lỗi quá tải (429 RESOURCE_EXHAUSTED). Hết quota API.")]
    QuotaExceeded,

    /// The chain was exhausted for any other reason; carries the last
    /// failure's message.
    #[error("Không thể tạo mô phỏng. Lỗi: {0}")]
    GenerationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_detected_from_status_code() {
        let err = AttemptError::Backend {
            status_code: Some(429),
            message: "too many requests".to_string(),
        };
        assert!(err.is_quota_exhausted());
    }

    #[test]
    fn test_quota_detected_from_message_markers() {
        for message in ["HTTP 429 returned", "RESOURCE_EXHAUSTED: quota"] {
            let err = AttemptError::Backend {
                status_code: None,
                message: message.to_string(),
            };
            assert!(err.is_quota_exhausted(), "not detected for {message:?}");
        }
    }

    #[test]
    fn test_other_failures_are_not_quota() {
        let err = AttemptError::Backend {
            status_code: Some(500),
            message: "internal error".to_string(),
        };
        assert!(!err.is_quota_exhausted());
        assert!(!AttemptError::EmptyResponse.is_quota_exhausted());
        assert!(!AttemptError::MissingSimulationMarkup.is_quota_exhausted());
    }

    #[test]
    fn test_display_messages() {
        let err = GenerateError::InvalidRequest("Chủ đề không được để trống".to_string());
        assert!(err.to_string().contains("Thiếu thông tin bắt buộc"));
        assert!(GenerateError::QuotaExceeded
            .to_string()
            .contains("RESOURCE_EXHAUSTED"));
    }
}
