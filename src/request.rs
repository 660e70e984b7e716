//! Generation request types and mode validation.

use crate::error::GenerateError;
use crate::reference::Reference;

/// How a generation request is grounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Driven by a free-text subject/topic description.
    #[default]
    TopicOnly,
    /// Driven primarily by uploaded reference material; the model infers the
    /// scientific theme from it.
    FileGrounded,
}

/// A single generation request, constructed fresh per submission and consumed
/// once. The pipeline never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// School subject, e.g. "Vật lý".
    pub subject: String,
    /// Free-text topic; required in topic-only mode.
    pub topic: String,
    /// Target audience / grade level, e.g. "Lớp 10".
    pub target_audience: String,
    /// Parameters the simulation should expose as interactive controls.
    pub adjustable_parameters: Option<String>,
    /// What the teacher wants students to observe.
    pub desired_outcome: Option<String>,
    /// Available classroom devices, in the teacher's order of preference.
    pub available_devices: Vec<String>,
    /// Normalized uploaded material; non-empty in file-grounded mode.
    pub references: Vec<Reference>,
    pub mode: GenerationMode,
}

impl GenerationRequest {
    /// A topic-only request with the required fields filled in.
    pub fn from_topic(
        subject: impl Into<String>,
        topic: impl Into<String>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            topic: topic.into(),
            target_audience: target_audience.into(),
            adjustable_parameters: None,
            desired_outcome: None,
            available_devices: Vec::new(),
            references: Vec::new(),
            mode: GenerationMode::TopicOnly,
        }
    }

    /// A file-grounded request built around uploaded references.
    pub fn from_references(
        subject: impl Into<String>,
        target_audience: impl Into<String>,
        references: Vec<Reference>,
    ) -> Self {
        Self {
            subject: subject.into(),
            topic: String::new(),
            target_audience: target_audience.into(),
            adjustable_parameters: None,
            desired_outcome: None,
            available_devices: Vec::new(),
            references,
            mode: GenerationMode::FileGrounded,
        }
    }

    pub fn with_adjustable_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.adjustable_parameters = Some(parameters.into());
        self
    }

    pub fn with_desired_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.desired_outcome = Some(outcome.into());
        self
    }

    pub fn with_devices(mut self, devices: Vec<String>) -> Self {
        self.available_devices = devices;
        self
    }

    /// Checks the mode-specific required fields.
    ///
    /// Runs before any backend call: an invalid request never reaches the
    /// fallback chain.
    pub fn validate(&self) -> Result<(), GenerateError> {
        match self.mode {
            GenerationMode::TopicOnly => {
                if self.topic.trim().is_empty() {
                    return Err(GenerateError::InvalidRequest(
                        "Chủ đề không được để trống".to_string(),
                    ));
                }
            }
            GenerationMode::FileGrounded => {
                if self.references.is_empty() {
                    return Err(GenerateError::InvalidRequest(
                        "Chưa có tài liệu nào được tải lên".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_request_valid() {
        let request = GenerationRequest::from_topic("Vật lý", "Con lắc đơn", "Lớp 10");
        assert_eq!(request.mode, GenerationMode::TopicOnly);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_topic_request_rejects_blank_topic() {
        let request = GenerationRequest::from_topic("Vật lý", "   ", "Lớp 10");
        let err = request.validate().unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRequest(_)));
    }

    #[test]
    fn test_file_request_requires_references() {
        let request = GenerationRequest::from_references("Hóa học", "Lớp 8", Vec::new());
        assert!(matches!(
            request.validate(),
            Err(GenerateError::InvalidRequest(_))
        ));

        let request = GenerationRequest::from_references(
            "Hóa học",
            "Lớp 8",
            vec![Reference::document("bai-giang.txt", "phản ứng oxi hóa")],
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_file_mode_does_not_need_topic() {
        let request = GenerationRequest::from_references(
            "Sinh học",
            "Lớp 11",
            vec![Reference::document("quang-hop.txt", "quang hợp")],
        );
        assert!(request.topic.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let request = GenerationRequest::from_topic("Toán học", "Phân số", "Lớp 4")
            .with_adjustable_parameters("tử số, mẫu số")
            .with_desired_outcome("so sánh hai phân số")
            .with_devices(vec!["Máy chiếu + Laptop".to_string()]);

        assert_eq!(
            request.adjustable_parameters.as_deref(),
            Some("tử số, mẫu số")
        );
        assert_eq!(request.available_devices.len(), 1);
    }
}
