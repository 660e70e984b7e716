//! Model identifiers and the fallback chain.
//!
//! Typed identifiers prevent typos in model names while the `Custom` variant
//! keeps new Gemini variants usable without a code change. The fallback chain
//! is the ordered, duplicate-free list of models a generation request walks
//! through until one succeeds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error for model identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModelId(pub String);

impl fmt::Display for InvalidModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid model name '{}'. Expected prefix: gemini-",
            self.0
        )
    }
}

impl std::error::Error for InvalidModelId {}

/// Google Gemini model identifiers used by the generation pipeline.
///
/// # Examples
///
/// ```
/// use simgen::models::GeminiModel;
///
/// let model = GeminiModel::Flash3;
/// assert_eq!(model.as_api_id(), "gemini-3-flash-preview");
///
/// let model: GeminiModel = "gemini-2.5-flash".parse().unwrap();
/// assert_eq!(model, GeminiModel::Flash25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeminiModel {
    /// Gemini 3 Flash - fast and cheap, tried first by default
    Flash3,
    /// Gemini 3 Pro - balanced quality/latency
    Pro3,
    /// Gemini 2.5 Flash - stable fast model, last resort
    Flash25,
    /// Custom model (validated: must start with "gemini-")
    Custom(String),
}

impl Default for GeminiModel {
    fn default() -> Self {
        Self::Flash3
    }
}

impl GeminiModel {
    /// Returns the full API model identifier.
    pub fn as_api_id(&self) -> &str {
        match self {
            Self::Flash3 => "gemini-3-flash-preview",
            Self::Pro3 => "gemini-3-pro-preview",
            Self::Flash25 => "gemini-2.5-flash",
            Self::Custom(s) => s,
        }
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = InvalidModelId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flash" | "flash-3" | "gemini-3-flash" | "gemini-3-flash-preview" => Ok(Self::Flash3),
            "pro" | "pro-3" | "gemini-3-pro" | "gemini-3-pro-preview" => Ok(Self::Pro3),
            "flash-2.5" | "gemini-2.5-flash" => Ok(Self::Flash25),
            other => {
                if other.starts_with("gemini-") {
                    Ok(Self::Custom(other.to_string()))
                } else {
                    Err(InvalidModelId(s.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_api_id())
    }
}

/// Default fallback priority: fast/cheap first, then balanced, then stable.
pub const DEFAULT_FALLBACK_ORDER: [GeminiModel; 3] =
    [GeminiModel::Flash3, GeminiModel::Pro3, GeminiModel::Flash25];

/// An ordered, duplicate-free list of models to try in sequence.
///
/// Construction places the preferred model first, followed by
/// [`DEFAULT_FALLBACK_ORDER`] with the preferred entry removed from its
/// original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain(Vec<GeminiModel>);

impl FallbackChain {
    /// Builds the execution chain for a request.
    pub fn new(preferred: GeminiModel) -> Self {
        let mut chain = vec![preferred];
        for model in DEFAULT_FALLBACK_ORDER {
            if !chain.contains(&model) {
                chain.push(model);
            }
        }
        Self(chain)
    }

    /// The models in attempt order.
    pub fn models(&self) -> &[GeminiModel] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeminiModel> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new(GeminiModel::default())
    }
}
