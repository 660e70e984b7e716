//! Section extraction from raw model output.
//!
//! The model is instructed to wrap its three deliverables in literal
//! delimiter markers. Extraction is a two-stage pure function: a strict
//! non-greedy delimiter match first, then a fenced-code-block recovery pass
//! for the HTML section only. Questions and guide are non-critical and fall
//! back to fixed placeholder strings.

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AttemptError;

/// Delimiter markers, exactly as mandated in the system instructions.
pub const HTML_START: &str = "|||HTML_START|||";
pub const HTML_END: &str = "|||HTML_END|||";
pub const QUESTIONS_START: &str = "|||QUESTIONS_START|||";
pub const QUESTIONS_END: &str = "|||QUESTIONS_END|||";
pub const GUIDE_START: &str = "|||GUIDE_START|||";
pub const GUIDE_END: &str = "|||GUIDE_END|||";

/// Placeholder when the model produced no questions section.
pub const NO_QUESTIONS_PLACEHOLDER: &str = "Không có câu hỏi được tạo.";
/// Placeholder when the model produced no guide section.
pub const NO_GUIDE_PLACEHOLDER: &str = "Không có hướng dẫn được tạo.";

/// The three content fields of one successful generation. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Self-contained HTML simulation. Always non-empty.
    pub simulation_markup: String,
    /// Practice questions, or [`NO_QUESTIONS_PLACEHOLDER`].
    pub practice_questions: String,
    /// Teacher usage guide, or [`NO_GUIDE_PLACEHOLDER`].
    pub teacher_guide: String,
}

/// Extracts the three sections from raw generated text.
///
/// Fails with [`AttemptError::MissingSimulationMarkup`] only when no usable
/// HTML can be recovered; a missing questions or guide section degrades to
/// its placeholder instead.
pub fn parse_generated(raw: &str) -> Result<GeneratedContent, AttemptError> {
    let html = extract_delimited(raw, HTML_START, HTML_END);
    let questions = extract_delimited(raw, QUESTIONS_START, QUESTIONS_END);
    let guide = extract_delimited(raw, GUIDE_START, GUIDE_END);

    let mut candidate = html.unwrap_or_default();
    if candidate.is_empty() {
        debug!("no delimited HTML section, trying fenced code block recovery");
        candidate = extract_html_code_block(raw).unwrap_or_default();
    }
    // Models sometimes nest markdown fencing inside the delimiter region, so
    // strip residual fences from either source.
    let candidate = strip_residual_fences(&candidate);

    if candidate.is_empty() {
        return Err(AttemptError::MissingSimulationMarkup);
    }

    Ok(GeneratedContent {
        simulation_markup: candidate,
        practice_questions: questions.unwrap_or_else(|| NO_QUESTIONS_PLACEHOLDER.to_string()),
        teacher_guide: guide.unwrap_or_else(|| NO_GUIDE_PLACEHOLDER.to_string()),
    })
}

/// Non-greedy match of the shortest span between two literal markers,
/// trimmed.
fn extract_delimited(text: &str, start: &str, end: &str) -> Option<String> {
    let pattern = format!("(?s){}(.*?){}", regex::escape(start), regex::escape(end));
    let captures = Regex::new(&pattern).ok()?.captures(text)?;
    captures.get(1).map(|m| m.as_str().trim().to_string())
}

/// Recovery heuristic: the first ```html fenced block anywhere in the text.
fn extract_html_code_block(text: &str) -> Option<String> {
    let regex = Regex::new(r"(?s)```html\s*(.*?)```").ok()?;
    let captures = regex.captures(text)?;
    captures.get(1).map(|m| m.as_str().trim().to_string())
}

fn strip_residual_fences(candidate: &str) -> String {
    let mut out = candidate.trim();
    if let Some(rest) = out.strip_prefix("```html") {
        out = rest.trim_start();
    } else if let Some(rest) = out.strip_prefix("```") {
        out = rest.trim_start();
    }
    if let Some(rest) = out.strip_suffix("```") {
        out = rest.trim_end();
    }
    out.to_string()
}
