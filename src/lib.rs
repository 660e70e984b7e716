//! `simgen` - generation pipeline for interactive educational simulations.
//!
//! Given a teacher's request (subject, topic, audience, adjustable
//! parameters, devices, optionally uploaded reference material), this crate
//! builds a multimodal prompt, drives an ordered fallback chain of Gemini
//! model variants, and parses the delimited response into three deliverables:
//! a self-contained HTML simulation, practice questions and a teacher guide.
//!
//! The pipeline is stateless and reentrant; credentials are passed per call.
//!
//! # Example
//!
//! ```rust,no_run
//! use simgen::{generate_simulation_content, GeminiModel, GenerationRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = GenerationRequest::from_topic("Vật lý", "Con lắc đơn", "Lớp 10")
//!     .with_adjustable_parameters("chiều dài dây, góc lệch");
//!
//! let content =
//!     generate_simulation_content(&request, "your-api-key", GeminiModel::default()).await?;
//! println!("{}", content.simulation_markup);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod executor;
pub mod extract;
pub mod gemini;
pub mod generator;
pub mod models;
pub mod prompt;
pub mod reference;
pub mod request;

pub use error::{AttemptError, GenerateError};
pub use executor::{execute_chain, ModelInvoker};
pub use extract::{parse_generated, GeneratedContent};
pub use gemini::GeminiClient;
pub use generator::{generate, generate_simulation_content};
pub use models::{FallbackChain, GeminiModel, DEFAULT_FALLBACK_ORDER};
pub use prompt::{build_prompt, PromptPart, PromptPayload};
pub use reference::{normalize_uploads, NormalizeError, RawUpload, Reference, UploadData};
pub use request::{GenerationMode, GenerationRequest};
