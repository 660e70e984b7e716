//! Normalized reference material for file-grounded generation.
//!
//! Uploaded files arrive in two shapes: images as raw bytes, documents (PDF
//! or plain text) as already-extracted text. PDF text extraction and file
//! reading stay on the caller's side; this module only classifies, validates
//! and normalizes. Base64 encoding of image bytes happens at the transport
//! boundary.

use thiserror::Error;

/// Maximum number of uploads accepted per request.
pub const MAX_UPLOAD_FILES: usize = 5;

/// Per-file size ceiling in bytes (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
const DOCUMENT_TYPES: [&str; 2] = ["application/pdf", "text/plain"];

/// Content of a single normalized reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceContent {
    /// Image bytes with their declared media type, forwarded inline to the
    /// model.
    Image { media_type: String, data: Vec<u8> },
    /// Extracted plain text of a PDF or text file, interpolated into the
    /// prompt.
    Document { text: String },
}

/// A single normalized uploaded file, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Original file name, used to label the material inside the prompt.
    pub display_name: String,
    pub content: ReferenceContent,
}

impl Reference {
    pub fn image(
        display_name: impl Into<String>,
        media_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            content: ReferenceContent::Image {
                media_type: media_type.into(),
                data,
            },
        }
    }

    pub fn document(display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            content: ReferenceContent::Document { text: text.into() },
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.content, ReferenceContent::Image { .. })
    }
}

/// Payload of a raw upload before normalization.
#[derive(Debug, Clone)]
pub enum UploadData {
    /// Raw file bytes (images).
    Binary(Vec<u8>),
    /// Extracted text (PDF after extraction, or plain text files).
    Text(String),
}

impl UploadData {
    fn len(&self) -> usize {
        match self {
            UploadData::Binary(bytes) => bytes.len(),
            UploadData::Text(text) => text.len(),
        }
    }
}

/// A raw upload as handed over by the caller's file layer.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub name: String,
    /// Declared MIME type, e.g. "image/png" or "application/pdf".
    pub media_type: String,
    pub data: UploadData,
}

/// Rejection reasons during upload normalization, one per offending file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Chỉ có thể tải tối đa {MAX_UPLOAD_FILES} file")]
    TooManyFiles,

    #[error("Định dạng file không được hỗ trợ: {media_type}")]
    UnsupportedMediaType { media_type: String },

    #[error("File \"{name}\" vượt quá 10MB")]
    FileTooLarge { name: String },

    /// Declared a document type but carried binary data (or the reverse).
    /// The caller's extraction layer is expected to have run already.
    #[error("File \"{name}\" có nội dung không khớp với định dạng khai báo")]
    ContentMismatch { name: String },
}

/// Validates and classifies raw uploads into [`Reference`] entries.
///
/// Enforces the file-count and per-file size ceilings, classifies by declared
/// media type, and rejects anything unsupported. Order is preserved; the
/// first offending file aborts the batch so the caller can surface a message
/// naming it.
pub fn normalize_uploads(uploads: Vec<RawUpload>) -> Result<Vec<Reference>, NormalizeError> {
    if uploads.len() > MAX_UPLOAD_FILES {
        return Err(NormalizeError::TooManyFiles);
    }

    let mut references = Vec::with_capacity(uploads.len());
    for upload in uploads {
        if upload.data.len() > MAX_UPLOAD_BYTES {
            return Err(NormalizeError::FileTooLarge { name: upload.name });
        }

        if IMAGE_TYPES.contains(&upload.media_type.as_str()) {
            match upload.data {
                UploadData::Binary(bytes) => {
                    references.push(Reference::image(upload.name, upload.media_type, bytes));
                }
                UploadData::Text(_) => {
                    return Err(NormalizeError::ContentMismatch { name: upload.name });
                }
            }
        } else if DOCUMENT_TYPES.contains(&upload.media_type.as_str()) {
            match upload.data {
                UploadData::Text(text) => {
                    references.push(Reference::document(upload.name, text));
                }
                UploadData::Binary(_) => {
                    return Err(NormalizeError::ContentMismatch { name: upload.name });
                }
            }
        } else {
            return Err(NormalizeError::UnsupportedMediaType {
                media_type: upload.media_type,
            });
        }
    }

    Ok(references)
}
