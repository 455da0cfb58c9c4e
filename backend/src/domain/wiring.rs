//! Wiring diagrams attached to brands and models.
//!
//! Diagram images are held inline as base64 text. Decoding happens only when
//! the raw image is requested, so list and detail reads stay plain JSON.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// MIME type assumed when a diagram was stored without one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// A stored wiring diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WiringDiagram {
    pub id: i32,
    pub model_id: Option<i32>,
    pub brand_id: Option<i32>,
    #[schema(example = "48V controller harness")]
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    /// Base64-encoded image bytes.
    pub image_data: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub is_custom_drawing: bool,
    pub tags: Vec<String>,
}

/// Decoded diagram image ready to be written to a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl WiringDiagram {
    /// Decode the inline image, if one is stored.
    ///
    /// Returns `Ok(None)` when the diagram only references an external URL.
    pub fn image(&self) -> Result<Option<DiagramImage>, base64::DecodeError> {
        let Some(data) = self.image_data.as_deref() else {
            return Ok(None);
        };
        let bytes = STANDARD.decode(data)?;
        let mime_type = self
            .mime_type
            .clone()
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_owned());
        Ok(Some(DiagramImage { bytes, mime_type }))
    }
}

/// Creation payload for [`WiringDiagram`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewWiringDiagram {
    pub model_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub image_data: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i32>,
    pub image_url: Option<String>,
    pub is_custom_drawing: bool,
    pub tags: Vec<String>,
}

/// An uploaded image file, prior to encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl NewWiringDiagram {
    /// Attach an uploaded file, encoding it as base64 and recording its size.
    pub fn with_upload(mut self, upload: DiagramUpload) -> Self {
        // Uploads are capped well below i32::MAX by the multipart limit.
        self.file_size = i32::try_from(upload.bytes.len()).ok();
        self.image_data = Some(STANDARD.encode(&upload.bytes));
        self.file_name = upload.file_name;
        self.mime_type = upload.mime_type;
        self
    }
}

/// Optional predicates for listing diagrams. Set fields combine with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagramFilter {
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
}

impl DiagramFilter {
    pub fn matches(&self, diagram: &WiringDiagram) -> bool {
        self.brand_id.is_none_or(|id| diagram.brand_id == Some(id))
            && self.model_id.is_none_or(|id| diagram.model_id == Some(id))
    }
}
