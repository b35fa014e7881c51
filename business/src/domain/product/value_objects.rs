use serde::{Deserialize, Serialize};

/// A named colorway, e.g. `Red` / `#FF0000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    pub name: String,
    pub hex: String,
}

impl ProductColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// A stored product image.
///
/// `path` is the object store key and the only handle for deleting the blob,
/// so it always travels together with `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A raw file submitted with a product form, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Content type to store the blob with, falling back to a generic binary type.
    pub fn effective_content_type(&self) -> &str {
        if self.content_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            &self.content_type
        }
    }
}
