use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Opaque reference to an image: either a URL or an embedded
/// `data:<mime>;base64,<payload>` reference. The environment never decodes it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Mime type of an embedded reference.
    pub fn media_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?;
        let end = header.find([';', ','])?;
        Some(&header[..end])
    }
}

impl From<String> for ImageReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ImageReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.media_type() {
            Some(media_type) => write!(f, "<embedded {} image, {} bytes>", media_type, self.0.len()),
            None => write!(f, "{}", self.0),
        }
    }
}
