//! Image dimensions supported by the generation service.

use serde::{Deserialize, Serialize};

/// Supported output dimensions.
///
/// Serialized as the API's size strings so stored metadata matches what
/// was sent to the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ImageSize {
    /// 1024x1024.
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    /// 1024x1536, vertical.
    #[serde(rename = "1024x1536")]
    Portrait,
    /// 1536x1024, horizontal.
    #[serde(rename = "1536x1024")]
    Landscape,
}

impl ImageSize {
    /// Returns the API string form ("1024x1024" etc.).
    pub fn api_value(&self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Portrait => "1024x1536",
            Self::Landscape => "1536x1024",
        }
    }

    /// Returns (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Square => (1024, 1024),
            Self::Portrait => (1024, 1536),
            Self::Landscape => (1536, 1024),
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_value())
    }
}
