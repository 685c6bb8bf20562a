//! Core types shared by the converters: errors, options and constants.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Error types ─────────────────────────────────────────────────────

/// Categorised error kinds for conversion failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConvertErrorKind {
    EmptyId,
    MissingLeadingSlash,
    InvalidResourceId,
    UnsupportedResourceType,
    UnexpectedSegment,
}

impl fmt::Display for ConvertErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Empty resource ID"),
            Self::MissingLeadingSlash => write!(f, "Malformed resource ID"),
            Self::InvalidResourceId => write!(f, "Invalid resource ID"),
            Self::UnsupportedResourceType => write!(f, "Unsupported resource type"),
            Self::UnexpectedSegment => write!(f, "Unexpected resource ID segment"),
        }
    }
}

/// Main error type for conversions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertError {
    pub kind: ConvertErrorKind,
    pub message: String,
}

impl ConvertError {
    pub fn new(kind: ConvertErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_id() -> Self {
        Self::new(ConvertErrorKind::EmptyId, "id cannot be empty")
    }

    pub fn missing_leading_slash(id: &str) -> Self {
        Self::new(
            ConvertErrorKind::MissingLeadingSlash,
            format!("id must start with '/': {}", id),
        )
    }

    pub fn too_few_segments(id: &str, expected: usize, found: usize) -> Self {
        Self::new(
            ConvertErrorKind::InvalidResourceId,
            format!(
                "invalid resource ID {}: expected at least {} segments, found {}",
                id, expected, found
            ),
        )
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ConvertError {}

impl From<ConvertError> for String {
    fn from(e: ConvertError) -> String {
        e.to_string()
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

// ─── Options ────────────────────────────────────────────────────────

/// What the image resolver does when an image resource ID does not parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageIdPolicy {
    /// Log the error and return the image with empty gallery fields.
    #[default]
    Lenient,
    /// Return the parse error to the caller.
    Strict,
}

/// Caller-tunable conversion behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertOptions {
    pub image_id_policy: ImageIdPolicy,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self {
            image_id_policy: ImageIdPolicy::Lenient,
        }
    }

    pub fn strict() -> Self {
        Self {
            image_id_policy: ImageIdPolicy::Strict,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Constants ──────────────────────────────────────────────────────

/// Resource provider namespace that owns compute galleries.
pub const COMPUTE_PROVIDER: &str = "Microsoft.Compute";

/// `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.Compute/galleries/{g}/images/{i}/versions/{v}`
pub const GALLERY_IMAGE_ID_MIN_SEGMENTS: usize = 12;

/// `/SharedGalleries/{g}/Images/{i}/Versions/{v}`
pub const SHARED_GALLERY_IMAGE_ID_MIN_SEGMENTS: usize = 6;

// ─── Tests ──────────────────────────────────────────────────────────
