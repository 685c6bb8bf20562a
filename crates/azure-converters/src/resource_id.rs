//! Gallery image resource-ID parsing.
//!
//! A gallery image version ID has a fixed shape:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Compute/galleries/{gallery}/images/{image}/versions/{version}
//! ```
//!
//! Each grammar is an ordered table of [`Rule`]s. The same table validates the
//! literal segments and locates the value that follows each keyword, so there
//! is no separate keyword scan after validation. Literals compare ASCII
//! case-insensitively. Empty segments are dropped before matching, which
//! absorbs the leading `/` and any doubled separators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{
    ConvertError, ConvertErrorKind, ConvertResult, COMPUTE_PROVIDER,
    GALLERY_IMAGE_ID_MIN_SEGMENTS, SHARED_GALLERY_IMAGE_ID_MIN_SEGMENTS,
};

/// One positional check in a resource-ID grammar.
#[derive(Debug, Clone, Copy)]
struct Rule {
    index: usize,
    literal: &'static str,
    /// The segment after the literal is a named value (read by `value_of`).
    has_value: bool,
    kind: RuleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    ResourceType,
    Keyword,
}

impl Rule {
    const fn resource_type(index: usize, literal: &'static str) -> Self {
        Self {
            index,
            literal,
            has_value: false,
            kind: RuleKind::ResourceType,
        }
    }

    /// A resource-type literal that is also followed by a named value.
    const fn resource_type_keyword(index: usize, literal: &'static str) -> Self {
        Self {
            index,
            literal,
            has_value: true,
            kind: RuleKind::ResourceType,
        }
    }

    const fn keyword(index: usize, literal: &'static str) -> Self {
        Self {
            index,
            literal,
            has_value: true,
            kind: RuleKind::Keyword,
        }
    }

    const fn literal(index: usize, literal: &'static str) -> Self {
        Self {
            index,
            literal,
            has_value: false,
            kind: RuleKind::Keyword,
        }
    }

    /// Every grammar's minimum segment count covers the value after its last
    /// keyword, and empty segments are already dropped, so only the literal
    /// itself needs checking here.
    fn check(&self, id: &str, segments: &[&str]) -> ConvertResult<()> {
        let found = segments.get(self.index).copied().unwrap_or_default();
        if found.eq_ignore_ascii_case(self.literal) {
            return Ok(());
        }
        Err(match self.kind {
            RuleKind::ResourceType => ConvertError::new(
                ConvertErrorKind::UnsupportedResourceType,
                format!(
                    "resource ID {} is not a {}/galleries resource: found '{}' at segment {}",
                    id, COMPUTE_PROVIDER, found, self.index
                ),
            ),
            RuleKind::Keyword => ConvertError::new(
                ConvertErrorKind::UnexpectedSegment,
                format!(
                    "resource ID {}: expected '{}' at segment {}, found '{}'",
                    id, self.literal, self.index, found
                ),
            ),
        })
    }
}

/// Checks run in this order; the first failure is reported.
const GALLERY_IMAGE_RULES: [Rule; 7] = [
    Rule::resource_type(5, COMPUTE_PROVIDER),
    Rule::resource_type_keyword(6, "galleries"),
    Rule::keyword(0, "subscriptions"),
    Rule::keyword(2, "resourceGroups"),
    Rule::literal(4, "providers"),
    Rule::keyword(8, "images"),
    Rule::keyword(10, "versions"),
];

const SHARED_GALLERY_IMAGE_RULES: [Rule; 3] = [
    Rule::keyword(0, "SharedGalleries"),
    Rule::keyword(2, "Images"),
    Rule::keyword(4, "Versions"),
];

/// Splits on `/`, drops empty segments and checks the generic shape.
fn split_segments(id: &str, min_segments: usize) -> ConvertResult<Vec<&str>> {
    if id.is_empty() {
        return Err(ConvertError::empty_id());
    }
    if !id.starts_with('/') {
        return Err(ConvertError::missing_leading_slash(id));
    }
    let segments: Vec<&str> = id.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < min_segments {
        return Err(ConvertError::too_few_segments(id, min_segments, segments.len()));
    }
    Ok(segments)
}

fn validate<'a>(id: &'a str, min_segments: usize, rules: &[Rule]) -> ConvertResult<Vec<&'a str>> {
    let segments = split_segments(id, min_segments)?;
    for rule in rules {
        rule.check(id, &segments)?;
    }
    Ok(segments)
}

/// Value following `keyword` in a grammar that has already validated `segments`.
fn value_of(segments: &[&str], rules: &[Rule], keyword: &str) -> String {
    rules
        .iter()
        .find(|r| r.has_value && r.literal == keyword)
        .and_then(|r| segments.get(r.index + 1))
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Validate a gallery image version ID and return its non-empty segments in order.
pub fn parse_image_id(id: &str) -> ConvertResult<Vec<&str>> {
    validate(id, GALLERY_IMAGE_ID_MIN_SEGMENTS, &GALLERY_IMAGE_RULES)
}

// ─── Compute gallery ────────────────────────────────────────────────

/// Typed fields of a compute gallery image version ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageId {
    pub subscription_id: String,
    pub resource_group: String,
    pub gallery: String,
    pub image: String,
    pub version: String,
}

impl GalleryImageId {
    pub fn parse(id: &str) -> ConvertResult<Self> {
        let segments = parse_image_id(id)?;
        let rules = &GALLERY_IMAGE_RULES;
        Ok(Self {
            subscription_id: value_of(&segments, rules, "subscriptions"),
            resource_group: value_of(&segments, rules, "resourceGroups"),
            gallery: value_of(&segments, rules, "galleries"),
            image: value_of(&segments, rules, "images"),
            version: value_of(&segments, rules, "versions"),
        })
    }
}

impl FromStr for GalleryImageId {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GalleryImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/galleries/{}/images/{}/versions/{}",
            self.subscription_id,
            self.resource_group,
            COMPUTE_PROVIDER,
            self.gallery,
            self.image,
            self.version
        )
    }
}

// ─── Shared gallery ─────────────────────────────────────────────────

/// Typed fields of a directly shared gallery image version ID
/// (`/SharedGalleries/{gallery}/Images/{image}/Versions/{version}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedGalleryImageId {
    pub gallery: String,
    pub image: String,
    pub version: String,
}

impl SharedGalleryImageId {
    pub fn parse(id: &str) -> ConvertResult<Self> {
        let rules = &SHARED_GALLERY_IMAGE_RULES;
        let segments = validate(id, SHARED_GALLERY_IMAGE_ID_MIN_SEGMENTS, rules)?;
        Ok(Self {
            gallery: value_of(&segments, rules, "SharedGalleries"),
            image: value_of(&segments, rules, "Images"),
            version: value_of(&segments, rules, "Versions"),
        })
    }
}

impl FromStr for SharedGalleryImageId {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SharedGalleryImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/SharedGalleries/{}/Images/{}/Versions/{}",
            self.gallery, self.image, self.version
        )
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
