//! Image records and image classification
//!
//! The fetcher hands over raw [`ImageCandidate`]s (embedded `<img>` elements and
//! site-icon `<link>` elements); this module decides which of them become
//! [`Image`] records.

mod classifier;

pub use classifier::{create_image, extract_images, is_valid_image_extension};

use serde::{Deserialize, Serialize};

/// Sentinel used when an image has no usable alt text
pub const NO_NAME: &str = "None";

/// An image found on a crawled page
///
/// Two images are equal only when every field matches, which is what lets the
/// same picture found twice on one page collapse into a single set entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Alt text, or `"None"`
    pub name: String,

    /// Host the image URL resolves to, without `www.`
    pub domain: String,

    /// True when the image URL contains `logo`
    pub is_logo: bool,

    /// True only for site-icon link elements
    pub is_favicon: bool,

    /// Absolute image URL
    pub url: String,
}

/// Which kind of element an image candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// `<img src=...>`
    Embedded,
    /// `<link rel="icon" href=...>` and friends
    SiteIcon,
}

/// An image-bearing element as seen by the page fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub kind: CandidateKind,

    /// Resolved absolute `src` (embedded) or `href` (site icon)
    pub source: String,

    /// The element's `alt` attribute, if any
    pub alt: Option<String>,
}

impl ImageCandidate {
    pub fn embedded(source: impl Into<String>, alt: Option<String>) -> Self {
        Self {
            kind: CandidateKind::Embedded,
            source: source.into(),
            alt,
        }
    }

    pub fn site_icon(source: impl Into<String>) -> Self {
        Self {
            kind: CandidateKind::SiteIcon,
            source: source.into(),
            alt: None,
        }
    }
}
