use crate::image::{CandidateKind, Image, ImageCandidate, NO_NAME};
use crate::url::get_domain;
use std::collections::HashSet;

/// Extensions recognized as images
const IMAGE_EXTENSIONS: &[&str] = &[".gif", ".ico", ".jpg", ".jpeg", ".png", ".svg"];

/// Returns true if the URL ends with a recognized image extension
///
/// # Examples
///
/// ```
/// use image_finder::image::is_valid_image_extension;
///
/// assert!(is_valid_image_extension("test-image.svg"));
/// assert!(!is_valid_image_extension("https://example.com/photo.webp"));
/// ```
pub fn is_valid_image_extension(url: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

/// Builds an [`Image`] from a candidate element
///
/// Returns `None` when the candidate is an inline data URI, has an
/// unrecognized extension, or its domain cannot be determined.
pub fn create_image(candidate: &ImageCandidate) -> Option<Image> {
    let url = candidate.source.trim();
    if url.is_empty() || is_data_uri(url) || !is_valid_image_extension(url) {
        return None;
    }

    let domain = get_domain(url)?;

    let image = match candidate.kind {
        CandidateKind::Embedded => Image {
            name: candidate
                .alt
                .as_deref()
                .filter(|alt| !alt.is_empty())
                .unwrap_or(NO_NAME)
                .to_string(),
            domain,
            is_logo: url.contains("logo"),
            is_favicon: false,
            url: url.to_string(),
        },
        CandidateKind::SiteIcon => Image {
            name: NO_NAME.to_string(),
            domain,
            is_logo: false,
            is_favicon: true,
            url: url.to_string(),
        },
    };

    Some(image)
}

/// Turns the image candidates of one page into its image set
///
/// Every qualifying embedded image contributes a record; only the first
/// site-icon element on the page is considered.
pub fn extract_images(candidates: &[ImageCandidate]) -> HashSet<Image> {
    let mut images: HashSet<Image> = candidates
        .iter()
        .filter(|c| c.kind == CandidateKind::Embedded)
        .filter_map(create_image)
        .collect();

    if let Some(icon) = candidates
        .iter()
        .find(|c| c.kind == CandidateKind::SiteIcon)
        .and_then(create_image)
    {
        images.insert(icon);
    }

    images
}
