//! URL classification for Image Finder
//!
//! Pure functions deciding which discovered links are worth crawling, how a link
//! is canonicalized before it becomes a dedup key, and whether it stays inside
//! the crawl's domain boundary.

mod domain;
mod normalize;

pub use domain::{get_domain, is_in_domain};
pub use normalize::trim_url;

/// Prefixes that never lead to a crawlable page
const INVALID_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:"];

/// Extensions excluded from traversal, matched against both ends of the link
const BLACKLISTED_EXTENSIONS: &[&str] = &[
    // documents
    ".pdf", ".doc", ".docx", ".csv", ".xlsx", ".ppt", ".pptx",
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".ico", ".svg",
    // archives
    ".zip", ".rar",
    // audio
    ".mp3", ".wav", ".ogg",
    // video
    ".mp4", ".avi", ".mov",
    // markup, script, style, data
    ".xml", ".json", ".js", ".css", ".txt",
];

/// Returns true if a link should be followed by the crawler
///
/// A link is rejected when it is empty, when it starts with `#`, `javascript:`,
/// `mailto:` or `tel:`, or when it starts or ends with a blacklisted extension.
///
/// # Examples
///
/// ```
/// use image_finder::url::is_valid_link_to_crawl;
///
/// assert!(is_valid_link_to_crawl("https://wecodeucate.org/"));
/// assert!(!is_valid_link_to_crawl("javascript:void()"));
/// assert!(!is_valid_link_to_crawl("something.pdf"));
/// ```
pub fn is_valid_link_to_crawl(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if INVALID_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix) || url.ends_with(prefix))
    {
        return false;
    }

    !BLACKLISTED_EXTENSIONS
        .iter()
        .any(|ext| url.starts_with(ext) || url.ends_with(ext))
}
