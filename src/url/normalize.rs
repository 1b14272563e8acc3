/// Canonicalizes a URL for use as a dedup key
///
/// Strips everything from the first `?`, then everything from the first `#`,
/// then the trailing `/`. A run of trailing slashes is removed as a whole so
/// that `trim_url(trim_url(u)) == trim_url(u)` holds for every input.
///
/// # Examples
///
/// ```
/// use image_finder::url::trim_url;
///
/// assert_eq!(trim_url("https://example.com/page/?q=1#top"), "https://example.com/page");
/// ```
pub fn trim_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or_default();
    let without_fragment = without_query.split('#').next().unwrap_or_default();
    without_fragment.trim_end_matches('/').to_string()
}
