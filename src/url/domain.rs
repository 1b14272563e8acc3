use url::Url;

/// Extracts the domain from a URL string
///
/// Parses the URL, takes its host (lowercased by the parser) and removes a
/// leading `www.`. Malformed URLs and URLs without a host yield `None`, which
/// callers treat as "cannot classify".
///
/// # Examples
///
/// ```
/// use image_finder::url::get_domain;
///
/// assert_eq!(get_domain("https://wecodeucate.org/"), Some("wecodeucate.org".to_string()));
/// assert_eq!(get_domain("https://www.example.com/a"), Some("example.com".to_string()));
/// assert_eq!(get_domain("not a url"), None);
/// ```
pub fn get_domain(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Failed to parse URL '{}': {}", url, e);
            return None;
        }
    };

    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    Some(host.to_string())
}

/// Returns true if `url` belongs to the crawl whose boundary is `domain`
///
/// This is a literal prefix test against the seed string, not a host
/// comparison: `https://www.site.com/x` is outside `https://site.com/`.
pub fn is_in_domain(url: &str, domain: &str) -> bool {
    !url.is_empty() && url.starts_with(domain)
}
