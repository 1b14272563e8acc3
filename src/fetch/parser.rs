//! HTML parser for extracting links and image candidates
//!
//! This module turns a page body into the two lists the crawler consumes:
//! - Outbound links (from `<a href>`), resolved against the page URL
//! - Image candidates (from `<img src>` and site-icon `<link>` elements)

use crate::fetch::ParsedPage;
use crate::image::ImageCandidate;
use scraper::{Html, Selector};
use url::Url;

const LINK_SELECTOR: &str = "a[href]";
const IMG_SELECTOR: &str = "img[src]";
const SITE_ICON_SELECTOR: &str =
    "head link[rel=icon], head link[rel^=shortcut], head link[rel^=apple-touch-icon]";

/// Parses HTML content and extracts links and image candidates
///
/// Links are resolved but not filtered; deciding which ones to crawl is the
/// URL classifier's job. Image candidates keep their resolved source and alt
/// text; the image classifier filters them.
///
/// # Example
///
/// ```
/// use image_finder::fetch::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a><img src="/a.png" alt="A"></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// assert_eq!(parsed.images[0].source, "https://example.com/a.png");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, base_url),
        images: extract_image_candidates(&document, base_url),
    }
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(LINK_SELECTOR) {
        for element in document.select(&selector) {
            if let Some(absolute_url) = element
                .value()
                .attr("href")
                .and_then(|href| resolve(href, base_url))
            {
                links.push(absolute_url);
            }
        }
    }

    links
}

fn extract_image_candidates(document: &Html, base_url: &Url) -> Vec<ImageCandidate> {
    let mut candidates = Vec::new();

    if let Ok(selector) = Selector::parse(IMG_SELECTOR) {
        for element in document.select(&selector) {
            if let Some(source) = element
                .value()
                .attr("src")
                .and_then(|src| resolve(src, base_url))
            {
                let alt = element.value().attr("alt").map(str::to_string);
                candidates.push(ImageCandidate::embedded(source, alt));
            }
        }
    }

    if let Ok(selector) = Selector::parse(SITE_ICON_SELECTOR) {
        for element in document.select(&selector) {
            if let Some(source) = element
                .value()
                .attr("href")
                .and_then(|href| resolve(href, base_url))
            {
                candidates.push(ImageCandidate::site_icon(source));
            }
        }
    }

    candidates
}

/// Resolves an attribute value to an absolute URL string
///
/// Returns None for empty values and values the URL parser rejects.
fn resolve(value: &str, base_url: &Url) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    base_url.join(value).ok().map(|url| url.to_string())
}
