//! HTML link extraction
//!
//! Extracts candidate URLs for the crawl from a fetched page: anchors and
//! `<link>` elements via `href`, scripts and images via `src`, and `<source>`
//! elements via `srcset`. Only same-origin results survive filtering.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Attribute harvested per element kind
const LINK_SELECTORS: &[(&str, &str)] = &[
    ("a[href]", "href"),
    ("link[href]", "href"),
    ("script[src]", "src"),
    ("img[src]", "src"),
    ("source[srcset]", "srcset"),
];

/// Extracts same-origin absolute URLs from an HTML document
///
/// Raw attribute values are trimmed and dropped if empty or if they start with
/// `#`, `javascript:`, `mailto:`, or `tel:`. Survivors are resolved against
/// `base_url`, filtered to the origin host, stripped of their fragment, and
/// de-duplicated within this page before being handed to the controller.
///
/// Malformed HTML is not an error: the parser produces a best-effort tree and
/// anything unresolvable simply yields no links.
///
/// # Arguments
///
/// * `html` - The page content
/// * `base_url` - The page's own URL, used to resolve relative references
/// * `origin` - The crawl's seed URL; links to other hosts are discarded
pub fn extract_links(html: &str, base_url: &Url, origin: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for (selector_str, attribute) in LINK_SELECTORS {
        // Selectors are static and known-good
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        for element in document.select(&selector) {
            let Some(raw) = element.value().attr(attribute) else {
                continue;
            };

            if let Some(url) = resolve_candidate(raw, base_url, origin) {
                if seen.insert(url.to_string()) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Returns whether two URLs share a host and port
///
/// Host plus port is the site boundary for the crawl; an explicit port must
/// match the seed's (relative links inherit it from the page URL anyway).
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

/// Resolves one raw attribute value into an in-scope absolute URL
///
/// Returns None for values that should be excluded: empty strings, fragments,
/// javascript:/mailto:/tel: pseudo-links, unparsable references, and anything
/// whose resolved host differs from the crawl origin.
fn resolve_candidate(raw: &str, base_url: &Url, origin: &Url) -> Option<Url> {
    let raw = raw.trim();

    if raw.is_empty()
        || raw.starts_with('#')
        || raw.starts_with("javascript:")
        || raw.starts_with("mailto:")
        || raw.starts_with("tel:")
    {
        return None;
    }

    let mut resolved = base_url.join(raw).ok()?;

    if !same_origin(&resolved, origin) {
        return None;
    }

    // The fragment is not part of a URL's identity for dedup purposes
    resolved.set_fragment(None);

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/page.html").unwrap()
    }

    fn extract(html: &str) -> Vec<String> {
        let origin = Url::parse("https://example.com/").unwrap();
        extract_links(html, &base(), &origin)
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_relative_href_resolved() {
        let links = extract(r#"<a href="/about">About</a>"#);
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_relative_path_resolved_against_page() {
        let links = extract(r#"<a href="other.html">Other</a>"#);
        assert_eq!(links, vec!["https://example.com/dir/other.html"]);
    }

    #[test]
    fn test_cross_origin_discarded() {
        let links = extract(r#"<a href="https://other.com/page">Elsewhere</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_same_host_different_port_discarded() {
        let links = extract(r#"<a href="https://example.com:8443/page">Other port</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_same_origin_host_and_port() {
        let seed = Url::parse("https://example.com/").unwrap();
        assert!(same_origin(&Url::parse("https://example.com/x").unwrap(), &seed));
        assert!(!same_origin(&Url::parse("https://example.com:8443/x").unwrap(), &seed));
        assert!(!same_origin(&Url::parse("https://sub.example.com/x").unwrap(), &seed));
    }

    #[test]
    fn test_fragment_stripped() {
        let links = extract(r#"<a href="/page#section">Link</a>"#);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_fragment_only_discarded() {
        let links = extract(r##"<a href="#top">Top</a>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_pseudo_schemes_discarded() {
        let html = r#"
            <a href="javascript:void(0)">js</a>
            <a href="mailto:me@example.com">mail</a>
            <a href="tel:+123456">call</a>
            <a href="  ">blank</a>
        "#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_script_and_img_src_collected() {
        let html = r#"
            <script src="/app.js"></script>
            <img src="/logo.png">
        "#;
        let links = extract(html);
        assert!(links.contains(&"https://example.com/app.js".to_string()));
        assert!(links.contains(&"https://example.com/logo.png".to_string()));
    }

    #[test]
    fn test_link_href_collected() {
        let links = extract(r#"<link rel="stylesheet" href="/style.css">"#);
        assert_eq!(links, vec!["https://example.com/style.css"]);
    }

    #[test]
    fn test_source_srcset_collected() {
        let links = extract(r#"<source srcset="/hero.webp">"#);
        assert_eq!(links, vec!["https://example.com/hero.webp"]);
    }

    #[test]
    fn test_duplicates_within_page_collapsed() {
        let html = r#"
            <a href="/page">one</a>
            <a href="/page">two</a>
            <a href="/page#frag">three</a>
        "#;
        let links = extract(html);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let links = extract("<a href=\"  /padded  \">Link</a>");
        assert_eq!(links, vec!["https://example.com/padded"]);
    }

    #[test]
    fn test_malformed_html_yields_best_effort_links() {
        let html = r#"<a href="/ok"><div><a href="/also-ok">"#;
        let links = extract(html);
        assert!(links.contains(&"https://example.com/ok".to_string()));
        assert!(links.contains(&"https://example.com/also-ok".to_string()));
    }

    #[test]
    fn test_no_links() {
        assert!(extract("<p>just text</p>").is_empty());
    }
}
