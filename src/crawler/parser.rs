//! HTML extraction for listing and profile pages

use crate::url::{is_profile_path, normalize_reference};
use scraper::{Html, Selector};

/// Selector for the annotated homepage anchor on a profile page
const HOMEPAGE_SELECTOR: &str = r#"a.flex--item[rel="me noreferrer"]"#;

/// Extracts candidate profile references from a listing page
///
/// Scans every hyperlink, resolves it against the site origin, and keeps
/// the ones whose path contains the profile marker segment, as absolute URL
/// strings in document order. Duplicates are preserved; deduplication is the
/// walker's job.
pub fn extract_profile_refs(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut refs = Vec::new();

    // The selector is a literal, parse cannot fail at runtime
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                match normalize_reference(href, origin) {
                    Ok(url) if is_profile_path(&url) => refs.push(url.to_string()),
                    Ok(_) => {}
                    Err(e) => tracing::debug!(href, error = %e, "Skipping unparsable link"),
                }
            }
        }
    }

    refs
}

/// Extracts the user's declared homepage link from a profile page
///
/// The homepage is the anchor carrying `rel="me noreferrer"` and the
/// `flex--item` class; absent when the user published no homepage.
pub fn extract_homepage_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(HOMEPAGE_SELECTOR).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://example.com";

    #[test]
    fn test_extract_relative_profile_refs() {
        let html = r#"<html><body>
            <a href="/users/123/alice">alice</a>
            <a href="/users/456/bob">bob</a>
        </body></html>"#;

        let refs = extract_profile_refs(html, ORIGIN);
        assert_eq!(
            refs,
            vec![
                "https://example.com/users/123/alice",
                "https://example.com/users/456/bob"
            ]
        );
    }

    #[test]
    fn test_extract_keeps_absolute_refs() {
        let html = r#"<a href="https://example.com/users/7/carol">carol</a>"#;
        let refs = extract_profile_refs(html, ORIGIN);
        assert_eq!(refs, vec!["https://example.com/users/7/carol"]);
    }

    #[test]
    fn test_non_profile_links_skipped() {
        let html = r#"<html><body>
            <a href="/questions/42">a question</a>
            <a href="/users/123/alice">alice</a>
            <a href="/tags">tags</a>
        </body></html>"#;

        let refs = extract_profile_refs(html, ORIGIN);
        assert_eq!(refs, vec!["https://example.com/users/123/alice"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let html = r#"
            <a href="/users/123/alice">alice</a>
            <a href="/users/123/alice">alice again</a>
        "#;

        let refs = extract_profile_refs(html, ORIGIN);
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_anchors_without_href_ignored() {
        let html = r#"<a name="top">anchor</a><a href="/users/1/a">a</a>"#;
        let refs = extract_profile_refs(html, ORIGIN);
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(extract_profile_refs("<html></html>", ORIGIN).is_empty());
    }

    #[test]
    fn test_extract_homepage_link() {
        let html = r#"<html><body>
            <a rel="me noreferrer" class="flex--item" href="https://alice.example">homepage</a>
        </body></html>"#;

        assert_eq!(
            extract_homepage_link(html),
            Some("https://alice.example".to_string())
        );
    }

    #[test]
    fn test_homepage_absent() {
        let html = r#"<html><body><p>no links here</p></body></html>"#;
        assert_eq!(extract_homepage_link(html), None);
    }

    #[test]
    fn test_homepage_requires_relation_attribute() {
        let html = r#"<a class="flex--item" href="https://alice.example">not annotated</a>"#;
        assert_eq!(extract_homepage_link(html), None);
    }

    #[test]
    fn test_homepage_requires_class() {
        let html = r#"<a rel="me noreferrer" href="https://alice.example">wrong class</a>"#;
        assert_eq!(extract_homepage_link(html), None);
    }

    #[test]
    fn test_first_matching_homepage_wins() {
        let html = r#"
            <a rel="me noreferrer" class="flex--item" href="https://first.example">one</a>
            <a rel="me noreferrer" class="flex--item" href="https://second.example">two</a>
        "#;

        assert_eq!(
            extract_homepage_link(html),
            Some("https://first.example".to_string())
        );
    }
}
