//! HTML Meta Tag Extraction
//!
//! Collects the `<meta>` values the extractor cares about in a single scan:
//! descriptions and titles (plain, Open Graph and Twitter cards), the
//! article publication time, and the `author` tag.

use std::collections::HashMap;

use dom_query::Document;

use crate::dom;
use crate::patterns::{META_NAME, META_PROPERTY};

/// Meta values keyed by normalized name (lowercase, no whitespace).
#[derive(Debug, Clone, Default)]
pub struct MetaTags {
    values: HashMap<String, String>,

    /// Content of a meta tag whose `name` or `property` is `author`.
    pub author: Option<String>,
}

impl MetaTags {
    /// Scan every `<meta>` element of the document.
    ///
    /// The first occurrence of each normalized key wins. `author` tags are
    /// handled separately and never enter the value map.
    #[must_use]
    pub fn collect(doc: &Document) -> Self {
        let mut tags = Self::default();

        for meta in doc.select("meta").nodes() {
            let name = dom::get_attribute(meta, "name").unwrap_or_default();
            let property = dom::get_attribute(meta, "property").unwrap_or_default();
            let content = dom::get_attribute(meta, "content");

            if name == "author" || property == "author" {
                if let Some(content) = content.filter(|c| !c.trim().is_empty()) {
                    tags.author = Some(content.trim().to_string());
                }
                continue;
            }

            let key = if META_NAME.is_match(&name) {
                name
            } else if META_PROPERTY.is_match(&property) {
                property
            } else {
                continue;
            };

            let Some(content) = content.filter(|c| !c.is_empty()) else {
                continue;
            };

            let key: String = key
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            tags.values
                .entry(key)
                .or_insert_with(|| content.trim().to_string());
        }

        tags
    }

    /// Value stored under a normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// First value found among `keys`, in order.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.get(key))
            .map(str::to_string)
    }

    /// Description: plain, then Open Graph, then Twitter cards.
    #[must_use]
    pub fn excerpt(&self) -> Option<String> {
        self.first_of(&["description", "og:description", "twitter:description"])
    }

    /// Title from Open Graph, then Twitter cards.
    #[must_use]
    pub fn fallback_title(&self) -> Option<String> {
        self.first_of(&["og:title", "twitter:title"])
    }
}

/// Declared document language.
///
/// `<html lang>`, then a `Content-Language` http-equiv meta, then the
/// nonstandard `<meta name="lang" value="...">`.
#[must_use]
pub fn extract_language(doc: &Document) -> Option<String> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    if let Some(lang) = dom::html_element(doc).and_then(|html| non_empty(dom::get_attribute(&html, "lang"))) {
        return Some(lang);
    }

    let metas = doc.select("meta");
    let metas = metas.nodes();

    let content_language = metas.iter().find_map(|meta| {
        let equiv = dom::get_attribute(meta, "http-equiv")?;
        if equiv.eq_ignore_ascii_case("content-language") {
            non_empty(dom::get_attribute(meta, "content"))
        } else {
            None
        }
    });
    if content_language.is_some() {
        return content_language;
    }

    metas.iter().find_map(|meta| {
        if dom::get_attribute(meta, "name").as_deref() == Some("lang") {
            non_empty(dom::get_attribute(meta, "value"))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_first_occurrence_wins() {
        let doc = Document::from(
            r#"<html><head>
            <meta name="description" content="first">
            <meta name="Description" content="second">
            <meta property="og:title" content=" OG Title ">
            </head><body></body></html>"#,
        );
        let tags = MetaTags::collect(&doc);

        assert_eq!(tags.get("description"), Some("first"));
        assert_eq!(tags.get("og:title"), Some("OG Title"));
    }

    #[test]
    fn test_keys_are_normalized() {
        let doc = Document::from(
            r#"<html><head><meta name="Twitter : Description" content="card"></head></html>"#,
        );
        let tags = MetaTags::collect(&doc);

        assert_eq!(tags.get("twitter:description"), Some("card"));
        assert_eq!(tags.excerpt().as_deref(), Some("card"));
    }

    #[test]
    fn test_author_meta() {
        let doc = Document::from(
            r#"<html><head><meta name="author" content="Jane Doe"></head></html>"#,
        );
        let tags = MetaTags::collect(&doc);

        assert_eq!(tags.author.as_deref(), Some("Jane Doe"));
        assert!(tags.get("author").is_none());
    }

    #[test]
    fn test_excerpt_priority() {
        let doc = Document::from(
            r#"<html><head>
            <meta name="twitter:description" content="twitter">
            <meta property="og:description" content="og">
            </head></html>"#,
        );
        let tags = MetaTags::collect(&doc);

        assert_eq!(tags.excerpt().as_deref(), Some("og"));
    }

    #[test]
    fn test_unrelated_meta_ignored() {
        let doc = Document::from(
            r#"<html><head><meta name="keywords" content="a,b"><meta property="og:image" content="x.png"></head></html>"#,
        );
        let tags = MetaTags::collect(&doc);

        assert!(tags.get("keywords").is_none());
        assert!(tags.get("og:image").is_none());
    }

    #[test]
    fn test_language_sources() {
        let html_lang = Document::from(r#"<html lang="fr"><head></head><body></body></html>"#);
        assert_eq!(extract_language(&html_lang).as_deref(), Some("fr"));

        let http_equiv = Document::from(
            r#"<html><head><meta http-equiv="Content-Language" content="de"></head></html>"#,
        );
        assert_eq!(extract_language(&http_equiv).as_deref(), Some("de"));

        let lang_meta = Document::from(r#"<html><head><meta name="lang" value="it"></head></html>"#);
        assert_eq!(extract_language(&lang_meta).as_deref(), Some("it"));

        let none = Document::from("<html><head></head><body></body></html>");
        assert!(extract_language(&none).is_none());
    }
}
