//! Link Density and Character Counting
//!
//! Link density is the share of an element's normalized text that sits inside
//! `<a>` descendants. Good content has a low density (5% or less) and is
//! barely affected when candidate scores are scaled by `1 - density`.

use dom_query::NodeRef;

use crate::dom;

/// Fraction of the element's text found inside links.
///
/// Returns exactly `0.0` when the element has no text.
#[must_use]
pub fn link_density(element: &NodeRef) -> f64 {
    let text_length = dom::inner_text_len(element);
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = dom::query_all(element, "a")
        .iter()
        .map(dom::inner_text_len)
        .sum();

    link_length as f64 / text_length as f64
}

/// Number of `separator` characters in the element's normalized text.
#[must_use]
pub fn char_count(element: &NodeRef, separator: char) -> usize {
    dom::inner_text(element, true).matches(separator).count()
}

/// Number of comma-separated segments in `text` (one more than the number of
/// commas, so never zero).
#[must_use]
pub fn comma_segments(text: &str) -> usize {
    text.split(',').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn first<'a>(doc: &'a Document, selector: &str) -> NodeRef<'a> {
        *doc.select(selector).nodes().first().unwrap()
    }

    #[test]
    fn test_empty_element_has_zero_density() {
        let doc = Document::from("<div id=\"x\"><a href=\"/\"></a>   </div>");
        let density = link_density(&first(&doc, "#x"));

        assert_eq!(density, 0.0);
    }

    #[test]
    fn test_all_link_text() {
        let doc = Document::from(r#"<div id="x"><a href="/a">Home</a></div>"#);

        assert_eq!(link_density(&first(&doc, "#x")), 1.0);
    }

    #[test]
    fn test_partial_link_text() {
        let doc = Document::from(r#"<p id="x">abcdef <a href="/a">ghij</a></p>"#);
        let density = link_density(&first(&doc, "#x"));

        // "abcdef ghij" is 11 chars, 4 of them linked
        assert!((density - 4.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_links() {
        let doc = Document::from("<p id=\"x\">Plain paragraph text.</p>");

        assert_eq!(link_density(&first(&doc, "#x")), 0.0);
    }

    #[test]
    fn test_char_count() {
        let doc = Document::from("<p id=\"x\">one, two, three, four</p>");

        assert_eq!(char_count(&first(&doc, "#x"), ','), 3);
    }

    #[test]
    fn test_comma_segments() {
        assert_eq!(comma_segments("no commas"), 1);
        assert_eq!(comma_segments("a, b, c"), 3);
        assert_eq!(comma_segments(""), 1);
    }
}
