//! Article title resolution.
//!
//! The `<title>` text usually carries the site name as well. This module
//! trims it back to the article's own title using separators, colons and
//! the page's headings.

use dom_query::Document;

use crate::dom;

const SEPARATORS: [char; 3] = ['|', '-', '»'];

/// Text of the first `<title>` element with whitespace collapsed.
#[must_use]
pub fn document_title(doc: &Document) -> String {
    doc.select("title")
        .nodes()
        .first()
        .map(|title| {
            dom::text_content(title)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Word count the way the title rules measure it: the number of pieces
/// when splitting on single spaces, so a trailing space counts as a word.
fn space_separated_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Resolve the article title from the document.
///
/// - With a `|`, `-` or `»` separator, keep the part before the last
///   separator, or the part after the first one when that is under three
///   words.
/// - With a `": "`, keep the title as-is when an `h1`/`h2` has exactly that
///   text, else keep the part after the last colon, or after the first colon
///   when that is under three words.
/// - A title longer than 150 or shorter than 15 characters is replaced by
///   the text of the page's only `h1`, if there is exactly one.
#[must_use]
pub fn article_title(doc: &Document) -> String {
    let original = document_title(doc);
    let mut current = original.clone();

    if let (Some(first), Some(last)) = (
        original.find(SEPARATORS),
        original.rfind(SEPARATORS),
    ) {
        current = original[..last].to_string();

        if space_separated_count(&current) < 3 {
            let sep_len = original[first..].chars().next().map_or(1, char::len_utf8);
            current = original[first + sep_len..].to_string();
        }
    } else if original.contains(": ") {
        let heading_matches = doc
            .select("h1, h2")
            .nodes()
            .iter()
            .any(|heading| &*dom::text_content(heading) == original);

        if !heading_matches {
            if let Some(last) = original.rfind(':') {
                current = original[last + 1..].to_string();
            }
            if space_separated_count(&current) < 3 {
                if let Some(first) = original.find(':') {
                    current = original[first + 1..].to_string();
                }
            }
        }
    } else {
        let length = original.chars().count();
        if length > 150 || length < 15 {
            let h1s = doc.select("h1");
            if let [only] = h1s.nodes() {
                current = dom::inner_text(only, true);
            }
        }
    }

    current.trim().to_string()
}
