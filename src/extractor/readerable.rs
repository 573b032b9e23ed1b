//! Quick readability heuristic.
//!
//! Decides, without running extraction, whether a document is likely to
//! hold an article. Visible paragraph-like nodes with enough text add to a
//! score that grows with the square root of their excess length.

use std::collections::HashSet;

use dom_query::{Document, NodeId, NodeRef};

use crate::dom;
use crate::patterns::{MAYBE_CANDIDATE, UNLIKELY_CANDIDATES};

/// Text shorter than this does not count.
const MIN_CONTENT_LENGTH: usize = 140;

/// Score needed to call a document readable.
const MIN_SCORE: f64 = 20.0;

/// Whether the document probably contains an article.
///
/// `<p>` and `<pre>` elements count, as do `<div>`s holding a direct `<br>`
/// (text split by line breaks instead of paragraphs). Hidden nodes, nodes
/// with unlikely classes and paragraphs inside list items are skipped.
#[must_use]
pub fn is_probably_readerable(doc: &Document) -> bool {
    let mut nodes: Vec<NodeRef> = doc.select("p, pre").nodes().to_vec();

    let mut seen: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
    for br in doc.select("div > br").nodes() {
        if let Some(parent) = dom::parent_element(br) {
            if seen.insert(parent.id) {
                nodes.push(parent);
            }
        }
    }

    let mut score = 0.0;
    for node in &nodes {
        if !dom::is_visible(node) {
            continue;
        }

        let match_string = dom::match_string(node);
        if UNLIKELY_CANDIDATES.is_match(&match_string) && !MAYBE_CANDIDATE.is_match(&match_string) {
            continue;
        }

        if dom::is_tag(node, "p") && dom::has_ancestor_tag(node, "li", 0, |_| true) {
            continue;
        }

        let length = dom::text_content(node).trim().chars().count();
        if length < MIN_CONTENT_LENGTH {
            continue;
        }

        score += ((length - MIN_CONTENT_LENGTH) as f64).sqrt();
        if score > MIN_SCORE {
            return true;
        }
    }

    log::debug!("document not readable, score {score:.1}");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(count: usize, length: usize, attrs: &str) -> String {
        let text = "x".repeat(length);
        (0..count).map(|_| format!("<p {attrs}>{text}</p>")).collect()
    }

    #[test]
    fn test_long_paragraphs_are_readable() {
        // sqrt(400 - 140) ~ 16.1 each, two of them exceed 20.
        let html = format!("<html><body>{}</body></html>", paragraphs(2, 400, ""));
        assert!(is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_single_paragraph_not_enough() {
        let html = format!("<html><body>{}</body></html>", paragraphs(1, 400, ""));
        assert!(!is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_short_paragraphs_ignored() {
        let html = format!("<html><body>{}</body></html>", paragraphs(50, 139, ""));
        assert!(!is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_hidden_and_unlikely_ignored() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            paragraphs(3, 600, "hidden"),
            paragraphs(3, 600, r#"style="display:none""#),
            paragraphs(3, 600, r#"class="sidebar""#),
        );
        assert!(!is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_maybe_candidate_rescues_unlikely_class() {
        let html = format!(
            "<html><body>{}</body></html>",
            paragraphs(2, 600, r#"class="sidebar main""#)
        );
        assert!(is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_paragraphs_in_list_items_ignored() {
        let text = "x".repeat(600);
        let html = format!("<html><body><ul><li><p>{text}</p></li><li><p>{text}</p></li></ul></body></html>");
        assert!(!is_probably_readerable(&Document::from(html.as_str())));
    }

    #[test]
    fn test_div_with_br_counts() {
        let text = "y".repeat(500);
        let html = format!("<html><body><div>{text}<br>{text}</div></body></html>");
        // One div of 1000 chars: sqrt(860) ~ 29.3.
        assert!(is_probably_readerable(&Document::from(html.as_str())));
    }
}
