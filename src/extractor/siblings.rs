//! Sibling merging.
//!
//! Content is often split across neighbouring elements: a preamble, parts
//! separated by removed ads, paragraphs outside the main wrapper. Siblings
//! of the chosen candidate that look related are collected with it.

use dom_query::NodeRef;

use super::state::ScoreTable;
use crate::dom;
use crate::link_density::link_density;
use crate::patterns::SENTENCE_END;

/// Tags that are appended as-is; anything else is retagged to `<div>`.
const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["div", "article", "section", "p"];

/// Build the article container from the top candidate and its related
/// siblings, in document order.
///
/// A sibling is taken when its score (plus a bonus of 20% of the top score
/// for sharing the candidate's non-empty class) reaches
/// `max(10, top score * 0.2)`, or when it is a paragraph that is long with
/// few links, or short, link-free and ending a sentence.
pub fn merge_siblings<'a>(top: &NodeRef<'a>, scores: &ScoreTable) -> NodeRef<'a> {
    let content = dom::create_element(top, "div");
    let top_score = scores.score_or_zero(top);
    let threshold = (top_score * 0.2).max(10.0);
    let top_class = dom::class_name(top);

    let Some(parent) = dom::parent_element(top) else {
        dom::append_child(&content, top);
        return content;
    };

    // Snapshot: appending moves siblings out of `parent`.
    for sibling in dom::element_children(&parent) {
        let append = sibling.id == top.id || is_related(&sibling, &top_class, top_score, threshold, scores);
        if !append {
            continue;
        }

        if !dom::is_one_of(&sibling, ALTER_TO_DIV_EXCEPTIONS) {
            dom::set_node_tag(&sibling, "div");
        }
        dom::append_child(&content, &sibling);
    }

    content
}

fn is_related(sibling: &NodeRef, top_class: &str, top_score: f64, threshold: f64, scores: &ScoreTable) -> bool {
    let bonus = if !top_class.is_empty() && dom::class_name(sibling) == top_class {
        top_score * 0.2
    } else {
        0.0
    };

    if let Some(score) = scores.get(sibling) {
        if score + bonus >= threshold {
            return true;
        }
    }

    if !dom::is_tag(sibling, "p") {
        return false;
    }

    let density = link_density(sibling);
    let text = dom::inner_text(sibling, true);
    let length = text.chars().count();

    if length > 80 && density < 0.25 {
        return true;
    }

    length > 0 && length < 80 && density == 0.0 && SENTENCE_END.is_match(&text)
}
