//! Node prepping and content scoring.
//!
//! The first half of an extraction pass walks the whole document once,
//! dropping bylines, unlikely candidates and empty containers and turning
//! paragraph-like divs into `<p>`. The second half gives every scorable
//! element a content score and spreads it over its first three ancestors.

use dom_query::NodeRef;

use super::state::{Byline, Flags, ScoreTable};
use crate::dom;
use crate::link_density::comma_segments;
use crate::patterns::{BYLINE, HAS_CONTENT, MAYBE_CANDIDATE, NEGATIVE, POSITIVE, UNLIKELY_CANDIDATES};

/// Tags whose text is scored.
pub const TAGS_TO_SCORE: &[&str] = &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Children that keep a `<div>` from being read as a paragraph.
pub const DIV_TO_P_ELEMS: &[&str] = &[
    "a", "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul", "select",
];

/// Containers removed when they hold neither elements nor text.
const EMPTY_REMOVABLE: &[&str] = &["div", "section", "header", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Class and id weight: -25 for each negative match and +25 for each
/// positive match, checked separately on `class` and `id`. Always 0 when
/// class weighting is switched off.
#[must_use]
pub fn class_weight(node: &NodeRef, flags: Flags) -> i32 {
    if !flags.weight_classes {
        return 0;
    }

    let mut weight = 0;
    for value in [dom::class_name(node), dom::id(node)] {
        if value.is_empty() {
            continue;
        }
        if NEGATIVE.is_match(&value) {
            weight -= 25;
        }
        if POSITIVE.is_match(&value) {
            weight += 25;
        }
    }
    weight
}

/// Starting score by tag family.
#[must_use]
pub fn tag_base_score(node: &NodeRef) -> f64 {
    match dom::tag_name(node).as_deref() {
        Some("div") => 5.0,
        Some("pre" | "td" | "blockquote") => 3.0,
        Some("address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form") => -3.0,
        Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th") => -5.0,
        _ => 0.0,
    }
}

/// Give a node its initial score: tag base plus class weight.
pub fn initialize_node(node: &NodeRef, scores: &mut ScoreTable, flags: Flags) {
    let score = tag_base_score(node) + f64::from(class_weight(node, flags));
    scores.set(node, score);
}

/// Whether the text could be a byline: non-empty and under 100 characters
/// once trimmed.
#[must_use]
pub fn is_valid_byline(text: &str) -> bool {
    let length = text.trim().chars().count();
    length > 0 && length < 100
}

/// Record `node` as the document byline if it looks like one.
///
/// Only the first byline is captured; once one is known this always
/// returns `false`.
fn check_byline(node: &NodeRef, match_string: &str, byline: &mut Byline) -> bool {
    if byline.is_found() {
        return false;
    }

    let is_rel_author = dom::get_attribute(node, "rel").as_deref() == Some("author");
    let text = dom::text_content(node);

    if (is_rel_author || BYLINE.is_match(match_string)) && is_valid_byline(&text) {
        byline.author = if is_rel_author {
            Some(text.trim().to_string())
        } else {
            dom::query_all(node, r#"[rel="author"]"#)
                .first()
                .map(|author| dom::text_content(author).trim().to_string())
        };
        byline.text = Some(text.trim().to_string());
        return true;
    }

    false
}

/// An element with no element children and only whitespace text.
#[must_use]
pub fn is_element_without_content(node: &NodeRef) -> bool {
    node.is_element()
        && dom::element_children(node).is_empty()
        && dom::text_content(node).trim().is_empty()
}

/// Exactly one element child, which is a `<p>`, and no text with content.
#[must_use]
pub fn has_single_p_inside(element: &NodeRef) -> bool {
    let children = dom::element_children(element);
    if children.len() != 1 || !dom::is_tag(&children[0], "p") {
        return false;
    }

    !dom::child_nodes(element)
        .iter()
        .any(|child| child.is_text() && HAS_CONTENT.is_match(&dom::text_content(child)))
}

/// Whether any descendant element is block-level.
#[must_use]
pub fn has_child_block_element(element: &NodeRef) -> bool {
    dom::element_children(element)
        .iter()
        .any(|child| dom::is_one_of(child, DIV_TO_P_ELEMS) || has_child_block_element(child))
}

/// Walk the document in depth-first order, cleaning it up for scoring.
///
/// Returns the elements to score, in document order.
pub fn prep_nodes<'a>(root: NodeRef<'a>, flags: Flags, byline: &mut Byline) -> Vec<NodeRef<'a>> {
    let mut elements_to_score = Vec::new();
    let mut current = Some(root);

    while let Some(node) = current {
        let match_string = dom::match_string(&node);

        if check_byline(&node, &match_string, byline) {
            current = remove_and_get_next(&node);
            continue;
        }

        if flags.strip_unlikelys
            && UNLIKELY_CANDIDATES.is_match(&match_string)
            && !MAYBE_CANDIDATE.is_match(&match_string)
            && !dom::is_one_of(&node, &["body", "a"])
        {
            log::trace!("removing unlikely candidate {match_string:?}");
            current = remove_and_get_next(&node);
            continue;
        }

        if dom::is_one_of(&node, EMPTY_REMOVABLE) && is_element_without_content(&node) {
            current = remove_and_get_next(&node);
            continue;
        }

        if dom::is_one_of(&node, TAGS_TO_SCORE) {
            elements_to_score.push(node);
        }

        let mut node = node;
        if dom::is_tag(&node, "div") {
            if has_single_p_inside(&node) {
                let p = dom::element_children(&node)[0];
                dom::replace_node(&node, &p);
                node = p;
                elements_to_score.push(node);
            } else if !has_child_block_element(&node) {
                dom::set_node_tag(&node, "p");
                elements_to_score.push(node);
            } else {
                wrap_bare_text(&node);
            }
        }

        current = dom::next_node(&node, false);
    }

    elements_to_score
}

fn remove_and_get_next<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = dom::next_node(node, true);
    dom::remove(node);
    next
}

/// Put each non-blank text child of a block-holding div into an inline
/// `<p class="readability-styled">`, so mixed content is still scored.
fn wrap_bare_text(div: &NodeRef) {
    for child in dom::child_nodes(div) {
        if !child.is_text() || dom::text_content(&child).trim().is_empty() {
            continue;
        }
        let p = dom::create_element(div, "p");
        dom::set_attribute(&p, "style", "display: inline;");
        dom::set_attribute(&p, "class", "readability-styled");
        dom::replace_node(&child, &p);
        dom::append_child(&p, &child);
    }
}

/// Score every element and propagate to its ancestors.
///
/// An element shorter than 25 characters or without ancestors is skipped.
/// Its score is `1 + comma segments + min(len / 100, 3)`, added in full to
/// the parent, halved for the grandparent and divided by `level * 3` above
/// that. Ancestors are initialized on first touch and returned as the
/// candidate list, in the order they were first reached.
pub fn score_elements<'a>(
    elements: &[NodeRef<'a>],
    scores: &mut ScoreTable,
    flags: Flags,
) -> Vec<NodeRef<'a>> {
    let mut candidates = Vec::new();

    for element in elements {
        if dom::parent_element(element).is_none() {
            continue;
        }

        let text = dom::inner_text(element, true);
        let length = text.chars().count();
        if length < 25 {
            continue;
        }

        let ancestors = dom::ancestors(element, 3);
        if ancestors.is_empty() {
            continue;
        }

        let content_score = 1.0 + comma_segments(&text) as f64 + (length / 100).min(3) as f64;

        for (level, ancestor) in ancestors.iter().enumerate() {
            if !scores.contains(ancestor) {
                initialize_node(ancestor, scores, flags);
                candidates.push(*ancestor);
            }

            let divider = match level {
                0 => 1.0,
                1 => 2.0,
                _ => level as f64 * 3.0,
            };
            scores.add(ancestor, content_score / divider);
        }
    }

    candidates
}
