//! DOM Operations Adapter
//!
//! The tree capability set the extraction core relies on, implemented over
//! the `dom_query` crate. Every structural mutation goes through this module
//! so the heuristics never depend on how `dom_query` links nodes internally.
//!
//! Nodes are addressed by `NodeRef` and identified by `NodeId`. Removed nodes
//! stay allocated in the document arena, so a `NodeId` is never reused within
//! one document and is a stable key for side tables.

pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns::{DISPLAY_NONE, NORMALIZE, WHITESPACE};

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get the `class` attribute, empty when absent
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    get_attribute(node, "class").unwrap_or_default()
}

/// Get the `id` attribute, empty when absent
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    get_attribute(node, "id").unwrap_or_default()
}

/// Class and id joined by a space, the string class/id patterns run against.
#[must_use]
pub fn match_string(node: &NodeRef) -> String {
    format!("{} {}", class_name(node), id(node))
}

/// Set an attribute value
#[inline]
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    node.set_attr(name, value);
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

/// Get all attributes as key-value pairs
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

// === Tag/Node Information ===

/// Get tag name (lowercase), `None` for non-element nodes
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether an element has the given tag name (case-insensitive)
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|t| t.eq_ignore_ascii_case(tag))
}

/// Check whether an element's tag is one of `tags` (lowercase)
#[must_use]
pub fn is_one_of(node: &NodeRef, tags: &[&str]) -> bool {
    tag_name(node).is_some_and(|t| tags.contains(&t.as_str()))
}

/// Computed visibility: hidden only by a `hidden` attribute or an inline
/// `display: none`.
#[must_use]
pub fn is_visible(node: &NodeRef) -> bool {
    if node.has_attr("hidden") {
        return false;
    }
    !get_attribute(node, "style").is_some_and(|style| DISPLAY_NONE.is_match(&style))
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Trimmed text content, with runs of two or more whitespace characters
/// collapsed to one space when `normalize_spaces` is set.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize_spaces: bool) -> String {
    let text = text_content(node);
    let trimmed = text.trim();
    if normalize_spaces {
        NORMALIZE.replace_all(trimmed, " ").into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Character count of the normalized inner text
#[inline]
#[must_use]
pub fn inner_text_len(node: &NodeRef) -> usize {
    inner_text(node, true).chars().count()
}

/// Whether a node is text made only of whitespace
#[must_use]
pub fn is_whitespace_text(node: &NodeRef) -> bool {
    node.is_text() && WHITESPACE.is_match(&text_content(node))
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
    Selection::from(*node).inner_html().to_string()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    Selection::from(*node).html().to_string()
}

/// Replace the children of a node with parsed markup
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    Selection::from(*node).set_html(html);
}

// === Tree Navigation ===

/// Parent element; `None` at the root element or for detached nodes
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// All child nodes, including text
#[inline]
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
}

/// Element children only
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// First element child
#[must_use]
pub fn first_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut child = node.first_child();
    while let Some(c) = child {
        if c.is_element() {
            return Some(c);
        }
        child = c.next_sibling();
    }
    None
}

/// Next sibling that is an element (skipping text nodes)
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

/// Starting at `node`, skip whitespace-only text nodes and return the first
/// element reached. Any other node kind in between stops the scan.
#[must_use]
pub fn next_element<'a>(node: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    let mut next = node;
    while let Some(n) = next {
        if n.is_element() {
            return Some(n);
        }
        if !is_whitespace_text(&n) {
            return None;
        }
        next = n.next_sibling();
    }
    None
}

/// Element ancestors from the parent upwards; `max_depth == 0` walks to the root.
#[must_use]
pub fn ancestors<'a>(node: &NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
    let mut result = Vec::new();
    let mut current = parent_element(node);
    while let Some(parent) = current {
        result.push(parent);
        if max_depth != 0 && result.len() == max_depth {
            break;
        }
        current = parent_element(&parent);
    }
    result
}

/// Whether an ancestor within `max_depth` levels has tag `tag` and passes
/// `filter`. A `max_depth` of 0 searches all ancestors.
pub fn has_ancestor_tag<F>(node: &NodeRef, tag: &str, max_depth: usize, filter: F) -> bool
where
    F: Fn(&NodeRef) -> bool,
{
    let mut depth = 0;
    let mut current = parent_element(node);
    while let Some(parent) = current {
        if max_depth > 0 && depth > max_depth {
            return false;
        }
        if is_tag(&parent, tag) && filter(&parent) {
            return true;
        }
        current = parent_element(&parent);
        depth += 1;
    }
    false
}

/// Depth-first traversal over elements.
///
/// Returns the first element child unless `ignore_self_and_kids` is set,
/// then the next sibling, then the next sibling of the closest ancestor
/// that has one. Calling this in a loop walks the tree in document order.
#[must_use]
pub fn next_node<'a>(node: &NodeRef<'a>, ignore_self_and_kids: bool) -> Option<NodeRef<'a>> {
    if !ignore_self_and_kids {
        if let Some(child) = first_element_child(node) {
            return Some(child);
        }
    }
    if let Some(sibling) = next_element_sibling(node) {
        return Some(sibling);
    }
    let mut current = parent_element(node);
    while let Some(parent) = current {
        if let Some(sibling) = next_element_sibling(&parent) {
            return Some(sibling);
        }
        current = parent_element(&parent);
    }
    None
}

// === Querying ===

/// Descendant elements matching a CSS selector, in document order
#[must_use]
pub fn query_all<'a>(node: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*node).select(selector).nodes().to_vec()
}

/// Number of descendant elements matching a CSS selector
#[must_use]
pub fn count(node: &NodeRef, selector: &str) -> usize {
    Selection::from(*node).select(selector).length()
}

/// The `<body>` element of a document
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

/// The root `<html>` element of a document
#[must_use]
pub fn html_element(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().copied()
}

// === Tree Manipulation ===

/// Create a detached element in the same tree as `anchor`
#[must_use]
pub fn create_element<'a>(anchor: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    anchor.tree.new_element(tag)
}

/// Create a detached text node in the same tree as `anchor`
#[must_use]
pub fn create_text<'a>(anchor: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    anchor.tree.new_text(text)
}

/// Detach a node from its parent
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Move `child` to the end of `parent`'s children
pub fn append_child(parent: &NodeRef, child: &NodeRef) {
    child.remove_from_parent();
    parent.append_child(child);
}

/// Put `new` where `old` is and detach `old`.
///
/// `new` may be a descendant of `old`.
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    new.remove_from_parent();
    old.insert_before(new);
    old.remove_from_parent();
}

/// Move every child node (text included) of `from` to the end of `to`
pub fn move_children(from: &NodeRef, to: &NodeRef) {
    while let Some(child) = from.first_child() {
        append_child(to, &child);
    }
}

/// Rename an element in place, keeping its attributes, children and identity
#[inline]
pub fn set_node_tag(node: &NodeRef, tag: &str) {
    Selection::from(*node).rename(tag);
}

/// Detach every node in `nodes` for which `filter` returns true.
///
/// Walks the list backwards so earlier removals cannot affect later checks
/// on nested matches.
pub fn remove_nodes<F>(nodes: &[NodeRef], filter: F)
where
    F: Fn(&NodeRef) -> bool,
{
    for node in nodes.iter().rev() {
        if node.parent().is_some() && filter(node) {
            remove(node);
        }
    }
}
