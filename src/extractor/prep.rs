//! Document preprocessing.
//!
//! Runs once per document before any extraction pass: scripts and styles
//! are dropped, `<br><br>` chains become paragraphs and `<font>` becomes
//! `<span>`. Fetched follow-up pages get the same treatment at the markup
//! level before they are parsed.

use dom_query::{Document, NodeRef};

use crate::dom;
use crate::patterns::{FONT_TAG, NOSCRIPT_TAG, SCRIPT_BLOCK};

/// Remove every `<script>` and `<noscript>` element.
pub fn remove_scripts(doc: &Document) {
    for script in doc.select("script").nodes().iter().rev() {
        dom::remove_attribute(script, "src");
        dom::remove(script);
    }
    for noscript in doc.select("noscript").nodes().iter().rev() {
        dom::remove(noscript);
    }
}

/// Prepare the document for scoring: drop `<style>`, collapse `<br>` chains
/// under `<body>` and retag `<font>` as `<span>`.
pub fn prep_document(doc: &Document) {
    for style in doc.select("style").nodes().iter().rev() {
        dom::remove(style);
    }

    if let Some(body) = dom::body(doc) {
        replace_brs(&body);
    }

    for font in doc.select("font").nodes() {
        dom::set_node_tag(font, "span");
    }
}

/// Replace two or more successive `<br>` elements with a single `<p>`.
///
/// Whitespace between the `<br>`s is ignored. The new paragraph takes every
/// following sibling up to the next `<br><br>` chain, so
/// `<div>a<br><br>b<br><br>c</div>` becomes `<div>a<p>b</p><p>c</p></div>`.
pub fn replace_brs(root: &NodeRef) {
    for br in dom::query_all(root, "br") {
        // Already removed as part of an earlier chain.
        if br.parent().is_none() {
            continue;
        }

        let mut replaced = false;
        let mut next = br.next_sibling();
        while let Some(candidate) = dom::next_element(next) {
            if !dom::is_tag(&candidate, "br") {
                break;
            }
            replaced = true;
            next = candidate.next_sibling();
            dom::remove(&candidate);
        }

        if !replaced {
            continue;
        }

        let p = dom::create_element(&br, "p");
        dom::replace_node(&br, &p);

        let mut next = p.next_sibling();
        while let Some(node) = next {
            if dom::is_tag(&node, "br") {
                if let Some(after) = dom::next_element(node.next_sibling()) {
                    if dom::is_tag(&after, "br") {
                        break;
                    }
                }
            }
            next = node.next_sibling();
            dom::append_child(&p, &node);
        }
    }
}

/// Rewrite the raw markup of a fetched page: `<script>` blocks are cut,
/// `<noscript>` becomes `<div>` so hidden next-page links stay reachable,
/// and `<font>` becomes `<span>`.
#[must_use]
pub fn prepare_fetched_markup(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, "");
    let noscript_as_div = NOSCRIPT_TAG.replace_all(&without_scripts, "<${1}div");
    FONT_TAG.replace_all(&noscript_as_div, "<${1}span>").into_owned()
}
