//! Article grabbing with retries.
//!
//! One pass runs node prepping, scoring, candidate selection, sibling
//! merging and cleanup over a page. A pass that yields too little text is
//! undone by restoring the page markup, one heuristic is relaxed and the
//! pass runs again, until either enough text comes out or every heuristic
//! has been relaxed.

use dom_query::{Document, NodeRef};

use super::candidates::{rank_candidates, select_top_candidate};
use super::cleaner::prep_article;
use super::scoring::{prep_nodes, score_elements};
use super::siblings::merge_siblings;
use super::state::{Byline, Flags, ScoreTable};
use crate::dom;
use crate::options::Options;

/// Id of the block holding the first page's content.
pub const FIRST_PAGE_ID: &str = "readability-page-1";

/// Content grabbed from one page.
pub struct Grabbed<'a> {
    /// Detached container holding the cleaned content.
    pub content: NodeRef<'a>,

    /// Text direction declared by the document or an ancestor of the content.
    pub dir: Option<String>,
}

/// Extract the article content of `doc`.
///
/// With `first_page` set the content is wrapped in a
/// `readability-page-1` block, ready for pages to be appended after it.
/// Returns `None` when the document has no body or no pass produced
/// `opts.char_threshold` characters.
pub fn grab_article<'a>(
    doc: &'a Document,
    title: &str,
    opts: &Options,
    byline: &mut Byline,
    first_page: bool,
) -> Option<Grabbed<'a>> {
    let page_cache = dom::inner_html(&dom::body(doc)?);
    let mut flags = Flags::all();

    loop {
        // Restoring the markup replaces every node, so nothing is looked up
        // once and reused across passes.
        let root = dom::html_element(doc)?;
        let page = dom::body(doc)?;
        let mut scores = ScoreTable::new();

        let elements = prep_nodes(root, flags, byline);
        let candidates = score_elements(&elements, &mut scores, flags);
        let ranked = rank_candidates(&candidates, &mut scores, opts.n_top_candidates);
        let top = select_top_candidate(&ranked, &page, &mut scores, flags);
        log::debug!(
            "top candidate <{}> \"{}\" scored {:.2} ({} ranked)",
            dom::tag_name(&top.node).unwrap_or_default(),
            dom::match_string(&top.node).trim(),
            scores.score_or_zero(&top.node),
            ranked.len()
        );

        let parent = dom::parent_element(&top.node);
        let content = merge_siblings(&top.node, &scores);
        prep_article(&content, title, flags);

        if first_page {
            wrap_first_page(&content, &top.node, top.created);
        }

        let length = dom::inner_text_len(&content);
        if length >= opts.char_threshold {
            let dir = text_direction(doc, parent.as_ref(), &top.node);
            return Some(Grabbed { content, dir });
        }

        dom::set_inner_html(&page, &page_cache);
        if !flags.drop_next() {
            log::debug!("no pass produced enough text ({length} chars)");
            return None;
        }
        log::debug!("retrying with {flags:?} after {length} chars");
    }
}

/// Put the content into the `readability-page-1` block. A container created
/// from the body becomes the block itself.
fn wrap_first_page(content: &NodeRef, top: &NodeRef, created: bool) {
    if created {
        dom::set_attribute(top, "id", FIRST_PAGE_ID);
        dom::set_attribute(top, "class", "page");
        return;
    }

    let block = dom::create_element(content, "div");
    dom::set_attribute(&block, "id", FIRST_PAGE_ID);
    dom::set_attribute(&block, "class", "page");
    dom::move_children(content, &block);
    dom::append_child(content, &block);
}

/// The document's `dir`, else the first `dir` found on the candidate's
/// former parent, the candidate itself, then the parent's ancestors.
fn text_direction(doc: &Document, parent: Option<&NodeRef>, top: &NodeRef) -> Option<String> {
    let declared = dom::html_element(doc)
        .and_then(|html| dom::get_attribute(&html, "dir"))
        .filter(|d| !d.is_empty());
    if declared.is_some() {
        return declared;
    }

    let mut chain: Vec<NodeRef> = Vec::new();
    if let Some(parent) = parent {
        chain.push(*parent);
    }
    chain.push(*top);
    if let Some(parent) = parent {
        chain.extend(dom::ancestors(parent, 0));
    }

    chain
        .iter()
        .find_map(|node| dom::get_attribute(node, "dir").filter(|d| !d.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence_paragraphs(count: usize) -> String {
        let sentence = "The river cut a deep valley through the soft limestone, over many thousands of years. ";
        (0..count).map(|_| format!("<p>{}</p>", sentence.repeat(3))).collect()
    }

    #[test]
    fn test_grab_article_wraps_first_page() {
        let html = format!(
            r#"<html><body><div class="menu"><a href="/">Home</a></div><div id="article">{}</div></body></html>"#,
            sentence_paragraphs(4)
        );
        let doc = Document::from(html.as_str());

        let grabbed = grab_article(&doc, "", &Options::default(), &mut Byline::default(), true).unwrap();

        let block = dom::element_children(&grabbed.content);
        assert_eq!(block.len(), 1);
        assert_eq!(dom::id(&block[0]), FIRST_PAGE_ID);
        assert_eq!(dom::count(&grabbed.content, "p"), 4);
        assert!(!dom::inner_html(&grabbed.content).contains("Home"));
    }

    #[test]
    fn test_grab_article_gives_up_on_short_page() {
        let doc = Document::from("<html><body><p>Too short.</p></body></html>");

        assert!(grab_article(&doc, "", &Options::default(), &mut Byline::default(), true).is_none());
        // The page is restored after the last pass.
        assert_eq!(doc.select("body p").text().to_string(), "Too short.");
    }

    #[test]
    fn test_failed_passes_restore_markup_exactly() {
        let doc = Document::from(
            r#"<html><body><div class="sidebar" id="side"><p>Related links.</p></div>
            <div>first line<br><br>second line</div>
            <section></section>
            <table class="layout"><tr><td><a href="/x">Menu</a></td></tr></table>
            <div><p></p></div></body></html>"#,
        );
        let body = dom::body(&doc).unwrap();
        let before = dom::inner_html(&body);

        assert!(grab_article(&doc, "", &Options::default(), &mut Byline::default(), true).is_none());

        let body = dom::body(&doc).unwrap();
        assert_eq!(dom::inner_html(&body), before);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let doc = Document::from("<html><body><div><p>Short but enough, for a tiny threshold.</p></div></body></html>");
        let opts = Options {
            char_threshold: 10,
            ..Options::default()
        };

        let grabbed = grab_article(&doc, "", &opts, &mut Byline::default(), false).unwrap();

        assert!(dom::inner_text(&grabbed.content, true).contains("tiny threshold"));
    }

    #[test]
    fn test_direction_from_document_and_ancestor() {
        let html = format!(r#"<html dir="rtl"><body><div>{}</div></body></html>"#, sentence_paragraphs(4));
        let doc = Document::from(html.as_str());
        let grabbed = grab_article(&doc, "", &Options::default(), &mut Byline::default(), false).unwrap();
        assert_eq!(grabbed.dir.as_deref(), Some("rtl"));

        let html = format!(
            r#"<html><body><section dir="ltr"><div><div>{}</div></div><p>x</p></section></body></html>"#,
            sentence_paragraphs(4)
        );
        let doc = Document::from(html.as_str());
        let grabbed = grab_article(&doc, "", &Options::default(), &mut Byline::default(), false).unwrap();
        assert_eq!(grabbed.dir.as_deref(), Some("ltr"));
    }
}
