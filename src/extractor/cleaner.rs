//! Article cleanup.
//!
//! Once the article container is assembled, [`prep_article`] strips what a
//! reader does not want: inline styles, forms, stray embeds, duplicate
//! headers, share widgets and empty paragraphs. Tables that hold real data
//! are detected first so the conditional cleaner leaves them alone.

use dom_query::NodeRef;

use super::scoring::class_weight;
use super::state::{DataTables, Flags};
use crate::dom;
use crate::link_density::{char_count, link_density};
use crate::patterns::{SHARE, VIDEOS};

/// Class marking the inline paragraphs created during node prepping; their
/// style survives cleanup.
pub const STYLED_CLASS: &str = "readability-styled";

/// Clean the article container for presentation.
pub fn prep_article(content: &NodeRef, title: &str, flags: Flags) {
    clean_styles(content);

    let mut data_tables = DataTables::new();
    mark_data_tables(content, &mut data_tables);

    clean_conditionally(content, "form", flags, &data_tables);
    clean_conditionally(content, "fieldset", flags, &data_tables);
    clean(content, "object");
    clean(content, "embed");
    clean(content, "h1");
    clean(content, "footer");

    // The top-level children themselves are kept even when they match.
    for child in dom::element_children(content) {
        clean_matched_nodes(&child, |node| SHARE.is_match(&dom::match_string(node)));
    }

    remove_title_duplicate_h2(content, title);

    for tag in ["iframe", "input", "textarea", "select", "button"] {
        clean(content, tag);
    }
    clean_headers(content, flags);

    // Last, as earlier steps may have removed junk that affects these.
    clean_conditionally(content, "table", flags, &data_tables);
    clean_conditionally(content, "ul", flags, &data_tables);
    clean_conditionally(content, "div", flags, &data_tables);

    dom::remove_nodes(&dom::query_all(content, "p"), |paragraph| {
        dom::count(paragraph, "img, embed, object, iframe") == 0 && dom::inner_text(paragraph, false).is_empty()
    });

    for br in dom::query_all(content, "br") {
        if dom::next_element(br.next_sibling()).is_some_and(|next| dom::is_tag(&next, "p")) {
            dom::remove(&br);
        }
    }
}

/// Remove `style` from `root` and every element below it, except on
/// paragraphs created by node prepping.
pub fn clean_styles(root: &NodeRef) {
    let mut elements = vec![*root];
    elements.extend(dom::query_all(root, "*"));

    for element in &elements {
        if dom::class_name(element) != STYLED_CLASS {
            dom::remove_attribute(element, "style");
        }
    }
}

/// Mark tables holding tabular data rather than layout.
pub fn mark_data_tables(root: &NodeRef, data_tables: &mut DataTables) {
    for table in dom::query_all(root, "table") {
        if dom::get_attribute(&table, "role").as_deref() == Some("presentation") {
            continue;
        }
        if dom::get_attribute(&table, "datatable").as_deref() == Some("0") {
            continue;
        }
        if dom::get_attribute(&table, "summary").is_some_and(|s| !s.is_empty()) {
            data_tables.mark(&table);
            continue;
        }

        let has_caption = dom::query_all(&table, "caption")
            .first()
            .is_some_and(|caption| !dom::child_nodes(caption).is_empty());
        if has_caption {
            data_tables.mark(&table);
            continue;
        }

        if dom::count(&table, "col, colgroup, tfoot, thead, th") > 0 {
            log::trace!("data table because of a data-y descendant");
            data_tables.mark(&table);
            continue;
        }

        // Nested tables indicate a layout table.
        if dom::count(&table, "table") > 0 {
            continue;
        }

        let (rows, columns) = row_and_column_count(&table);
        if rows >= 10 || columns > 4 || rows * columns > 10 {
            data_tables.mark(&table);
        }
    }
}

/// Rows (honouring `rowspan`) and the widest row's columns (honouring
/// `colspan`).
#[must_use]
pub fn row_and_column_count(table: &NodeRef) -> (usize, usize) {
    let span = |node: &NodeRef, attr: &str| -> usize {
        dom::get_attribute(node, attr)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1)
    };

    let mut rows = 0;
    let mut columns = 0;
    for tr in dom::query_all(table, "tr") {
        rows += span(&tr, "rowspan");
        let columns_in_row: usize = dom::query_all(&tr, "td").iter().map(|td| span(td, "colspan")).sum();
        columns = columns.max(columns_in_row);
    }
    (rows, columns)
}

/// Whether an `object`/`embed`/`iframe` points at a known video host, in
/// its attribute values or its inner markup.
fn is_video_embed(element: &NodeRef) -> bool {
    let attribute_values: String = dom::get_all_attributes(element)
        .into_iter()
        .map(|(_, value)| value + "|")
        .collect();

    VIDEOS.is_match(&attribute_values) || VIDEOS.is_match(&dom::inner_html(element))
}

/// Remove every `tag` element below `root`. Video embeds are kept.
pub fn clean(root: &NodeRef, tag: &str) {
    let is_embed = matches!(tag, "object" | "embed" | "iframe");

    dom::remove_nodes(&dom::query_all(root, tag), |element| !(is_embed && is_video_embed(element)));
}

/// Conditionally remove `tag` elements that look like boilerplate, judged
/// by class weight, link density and the mix of paragraphs, images, list
/// items, inputs and embeds they hold. Data tables and everything inside
/// them are kept.
pub fn clean_conditionally(root: &NodeRef, tag: &str, flags: Flags, data_tables: &DataTables) {
    if !flags.clean_conditionally {
        return;
    }

    let is_list = matches!(tag, "ul" | "ol");

    dom::remove_nodes(&dom::query_all(root, tag), |node| {
        if data_tables.contains(node) || dom::has_ancestor_tag(node, "table", 0, |table| data_tables.contains(table)) {
            return false;
        }

        let weight = class_weight(node, flags);
        if weight < 0 {
            return true;
        }

        if char_count(node, ',') >= 10 {
            return false;
        }

        let p = dom::count(node, "p");
        let img = dom::count(node, "img");
        let li = dom::count(node, "li");
        let input = dom::count(node, "input");
        let embeds = dom::query_all(node, "embed")
            .iter()
            .filter(|embed| !dom::get_attribute(embed, "src").is_some_and(|src| VIDEOS.is_match(&src)))
            .count();

        let density = link_density(node);
        let content_length = dom::inner_text_len(node);
        let in_figure = || dom::has_ancestor_tag(node, "figure", 3, |_| true);

        (img > 1 && (p as f64 / img as f64) < 0.5 && !in_figure())
            || (!is_list && li > p)
            || (input > p / 3)
            || (!is_list && content_length < 25 && (img == 0 || img > 2) && !in_figure())
            || (!is_list && weight < 25 && density > 0.2)
            || (weight >= 25 && density > 0.5)
            || (embeds == 1 && content_length < 75)
            || embeds > 1
    });
}

/// Remove the elements strictly inside `root` that match `filter`.
pub fn clean_matched_nodes<F>(root: &NodeRef, filter: F)
where
    F: Fn(&NodeRef) -> bool,
{
    let end = dom::next_node(root, true).map(|n| n.id);
    let mut next = dom::next_node(root, false);

    while let Some(node) = next.filter(|n| Some(n.id) != end) {
        if filter(&node) {
            next = dom::next_node(&node, true);
            dom::remove(&node);
        } else {
            next = dom::next_node(&node, false);
        }
    }
}

/// Remove `h1`/`h2` headers with a negative class weight.
pub fn clean_headers(root: &NodeRef, flags: Flags) {
    dom::remove_nodes(&dom::query_all(root, "h1, h2"), |header| class_weight(header, flags) < 0);
}

/// Remove a lone `h2` that repeats the article title.
///
/// The lengths must be within 50% of each other and the longer text must
/// contain the shorter one.
fn remove_title_duplicate_h2(root: &NodeRef, title: &str) {
    let h2s = dom::query_all(root, "h2");
    let [h2] = h2s.as_slice() else {
        return;
    };

    let title_length = title.chars().count();
    if title_length == 0 {
        return;
    }

    let heading = dom::text_content(h2);
    let heading = heading.trim();
    let rate = (heading.chars().count() as f64 - title_length as f64) / title_length as f64;
    let contained = if rate > 0.0 {
        heading.contains(title)
    } else {
        title.contains(heading)
    };

    if rate.abs() < 0.5 && contained {
        clean(root, "h2");
    }
}
