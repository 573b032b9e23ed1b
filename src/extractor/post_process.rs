//! Content post-processing.

use dom_query::NodeRef;
use url::Url;

use crate::dom;
use crate::url_utils::to_absolute_uri;

/// Make links and images in `content` absolute against `base`.
///
/// `javascript:` links are replaced with their text since scripts are gone.
pub fn fix_relative_uris(content: &NodeRef, base: &Url) {
    for link in dom::query_all(content, "a") {
        let Some(href) = dom::get_attribute(&link, "href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };

        if href.starts_with("javascript:") {
            let text = dom::create_text(&link, &dom::text_content(&link));
            dom::replace_node(&link, &text);
        } else {
            dom::set_attribute(&link, "href", &to_absolute_uri(&href, base));
        }
    }

    for img in dom::query_all(content, "img") {
        if let Some(src) = dom::get_attribute(&img, "src").filter(|s| !s.trim().is_empty()) {
            dom::set_attribute(&img, "src", &to_absolute_uri(&src, base));
        }
    }
}
