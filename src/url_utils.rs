//! URL Utility Functions
//!
//! Resolution of relative links in extracted content and the URL cleanup
//! used when comparing links for possible next-page-ness.

use url::Url;

use crate::patterns::{SEGMENT_NUMBER, SEGMENT_PAGE_SUFFIX};

/// Parse an absolute URL, `None` when it is malformed or relative.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    Url::parse(url_str.trim()).ok()
}

/// Resolve `href` against `base`.
///
/// Fragment-only references (`#section`) and values that are already
/// absolute are returned unchanged, as is anything `base` cannot join.
#[must_use]
pub fn to_absolute_uri(href: &str, base: &Url) -> String {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return href.to_string();
    }

    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Drop a `#fragment` and one trailing slash from a link target.
#[must_use]
pub fn strip_fragment_and_slash(href: &str) -> String {
    let without_fragment = href.split('#').next().unwrap_or_default();
    without_fragment
        .strip_suffix('/')
        .unwrap_or(without_fragment)
        .to_string()
}

/// Host of an absolute URL string.
#[must_use]
pub fn host_of(url_str: &str) -> Option<String> {
    parse_url(url_str).and_then(|u| u.host_str().map(str::to_string))
}

/// A cleaned-up version of the page URL, used as the common prefix of
/// next-page links.
///
/// The query string is dropped, then path segments are examined from the
/// last one backwards: alphabetic file extensions are stripped, page-number
/// suffixes and bare one or two digit numbers are removed from the last two
/// segments, a trailing `index` is removed, and short last segments are
/// removed when the final segment holds no letters.
#[must_use]
pub fn find_base_url(url: &Url) -> String {
    let reversed: Vec<&str> = url.path().split('/').rev().collect();
    let first_segment = reversed.first().copied().unwrap_or_default();
    let first_has_letters = first_segment.chars().any(|c| c.is_ascii_alphabetic());

    let mut cleaned: Vec<String> = Vec::with_capacity(reversed.len());
    for (i, raw) in reversed.iter().enumerate() {
        let mut segment = (*raw).to_string();

        if let Some((stem, ext)) = raw.split_once('.') {
            let ext = ext.split('.').next().unwrap_or_default();
            if ext.chars().all(|c| c.is_ascii_alphabetic()) {
                segment = stem.to_string();
            }
        }

        if i < 2 && SEGMENT_PAGE_SUFFIX.is_match(&segment) {
            segment = SEGMENT_PAGE_SUFFIX.replace(&segment, "").into_owned();
        }

        let mut delete = i < 2 && SEGMENT_NUMBER.is_match(&segment);

        if i == 0 && segment.eq_ignore_ascii_case("index") {
            delete = true;
        }

        if i < 2 && segment.chars().count() < 3 && !first_has_letters {
            delete = true;
        }

        if !delete {
            cleaned.push(segment);
        }
    }

    cleaned.reverse();
    format!(
        "{}://{}{}",
        url.scheme(),
        url.host_str().unwrap_or_default(),
        cleaned.join("/")
    )
}
