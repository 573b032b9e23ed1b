//! Compiled regex patterns for article extraction.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification Patterns (matched against "class id")
// =============================================================================

/// Class/id fragments of nodes that are almost never article content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|foot|header|legends|menu|modal|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Exceptions that keep an unlikely-looking node in play.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow").expect("MAYBE_CANDIDATE regex")
});

/// Class/id fragments that raise the class weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE regex")
});

/// Class/id fragments that lower the class weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)hidden|^hid$|hid$|hid|^hid|banner|combx|comment|com-|contact|foot|footer|footnote|masthead|media|meta|modal|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE regex")
});

/// Class/id fragments of author attribution blocks.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Class/id of share widgets left inside the extracted content.
pub static SHARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"share").expect("SHARE regex"));

// =============================================================================
// Text Patterns
// =============================================================================

/// Two or more whitespace characters, collapsed by text normalization.
pub static NORMALIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Whitespace-only text.
pub static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").expect("WHITESPACE regex"));

/// Text that ends in a non-whitespace character.
pub static HAS_CONTENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S$").expect("HAS_CONTENT regex"));

/// A period ending a sentence.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_END regex"));

/// Video hosts whose embeds survive cleaning.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//(www\.)?(dailymotion|youtube|youtube-nocookie|player\.vimeo)\.com")
        .expect("VIDEOS regex")
});

/// Inline style hiding an element.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));

// =============================================================================
// Markup Rewriting Patterns (fetched pages)
// =============================================================================

/// `<script>` blocks, including their contents.
pub static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?>.*?</script>").expect("SCRIPT_BLOCK regex"));

/// Opening and closing `<noscript>` tags.
pub static NOSCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)noscript").expect("NOSCRIPT_TAG regex"));

/// Opening and closing `<font>` tags.
pub static FONT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)font[^>]*>").expect("FONT_TAG regex"));

// =============================================================================
// Metadata Patterns
// =============================================================================

/// `name` attributes of useful meta tags.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*((((twitter)\s*:\s*)?(description|title))|name|date)\s*$").expect("META_NAME regex")
});

/// `property` attributes of useful meta tags (Open Graph, article).
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(og|article)\s*:\s*(description|title|published_time)\s*$")
        .expect("META_PROPERTY regex")
});

/// A `/YYYY/MM/DD` date in a URL path; the day is optional.
pub static URL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?P<year>[0-9]{4})/(?P<month>[0-9]{2})/(?P<day>[0-9]{2})?").expect("URL_DATE regex")
});

// =============================================================================
// Pagination Patterns
// =============================================================================

/// Wording of a link to the next page.
pub static NEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(next|weiter|continue|>([^\|]|$)|»([^\|]|$))").expect("NEXT_LINK regex")
});

/// Wording of a link to a previous page.
pub static PREV_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(prev|earl|old|new|<|«)").expect("PREV_LINK regex"));

/// Link text or URL terms that rule out a next-page link.
pub static EXTRANEOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)print|archive|comment|discuss|e[\-]?mail|share|reply|all|login|sign|single|utility")
        .expect("EXTRANEOUS regex")
});

/// Pagination wording in link data or ancestor class/id.
pub static PAGINATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pag(e|ing|inat)").expect("PAGINATION regex"));

/// "first" or "last" page wording.
pub static FIRST_OR_LAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(first|last)").expect("FIRST_OR_LAST regex"));

/// Page number parameters in a URL (`/page/2`, `?p=3`, `?pagination=34`).
pub static PAGE_NUMBER_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)p(a|g|ag)?(e|ing|ination)?(=|/)[0-9]{1,2}").expect("PAGE_NUMBER_URL regex")
});

/// Paging terms anywhere in a URL.
pub static PAGE_TERM_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(page|paging)").expect("PAGE_TERM_URL regex"));

/// Trailing page marker of a path segment (`story-p2`, `article_3`).
pub static SEGMENT_PAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((_|-)?p[a-z]*|(_|-))[0-9]{1,2}$").expect("SEGMENT_PAGE_SUFFIX regex")
});

/// A path segment that is only a one or two digit number.
pub static SEGMENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$").expect("SEGMENT_NUMBER regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_candidates_with_exception() {
        assert!(UNLIKELY_CANDIDATES.is_match("sidebar-left "));
        assert!(UNLIKELY_CANDIDATES.is_match(" comment-list"));
        assert!(!UNLIKELY_CANDIDATES.is_match("story-body"));
        assert!(MAYBE_CANDIDATE.is_match("main-column"));
    }

    #[test]
    fn positive_and_negative_weights() {
        assert!(POSITIVE.is_match("article-content"));
        assert!(NEGATIVE.is_match("share-tools"));
        assert!(!NEGATIVE.is_match("story"));
    }

    #[test]
    fn sentence_end_requires_period_then_space_or_end() {
        assert!(SENTENCE_END.is_match("Ends here."));
        assert!(SENTENCE_END.is_match("One. Two"));
        assert!(!SENTENCE_END.is_match("version 1.2"));
    }

    #[test]
    fn videos_match_known_hosts() {
        assert!(VIDEOS.is_match("https://www.youtube.com/embed/xyz"));
        assert!(VIDEOS.is_match("//player.vimeo.com/video/1"));
        assert!(!VIDEOS.is_match("https://ads.example.com/embed"));
    }

    #[test]
    fn meta_patterns() {
        assert!(META_NAME.is_match("twitter:description"));
        assert!(META_NAME.is_match(" Description "));
        assert!(META_NAME.is_match("date"));
        assert!(!META_NAME.is_match("keywords"));
        assert!(META_PROPERTY.is_match("article:published_time"));
        assert!(META_PROPERTY.is_match("og:title"));
        assert!(!META_PROPERTY.is_match("og:image"));
    }

    #[test]
    fn next_and_prev_links() {
        assert!(NEXT_LINK.is_match("Next page"));
        assert!(NEXT_LINK.is_match("»"));
        assert!(PREV_LINK.is_match("« Previous"));
    }

    #[test]
    fn font_tag_rewrite() {
        let out = FONT_TAG.replace_all(r#"<font color="red">x</FONT>"#, "<${1}span>");
        assert_eq!(out, "<span>x</span>");
    }
}
