//! Multi-page article merging.
//!
//! Articles split over several pages link to the next one with "next",
//! "»" or a page number. Every link on a page is scored for how much it
//! looks like such a link; the best one above a confidence threshold is
//! fetched through a [`PageFetcher`], extracted on its own and appended to
//! the article as a `readability-page-N` block. Pages repeating content
//! already seen (same `ETag`, or same first paragraph) are hidden.

use std::collections::{HashMap, HashSet};

use dom_query::{Document, NodeRef};
use url::Url;

use super::pipeline::grab_article;
use super::post_process::fix_relative_uris;
use super::prep::{prepare_fetched_markup, remove_scripts, replace_brs};
use super::state::Byline;
use crate::dom;
use crate::error::FetchError;
use crate::options::Options;
use crate::patterns::{
    EXTRANEOUS, FIRST_OR_LAST, NEGATIVE, NEXT_LINK, PAGE_NUMBER_URL, PAGE_TERM_URL, PAGINATION, POSITIVE, PREV_LINK,
};
use crate::url_utils::{find_base_url, host_of, parse_url, strip_fragment_and_slash, to_absolute_uri};

/// Minimum score for a link to be followed as the next page.
const NEXT_PAGE_THRESHOLD: i64 = 50;

/// Longest link text still considered a pagination link.
const MAX_LINK_TEXT: usize = 25;

/// Inner markup length a first paragraph needs before it is used to spot
/// duplicate pages.
const MIN_DUPLICATE_PARAGRAPH: usize = 100;

/// A page returned by a [`PageFetcher`].
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Response body markup.
    pub body: String,

    /// `ETag` response header.
    pub etag: Option<String>,

    /// `Content-Language` response header.
    pub content_language: Option<String>,
}

impl FetchedPage {
    /// A page with only a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Loads the markup of follow-up pages.
///
/// The extractor performs no I/O itself; callers wanting multi-page
/// articles supply an implementation backed by their HTTP client. Closures
/// of the right shape implement it too.
pub trait PageFetcher {
    /// Fetch `url`. Errors end pagination; content merged so far is kept.
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

impl<F> PageFetcher for F
where
    F: Fn(&str) -> Result<FetchedPage, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self(url)
    }
}

/// A next-page candidate and its accumulated score.
#[derive(Debug, Clone)]
struct PossiblePage {
    href: String,
    link_text: String,
    score: i64,
}

/// State of one multi-page merge: the pages and `ETag`s already seen.
pub struct Paginator<'f> {
    fetcher: &'f dyn PageFetcher,
    article_url: Url,
    base_url: String,
    parsed_pages: HashSet<String>,
    etags: HashSet<String>,
}

impl<'f> Paginator<'f> {
    /// Start a merge for the article at `article_url`. The article itself
    /// counts as parsed.
    pub fn new(fetcher: &'f dyn PageFetcher, article_url: &Url) -> Self {
        let mut parsed_pages = HashSet::new();
        parsed_pages.insert(strip_fragment_and_slash(article_url.as_str()));

        Self {
            fetcher,
            article_url: article_url.clone(),
            base_url: find_base_url(article_url),
            parsed_pages,
            etags: HashSet::new(),
        }
    }

    /// Find the most likely next-page link below `root`, a page located at
    /// `page_url`.
    ///
    /// The chosen link is recorded as parsed, so it is never picked again.
    pub fn find_next_page_link(&mut self, root: &NodeRef, page_url: &Url) -> Option<String> {
        let article_url = strip_fragment_and_slash(self.article_url.as_str());
        let article_host = self.article_url.host_str().map(str::to_string);

        // Insertion order decides ties.
        let mut pages: Vec<PossiblePage> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for link in dom::query_all(root, "a") {
            let raw = dom::get_attribute(&link, "href").unwrap_or_default();
            if raw.trim().is_empty() {
                continue;
            }
            let href = strip_fragment_and_slash(&to_absolute_uri(&raw, page_url));

            if href.is_empty()
                || href == self.base_url
                || href == article_url
                || self.parsed_pages.contains(&href)
            {
                continue;
            }

            if host_of(&href) != article_host {
                continue;
            }

            let link_text = dom::inner_text(&link, true);
            if EXTRANEOUS.is_match(&link_text) || link_text.chars().count() > MAX_LINK_TEXT {
                continue;
            }

            let leftover = href.replace(&self.base_url, "");
            if !leftover.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }

            let position = *index.entry(href.clone()).or_insert_with(|| {
                pages.push(PossiblePage {
                    href: href.clone(),
                    link_text: String::new(),
                    score: 0,
                });
                pages.len() - 1
            });
            let page = &mut pages[position];
            if page.link_text.is_empty() {
                page.link_text = link_text.clone();
            } else {
                page.link_text = format!("{} | {link_text}", page.link_text);
            }

            page.score += score_link(&link, &href, &link_text, &page.link_text, &self.base_url);
        }

        let mut top: Option<&PossiblePage> = None;
        for page in &pages {
            if page.score >= NEXT_PAGE_THRESHOLD && top.is_none_or(|t| t.score < page.score) {
                top = Some(page);
            }
        }

        let next = top.map(|page| page.href.clone())?;
        log::debug!("next page link: {next}");
        self.parsed_pages.insert(next.clone());
        Some(next)
    }

    /// Fetch and append the pages following the article into `container`,
    /// starting at `first_link`.
    ///
    /// Returns the first `Content-Language` reported by a fetched page.
    pub fn append_pages(
        &mut self,
        container: &NodeRef,
        first_link: String,
        title: &str,
        opts: &Options,
        byline: &mut Byline,
    ) -> Option<String> {
        let mut language = None;
        let mut page_number = 1;
        let mut next = Some(first_link);

        while let Some(link) = next.take() {
            page_number += 1;
            let wrapper = page_wrapper(container, page_number);
            dom::append_child(container, &wrapper);

            if page_number > opts.max_pages {
                append_view_next_link(&wrapper, &link);
                break;
            }

            let fetched = match self.fetcher.fetch(&link) {
                Ok(page) => page,
                Err(err) => {
                    log::warn!("stopping pagination: {err}");
                    break;
                }
            };

            if let Some(etag) = fetched.etag.filter(|e| !e.is_empty()) {
                if !self.etags.insert(etag) {
                    log::debug!("page {page_number} has a known ETag, hiding it");
                    hide(&wrapper);
                    break;
                }
            }
            if language.is_none() {
                language = fetched.content_language.filter(|l| !l.trim().is_empty());
            }

            let page_doc = Document::from(prepare_fetched_markup(&fetched.body));
            if let Some(body) = dom::body(&page_doc) {
                replace_brs(&body);
            }
            remove_scripts(&page_doc);

            let page_url = parse_url(&link).unwrap_or_else(|| self.article_url.clone());
            let following = dom::html_element(&page_doc).and_then(|root| self.find_next_page_link(&root, &page_url));

            let Some(grabbed) = grab_article(&page_doc, title, opts, byline, false) else {
                log::debug!("no content found on page {page_number}");
                break;
            };

            if repeats_earlier_page(container, &grabbed.content) {
                log::debug!("page {page_number} duplicates an earlier page, hiding it");
                hide(&wrapper);
                self.parsed_pages.insert(link);
                break;
            }

            let merged = dom::inner_html(&wrapper) + &dom::inner_html(&grabbed.content);
            dom::set_inner_html(&wrapper, &merged);
            if opts.fix_relative_uris {
                fix_relative_uris(&wrapper, &page_url);
            }
            log::debug!("appended page {page_number} from {link}");

            next = following;
        }

        language
    }
}

/// Score contribution of one `<a>` pointing at `href`.
///
/// `accumulated_text` is the text of every link seen so far for `href`.
fn score_link(link: &NodeRef, href: &str, link_text: &str, accumulated_text: &str, base_url: &str) -> i64 {
    let mut score = 0;

    if !href.starts_with(base_url) {
        score -= 25;
    }

    let link_data = format!("{link_text} {} {}", dom::class_name(link), dom::id(link));
    if NEXT_LINK.is_match(&link_data) {
        score += 50;
    }
    if PAGINATION.is_match(&link_data) {
        score += 25;
    }
    if FIRST_OR_LAST.is_match(&link_data) && !NEXT_LINK.is_match(accumulated_text) {
        score -= 65;
    }
    if NEGATIVE.is_match(&link_data) || EXTRANEOUS.is_match(&link_data) {
        score -= 50;
    }
    if PREV_LINK.is_match(&link_data) {
        score -= 200;
    }

    let mut positive_ancestor = false;
    let mut negative_ancestor = false;
    for ancestor in dom::ancestors(link, 0) {
        let class_and_id = format!("{} {}", dom::class_name(&ancestor), dom::id(&ancestor));

        if !positive_ancestor && PAGINATION.is_match(&class_and_id) {
            positive_ancestor = true;
            score += 25;
        }
        // "footer" is negative, "body-and-footer" is not.
        if !negative_ancestor && NEGATIVE.is_match(&class_and_id) && !POSITIVE.is_match(&class_and_id) {
            negative_ancestor = true;
            score -= 25;
        }
    }

    if PAGE_NUMBER_URL.is_match(href) || PAGE_TERM_URL.is_match(href) {
        score += 25;
    }
    if EXTRANEOUS.is_match(href) {
        score -= 15;
    }

    // Small page numbers come first; "1" is most likely the current page.
    if let Ok(number) = link_text.trim().parse::<i64>() {
        if number == 1 {
            score -= 10;
        } else {
            score += (10 - number).max(0);
        }
    }

    score
}

/// `<div id="readability-page-N" class="page">` with its separator.
fn page_wrapper<'a>(anchor: &NodeRef<'a>, page_number: usize) -> NodeRef<'a> {
    let wrapper = dom::create_element(anchor, "div");
    dom::set_attribute(&wrapper, "id", &format!("readability-page-{page_number}"));
    dom::set_attribute(&wrapper, "class", "page");

    let separator = dom::create_element(anchor, "p");
    dom::set_attribute(&separator, "class", "page-separator");
    dom::set_attribute(&separator, "title", &format!("Page {page_number}"));
    dom::append_child(&separator, &dom::create_text(anchor, "§"));
    dom::append_child(&wrapper, &separator);

    wrapper
}

fn append_view_next_link(wrapper: &NodeRef, link: &str) {
    let centered = dom::create_element(wrapper, "div");
    dom::set_attribute(&centered, "style", "text-align: center");

    let anchor = dom::create_element(wrapper, "a");
    dom::set_attribute(&anchor, "href", link);
    dom::append_child(&anchor, &dom::create_text(wrapper, "View Next Page"));

    dom::append_child(&centered, &anchor);
    dom::append_child(wrapper, &centered);
}

fn hide(wrapper: &NodeRef) {
    dom::set_attribute(wrapper, "style", "display: none");
}

/// Whether the first paragraph of `content` already appears in one of the
/// page blocks of `container`.
fn repeats_earlier_page(container: &NodeRef, content: &NodeRef) -> bool {
    let Some(first_p) = dom::query_all(content, "p").into_iter().next() else {
        return false;
    };
    let paragraph = dom::inner_html(&first_p);
    if paragraph.chars().count() <= MIN_DUPLICATE_PARAGRAPH {
        return false;
    }

    dom::query_all(container, "div.page")
        .iter()
        .filter(|page| dom::id(page).starts_with("readability-page-"))
        .any(|page| dom::inner_html(page).contains(&paragraph))
}
