//! # rs-readable
//!
//! Readability-style article extraction.
//!
//! This library finds the main article of a web page and returns it as
//! cleaned HTML, together with its text and metadata (title, byline,
//! excerpt, language, publication date, text direction). Navigation,
//! sidebars, share widgets and other boilerplate are stripped.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readable::{parse, ParseStatus};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Too short to be an article.</p></article></body></html>"#;
//!
//! let article = parse(html)?;
//! assert_eq!(article.status, ParseStatus::NotReaderable);
//! assert_eq!(article.title, "My Article");
//! # Ok::<(), rs_readable::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content Extraction**: Scores paragraphs and their containers, picks the
//!   best candidate and merges related siblings
//! - **Retries**: Relaxes its heuristics one at a time when too little text comes out
//! - **Metadata Extraction**: Title, byline, excerpt, language and publication date
//! - **Multi-page Articles**: Follows next-page links through a caller-supplied [`PageFetcher`]
//!
//! The extractor never performs I/O: documents arrive parsed (or as a
//! string), and follow-up pages are loaded by the caller's fetcher.

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Main content extraction module (scoring, candidates, cleaning, pagination).
pub mod extractor;

/// Metadata extraction (meta tags, title, language, dates).
pub mod metadata;

/// URL utilities for resolution and next-page base URLs.
pub mod url_utils;

/// Link density and text counting helpers.
pub mod link_density;

// Public API - re-exports
pub use dom_query::Document;
pub use error::{Error, FetchError, Result};
pub use extractor::{FetchedPage, PageFetcher};
pub use options::Options;
pub use result::{Article, Metadata, ParseStatus};

/// Extracts the article from an HTML string using default options.
///
/// # Example
///
/// ```rust
/// let html = "<html><body><p>Hello</p></body></html>";
/// let article = rs_readable::parse(html)?;
/// assert!(!article.is_readable());
/// # Ok::<(), rs_readable::Error>(())
/// ```
pub fn parse(html: &str) -> Result<Article> {
    parse_with_options(html, &Options::default())
}

/// Extracts the article from an HTML string with custom options.
///
/// # Example
///
/// ```rust
/// use rs_readable::{parse_with_options, Options};
///
/// let html = "<html><body><p>Hello</p></body></html>";
/// let options = Options {
///     url: Some("https://example.com/post".to_string()),
///     continue_if_not_readable: true,
///     ..Options::default()
/// };
/// let article = parse_with_options(html, &options)?;
/// assert_eq!(article.url.as_deref(), Some("https://example.com/post"));
/// # Ok::<(), rs_readable::Error>(())
/// ```
pub fn parse_with_options(html: &str, options: &Options) -> Result<Article> {
    let document = Document::from(html);
    parse_document(&document, options)
}

/// Extracts the article from an already parsed document.
///
/// The document is modified in place while extracting.
pub fn parse_document(document: &Document, options: &Options) -> Result<Article> {
    extract::extract_article(document, options, None)
}

/// Extracts the article from an already parsed document, following
/// next-page links through `fetcher`.
///
/// Pagination needs `options.url` so links can be resolved and compared;
/// without it, or with `options.paginate` unset, the fetcher is never used.
pub fn parse_document_with_fetcher(document: &Document, options: &Options, fetcher: &dyn PageFetcher) -> Result<Article> {
    extract::extract_article(document, options, Some(fetcher))
}

/// Whether the document probably holds an article, without extracting it.
#[must_use]
pub fn is_probably_readerable(document: &Document) -> bool {
    extractor::is_probably_readerable(document)
}
