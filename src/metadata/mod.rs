//! Metadata extraction module.
//!
//! This module derives the document-level metadata record: title, byline,
//! author, excerpt, language and publication date. Extraction never fails;
//! anything missing or unparseable leaves its field empty.

pub mod dates;
pub mod meta_tags;
pub mod title;

use dom_query::Document;
use url::Url;

use crate::result::Metadata;

pub use dates::{date_from_url, extract_publication_date, parse_date};
pub use meta_tags::{extract_language, MetaTags};
pub use title::{article_title, document_title};

/// Extract all metadata from a document.
///
/// Runs on the prepared document, before any article extraction pass, so
/// headings used for title resolution are still in place. `dir` is left
/// empty: it is only known once an article candidate has been chosen.
#[must_use]
pub fn extract_metadata(doc: &Document, url: Option<&Url>) -> Metadata {
    let meta = MetaTags::collect(doc);

    let title = Some(article_title(doc))
        .filter(|t| !t.is_empty())
        .or_else(|| meta.fallback_title());

    let metadata = Metadata {
        byline: meta.author.clone(),
        title,
        author: meta.author.clone(),
        excerpt: meta.excerpt(),
        language: extract_language(doc),
        publication_date: extract_publication_date(doc, &meta, url),
        dir: None,
    };

    log::debug!(
        "metadata: title={:?} language={:?} date={:?}",
        metadata.title,
        metadata.language,
        metadata.publication_date
    );

    metadata
}
