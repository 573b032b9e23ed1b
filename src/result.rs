//! Result types for parse output.
//!
//! This module defines the article returned by a parse call, the metadata
//! record gathered from the document head, and the status that tells a
//! readable article apart from the two non-content outcomes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    /// Article content was extracted.
    Success,

    /// The readability pre-check rejected the document and
    /// `Options::continue_if_not_readable` was not set.
    NotReaderable,

    /// Every retry pass finished below the character threshold.
    ExtractionFailed,
}

/// Metadata extracted from an HTML document.
///
/// Populated once per parse and never mutated afterwards. All fields are
/// optional as metadata may not be present in all documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Byline taken from an `author` meta tag.
    pub byline: Option<String>,

    /// Resolved article title.
    pub title: Option<String>,

    /// Author taken from an `author` meta tag.
    pub author: Option<String>,

    /// Short description of the article.
    pub excerpt: Option<String>,

    /// Declared document language.
    pub language: Option<String>,

    /// Publication date.
    pub publication_date: Option<DateTime<Utc>>,

    /// Text direction (`ltr`, `rtl`, `auto`).
    pub dir: Option<String>,
}

/// Result of a parse call.
///
/// For non-content outcomes (`status` other than `Success`) only `url`,
/// `title` and `status` are meaningful.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Original URL of the document, if one was configured.
    pub url: Option<String>,

    /// Article title.
    pub title: String,

    /// Author attribution line.
    pub byline: Option<String>,

    /// Text direction of the content.
    pub dir: Option<String>,

    /// Content language.
    pub language: Option<String>,

    /// Author name.
    pub author: Option<String>,

    /// Cleaned content subtree serialized as HTML.
    pub content: Option<String>,

    /// Normalized text of `content`.
    pub text_content: String,

    /// Character count of `text_content`.
    pub length: usize,

    /// Short description, falling back to the first paragraph.
    pub excerpt: Option<String>,

    /// Publication date.
    pub publication_date: Option<DateTime<Utc>>,

    /// Metadata record gathered from the document.
    pub metadata: Metadata,

    /// Outcome of the parse.
    pub status: ParseStatus,
}

impl Article {
    /// Article for a document that produced no content.
    #[must_use]
    pub(crate) fn without_content(url: Option<String>, title: String, status: ParseStatus) -> Self {
        Self {
            url,
            title,
            byline: None,
            dir: None,
            language: None,
            author: None,
            content: None,
            text_content: String::new(),
            length: 0,
            excerpt: None,
            publication_date: None,
            metadata: Metadata::default(),
            status,
        }
    }

    /// Whether content was extracted.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.status == ParseStatus::Success
    }
}
