//! Error types for rs-readable.
//!
//! Only conditions that stop extraction before it starts are errors. A page
//! that is not readable, or whose extraction yields too little text, is
//! reported through [`crate::ParseStatus`] on the returned article instead.

/// Error type for parse operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document holds more elements than `Options::max_elems_to_parse`.
    #[error("Aborting parsing document; {found} elements found (limit {limit})")]
    DocumentTooLarge {
        /// Number of elements in the document.
        found: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The document has no `<body>` element.
    #[error("No body found in document")]
    NoBody,

    /// `Options::url` could not be parsed as an absolute URL.
    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),
}

/// Error returned by a [`crate::PageFetcher`].
///
/// Fetch errors never escape a parse call: pagination stops at the page that
/// failed and the content merged so far is kept.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("Request for {url} failed: {reason}")]
    Request {
        /// URL that was requested.
        url: String,
        /// Transport-level description of the failure.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Request for {url} returned status {status}")]
    Status {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
