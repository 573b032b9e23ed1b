//! Configuration options for article extraction.
//!
//! The `Options` struct controls the limits and toggles of a parse call.
//! The heuristic flags themselves are not configurable: every page starts
//! with all of them set and the retry loop relaxes them.

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_readable::Options;
///
/// let options = Options {
///     url: Some("https://example.com/2024/05/01/story".to_string()),
///     continue_if_not_readable: true,
///     ..Options::default()
/// };
/// assert_eq!(options.n_top_candidates, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Original URL of the document.
    ///
    /// Used to resolve relative links in the extracted content, to infer a
    /// publication date from the path, and as the base for pagination.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Maximum number of elements in the document before aborting.
    ///
    /// `0` disables the check.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// Number of top candidates tracked when analysing how tight the
    /// competition is among candidates.
    ///
    /// Default: `5`
    pub n_top_candidates: usize,

    /// Maximum number of pages merged before a "View Next Page" link is
    /// rendered instead of fetching.
    ///
    /// Default: `5`
    pub max_pages: usize,

    /// Keep extracting when the readability pre-check says the document is
    /// probably not an article.
    ///
    /// Default: `false`
    pub continue_if_not_readable: bool,

    /// Minimum normalized text length an extraction pass must produce before
    /// the retry loop accepts it.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Follow next-page links when a fetcher is supplied.
    ///
    /// Default: `true`
    pub paginate: bool,

    /// Resolve relative `href`/`src` values in the extracted content against
    /// `url`.
    ///
    /// Default: `true`
    pub fix_relative_uris: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            max_elems_to_parse: 0,
            n_top_candidates: 5,
            max_pages: 5,
            continue_if_not_readable: false,
            char_threshold: 500,
            paginate: true,
            fix_relative_uris: true,
        }
    }
}
