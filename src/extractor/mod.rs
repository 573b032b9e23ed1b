//! Main content extraction module.
//!
//! # Module Structure
//!
//! - `state`: Per-pass side tables (scores, candidates, data tables) and flags
//! - `prep`: Document preprocessing (scripts, styles, `<br>` chains, fonts)
//! - `scoring`: Node prepping traversal and content scoring
//! - `candidates`: Top candidate ranking and promotion
//! - `siblings`: Merging related siblings into the article container
//! - `cleaner`: Conditional cleaning of the article container
//! - `pipeline`: The retry loop around one extraction pass
//! - `readerable`: Quick "is this an article" heuristic
//! - `pagination`: Next-page discovery and multi-page merging
//! - `post_process`: Absolute URLs in the extracted content
//!
//! # Usage
//!
//! ```rust
//! use rs_readable::extractor::{pipeline, prep, state::Byline};
//! use rs_readable::{Document, Options};
//!
//! let doc = Document::from("<html><body><p>Too short to be an article.</p></body></html>");
//! prep::prep_document(&doc);
//! let grabbed = pipeline::grab_article(&doc, "Title", &Options::default(), &mut Byline::default(), true);
//! assert!(grabbed.is_none());
//! ```

pub mod candidates;
pub mod cleaner;
pub mod pagination;
pub mod pipeline;
pub mod post_process;
pub mod prep;
pub mod readerable;
pub mod scoring;
pub mod siblings;
pub mod state;

pub use pagination::{FetchedPage, PageFetcher, Paginator};
pub use pipeline::{grab_article, Grabbed};
pub use readerable::is_probably_readerable;
pub use state::{Byline, Flags};
