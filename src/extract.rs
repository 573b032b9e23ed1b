//! Document-level extraction.
//!
//! Runs the full pipeline over one parsed document: size guard, script
//! removal, preprocessing, the readability pre-check, metadata, article
//! grabbing, optional multi-page merging and post-processing, then
//! assembles the [`Article`].

use dom_query::Document;
use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::pagination::{PageFetcher, Paginator};
use crate::extractor::pipeline::grab_article;
use crate::extractor::post_process::fix_relative_uris;
use crate::extractor::prep::{prep_document, remove_scripts};
use crate::extractor::readerable::is_probably_readerable;
use crate::extractor::state::Byline;
use crate::metadata::{article_title, extract_metadata};
use crate::options::Options;
use crate::result::{Article, ParseStatus};

/// Id given to the article container when pages are appended to it.
const CONTENT_ID: &str = "readability-content";

/// Extract the article from `doc`, mutating it in place.
pub(crate) fn extract_article(doc: &Document, opts: &Options, fetcher: Option<&dyn PageFetcher>) -> Result<Article> {
    let url = match opts.url.as_deref() {
        Some(raw) => Some(Url::parse(raw.trim()).map_err(|_| Error::InvalidUrl(raw.to_string()))?),
        None => None,
    };

    if opts.max_elems_to_parse > 0 {
        let found = doc.select("*").length();
        if found > opts.max_elems_to_parse {
            return Err(Error::DocumentTooLarge {
                found,
                limit: opts.max_elems_to_parse,
            });
        }
    }

    let body = dom::body(doc).ok_or(Error::NoBody)?;

    remove_scripts(doc);

    // Links are looked for before preprocessing rewrites the markup.
    let mut paginator = match (fetcher, &url) {
        (Some(fetcher), Some(url)) if opts.paginate => Some(Paginator::new(fetcher, url)),
        _ => None,
    };
    let next_page = paginator
        .as_mut()
        .zip(url.as_ref())
        .and_then(|(paginator, url)| paginator.find_next_page_link(&body, url));

    prep_document(doc);

    if !is_probably_readerable(doc) && !opts.continue_if_not_readable {
        log::debug!("document is probably not readable, stopping");
        return Ok(Article::without_content(
            opts.url.clone(),
            article_title(doc),
            ParseStatus::NotReaderable,
        ));
    }

    let mut metadata = extract_metadata(doc, url.as_ref());
    let title = metadata.title.clone().unwrap_or_default();

    let mut byline = Byline::default();
    let Some(grabbed) = grab_article(doc, &title, opts, &mut byline, true) else {
        log::debug!("no article content found");
        let mut article = Article::without_content(opts.url.clone(), title, ParseStatus::ExtractionFailed);
        article.metadata = metadata;
        return Ok(article);
    };
    let content = grabbed.content;

    if let Some(base) = url.as_ref().filter(|_| opts.fix_relative_uris) {
        fix_relative_uris(&content, base);
    }

    let mut fetched_language = None;
    if let (Some(paginator), Some(link)) = (paginator.as_mut(), next_page) {
        dom::set_attribute(&content, "id", CONTENT_ID);
        fetched_language = paginator.append_pages(&content, link, &title, opts, &mut byline);
    }

    if metadata.excerpt.is_none() {
        metadata.excerpt = dom::query_all(&content, "p")
            .first()
            .map(|p| dom::text_content(p).trim().to_string())
            .filter(|text| !text.is_empty());
    }
    metadata.dir.clone_from(&grabbed.dir);

    let text_content = dom::inner_text(&content, true);
    let length = text_content.chars().count();

    Ok(Article {
        url: opts.url.clone(),
        title,
        byline: byline.text.clone().or_else(|| metadata.byline.clone()),
        dir: grabbed.dir,
        language: metadata.language.clone().or(fetched_language),
        author: byline.author.clone().or_else(|| metadata.author.clone()),
        content: Some(dom::outer_html(&content)),
        text_content,
        length,
        excerpt: metadata.excerpt.clone(),
        publication_date: metadata.publication_date,
        metadata,
        status: ParseStatus::Success,
    })
}
