use rs_readable::{parse, parse_with_options, Options, ParseStatus};

const PARAGRAPH: &str = "The bakery on the corner has opened at five every morning for forty years, through strikes, \
    floods, and two changes of owner. Regulars say the bread has not changed at all, though the prices, the ovens, \
    and the queue outside certainly have.";

fn page() -> String {
    let paragraphs: String = (0..4).map(|_| format!("<p>{PARAGRAPH}</p>")).collect();
    format!(r#"<html><head><title>The Corner Bakery Turns Forty</title></head><body><div id="main">{paragraphs}</div></body></html>"#)
}

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();

    assert!(options.url.is_none());
    assert_eq!(options.max_elems_to_parse, 0);
    assert_eq!(options.n_top_candidates, 5);
    assert_eq!(options.max_pages, 5);
    assert!(!options.continue_if_not_readable);
    assert_eq!(options.char_threshold, 500);
    assert!(options.paginate);
    assert!(options.fix_relative_uris);
}

#[test]
fn parse_with_default_options_matches_parse() {
    let html = page();

    let plain = parse(&html).expect("parse should succeed");
    let with_defaults = parse_with_options(&html, &Options::default()).expect("parse should succeed");

    assert_eq!(plain.content, with_defaults.content);
    assert_eq!(plain.text_content, with_defaults.text_content);
}

#[test]
fn element_limit_above_document_size_is_fine() {
    let options = Options {
        max_elems_to_parse: 10_000,
        ..Options::default()
    };

    let article = parse_with_options(&page(), &options).expect("parse should succeed");

    assert_eq!(article.status, ParseStatus::Success);
}

#[test]
fn single_top_candidate_still_extracts() {
    let options = Options {
        n_top_candidates: 1,
        ..Options::default()
    };

    let article = parse_with_options(&page(), &options).expect("parse should succeed");

    assert_eq!(article.status, ParseStatus::Success);
    assert!(article.text_content.contains("The bakery on the corner"));
}

#[test]
fn url_is_reported_on_article() {
    let options = Options {
        url: Some("https://example.com/local/bakery".to_string()),
        ..Options::default()
    };

    let article = parse_with_options(&page(), &options).expect("parse should succeed");

    assert_eq!(article.url.as_deref(), Some("https://example.com/local/bakery"));
}
