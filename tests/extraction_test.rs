use rs_readable::{parse, parse_with_options, Error, Options, ParseStatus};

const PARAGRAPH: &str = "The committee met on Tuesday to review the proposal, and after a long debate the members agreed \
    that the plan needed more work. Several speakers raised concerns about the budget, the timeline, and the lack of \
    public consultation, while others argued that delay would only raise costs further.";

fn article_page(head: &str, article_extra: &str) -> String {
    let paragraphs: String = (0..4).map(|_| format!("<p>{PARAGRAPH}</p>")).collect();
    format!(
        r#"<html><head>{head}</head><body>
            <nav class="menu"><a href="/">Home</a> <a href="/about">About</a></nav>
            <article class="post">
                <p class="byline">By Jane Smith</p>
                {paragraphs}
                {article_extra}
            </article>
            <aside class="sidebar"><h3>Related Articles</h3><ul><li><a href="/a">Related one</a></li></ul></aside>
            <footer><p>Copyright 2024</p></footer>
        </body></html>"#
    )
}

#[test]
fn parse_extracts_article_and_drops_boilerplate() {
    let html = article_page("<title>Council Reviews Plan | City News</title>", "");

    let article = parse(&html).expect("parse should succeed");

    assert_eq!(article.status, ParseStatus::Success);
    assert!(article.is_readable());
    assert_eq!(article.title, "Council Reviews Plan");
    assert!(article.text_content.contains("The committee met on Tuesday"));
    assert!(!article.text_content.contains("Related Articles"));
    assert!(!article.text_content.contains("Home"));
    assert!(!article.text_content.contains("Copyright"));
    assert_eq!(article.length, article.text_content.chars().count());

    let content = article.content.as_deref().expect("expected content");
    assert!(content.contains(r#"id="readability-page-1""#));
    assert_eq!(content.matches("<p>").count(), 4);
}

#[test]
fn parse_captures_byline_from_content() {
    let html = article_page("<title>Council Reviews Plan | City News</title>", "");

    let article = parse(&html).expect("parse should succeed");

    assert_eq!(article.byline.as_deref(), Some("By Jane Smith"));
    assert!(!article.text_content.contains("By Jane Smith"));
}

#[test]
fn parse_falls_back_to_meta_author_for_byline() {
    let html = article_page(r#"<title>Council Reviews Plan</title><meta name="author" content="City Desk">"#, "")
        .replace(r#"<p class="byline">By Jane Smith</p>"#, "");

    let article = parse(&html).expect("parse should succeed");

    assert_eq!(article.byline.as_deref(), Some("City Desk"));
    assert_eq!(article.author.as_deref(), Some("City Desk"));
}

#[test]
fn excerpt_prefers_meta_description() {
    let html = article_page(r#"<meta name="description" content="The plan goes back to the drawing board.">"#, "");

    let article = parse(&html).expect("parse should succeed");

    assert_eq!(article.excerpt.as_deref(), Some("The plan goes back to the drawing board."));
}

#[test]
fn excerpt_falls_back_to_first_paragraph() {
    let html = article_page("", "");

    let article = parse(&html).expect("parse should succeed");

    let excerpt = article.excerpt.expect("expected an excerpt");
    assert!(excerpt.starts_with("The committee met on Tuesday"));
    assert_eq!(article.metadata.excerpt.as_deref(), Some(excerpt.as_str()));
}

#[test]
fn relative_links_are_made_absolute() {
    let html = article_page(
        "",
        r#"<p>See <a href="/reports/2024">the report</a> and <a href="javascript:openPopup()">this popup</a>.</p>
           <p><img src="images/chart.png"></p>"#,
    );
    let options = Options {
        url: Some("https://news.example.com/city/council-plan.html".to_string()),
        ..Options::default()
    };

    let article = parse_with_options(&html, &options).expect("parse should succeed");
    let content = article.content.expect("expected content");

    assert!(content.contains(r#"href="https://news.example.com/reports/2024""#));
    assert!(content.contains(r#"src="https://news.example.com/city/images/chart.png""#));
    assert!(!content.contains("javascript:"));
    assert!(article.text_content.contains("this popup"));
}

#[test]
fn relative_links_untouched_when_disabled() {
    let html = article_page("", r#"<p>See <a href="/reports/2024">the report</a>.</p>"#);
    let options = Options {
        url: Some("https://news.example.com/city/council-plan.html".to_string()),
        fix_relative_uris: false,
        ..Options::default()
    };

    let article = parse_with_options(&html, &options).expect("parse should succeed");

    assert!(article.content.expect("expected content").contains(r#"href="/reports/2024""#));
}

#[test]
fn share_widgets_are_removed() {
    let html = article_page("", r#"<div class="share-tools"><a href="/share">Share this</a></div>"#);

    let article = parse(&html).expect("parse should succeed");

    assert!(!article.text_content.contains("Share this"));
}

#[test]
fn video_embeds_survive_cleaning() {
    let html = article_page(
        "",
        r#"<iframe src="https://www.youtube.com/embed/xyz"></iframe><iframe src="https://ads.example.net/slot"></iframe>"#,
    );

    let article = parse(&html).expect("parse should succeed");
    let content = article.content.expect("expected content");

    assert!(content.contains("youtube.com/embed/xyz"));
    assert!(!content.contains("ads.example.net"));
}

#[test]
fn short_page_is_not_readerable() {
    let html = "<html><head><title>A Short Note on Things</title></head><body><p>Just a line.</p></body></html>";

    let article = parse(html).expect("parse should succeed");

    assert_eq!(article.status, ParseStatus::NotReaderable);
    assert!(!article.is_readable());
    assert!(article.content.is_none());
    assert_eq!(article.title, "A Short Note on Things");
}

#[test]
fn short_page_fails_extraction_when_forced() {
    let html = "<html><head><title>A Short Note on Things</title></head><body><p>Just a line.</p></body></html>";
    let options = Options {
        continue_if_not_readable: true,
        ..Options::default()
    };

    let article = parse_with_options(html, &options).expect("parse should succeed");

    assert_eq!(article.status, ParseStatus::ExtractionFailed);
    assert!(article.content.is_none());
    assert_eq!(article.length, 0);
    assert_eq!(article.title, "A Short Note on Things");
}

#[test]
fn too_many_elements_is_an_error() {
    let html = article_page("", "");
    let options = Options {
        max_elems_to_parse: 10,
        ..Options::default()
    };

    match parse_with_options(&html, &options) {
        Err(Error::DocumentTooLarge { found, limit }) => {
            assert_eq!(limit, 10);
            assert!(found > 10);
        }
        other => panic!("expected DocumentTooLarge, got {other:?}"),
    }
}

#[test]
fn invalid_url_is_an_error() {
    let options = Options {
        url: Some("not a url".to_string()),
        ..Options::default()
    };

    let result = parse_with_options(&article_page("", ""), &options);

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
