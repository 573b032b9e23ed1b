use rs_readable::{is_probably_readerable, Document};

fn long_text(words: usize) -> String {
    (0..words).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn article_page_is_readerable() {
    let text = long_text(60);
    let doc = Document::from(format!("<html><body><p>{text}</p><p>{text}</p><p>{text}</p></body></html>").as_str());

    assert!(is_probably_readerable(&doc));
}

#[test]
fn navigation_page_is_not_readerable() {
    let links: String = (0..50).map(|i| format!(r#"<li><a href="/p/{i}">Item {i}</a></li>"#)).collect();
    let doc = Document::from(format!("<html><body><ul>{links}</ul></body></html>").as_str());

    assert!(!is_probably_readerable(&doc));
}

#[test]
fn hidden_paragraphs_do_not_count() {
    let text = long_text(60);
    let doc = Document::from(
        format!(r#"<html><body><div style="display: none"></div><p hidden>{text}</p><p style="display:none">{text}</p><p hidden>{text}</p></body></html>"#)
            .as_str(),
    );

    assert!(!is_probably_readerable(&doc));
}

#[test]
fn pre_blocks_count() {
    let text = long_text(60);
    let doc = Document::from(format!("<html><body><pre>{text}</pre><pre>{text}</pre></body></html>").as_str());

    assert!(is_probably_readerable(&doc));
}

#[test]
fn check_does_not_modify_document() {
    let text = long_text(60);
    let html = format!(r#"<html><body><div class="sidebar"><p>{text}</p></div><p>{text}</p></body></html>"#);
    let doc = Document::from(html.as_str());
    let before = doc.html().to_string();

    is_probably_readerable(&doc);

    assert_eq!(doc.html().to_string(), before);
}
