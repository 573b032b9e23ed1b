//! Simple CLI that reads HTML from stdin and outputs the article as JSON.
//!
//! The page URL, if known, is the first argument. Set `RUST_LOG=debug` to
//! see the extraction steps on stderr.

use rs_readable::{parse_with_options, Options};
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let options = Options {
        url: std::env::args().nth(1),
        ..Options::default()
    };

    match parse_with_options(&html, &options) {
        Ok(article) => match serde_json::to_string_pretty(&article) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize article: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("Extraction failed: {err}");
            std::process::exit(1);
        }
    }
}
