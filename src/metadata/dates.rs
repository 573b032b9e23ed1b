//! Publication date extraction.
//!
//! Sources, in order: the `article:published_time` and `date` meta values,
//! the `pubdate` attribute of `<time>` elements, and a `/YYYY/MM/DD` pattern
//! in the page URL. Unparseable values are skipped, never reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use dom_query::Document;
use url::Url;

use super::meta_tags::MetaTags;
use crate::dom;
use crate::patterns::URL_DATE;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Parse a timestamp in one of the common web formats.
///
/// Values without an offset are taken as UTC.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Date found in a URL path, e.g. `/2021/03/14/title` or `/2021/03/`.
///
/// A missing day defaults to the 1st.
#[must_use]
pub fn date_from_url(url: &Url) -> Option<DateTime<Utc>> {
    let path_and_query = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    };

    let caps = URL_DATE.captures(&path_and_query)?;
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let month: u32 = caps.name("month")?.as_str().parse().ok()?;
    let day: u32 = match caps.name("day") {
        Some(day) => day.as_str().parse().ok()?,
        None => 1,
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Publication date of the document.
#[must_use]
pub fn extract_publication_date(doc: &Document, meta: &MetaTags, url: Option<&Url>) -> Option<DateTime<Utc>> {
    ["article:published_time", "date"]
        .iter()
        .filter_map(|key| meta.get(key))
        .find_map(parse_date)
        .or_else(|| {
            doc.select("time")
                .nodes()
                .iter()
                .filter_map(|time| dom::get_attribute(time, "pubdate"))
                .find_map(|value| parse_date(&value))
        })
        .or_else(|| url.and_then(date_from_url))
}
