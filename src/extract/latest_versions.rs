// src/extract/latest_versions.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::Table;
use crate::error::ScrapeError;
use crate::fetch::Session;
use crate::html::{find_tag, require_attr, text_of};

static VERSION_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Python (\d\.\d+) \((.*)\)").expect("valid regex"));
static LISTS: Lazy<Selector> = Lazy::new(|| Selector::parse("ul").expect("valid selector"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Splits anchor text like "Python 3.11 (stable)" into ("3.11", "stable").
/// Anything else becomes (whole text, "").
fn split_version_status(text: &str) -> (String, String) {
    match VERSION_STATUS.captures(text) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// One row per entry of the sidebar's "All versions" list:
/// (doc link as found in the page, version, status).
pub async fn latest_versions(session: &Session, main_doc_url: &Url) -> Result<Table> {
    let body = session.get_text(main_doc_url).await?;
    let doc = Html::parse_document(&body);
    let sidebar = find_tag(doc.root_element(), "div.sphinxsidebarwrapper")?;
    let list = sidebar
        .select(&LISTS)
        .find(|ul| text_of(*ul).contains("All versions"))
        .ok_or_else(|| {
            ScrapeError::NothingFound("no \"All versions\" list in the sidebar".to_string())
        })?;

    let mut results: Table = vec![vec![
        "Documentation link".to_string(),
        "Version".to_string(),
        "Status".to_string(),
    ]];
    for anchor in list.select(&ANCHORS) {
        let link = require_attr(anchor, "href")?;
        let (version, status) = split_version_status(&text_of(anchor));
        results.push(vec![link.to_string(), version, status]);
    }
    Ok(results)
}
