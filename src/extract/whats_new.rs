// src/extract/whats_new.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use super::Table;
use crate::fetch::Session;
use crate::html::{find_tag, flat_text, require_attr, text_of};

static ARTICLE_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.toctree-l1").expect("valid selector"));

/// One row per "What's New in Python" version article:
/// (absolute article URL, page title, editor/author line).
pub async fn whats_new(session: &Session, whats_new_url: &Url) -> Result<Table> {
    let body = session.get_text(whats_new_url).await?;
    let links: Vec<Url> = {
        let doc = Html::parse_document(&body);
        let section = find_tag(doc.root_element(), "section#what-s-new-in-python")?;
        let wrapper = find_tag(section, "div.toctree-wrapper")?;
        let mut links = Vec::new();
        for item in wrapper.select(&ARTICLE_ITEMS) {
            let anchor = find_tag(item, "a")?;
            let href = require_attr(anchor, "href")?;
            links.push(whats_new_url.join(href)?);
        }
        links
    };

    let mut results: Table = vec![vec![
        "Article link".to_string(),
        "Title".to_string(),
        "Editor, author".to_string(),
    ]];
    let total = links.len();
    for (i, link) in links.iter().enumerate() {
        info!(current = i + 1, total, article = %link, "fetching article");
        let body = session.get_text(link).await?;
        let doc = Html::parse_document(&body);
        let title = text_of(find_tag(doc.root_element(), "h1")?);
        let editors = flat_text(find_tag(doc.root_element(), "dl")?);
        results.push(vec![link.to_string(), title, editors]);
    }
    Ok(results)
}
