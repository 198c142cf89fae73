// src/html.rs

use scraper::{ElementRef, Selector};
use tracing::error;

use crate::error::ScrapeError;

/// First descendant of `node` matching the CSS selector, in document order.
/// A miss is the primary signal that the page no longer has the structure
/// we expect, so it is logged here before surfacing as `TagNotFound`.
pub fn find_tag<'a>(node: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let selector = Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        css: css.to_string(),
        detail: format!("{e:?}"),
    })?;
    match node.select(&selector).next() {
        Some(el) => Ok(el),
        None => {
            error!(selector = css, "expected tag not found");
            Err(ScrapeError::TagNotFound {
                css: css.to_string(),
            })
        }
    }
}

pub fn require_attr<'a>(el: ElementRef<'a>, attr: &str) -> Result<&'a str, ScrapeError> {
    el.value().attr(attr).ok_or_else(|| ScrapeError::MissingAttr {
        attr: attr.to_string(),
    })
}

/// Concatenated text of all descendant text nodes.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Like `text_of`, with newlines flattened to spaces.
pub fn flat_text(el: ElementRef<'_>) -> String {
    text_of(el).replace('\n', " ")
}
