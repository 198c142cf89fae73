// src/error.rs

use thiserror::Error;

/// Structural failures while walking a parsed page. These propagate uncaught
/// to the top level and abort the run; transport failures are a separate
/// concern handled at the `Session` boundary.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no element matched selector `{css}`")]
    TagNotFound { css: String },

    #[error("invalid selector `{css}`: {detail}")]
    InvalidSelector { css: String, detail: String },

    #[error("attribute `{attr}` missing on matched element")]
    MissingAttr { attr: String },

    #[error("{0}")]
    NothingFound(String),
}
