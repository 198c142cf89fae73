// src/extract/download.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scraper::Html;
use tracing::info;
use url::Url;

use crate::fetch::Session;
use crate::html::{find_tag, require_attr};

/// Downloads the pdf-a4.zip documentation archive linked from the downloads
/// page into `dest_dir`, overwriting any previous copy. Returns the saved path.
pub async fn download(session: &Session, downloads_url: &Url, dest_dir: &Path) -> Result<PathBuf> {
    let body = session.get_text(downloads_url).await?;
    let archive_url = {
        let doc = Html::parse_document(&body);
        let table = find_tag(doc.root_element(), "table.docutils")?;
        let anchor = find_tag(table, r#"a[href$="pdf-a4.zip"]"#)?;
        downloads_url.join(require_attr(anchor, "href")?)?
    };

    let filename = archive_url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip");
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("creating downloads dir {}", dest_dir.display()))?;
    let dest_path = dest_dir.join(filename);

    let bytes = session.get_bytes(&archive_url).await?;
    fs::write(&dest_path, &bytes)
        .with_context(|| format!("writing archive to {}", dest_path.display()))?;
    info!(path = %dest_path.display(), "archive saved");
    Ok(dest_path)
}
