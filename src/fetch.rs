// src/fetch.rs

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use crate::cache::PageCache;

/// HTTP session shared by every request in one run: a single client plus an
/// optional on-disk page cache. No timeout is set; a hung call blocks the
/// whole (sequential) run.
pub struct Session {
    client: Client,
    cache: Option<PageCache>,
}

impl Session {
    pub fn new(cache_dir: Option<&Path>) -> Result<Self> {
        let client = Client::builder().build().context("building HTTP client")?;
        let cache = match cache_dir {
            Some(dir) => Some(PageCache::new(dir)?),
            None => None,
        };
        Ok(Self { client, cache })
    }

    /// GET a page and decode the body as UTF-8 regardless of what the server's
    /// headers claim. Transport failures are logged here and surface as `Err`,
    /// aborting the calling mode.
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.load(url)? {
                debug!(%url, "cache hit");
                return Ok(body);
            }
        }
        let bytes = self.fetch(url).await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        if let Some(cache) = &self.cache {
            cache.store(url, &body)?;
        }
        Ok(body)
    }

    /// Uncached binary GET, used for archive downloads.
    pub async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        self.fetch(url).await
    }

    pub fn clear_cache(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        Ok(())
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "GET");
        let result = async {
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {url} failed"))?
                .error_for_status()
                .with_context(|| format!("non-success status from {url}"))?;
            let bytes = resp
                .bytes()
                .await
                .with_context(|| format!("reading body from {url}"))?;
            Ok::<_, anyhow::Error>(bytes.to_vec())
        }
        .await;
        if let Err(err) = &result {
            error!(%url, error = %err, "request failed");
        }
        result
    }
}
