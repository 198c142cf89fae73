// src/cache.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use url::Url;

/// On-disk page cache shared by every request in one run. One file per URL,
/// keyed by the SHA-256 of the URL string.
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating cache dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, url: &Url) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        self.dir.join(format!("{:x}.html", hasher.finalize()))
    }

    pub fn load(&self, url: &Url) -> Result<Option<String>> {
        let path = self.path_for(url);
        match fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("reading cached page {}", path.display()))
            }
        }
    }

    pub fn store(&self, url: &Url, body: &str) -> Result<()> {
        let path = self.path_for(url);
        fs::write(&path, body).with_context(|| format!("writing cached page {}", path.display()))
    }

    /// Drops every cached page. The directory itself survives.
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.dir)
            .with_context(|| format!("clearing cache dir {}", self.dir.display()))?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("recreating cache dir {}", self.dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn store_then_load_roundtrips() -> Result<()> {
        let dir = tempdir()?;
        let cache = PageCache::new(dir.path())?;
        let url = Url::parse("https://docs.python.org/3/")?;

        assert_eq!(cache.load(&url)?, None);
        cache.store(&url, "<html>hi</html>")?;
        assert_eq!(cache.load(&url)?.as_deref(), Some("<html>hi</html>"));
        Ok(())
    }

    #[test]
    fn distinct_urls_do_not_collide() -> Result<()> {
        let dir = tempdir()?;
        let cache = PageCache::new(dir.path())?;
        let a = Url::parse("https://docs.python.org/3/whatsnew/")?;
        let b = Url::parse("https://peps.python.org/")?;

        cache.store(&a, "a")?;
        cache.store(&b, "b")?;
        assert_eq!(cache.load(&a)?.as_deref(), Some("a"));
        assert_eq!(cache.load(&b)?.as_deref(), Some("b"));
        Ok(())
    }

    #[test]
    fn clear_empties_the_cache() -> Result<()> {
        let dir = tempdir()?;
        let cache = PageCache::new(dir.path())?;
        let url = Url::parse("https://peps.python.org/pep-0008/")?;

        cache.store(&url, "body")?;
        cache.clear()?;
        assert_eq!(cache.load(&url)?, None);
        // still usable after a clear
        cache.store(&url, "again")?;
        assert_eq!(cache.load(&url)?.as_deref(), Some("again"));
        Ok(())
    }
}
