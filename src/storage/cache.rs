//! On-disk cache for fetched pages.
//!
//! One file per sanitized target under `{cache_root}/{subreddit}/`. A miss
//! is `Ok(None)`, never an error; a write failure is fatal to the run.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Filesystem cache mapping relative targets to raw page bodies.
#[derive(Debug, Clone)]
pub struct PageCache {
    base_dir: PathBuf,
}

impl PageCache {
    /// Open (and create if absent) the cache directory for one subreddit.
    pub async fn open(cache_root: impl Into<PathBuf>, subreddit: &str) -> Result<Self> {
        let base_dir = cache_root.into().join(subreddit);
        tokio::fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    /// Sanitize a target into a flat file name.
    ///
    /// `%` and `#` are escaped before `/` is mapped to `#`, so two distinct
    /// targets can never collide on the same file.
    pub fn sanitize(target: &str) -> String {
        target
            .replace('%', "%25")
            .replace('#', "%23")
            .replace('/', "#")
    }

    /// Full path for a target's cache entry.
    fn path(&self, target: &str) -> PathBuf {
        self.base_dir.join(Self::sanitize(target))
    }

    /// Look up previously stored content for a target.
    pub async fn get(&self, target: &str) -> Result<Option<String>> {
        let path = self.path(target);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Store content for a target, replacing any prior entry.
    ///
    /// Writes to a temp file and renames it over the entry, so a concurrent
    /// crash cannot leave a truncated body where a valid one used to be.
    pub async fn put(&self, target: &str, content: &str) -> Result<()> {
        let name = Self::sanitize(target);
        let path = self.base_dir.join(&name);

        // The scratch name lives outside the sanitized keyspace: sanitize
        // only ever emits '%' as "%25" or "%23", so no target can map onto
        // a "...%tmp" file name.
        let tmp = self.base_dir.join(format!("{name}%tmp"));
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_get() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::open(tmp.path(), "rust").await.unwrap();

        cache.put("/", "<html>listing</html>").await.unwrap();
        let content = cache.get("/").await.unwrap();
        assert_eq!(content.as_deref(), Some("<html>listing</html>"));
    }

    #[tokio::test]
    async fn test_miss_is_none() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::open(tmp.path(), "rust").await.unwrap();

        assert!(cache.get("/never-fetched").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::open(tmp.path(), "rust").await.unwrap();

        cache.put("/comments/abc/", "old").await.unwrap();
        cache.put("/comments/abc/", "new").await.unwrap();
        assert_eq!(
            cache.get("/comments/abc/").await.unwrap().as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn test_subreddits_are_namespaced() {
        let tmp = TempDir::new().unwrap();
        let a = PageCache::open(tmp.path(), "rust").await.unwrap();
        let b = PageCache::open(tmp.path(), "golang").await.unwrap();

        a.put("/", "rust listing").await.unwrap();
        assert!(b.get("/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_scratch_file_never_clobbers_other_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::open(tmp.path(), "rust").await.unwrap();

        // "/a.html" must not use "/a.tmp"'s storage entry as scratch space.
        cache.put("/a.tmp", "cached A").await.unwrap();
        cache.put("/a.html", "cached B").await.unwrap();

        assert_eq!(cache.get("/a.tmp").await.unwrap().as_deref(), Some("cached A"));
        assert_eq!(cache.get("/a.html").await.unwrap().as_deref(), Some("cached B"));
    }

    #[tokio::test]
    async fn test_put_target_ending_in_tmp_is_replaced_atomically() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::open(tmp.path(), "rust").await.unwrap();

        cache.put("/a.tmp", "old").await.unwrap();
        cache.put("/a.tmp", "new").await.unwrap();

        assert_eq!(cache.get("/a.tmp").await.unwrap().as_deref(), Some("new"));
        // No stray scratch file is left behind in the cache directory.
        let entries = std::fs::read_dir(tmp.path().join("rust")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_sanitize_flattens_separators() {
        assert_eq!(
            PageCache::sanitize("/comments/abc/title/"),
            "#comments#abc#title#"
        );
    }

    #[test]
    fn test_sanitize_is_injective() {
        // Targets that would collide under a bare '/' -> '#' mapping.
        let pairs = [
            ("/a/b", "/a#b"),
            ("/a%23b", "/a#b"),
            ("/x/", "/x#"),
            ("/?q=1", "/%3Fq=1"),
        ];
        for (t1, t2) in pairs {
            assert_ne!(
                PageCache::sanitize(t1),
                PageCache::sanitize(t2),
                "{t1} and {t2} collided"
            );
        }
    }
}
