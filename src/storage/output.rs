//! Final output artifact.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::Post;

/// Write the full post list as a JSON array, atomically.
///
/// Called exactly once, after the crawl has finished; a run that fails
/// midway never reaches this point, so no partial artifact can exist.
pub async fn write_posts(path: impl AsRef<Path>, posts: &[Post]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(posts)?;

    // Append rather than swap the extension so a ".tmp" output path still
    // gets a distinct scratch file.
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
