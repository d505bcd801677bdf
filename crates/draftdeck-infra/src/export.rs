//! Writes markdown exports to disk.

use std::path::{Path, PathBuf};

use draftdeck_core::domain::MarkdownExport;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write markdown: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `export` into `dir`, never overwriting an existing file.
///
/// A name collision appends `-1`, `-2`, ... to the file stem.
pub async fn write_markdown(dir: &Path, export: &MarkdownExport) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir).await?;

    let name = Path::new(&export.file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("post");
    let ext = name.extension().and_then(|s| s.to_str()).unwrap_or("md");

    let mut candidate = dir.join(format!("{stem}.{ext}"));
    let mut n = 1;
    while tokio::fs::try_exists(&candidate).await? {
        candidate = dir.join(format!("{stem}-{n}.{ext}"));
        n += 1;
    }

    tokio::fs::write(&candidate, &export.contents).await?;
    tracing::info!(path = %candidate.display(), bytes = export.contents.len(), "Markdown exported");
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(name: &str, contents: &str) -> MarkdownExport {
        MarkdownExport {
            file_name: name.to_string(),
            contents: contents.to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_markdown(dir.path(), &export("hello-world.md", "# Hello"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("hello-world.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hello");
    }

    #[tokio::test]
    async fn test_collisions_get_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_markdown(dir.path(), &export("post.md", "a")).await.unwrap();
        let second = write_markdown(dir.path(), &export("post.md", "b")).await.unwrap();
        let third = write_markdown(dir.path(), &export("post.md", "c")).await.unwrap();

        assert_eq!(first.file_name().unwrap(), "post.md");
        assert_eq!(second.file_name().unwrap(), "post-1.md");
        assert_eq!(third.file_name().unwrap(), "post-2.md");
        assert_eq!(std::fs::read_to_string(first).unwrap(), "a");
    }
}
