//! Filesystem mirror storage
//!
//! Maps remote URLs to deterministic local paths under the output directory
//! and writes fetched bodies there, creating parent directories as needed.

use crate::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// Maps a URL to its local path under `output_dir`
///
/// Mapping rules:
/// - an empty or `/` path becomes `index.html`
/// - a path ending in `/` gets `index.html` appended
/// - a path whose final segment has no extension gets `.html` appended
/// - otherwise the path is used as-is
///
/// The leading `/` is stripped and the remainder joined under `output_dir`.
/// Distinct URLs can collide (`/a` and `/a.html` both map to `a.html`); the
/// later write wins.
pub fn local_path(url: &Url, output_dir: &Path) -> PathBuf {
    let mut path = url.path().to_string();

    if path.is_empty() || path == "/" {
        path = "/index.html".to_string();
    } else if path.ends_with('/') {
        path.push_str("index.html");
    } else if Path::new(&path).extension().is_none() {
        path.push_str(".html");
    }

    output_dir.join(path.trim_start_matches('/'))
}

/// Writes a fetched body to its mapped local path
///
/// Creates all missing parent directories first. An existing file at the
/// target path is overwritten; a debug log makes path collisions visible.
pub async fn persist(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!("Overwriting existing file: {}", path.display());
    }

    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(url: &str) -> PathBuf {
        local_path(&Url::parse(url).unwrap(), Path::new("out"))
    }

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(mapped("https://example.com/"), PathBuf::from("out/index.html"));
        assert_eq!(mapped("https://example.com"), PathBuf::from("out/index.html"));
    }

    #[test]
    fn test_directory_path_gets_index() {
        assert_eq!(
            mapped("https://example.com/a/b/"),
            PathBuf::from("out/a/b/index.html")
        );
    }

    #[test]
    fn test_extensionless_path_gets_html() {
        assert_eq!(
            mapped("https://example.com/a/b"),
            PathBuf::from("out/a/b.html")
        );
    }

    #[test]
    fn test_existing_extension_preserved() {
        assert_eq!(
            mapped("https://example.com/a/b.json"),
            PathBuf::from("out/a/b.json")
        );
        assert_eq!(
            mapped("https://example.com/img/logo.png"),
            PathBuf::from("out/img/logo.png")
        );
    }

    #[test]
    fn test_dotted_directory_does_not_count_as_extension() {
        // The extension check looks at the final segment only
        assert_eq!(
            mapped("https://example.com/v1.2/doc"),
            PathBuf::from("out/v1.2/doc.html")
        );
    }

    #[test]
    fn test_known_collision() {
        assert_eq!(mapped("https://example.com/a"), mapped("https://example.com/a.html"));
    }

    #[tokio::test]
    async fn test_persist_creates_parents_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("deep/nested/file.html");

        persist(&target, b"<html></html>").await.unwrap();

        let written = tokio::fs::read(&target).await.unwrap();
        assert_eq!(written, b"<html></html>");
    }

    #[tokio::test]
    async fn test_persist_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("page.html");

        persist(&target, b"first").await.unwrap();
        persist(&target, b"second").await.unwrap();

        let written = tokio::fs::read(&target).await.unwrap();
        assert_eq!(written, b"second");
    }
}
