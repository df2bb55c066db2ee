//! Static asset serving.
//!
//! URL paths are resolved against a fixed asset root. Anything that would
//! leave the root (`..`, absolute components) is reported as not found.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;
use crate::error::AssetError;
use crate::http::mime;

/// A file read from the asset root, ready to become a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// MIME type resolved from the file name, empty when unknown
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    index: String,
    preserve_newlines: bool,
}

impl StaticFiles {
    pub fn new(config: &StaticFilesConfig) -> Self {
        Self {
            root: config.root.clone(),
            index: config.index.clone(),
            preserve_newlines: config.preserve_newlines,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a URL path to a file path under the root.
    ///
    /// Directory paths (`/`, `/docs/`) map to the index file. Returns `None`
    /// when the path tries to escape the root.
    pub fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let mut rel = sanitize_rel_path(url_path)?;
        if url_path.is_empty() || url_path.ends_with('/') {
            rel.push(&self.index);
        }
        Some(self.root.join(rel))
    }

    /// Reads the asset behind `url_path`.
    ///
    /// Text assets have their lines joined without separators unless
    /// `preserve_newlines` is set; binary assets are returned untouched.
    pub async fn read(&self, url_path: &str) -> Result<Asset, AssetError> {
        let file = self
            .resolve(url_path)
            .ok_or_else(|| AssetError::NotFound(url_path.to_string()))?;

        match tokio::fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(AssetError::NotFound(url_path.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AssetError::NotFound(url_path.to_string()));
            }
            Err(e) => {
                return Err(AssetError::Read {
                    path: url_path.to_string(),
                    source: e,
                });
            }
        }

        let raw = tokio::fs::read(&file).await.map_err(|e| AssetError::Read {
            path: url_path.to_string(),
            source: e,
        })?;

        let content_type = mime::content_type(&file.to_string_lossy());
        let body = if mime::is_binary(content_type) || self.preserve_newlines {
            raw
        } else {
            join_lines(&raw).into_bytes()
        };

        tracing::debug!(
            path = %url_path,
            file = %file.display(),
            content_type = content_type,
            bytes = body.len(),
            "Read static asset"
        );

        Ok(Asset { content_type, body })
    }
}

/// Concatenates the lines of a text file, dropping the line terminators.
pub fn join_lines(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).lines().collect()
}

fn sanitize_rel_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let rel = PathBuf::from(trimmed);
    for comp in rel.components() {
        if matches!(
            comp,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        ) {
            return None;
        }
    }
    Some(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> StaticFiles {
        StaticFiles::new(&StaticFilesConfig {
            root: PathBuf::from("public"),
            index: "index.html".to_string(),
            preserve_newlines: false,
        })
    }

    #[test]
    fn resolve_rejects_parent_segments() {
        assert_eq!(files().resolve("/../Cargo.toml"), None);
        assert_eq!(files().resolve("/css/../../secret"), None);
    }

    #[test]
    fn resolve_maps_directories_to_index() {
        assert_eq!(files().resolve("/"), Some(PathBuf::from("public/index.html")));
        assert_eq!(
            files().resolve("/docs/"),
            Some(PathBuf::from("public/docs/index.html"))
        );
    }

    #[test]
    fn join_lines_drops_terminators() {
        assert_eq!(join_lines(b"<p>\r\nhi\n</p>\n"), "<p>hi</p>");
    }
}
