//! Downloadable artifacts produced by a run

use crate::output::{OutputError, OutputResult};
use std::path::{Path, PathBuf};

pub const SITEMAP_FILE_NAME: &str = "sitemap.xml";
pub const SITEMAP_MIME_TYPE: &str = "application/xml; charset=utf-8";
pub const ROBOTS_FILE_NAME: &str = "robots.txt";
pub const ROBOTS_MIME_TYPE: &str = "text/plain; charset=utf-8";

/// A named text file ready to hand to a save/download collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl Artifact {
    /// Wraps rendered sitemap XML
    pub fn sitemap(xml: String) -> Self {
        Self {
            file_name: SITEMAP_FILE_NAME,
            mime_type: SITEMAP_MIME_TYPE,
            contents: xml,
        }
    }

    /// Wraps rendered robots.txt text
    pub fn robots(text: String) -> Self {
        Self {
            file_name: ROBOTS_FILE_NAME,
            mime_type: ROBOTS_MIME_TYPE,
            contents: text,
        }
    }
}

/// Writes an artifact into `dir`, creating the directory if needed
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Directory creation or write failed
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> OutputResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(artifact.file_name);
    std::fs::write(&path, artifact.contents.as_bytes())
        .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        "Wrote {} ({}, {} bytes)",
        path.display(),
        artifact.mime_type,
        artifact.contents.len()
    );

    Ok(path)
}
