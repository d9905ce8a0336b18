//! JSON export and writing both report files to disk.

use std::path::{Path, PathBuf};

use chanscope_core::{AuthorStats, Post};
use serde::Serialize;

use crate::error::ReportError;
use crate::markdown::render_markdown;
use crate::{Report, ReportMetadata};

/// Shape of the `.json` file written next to the Markdown report.
#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub author_stats: &'a [AuthorStats],
    pub all_casts: &'a [Post],
    pub metadata: &'a ReportMetadata,
}

impl<'a> From<&Report<'a>> for JsonExport<'a> {
    fn from(report: &Report<'a>) -> Self {
        Self {
            author_stats: report.stats,
            all_casts: report.posts,
            metadata: report.metadata,
        }
    }
}

impl JsonExport<'_> {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Paths of the files produced by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub markdown: PathBuf,
    pub json: PathBuf,
}

/// Writes `<dir>/<basename>.md` and `<dir>/<basename>.json`, creating `dir`
/// if needed. Existing files are overwritten.
///
/// # Errors
///
/// - [`ReportError::InvalidBasename`] if `basename` is empty or contains a
///   path separator.
/// - [`ReportError::Json`] if the export cannot be serialized.
/// - [`ReportError::Io`] if the directory or either file cannot be written.
pub fn write_reports(
    report: &Report<'_>,
    dir: &Path,
    basename: &str,
) -> Result<WrittenReport, ReportError> {
    validate_basename(basename)?;

    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let markdown = dir.join(format!("{basename}.md"));
    write_file(&markdown, &render_markdown(report))?;
    tracing::info!(path = %markdown.display(), "markdown report written");

    let json = dir.join(format!("{basename}.json"));
    write_file(&json, &JsonExport::from(report).to_json_pretty()?)?;
    tracing::info!(path = %json.display(), "json export written");

    Ok(WrittenReport { markdown, json })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_basename(basename: &str) -> Result<(), ReportError> {
    let trimmed = basename.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(ReportError::InvalidBasename(basename.to_owned()));
    }
    Ok(())
}
