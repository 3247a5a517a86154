//! File-based template loader
//!
//! This module provides [`FileLoader`] for loading document templates from
//! the filesystem. It is gated behind the `file-loader` feature.

use crate::document::DocumentType;
use crate::html::HtmlTemplate;
use crate::template::DocumentTemplate;
use crate::{Result, TemplateError};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Loads `<slug>.html` templates from a directory
///
/// # Directory Structure
///
/// ```text
/// templates/
/// ├── testimonial.html
/// ├── admit-card.html
/// └── student-id-card.html
/// ```
///
/// Files whose stem is not a document type slug are skipped.
#[derive(Debug, Clone)]
pub struct FileLoader {
    base_path: PathBuf,
}

impl FileLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load the template for one document type
    pub fn load_template(&self, document_type: DocumentType) -> Result<HtmlTemplate> {
        let path = self.base_path.join(format!("{}.html", document_type.slug()));
        let content = read(&path)?;
        HtmlTemplate::named(path.display().to_string(), document_type, content)
    }

    /// Load every `*.html` template in the base directory
    pub fn load_all(&self) -> Result<Vec<HtmlTemplate>> {
        let entries =
            std::fs::read_dir(&self.base_path).map_err(|e| TemplateError::FileLoadError {
                path: self.base_path.display().to_string(),
                detail: e.to_string(),
            })?;

        let mut templates = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(document_type) = stem.parse::<DocumentType>() else {
                warn!(path = %path.display(), "Skipping template with unknown document type");
                continue;
            };

            let content = read(&path)?;
            templates.push(HtmlTemplate::named(
                path.display().to_string(),
                document_type,
                content,
            )?);
        }

        templates.sort_by_key(DocumentTemplate::document_type);
        Ok(templates)
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TemplateError::FileLoadError {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}
