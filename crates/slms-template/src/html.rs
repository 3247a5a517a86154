//! Plain HTML template implementation

use crate::document::DocumentType;
use crate::template::DocumentTemplate;
use crate::{Result, TemplateError};

/// An owned HTML template for one document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    name: String,
    document_type: DocumentType,
    html: String,
}

impl HtmlTemplate {
    /// Create a template named after the document type's slug
    ///
    /// Fails when the HTML is blank.
    pub fn new(document_type: DocumentType, html: impl Into<String>) -> Result<Self> {
        Self::named(document_type.slug(), document_type, html)
    }

    /// Create a template with an explicit name
    pub fn named(
        name: impl Into<String>,
        document_type: DocumentType,
        html: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let html = html.into();
        if html.trim().is_empty() {
            return Err(TemplateError::EmptyTemplate(name));
        }
        Ok(Self {
            name,
            document_type,
            html,
        })
    }
}

impl DocumentTemplate for HtmlTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn document_type(&self) -> DocumentType {
        self.document_type
    }

    fn raw_template(&self) -> &str {
        &self.html
    }
}
