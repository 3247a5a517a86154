//! Document generation for the SLMS client
//!
//! This crate turns student records into printable HTML documents
//! (testimonials, certificates, transcripts, ID cards, admit cards).
//!
//! # Features
//!
//! - **Placeholder engine**: `{{NAME}}` tokens resolved from nested record data
//! - **Document types**: metadata and the application type → document mapping
//! - **Template registry**: thread-safe lookup of one template per document type
//! - **File loading**: optional overrides loaded from a template directory
//!
//! # Quick Start
//!
//! ```
//! use slms_template::{DocumentType, TemplateRegistry, documents_for_application_type};
//! use serde_json::json;
//!
//! let registry = TemplateRegistry::with_builtin();
//! let student = json!({
//!     "fullNameEnglish": "John Doe",
//!     "currentRollNumber": "12345",
//!     "department": { "name": "Computer Science" },
//! });
//!
//! for doc in documents_for_application_type("Transcript") {
//!     let rendered = registry.render(*doc, &student).unwrap();
//!     assert!(rendered.html.contains("12345"));
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `file-loader`: Enable loading templates from files

mod builtin;
mod document;
mod engine;
mod error;
mod html;
mod lookup;
mod registry;
mod template;

#[cfg(feature = "file-loader")]
mod loader;

pub use builtin::BuiltinTemplate;
pub use document::{
    DocumentMetadata, DocumentType, application_types, documents_for_application_type,
    has_documents_for_application_type, primary_document_for_application_type,
};
pub use engine::{PlaceholderEngine, has_unreplaced, placeholders, replace, unreplaced};
pub use error::{Result, TemplateError};
pub use html::HtmlTemplate;
pub use lookup::{
    DEFAULT_PHOTO, DocumentContext, PlaceholderLookup, format_address, format_date,
    format_naive_date, parse_date, screaming_snake,
};
pub use registry::{RenderedDocument, TemplateRegistry};
pub use template::DocumentTemplate;

#[cfg(feature = "file-loader")]
pub use loader::FileLoader;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::DocumentType;
    pub use crate::engine::PlaceholderEngine;
    pub use crate::error::{Result, TemplateError};
    pub use crate::html::HtmlTemplate;
    pub use crate::lookup::DocumentContext;
    pub use crate::registry::{RenderedDocument, TemplateRegistry};
    pub use crate::template::DocumentTemplate;

    #[cfg(feature = "file-loader")]
    pub use crate::loader::FileLoader;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_usage() {
        let engine = PlaceholderEngine::new();
        let html = engine.render(
            "<td>{{ROLL_NUMBER}}</td><td>{{DEPARTMENT}}</td>",
            &json!({ "currentRollNumber": "001", "department": { "name": "CSE" } }),
        );
        assert_eq!(html, "<td>001</td><td>CSE</td>");
    }

    #[test]
    fn test_registry_usage() {
        let registry = TemplateRegistry::new();
        registry.register(HtmlTemplate::new(DocumentType::Marksheet, "{{STUDENT_NAME}}").unwrap());

        let doc = registry
            .render(DocumentType::Marksheet, &json!({ "fullNameEnglish": "Karim" }))
            .unwrap();
        assert_eq!(doc.html, "Karim");
        assert_eq!(doc.title, "Marksheet");
    }

    #[test]
    fn test_application_to_documents() {
        let registry = TemplateRegistry::with_builtin();
        let docs = documents_for_application_type("Stipend");
        assert!(docs.iter().all(|d| registry.contains(*d)));
    }
}
