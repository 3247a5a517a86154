//! Core document template trait
//!
//! This module defines the [`DocumentTemplate`] trait implemented by every
//! template the registry can hold.

use crate::document::DocumentType;
use crate::engine;
use crate::lookup::PlaceholderLookup;

/// A renderable HTML document template
///
/// Implementations only have to expose their raw text; placeholder
/// discovery and substitution are shared through the provided methods.
/// The trait is dyn-compatible so registries can hold mixed sources
/// (bundled templates, templates loaded from disk).
pub trait DocumentTemplate: Send + Sync {
    /// Template identifier, used in logs
    fn name(&self) -> &str;

    /// The document type this template produces
    fn document_type(&self) -> DocumentType;

    /// Raw template text with `{{NAME}}` tokens
    fn raw_template(&self) -> &str;

    /// Human-readable document title
    fn title(&self) -> &'static str {
        self.document_type().metadata().name
    }

    /// Distinct placeholder names used by the template
    fn placeholders(&self) -> Vec<String> {
        engine::placeholders(self.raw_template())
    }

    /// Substitute every placeholder from `lookup`
    fn render(&self, lookup: &PlaceholderLookup) -> String {
        engine::replace(self.raw_template(), lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InlineTemplate(&'static str);

    impl DocumentTemplate for InlineTemplate {
        fn name(&self) -> &str {
            "inline"
        }

        fn document_type(&self) -> DocumentType {
            DocumentType::Marksheet
        }

        fn raw_template(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_default_title() {
        assert_eq!(InlineTemplate("").title(), "Marksheet");
    }

    #[test]
    fn test_default_render() {
        let mut lookup = PlaceholderLookup::new();
        lookup.insert("STUDENT_NAME", "Rahim");

        let template = InlineTemplate("<b>{{STUDENT_NAME}}</b><i>{{GPA}}</i>");
        assert_eq!(template.render(&lookup), "<b>Rahim</b><i></i>");
        assert_eq!(template.placeholders(), vec!["STUDENT_NAME", "GPA"]);
    }
}
