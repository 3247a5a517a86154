//! Document template registry
//!
//! This module provides [`TemplateRegistry`], a thread-safe registry holding
//! one template per [`DocumentType`] together with the document context used
//! when rendering.

use crate::builtin;
use crate::document::DocumentType;
use crate::lookup::{DocumentContext, PlaceholderLookup};
use crate::template::DocumentTemplate;
use crate::{Result, TemplateError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Output of rendering a document for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub document_type: DocumentType,
    pub title: String,
    pub html: String,
    /// Placeholders present in the template that resolved to an empty value
    pub empty_placeholders: Vec<String>,
}

impl RenderedDocument {
    pub fn is_complete(&self) -> bool {
        self.empty_placeholders.is_empty()
    }
}

/// A thread-safe registry of document templates
///
/// # Examples
///
/// ```
/// use slms_template::{DocumentType, TemplateRegistry};
/// use serde_json::json;
///
/// let registry = TemplateRegistry::with_builtin();
/// let doc = registry
///     .render(DocumentType::Testimonial, &json!({ "fullNameEnglish": "John Doe" }))
///     .unwrap();
/// assert!(doc.html.contains("John Doe"));
/// ```
pub struct TemplateRegistry {
    templates: RwLock<HashMap<DocumentType, Arc<dyn DocumentTemplate>>>,
    context: RwLock<DocumentContext>,
}

impl TemplateRegistry {
    /// Create an empty registry with the default document context
    pub fn new() -> Self {
        Self::with_context(DocumentContext::default())
    }

    pub fn with_context(context: DocumentContext) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            context: RwLock::new(context),
        }
    }

    /// Create a registry preloaded with the bundled template for every type
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register_all(builtin::templates());
        registry
    }

    pub fn set_context(&self, context: DocumentContext) {
        if let Ok(mut current) = self.context.write() {
            *current = context;
        }
    }

    pub fn context(&self) -> DocumentContext {
        self.context
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Register a template, replacing any existing one for its type
    pub fn register<T: DocumentTemplate + 'static>(&self, template: T) {
        self.register_arc(Arc::new(template));
    }

    pub fn register_arc(&self, template: Arc<dyn DocumentTemplate>) {
        if let Ok(mut templates) = self.templates.write() {
            debug!(
                template = template.name(),
                document_type = %template.document_type(),
                "Registering document template"
            );
            templates.insert(template.document_type(), template);
        }
    }

    pub fn register_all<T: DocumentTemplate + 'static>(&self, templates: Vec<T>) {
        for template in templates {
            self.register(template);
        }
    }

    /// Replace bundled templates with every template found by `loader`
    ///
    /// Returns the number of templates registered.
    #[cfg(feature = "file-loader")]
    pub fn load_overrides(&self, loader: &crate::FileLoader) -> Result<usize> {
        let templates = loader.load_all()?;
        let count = templates.len();
        self.register_all(templates);
        tracing::info!(
            count,
            path = %loader.base_path().display(),
            "Loaded document template overrides"
        );
        Ok(count)
    }

    pub fn get(&self, document_type: DocumentType) -> Option<Arc<dyn DocumentTemplate>> {
        self.templates.read().ok()?.get(&document_type).cloned()
    }

    pub fn contains(&self, document_type: DocumentType) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(&document_type))
            .unwrap_or(false)
    }

    pub fn remove(&self, document_type: DocumentType) -> Option<Arc<dyn DocumentTemplate>> {
        self.templates.write().ok()?.remove(&document_type)
    }

    /// Render a document for a record using the registry's context
    ///
    /// A null record returns the raw template, matching
    /// [`PlaceholderEngine::render`](crate::PlaceholderEngine::render).
    pub fn render(&self, document_type: DocumentType, record: &Value) -> Result<RenderedDocument> {
        self.render_with_context(document_type, record, &self.context())
    }

    /// Render with an explicit context instead of the registry's own
    pub fn render_with_context(
        &self,
        document_type: DocumentType,
        record: &Value,
        context: &DocumentContext,
    ) -> Result<RenderedDocument> {
        let template = self
            .get(document_type)
            .ok_or_else(|| TemplateError::TemplateNotRegistered(document_type.to_string()))?;

        if record.is_null() {
            return Ok(RenderedDocument {
                document_type,
                title: template.title().to_string(),
                html: template.raw_template().to_string(),
                empty_placeholders: template.placeholders(),
            });
        }

        let lookup = PlaceholderLookup::from_record(record, context);
        let empty_placeholders: Vec<String> = template
            .placeholders()
            .into_iter()
            .filter(|name| lookup.resolve(name).is_empty())
            .collect();

        if !empty_placeholders.is_empty() {
            debug!(
                document_type = %document_type,
                missing = ?empty_placeholders,
                "Rendering document with empty placeholders"
            );
        }

        Ok(RenderedDocument {
            document_type,
            title: template.title().to_string(),
            html: template.render(&lookup),
            empty_placeholders,
        })
    }

    /// Registered document types in display order
    pub fn list(&self) -> Vec<DocumentType> {
        let mut types: Vec<DocumentType> = self
            .templates
            .read()
            .map(|t| t.keys().copied().collect())
            .unwrap_or_default();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut templates) = self.templates.write() {
            templates.clear();
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("template_count", &self.len())
            .field("templates", &self.list())
            .finish()
    }
}
