//! Templates bundled with the crate

use crate::document::DocumentType;
use crate::template::DocumentTemplate;

/// A template compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTemplate {
    document_type: DocumentType,
    html: &'static str,
}

impl DocumentTemplate for BuiltinTemplate {
    fn name(&self) -> &str {
        self.document_type.slug()
    }

    fn document_type(&self) -> DocumentType {
        self.document_type
    }

    fn raw_template(&self) -> &str {
        self.html
    }
}

/// Bundled template for a document type
pub fn template(document_type: DocumentType) -> BuiltinTemplate {
    let html = match document_type {
        DocumentType::Testimonial => include_str!("../templates/testimonial.html"),
        DocumentType::CharacterCertificate => {
            include_str!("../templates/character-certificate.html")
        }
        DocumentType::AcademicTranscript => include_str!("../templates/academic-transcript.html"),
        DocumentType::Marksheet => include_str!("../templates/marksheet.html"),
        DocumentType::StudentIdCard => include_str!("../templates/student-id-card.html"),
        DocumentType::ClearanceCertificate => {
            include_str!("../templates/clearance-certificate.html")
        }
        DocumentType::AdmitCard => include_str!("../templates/admit-card.html"),
    };
    BuiltinTemplate {
        document_type,
        html,
    }
}

/// One bundled template per document type
pub fn templates() -> Vec<BuiltinTemplate> {
    DocumentType::ALL.into_iter().map(template).collect()
}
