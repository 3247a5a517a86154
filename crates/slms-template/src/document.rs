//! Document types, their display metadata and the application mapping
//!
//! Every generated document belongs to one [`DocumentType`]. Applications
//! submitted by students carry a free-form type (`"Transcript"`,
//! `"Transfer"`, ...) which maps to the documents an administrator can issue
//! once the application is approved.

use crate::{Result, TemplateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of documents the system can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Testimonial,
    CharacterCertificate,
    AcademicTranscript,
    Marksheet,
    StudentIdCard,
    ClearanceCertificate,
    AdmitCard,
}

/// Display metadata for a document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Icon identifier (lucide icon set)
    pub icon: &'static str,
    pub color: &'static str,
}

impl DocumentType {
    /// All document types in display order
    pub const ALL: [DocumentType; 7] = [
        Self::Testimonial,
        Self::CharacterCertificate,
        Self::AcademicTranscript,
        Self::Marksheet,
        Self::StudentIdCard,
        Self::ClearanceCertificate,
        Self::AdmitCard,
    ];

    /// URL slug, also used as the template file stem
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Testimonial => "testimonial",
            Self::CharacterCertificate => "character-certificate",
            Self::AcademicTranscript => "academic-transcript",
            Self::Marksheet => "marksheet",
            Self::StudentIdCard => "student-id-card",
            Self::ClearanceCertificate => "clearance-certificate",
            Self::AdmitCard => "admit-card",
        }
    }

    pub fn metadata(&self) -> DocumentMetadata {
        match self {
            Self::Testimonial => DocumentMetadata {
                name: "Testimonial",
                description: "Official testimonial letter from the institution",
                icon: "file-text",
                color: "blue",
            },
            Self::CharacterCertificate => DocumentMetadata {
                name: "Character Certificate",
                description: "Certificate of good character and conduct",
                icon: "award",
                color: "green",
            },
            Self::AcademicTranscript => DocumentMetadata {
                name: "Academic Transcript",
                description: "Complete academic record with semester-wise results",
                icon: "book-open",
                color: "purple",
            },
            Self::Marksheet => DocumentMetadata {
                name: "Marksheet",
                description: "Subject-wise marks and grades",
                icon: "bar-chart-2",
                color: "orange",
            },
            Self::StudentIdCard => DocumentMetadata {
                name: "Student ID Card",
                description: "Official student identification card",
                icon: "credit-card",
                color: "red",
            },
            Self::ClearanceCertificate => DocumentMetadata {
                name: "Clearance Certificate",
                description: "Library and accounts clearance certificate",
                icon: "check-circle",
                color: "teal",
            },
            Self::AdmitCard => DocumentMetadata {
                name: "Admit Card",
                description: "Exam admit card with center details",
                icon: "ticket",
                color: "indigo",
            },
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DocumentType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| TemplateError::UnknownDocumentType(s.to_string()))
    }
}

use DocumentType::{
    AcademicTranscript, AdmitCard, CharacterCertificate, ClearanceCertificate, Marksheet,
    StudentIdCard, Testimonial,
};

/// Application type → documents issued for it
const APPLICATION_DOCUMENTS: &[(&str, &[DocumentType])] = &[
    ("Testimonial", &[Testimonial]),
    ("Certificate", &[CharacterCertificate, ClearanceCertificate]),
    ("Character Certificate", &[CharacterCertificate]),
    ("Transcript", &[AcademicTranscript, Marksheet]),
    ("Stipend", &[CharacterCertificate, AcademicTranscript]),
    (
        "Transfer",
        &[CharacterCertificate, AcademicTranscript, ClearanceCertificate],
    ),
    ("Admit Card", &[AdmitCard]),
    ("Other Documents", &DocumentType::ALL),
];

/// Documents available for an application type; empty for unknown types
pub fn documents_for_application_type(application_type: &str) -> &'static [DocumentType] {
    APPLICATION_DOCUMENTS
        .iter()
        .find(|(name, _)| *name == application_type)
        .map(|(_, docs)| *docs)
        .unwrap_or(&[])
}

/// The first document listed for an application type
pub fn primary_document_for_application_type(application_type: &str) -> Option<DocumentType> {
    documents_for_application_type(application_type)
        .first()
        .copied()
}

pub fn has_documents_for_application_type(application_type: &str) -> bool {
    !documents_for_application_type(application_type).is_empty()
}

/// Application types that have a document mapping
pub fn application_types() -> impl Iterator<Item = &'static str> {
    APPLICATION_DOCUMENTS.iter().map(|(name, _)| *name)
}
