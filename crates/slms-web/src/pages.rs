//! Application page table
//!
//! Binds every client route to a [`PageKind`] and turns a resolved route
//! into a [`Page`] carrying its parameters.

use crate::error::RouterResult;
use crate::router::{Location, RouteParams, Router};
use serde::Serialize;
use slms_template::DocumentType;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

static APP_ROUTER: LazyLock<Router<PageKind>> = LazyLock::new(|| match app_router() {
    Ok(router) => router,
    Err(e) => {
        warn!(error = %e, "Route table failed to build");
        Router::new()
    }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Dashboard,
    AddStudent,
    StudentList,
    StudentDetails,
    EditStudent,
    DownloadDocuments,
    DocumentViewer,
    Documents,
    MarksAttendance,
    Alumni,
    AlumniDetails,
    EditAlumni,
    DiscontinuedStudents,
    ApplicationForm,
    Applications,
    ApplicationDetails,
    ApplicationDocuments,
    ApplicationDocumentViewer,
    Login,
    AdminDashboard,
    Departments,
    DepartmentView,
    NotFound,
}

impl PageKind {
    /// Every routable page in registration order
    pub const ROUTED: [PageKind; 22] = [
        Self::Dashboard,
        Self::AddStudent,
        Self::StudentList,
        Self::StudentDetails,
        Self::EditStudent,
        Self::DownloadDocuments,
        Self::DocumentViewer,
        Self::Documents,
        Self::MarksAttendance,
        Self::Alumni,
        Self::AlumniDetails,
        Self::EditAlumni,
        Self::DiscontinuedStudents,
        Self::ApplicationForm,
        Self::Applications,
        Self::ApplicationDetails,
        Self::ApplicationDocuments,
        Self::ApplicationDocumentViewer,
        Self::Login,
        Self::AdminDashboard,
        Self::Departments,
        Self::DepartmentView,
    ];

    /// Route template, `None` for [`PageKind::NotFound`]
    pub fn template(&self) -> Option<&'static str> {
        let template = match self {
            Self::Dashboard => "/",
            Self::AddStudent => "/add-student",
            Self::StudentList => "/students",
            Self::StudentDetails => "/student/:id",
            Self::EditStudent => "/edit-student/:id",
            Self::DownloadDocuments => "/download-documents",
            Self::DocumentViewer => "/document-viewer/:studentId/:documentType",
            Self::Documents => "/documents",
            Self::MarksAttendance => "/marks",
            Self::Alumni => "/alumni",
            Self::AlumniDetails => "/alumni/:id",
            Self::EditAlumni => "/edit-alumni/:id",
            Self::DiscontinuedStudents => "/discontinued",
            Self::ApplicationForm => "/apply",
            Self::Applications => "/applications",
            Self::ApplicationDetails => "/application/:id",
            Self::ApplicationDocuments => "/application-documents/:applicationId",
            Self::ApplicationDocumentViewer => {
                "/application-document-viewer/:applicationId/:documentType"
            }
            Self::Login => "/login",
            Self::AdminDashboard => "/admin",
            Self::Departments => "/departments",
            Self::DepartmentView => "/department/:id",
            Self::NotFound => return None,
        };
        Some(template)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AddStudent => "Add Student",
            Self::StudentList => "Students",
            Self::StudentDetails => "Student Details",
            Self::EditStudent => "Edit Student",
            Self::DownloadDocuments => "Download Documents",
            Self::DocumentViewer => "Document Viewer",
            Self::Documents => "Documents",
            Self::MarksAttendance => "Marks & Attendance",
            Self::Alumni => "Alumni",
            Self::AlumniDetails => "Alumni Details",
            Self::EditAlumni => "Edit Alumni",
            Self::DiscontinuedStudents => "Discontinued Students",
            Self::ApplicationForm => "Apply",
            Self::Applications => "Applications",
            Self::ApplicationDetails => "Application Details",
            Self::ApplicationDocuments => "Application Documents",
            Self::ApplicationDocumentViewer => "Application Document",
            Self::Login => "Login",
            Self::AdminDashboard => "Admin Dashboard",
            Self::Departments => "Departments",
            Self::DepartmentView => "Department",
            Self::NotFound => "Page Not Found",
        }
    }

    /// Pages reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::ApplicationForm)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A resolved page with its route parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub kind: PageKind,
    pub params: RouteParams,
    pub location: Location,
}

impl Page {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// `:id` of detail and edit pages
    pub fn id(&self) -> Option<&str> {
        self.param("id")
    }

    pub fn student_id(&self) -> Option<&str> {
        self.param("studentId")
    }

    pub fn application_id(&self) -> Option<&str> {
        self.param("applicationId")
    }

    /// Document type of the viewer pages; `None` when absent or unknown
    pub fn document_type(&self) -> Option<DocumentType> {
        self.param("documentType")?.parse().ok()
    }
}

/// Outcome of checking a page against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Page),
    /// Send the user elsewhere, e.g. `/login`
    Redirect(&'static str),
}

/// Router holding every application page
pub fn app_router() -> RouterResult<Router<PageKind>> {
    let mut router = Router::new();
    for kind in PageKind::ROUTED {
        if let Some(template) = kind.template() {
            router.register(template, kind)?;
        }
    }
    router.set_not_found(PageKind::NotFound);
    Ok(router)
}

/// Resolve a location hash to a page, unknown paths giving [`PageKind::NotFound`]
pub fn resolve(hash: &str) -> Page {
    match APP_ROUTER.resolve_or_fallback(hash) {
        Some(m) => Page {
            kind: *m.handler,
            params: m.params,
            location: m.location,
        },
        None => Page {
            kind: PageKind::NotFound,
            params: RouteParams::default(),
            location: Location::parse(hash),
        },
    }
}

/// Resolve a hash and apply the sign-in requirement
pub fn navigate(hash: &str, authenticated: bool) -> Navigation {
    let page = resolve(hash);
    if !page.kind.is_public() && !authenticated {
        debug!(path = %page.location.path, "Redirecting unauthenticated user to login");
        return Navigation::Redirect(crate::feedback::LOGIN_PATH);
    }
    Navigation::Render(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_registered() {
        let router = app_router().unwrap();
        assert_eq!(router.len(), PageKind::ROUTED.len());
        for kind in PageKind::ROUTED {
            assert!(router.contains(kind.template().unwrap()), "{kind:?} missing");
        }
    }

    #[test]
    fn test_static_pages() {
        assert_eq!(resolve("").kind, PageKind::Dashboard);
        assert_eq!(resolve("#/").kind, PageKind::Dashboard);
        assert_eq!(resolve("#/students").kind, PageKind::StudentList);
        assert_eq!(resolve("#/marks").kind, PageKind::MarksAttendance);
        assert_eq!(resolve("#/admin/").kind, PageKind::AdminDashboard);
    }

    #[test]
    fn test_detail_pages_extract_ids() {
        let page = resolve("#/student/42");
        assert_eq!(page.kind, PageKind::StudentDetails);
        assert_eq!(page.id(), Some("42"));

        let page = resolve("#/alumni/abc-123");
        assert_eq!(page.kind, PageKind::AlumniDetails);
        assert_eq!(page.id(), Some("abc-123"));

        assert_eq!(resolve("#/department/7").kind, PageKind::DepartmentView);
        assert_eq!(resolve("#/edit-alumni/3").kind, PageKind::EditAlumni);
    }

    #[test]
    fn test_document_viewer() {
        let page = resolve("#/document-viewer/s-9/character-certificate");
        assert_eq!(page.kind, PageKind::DocumentViewer);
        assert_eq!(page.student_id(), Some("s-9"));
        assert_eq!(page.document_type(), Some(DocumentType::CharacterCertificate));

        let page = resolve("#/application-document-viewer/app-1/diploma");
        assert_eq!(page.kind, PageKind::ApplicationDocumentViewer);
        assert_eq!(page.application_id(), Some("app-1"));
        assert_eq!(page.document_type(), None);
    }

    #[test]
    fn test_unknown_is_not_found() {
        let page = resolve("#/student/1/extra");
        assert_eq!(page.kind, PageKind::NotFound);
        assert!(page.params.is_empty());
        assert_eq!(page.location.path, "/student/1/extra");
    }

    #[test]
    fn test_query_kept_on_page() {
        let page = resolve("#/students?search=karim");
        assert_eq!(page.kind, PageKind::StudentList);
        assert_eq!(page.location.query_value("search"), Some("karim"));
    }

    #[test]
    fn test_navigation_guard() {
        assert_eq!(navigate("#/students", false), Navigation::Redirect("/login"));
        assert!(matches!(navigate("#/apply", false), Navigation::Render(p) if p.kind == PageKind::ApplicationForm));
        assert!(matches!(navigate("#/login", false), Navigation::Render(_)));
        assert!(matches!(navigate("#/students", true), Navigation::Render(_)));
        assert_eq!(navigate("#/nowhere", false), Navigation::Redirect("/login"));
        assert!(matches!(
            navigate("#/nowhere", true),
            Navigation::Render(p) if p.kind == PageKind::NotFound
        ));
        assert!(!PageKind::NotFound.is_public());
    }

    #[test]
    fn test_titles() {
        assert_eq!(PageKind::MarksAttendance.to_string(), "Marks & Attendance");
        assert_eq!(PageKind::NotFound.template(), None);
    }
}
