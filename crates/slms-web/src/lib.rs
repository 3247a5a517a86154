//! Front end layer of the SLMS client
//!
//! This crate holds everything between a location hash and the markup a
//! screen shows: the hash [`Router`], the application page table, chart
//! configurations, dashboard widgets, notification components and the
//! mapping from backend errors to user feedback.
//!
//! # Quick Start
//!
//! ```
//! use slms_web::{PageKind, pages};
//!
//! let page = pages::resolve("#/document-viewer/42/testimonial");
//! assert_eq!(page.kind, PageKind::DocumentViewer);
//! assert_eq!(page.student_id(), Some("42"));
//! ```

pub mod charts;
pub mod error;
pub mod feedback;
pub mod format;
pub mod notifications;
pub mod pages;
pub mod router;
pub mod widgets;

pub use charts::{AttendanceChart, Chart, DepartmentDistributionChart, MicroChart, MicroChartKind};
pub use error::{ChartError, ChartResult, RouterError, RouterResult};
pub use feedback::{ErrorOutcome, Toast, ToastKind, error_message, handle_error};
pub use notifications::{NotificationBell, NotificationCenter, NotificationFilter};
pub use pages::{Navigation, Page, PageKind};
pub use router::{Location, RouteMatch, RouteParams, Router};
pub use widgets::{AnimatedButton, ButtonSize, ButtonVariant, PremiumCard, Trend};
