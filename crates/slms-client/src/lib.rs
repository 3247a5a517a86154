//! REST client for the SLMS backend
//!
//! # Quick Start
//!
//! ```no_run
//! use slms_client::{ApiClient, ClientConfig, FileSessionStore, HttpClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> slms_client::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let session = Arc::new(FileSessionStore::new(&config.session_path));
//! let api = ApiClient::new(Arc::new(HttpClient::new(config, session)?));
//!
//! for student in api.students().search("rahim").await? {
//!     println!("{} {}", student.current_roll_number, student.full_name_english);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod session;

pub use api::{ApiClient, Filters, NotificationQuery};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, Result};
pub use http::{ApiRequest, FormField, HttpClient, RequestBody, Transport};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
