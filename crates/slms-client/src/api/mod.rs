//! Typed wrappers over the SLMS REST endpoints
//!
//! [`ApiClient`] owns a [`Transport`] and hands out one borrowing view per
//! resource (`client.students().get("42")`).

mod alumni;
mod applications;
mod dashboard;
mod departments;
mod documents;
mod notifications;
mod students;

pub use alumni::AlumniApi;
pub use applications::ApplicationsApi;
pub use dashboard::DashboardApi;
pub use departments::DepartmentsApi;
pub use documents::DocumentsApi;
pub use notifications::{NotificationQuery, NotificationsApi};
pub use students::StudentsApi;

use crate::error::{ClientError, Result};
use crate::http::{ApiRequest, Transport};
use crate::models::ListResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Query filters passed through to list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Add the filter only when a value is present
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl IntoIterator for Filters {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Entry point to every resource API
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn students(&self) -> StudentsApi<'_> {
        StudentsApi::new(self)
    }

    pub fn alumni(&self) -> AlumniApi<'_> {
        AlumniApi::new(self)
    }

    pub fn applications(&self) -> ApplicationsApi<'_> {
        ApplicationsApi::new(self)
    }

    pub fn documents(&self) -> DocumentsApi<'_> {
        DocumentsApi::new(self)
    }

    pub fn departments(&self) -> DepartmentsApi<'_> {
        DepartmentsApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    /// Send a request and return the raw body
    pub async fn send(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.transport.send(request).await
    }

    /// Send a request and decode a required body
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let body = self.send(request).await?.ok_or_else(|| {
            ClientError::UnexpectedResponse(format!("empty response from {path}"))
        })?;
        Ok(serde_json::from_value(body)?)
    }

    /// Send a request and decode a bare or paginated list
    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>> {
        match self.send(request).await? {
            Some(body) => Ok(serde_json::from_value::<ListResponse<T>>(body)?.into_vec()),
            None => Ok(Vec::new()),
        }
    }

    /// Send a request whose body is not needed
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<()> {
        self.send(request).await.map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::expect_one;
    use super::*;
    use crate::models::Department;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_filters() {
        let filters = Filters::new()
            .with("status", "active")
            .with_opt("semester", Some(4))
            .with_opt::<u32>("department", None);
        assert_eq!(
            filters.pairs(),
            &[
                ("status".to_string(), "active".to_string()),
                ("semester".to_string(), "4".to_string())
            ]
        );
    }

    #[test]
    fn test_fetch_empty_body_is_error() {
        let client = expect_one(Method::GET, "/departments/1/", |_| true, None);
        let err = tokio_test::block_on(client.departments().get("1")).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_list_accepts_paginated() {
        let client = expect_one(
            Method::GET,
            "/departments/",
            |_| true,
            Some(json!({ "results": [{ "id": 1, "name": "Civil" }] })),
        );
        let departments: Vec<Department> = client.departments().list().await.unwrap();
        assert_eq!(departments[0].name, "Civil");
    }
}
