//! `/applications/` endpoints

use super::{ApiClient, Filters};
use crate::error::Result;
use crate::http::ApiRequest;
use crate::models::{Application, ApplicationReview};
use serde::Serialize;

pub struct ApplicationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApplicationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Supported filters: `status`, `applicationType`, `department`
    pub async fn list(&self, filters: Filters) -> Result<Vec<Application>> {
        self.client
            .fetch_list(ApiRequest::get("/applications/").with_query_pairs(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Application> {
        self.client
            .fetch(ApiRequest::get(format!("/applications/{id}/")))
            .await
    }

    pub async fn submit<T: Serialize + ?Sized>(&self, application: &T) -> Result<Application> {
        self.client
            .fetch(ApiRequest::post("/applications/submit/").with_json(application)?)
            .await
    }

    pub async fn review(&self, id: &str, review: &ApplicationReview) -> Result<Application> {
        self.client
            .fetch(ApiRequest::put(format!("/applications/{id}/review/")).with_json(review)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(format!("/applications/{id}/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::expect_one;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_review_body() {
        let client = expect_one(
            Method::PUT,
            "/applications/8/review/",
            |req| {
                req.json_body()
                    == Some(&json!({
                        "status": "approved",
                        "reviewedBy": "admin",
                        "reviewNotes": "ok",
                    }))
            },
            Some(json!({ "id": 8, "applicationType": "Transcript", "status": "approved" })),
        );
        let review = ApplicationReview {
            status: "approved".into(),
            reviewed_by: "admin".into(),
            review_notes: "ok".into(),
        };
        let app = client.applications().review("8", &review).await.unwrap();
        assert_eq!(app.status, "approved");
        assert_eq!(app.application_type, "Transcript");
    }

    #[tokio::test]
    async fn test_submit() {
        let client = expect_one(
            Method::POST,
            "/applications/submit/",
            |req| req.json_body().is_some(),
            Some(json!({ "id": "a1", "status": "pending" })),
        );
        let app = client
            .applications()
            .submit(&json!({ "fullNameEnglish": "Rina", "applicationType": "Testimonial" }))
            .await
            .unwrap();
        assert_eq!(app.id, "a1");
    }

    #[tokio::test]
    async fn test_list_filtered_by_status() {
        let client = expect_one(
            Method::GET,
            "/applications/",
            |req| req.query_value("status") == Some("pending"),
            Some(json!([])),
        );
        let apps = client
            .applications()
            .list(Filters::new().with("status", "pending"))
            .await
            .unwrap();
        assert!(apps.is_empty());
    }
}
