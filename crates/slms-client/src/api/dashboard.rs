//! `/dashboard/` endpoints

use super::ApiClient;
use crate::error::Result;
use crate::http::ApiRequest;
use crate::models::DashboardStats;

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.fetch(ApiRequest::get("/dashboard/stats/")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::expect_one;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_stats() {
        let client = expect_one(
            Method::GET,
            "/dashboard/stats/",
            |_| true,
            Some(json!({
                "students": { "total": 250, "active": 230, "graduated": 15, "discontinued": 5 },
                "alumni": { "total": 15 },
                "applications": { "total": 40, "pending": 7 },
            })),
        );
        let stats = client.dashboard().stats().await.unwrap();
        assert_eq!(stats.students.active, 230);
        assert_eq!(stats.applications.pending, 7);
    }
}
