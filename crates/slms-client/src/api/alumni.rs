//! `/alumni/` endpoints

use super::{ApiClient, Filters};
use crate::error::Result;
use crate::http::ApiRequest;
use crate::models::{Alumni, CareerPosition};
use serde::Serialize;
use serde_json::{Value, json};

pub struct AlumniApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AlumniApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: Filters) -> Result<Vec<Alumni>> {
        self.client
            .fetch_list(ApiRequest::get("/alumni/").with_query_pairs(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Alumni> {
        self.client
            .fetch(ApiRequest::get(format!("/alumni/{id}/")))
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, alumni: &T) -> Result<Alumni> {
        self.client
            .fetch(ApiRequest::put(format!("/alumni/{id}/")).with_json(alumni)?)
            .await
    }

    pub async fn add_career_position(&self, id: &str, position: &CareerPosition) -> Result<Alumni> {
        self.client
            .fetch(ApiRequest::post(format!("/alumni/{id}/add-career-position/")).with_json(position)?)
            .await
    }

    pub async fn update_support_category(
        &self,
        id: &str,
        category: &str,
        notes: &str,
    ) -> Result<Alumni> {
        self.client
            .fetch(
                ApiRequest::put(format!("/alumni/{id}/update-support-category/"))
                    .with_json(&json!({ "currentSupportCategory": category, "notes": notes }))?,
            )
            .await
    }

    /// Aggregate counts; the shape is owned by the server
    pub async fn stats(&self) -> Result<Value> {
        self.client.fetch(ApiRequest::get("/alumni/stats/")).await
    }
}
