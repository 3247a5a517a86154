//! `/documents/` endpoints

use super::{ApiClient, Filters};
use crate::error::Result;
use crate::http::{ApiRequest, FormField};
use crate::models::Document;

pub struct DocumentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DocumentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: Filters) -> Result<Vec<Document>> {
        self.client
            .fetch_list(ApiRequest::get("/documents/").with_query_pairs(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Document> {
        self.client
            .fetch(ApiRequest::get(format!("/documents/{id}/")))
            .await
    }

    /// Upload a file for a student under a category
    pub async fn upload(
        &self,
        student_id: &str,
        category: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document> {
        self.client
            .fetch(ApiRequest::upload(
                "/documents/",
                vec![
                    FormField::text("student", student_id),
                    FormField::text("category", category),
                    FormField::file("file", file_name, bytes),
                ],
            ))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(format!("/documents/{id}/")))
            .await
    }
}
