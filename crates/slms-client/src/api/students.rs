//! `/students/` endpoints

use super::{ApiClient, Filters};
use crate::error::Result;
use crate::http::{ApiRequest, FormField};
use crate::models::Student;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

pub struct StudentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StudentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: Filters) -> Result<Vec<Student>> {
        self.client
            .fetch_list(ApiRequest::get("/students/").with_query_pairs(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Student> {
        self.client
            .fetch(ApiRequest::get(format!("/students/{id}/")))
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, student: &T) -> Result<Student> {
        self.client
            .fetch(ApiRequest::post("/students/").with_json(student)?)
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, student: &T) -> Result<Student> {
        self.client
            .fetch(ApiRequest::put(format!("/students/{id}/")).with_json(student)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(format!("/students/{id}/")))
            .await
    }

    /// Free-text search over name, roll and registration numbers
    pub async fn search(&self, query: &str) -> Result<Vec<Student>> {
        self.client
            .fetch_list(ApiRequest::get("/students/search/").with_query("q", query))
            .await
    }

    pub async fn upload_photo(&self, id: &str, file_name: &str, bytes: Vec<u8>) -> Result<Student> {
        debug!(student = id, size = bytes.len(), "Uploading student photo");
        self.client
            .fetch(ApiRequest::upload(
                format!("/students/{id}/upload-photo/"),
                vec![FormField::file("photo", file_name, bytes)],
            ))
            .await
    }

    /// Graduate a student into the alumni register
    pub async fn transition_to_alumni(&self, id: &str, graduation_year: i32) -> Result<()> {
        self.client
            .execute(
                ApiRequest::post(format!("/students/{id}/transition-to-alumni/"))
                    .with_json(&json!({ "graduationYear": graduation_year }))?,
            )
            .await
    }

    /// Mark a student as discontinued
    pub async fn disconnect_studies(
        &self,
        id: &str,
        reason: &str,
        last_semester: u32,
    ) -> Result<Student> {
        self.client
            .fetch(
                ApiRequest::post(format!("/students/{id}/disconnect-studies/")).with_json(
                    &json!({ "discontinuedReason": reason, "lastSemester": last_semester }),
                )?,
            )
            .await
    }
}
