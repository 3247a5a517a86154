//! `/departments/` endpoints

use super::ApiClient;
use crate::error::Result;
use crate::http::ApiRequest;
use crate::models::{Department, Student};
use serde::Serialize;

pub struct DepartmentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DepartmentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Department>> {
        self.client
            .fetch_list(ApiRequest::get("/departments/"))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Department> {
        self.client
            .fetch(ApiRequest::get(format!("/departments/{id}/")))
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, department: &T) -> Result<Department> {
        self.client
            .fetch(ApiRequest::post("/departments/").with_json(department)?)
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        department: &T,
    ) -> Result<Department> {
        self.client
            .fetch(ApiRequest::put(format!("/departments/{id}/")).with_json(department)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(format!("/departments/{id}/")))
            .await
    }

    /// Students of a department, optionally limited to one semester
    pub async fn students(&self, id: &str, semester: Option<u32>) -> Result<Vec<Student>> {
        let mut request = ApiRequest::get(format!("/departments/{id}/students/"));
        if let Some(semester) = semester {
            request = request.with_query("semester", semester);
        }
        self.client.fetch_list(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::expect_one;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_students_with_semester() {
        let client = expect_one(
            Method::GET,
            "/departments/2/students/",
            |req| req.query_value("semester") == Some("5"),
            Some(json!([{ "id": 1, "fullNameEnglish": "A" }])),
        );
        let students = client.departments().students("2", Some(5)).await.unwrap();
        assert_eq!(students.len(), 1);
    }

    #[tokio::test]
    async fn test_students_without_semester() {
        let client = expect_one(
            Method::GET,
            "/departments/2/students/",
            |req| req.query.is_empty(),
            Some(json!([])),
        );
        assert!(client.departments().students("2", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create() {
        let client = expect_one(
            Method::POST,
            "/departments/",
            |req| req.json_body() == Some(&json!({ "name": "Mechanical", "code": "MT" })),
            Some(json!({ "id": 9, "name": "Mechanical", "code": "MT" })),
        );
        let dept = client
            .departments()
            .create(&json!({ "name": "Mechanical", "code": "MT" }))
            .await
            .unwrap();
        assert_eq!(dept.code.as_deref(), Some("MT"));
    }
}
