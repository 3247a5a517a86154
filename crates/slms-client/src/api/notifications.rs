//! `/notifications/` and `/notification-preferences/` endpoints

use super::ApiClient;
use crate::error::Result;
use crate::http::ApiRequest;
use crate::models::{
    Notification, NotificationPreferences, NotificationStatus, TypePreference, UnreadCount,
};

/// Filters for the notification list
///
/// Unset fields are not sent; a `None` status lists every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    pub status: Option<NotificationStatus>,
    pub notification_type: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl NotificationQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(status) = self.status {
            request = request.with_query("status", status.as_str());
        }
        if let Some(kind) = self.notification_type.as_deref().filter(|t| !t.is_empty()) {
            request = request.with_query("type", kind);
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            request = request.with_query("search", search);
        }
        if let Some(limit) = self.limit {
            request = request.with_query("limit", limit);
        }
        request
    }
}

pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &NotificationQuery) -> Result<Vec<Notification>> {
        self.client
            .fetch_list(query.apply(ApiRequest::get("/notifications/")))
            .await
    }

    /// Latest unread notifications for the bell preview
    pub async fn recent(&self, limit: u32) -> Result<Vec<Notification>> {
        self.list(&NotificationQuery {
            status: Some(NotificationStatus::Unread),
            limit: Some(limit),
            ..Default::default()
        })
        .await
    }

    pub async fn unread_count(&self) -> Result<u64> {
        let count: UnreadCount = self
            .client
            .fetch(ApiRequest::get("/notifications/unread_count/"))
            .await?;
        Ok(count.unread_count)
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::patch(format!("/notifications/{id}/mark_as_read/")))
            .await
    }

    pub async fn archive(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::patch(format!("/notifications/{id}/archive/")))
            .await
    }

    /// Hide a notification; the server keeps the record
    pub async fn soft_delete(&self, id: &str) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(format!("/notifications/{id}/soft_delete/")))
            .await
    }

    pub async fn mark_all_as_read(&self) -> Result<()> {
        self.client
            .execute(ApiRequest::patch("/notifications/mark_all_as_read/"))
            .await
    }

    pub async fn preferences(&self) -> Result<NotificationPreferences> {
        self.client
            .fetch(ApiRequest::get("/notification-preferences/my_preferences/"))
            .await
    }

    pub async fn update_preference(&self, preference: &TypePreference) -> Result<()> {
        self.client
            .execute(ApiRequest::patch("/notification-preferences/update/").with_json(preference)?)
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
    async fn test_list_query_params() {
        let client = expect_one(
            Method::GET,
            "/notifications/",
            |req| {
                req.query
                    == vec![
                        ("status".to_string(), "archived".to_string()),
                        ("type".to_string(), "deadline_reminder".to_string()),
                        ("search".to_string(), "fee".to_string()),
                    ]
            },
            Some(json!({ "results": [] })),
        );
        let query = NotificationQuery {
            status: Some(NotificationStatus::Archived),
            notification_type: Some("deadline_reminder".into()),
            search: Some("fee".into()),
            limit: None,
        };
        assert!(client.notifications().list(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_sends_no_params() {
        let client = expect_one(
            Method::GET,
            "/notifications/",
            |req| req.query.is_empty(),
            Some(json!([])),
        );
        let query = NotificationQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        client.notifications().list(&query).await.unwrap();
    }

    #[tokio::test]
    async fn test_recent() {
        let client = expect_one(
            Method::GET,
            "/notifications/",
            |req| req.query_value("status") == Some("unread") && req.query_value("limit") == Some("5"),
            Some(json!([{ "id": 1, "status": "unread", "title": "t", "message": "m" }])),
        );
        let recent = client.notifications().recent(5).await.unwrap();
        assert!(recent[0].is_unread());
    }

    #[tokio::test]
    async fn test_unread_count() {
        let client = expect_one(
            Method::GET,
            "/notifications/unread_count/",
            |_| true,
            Some(json!({ "unread_count": 4 })),
        );
        assert_eq!(client.notifications().unread_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_actions_use_expected_methods() {
        let client = expect_one(Method::PATCH, "/notifications/3/mark_as_read/", |_| true, None);
        client.notifications().mark_as_read("3").await.unwrap();

        let client = expect_one(Method::PATCH, "/notifications/3/archive/", |_| true, None);
        client.notifications().archive("3").await.unwrap();

        let client = expect_one(Method::DELETE, "/notifications/3/soft_delete/", |_| true, None);
        client.notifications().soft_delete("3").await.unwrap();

        let client = expect_one(Method::PATCH, "/notifications/mark_all_as_read/", |_| true, None);
        client.notifications().mark_all_as_read().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_preference() {
        let client = expect_one(
            Method::PATCH,
            "/notification-preferences/update/",
            |req| {
                req.json_body()
                    == Some(&json!({
                        "notification_type": "account_activity",
                        "enabled": true,
                        "email_enabled": true,
                    }))
            },
            Some(json!({ "status": "ok" })),
        );
        client
            .notifications()
            .update_preference(&TypePreference {
                notification_type: "account_activity".into(),
                enabled: true,
                email_enabled: true,
            })
            .await
            .unwrap();
    }
}
