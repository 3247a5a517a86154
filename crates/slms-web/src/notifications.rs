//! Notification center and header bell
//!
//! Both components talk to the backend through [`ApiClient`] and reload
//! their state after every action, so what they hold always mirrors the
//! server.

use crate::format::{DateFormat, escape_html, format_datetime};
use chrono::{DateTime, Utc};
use slms_client::models::{Notification, NotificationStatus};
use slms_client::{ApiClient, NotificationQuery, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Unread notifications shown in the bell dropdown
pub const RECENT_LIMIT: u32 = 5;

/// How often the bell refreshes
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Characters of a message shown in the bell preview
pub const PREVIEW_LENGTH: usize = 100;

/// Display label for a notification type; unknown types pass through
pub fn format_type(notification_type: &str) -> &str {
    match notification_type {
        "application_status" => "Application",
        "document_approval" => "Document",
        "student_admission" => "Admission",
        "system_announcement" => "Announcement",
        "deadline_reminder" => "Deadline",
        "account_activity" => "Account",
        other => other,
    }
}

/// Compact age such as `5m ago`; a week or older shows the date
pub fn format_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        format_datetime(created_at, DateFormat::Short, now)
    }
}

fn format_created(notification: &Notification, now: DateTime<Utc>) -> String {
    notification
        .created_at
        .map(|at| format_time(at, now))
        .unwrap_or_default()
}

/// List filter; `status: None` means every status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub status: Option<NotificationStatus>,
    pub notification_type: Option<String>,
    pub search: String,
}

impl NotificationFilter {
    pub fn to_query(&self) -> NotificationQuery {
        NotificationQuery {
            status: self.status,
            notification_type: self.notification_type.clone().filter(|t| !t.is_empty()),
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            limit: None,
        }
    }
}

/// Full notification list with filtering and per-item actions
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    api: ApiClient,
    filter: NotificationFilter,
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filter: NotificationFilter::default(),
            notifications: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: NotificationFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &NotificationFilter {
        &self.filter
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unread()).count()
    }

    /// Change the status filter and reload
    pub async fn set_status(&mut self, status: Option<NotificationStatus>) -> Result<()> {
        self.filter.status = status;
        self.load().await
    }

    /// Change the type filter and reload; an empty type clears it
    pub async fn set_type(&mut self, notification_type: Option<String>) -> Result<()> {
        self.filter.notification_type = notification_type.filter(|t| !t.is_empty());
        self.load().await
    }

    pub async fn set_search(&mut self, search: impl Into<String>) -> Result<()> {
        self.filter.search = search.into();
        self.load().await
    }

    /// Fetch the list for the current filter
    #[instrument(skip(self), fields(status = ?self.filter.status))]
    pub async fn load(&mut self) -> Result<()> {
        self.notifications = self
            .api
            .notifications()
            .list(&self.filter.to_query())
            .await?;
        debug!(count = self.notifications.len(), "Loaded notifications");
        Ok(())
    }

    pub async fn mark_as_read(&mut self, id: &str) -> Result<()> {
        self.api.notifications().mark_as_read(id).await?;
        self.load().await
    }

    pub async fn archive(&mut self, id: &str) -> Result<()> {
        self.api.notifications().archive(id).await?;
        self.load().await
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.notifications().soft_delete(id).await?;
        self.load().await
    }

    pub async fn mark_all_as_read(&mut self) -> Result<()> {
        self.api.notifications().mark_all_as_read().await?;
        info!("Marked all notifications as read");
        self.load().await
    }

    /// List markup; an empty list shows `No notifications`
    pub fn render(&self, now: DateTime<Utc>) -> String {
        if self.notifications.is_empty() {
            return r#"<div class="empty-state">No notifications</div>"#.to_string();
        }
        self.notifications
            .iter()
            .map(|n| render_item(n, now))
            .collect()
    }
}

fn render_item(n: &Notification, now: DateTime<Utc>) -> String {
    let id = escape_html(&n.id);
    let status = n.status.as_str();
    let mark_read = if n.is_unread() {
        format!(r#"<button class="action-btn mark-read" data-id="{id}">Mark as Read</button>"#)
    } else {
        String::new()
    };

    format!(
        concat!(
            r#"<div class="notification-item {status}" data-id="{id}">"#,
            r#"<div class="notification-content">"#,
            r#"<div class="notification-header"><h3 class="notification-title">{title}</h3>"#,
            r#"<span class="notification-type">{kind}</span></div>"#,
            r#"<p class="notification-message">{message}</p>"#,
            r#"<div class="notification-meta"><span class="notification-time">{time}</span>"#,
            r#"<span class="notification-status">{status}</span></div>"#,
            "</div>",
            r#"<div class="notification-actions">{mark_read}"#,
            r#"<button class="action-btn archive" data-id="{id}">Archive</button>"#,
            r#"<button class="action-btn delete" data-id="{id}">Delete</button>"#,
            "</div></div>"
        ),
        status = status,
        id = id,
        title = escape_html(&n.title),
        kind = escape_html(format_type(&n.notification_type)),
        message = escape_html(&n.message),
        time = format_created(n, now),
        mark_read = mark_read,
    )
}

/// Header bell: unread badge plus a preview of recent unread items
#[derive(Debug, Clone)]
pub struct NotificationBell {
    api: ApiClient,
    unread_count: u64,
    recent: Vec<Notification>,
}

impl NotificationBell {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            unread_count: 0,
            recent: Vec::new(),
        }
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    pub fn recent(&self) -> &[Notification] {
        &self.recent
    }

    /// Badge text; no badge while nothing is unread
    pub fn badge(&self) -> Option<String> {
        (self.unread_count > 0).then(|| self.unread_count.to_string())
    }

    /// Refresh the unread count and the recent preview
    pub async fn refresh(&mut self) -> Result<u64> {
        let unread_count = self.api.notifications().unread_count().await?;
        let recent = self.api.notifications().recent(RECENT_LIMIT).await?;
        self.unread_count = unread_count;
        self.recent = recent;
        debug!(unread = self.unread_count, "Refreshed notification bell");
        Ok(self.unread_count)
    }

    pub async fn mark_as_read(&mut self, id: &str) -> Result<u64> {
        self.api.notifications().mark_as_read(id).await?;
        self.refresh().await
    }

    pub async fn mark_all_as_read(&mut self) -> Result<u64> {
        self.api.notifications().mark_all_as_read().await?;
        self.refresh().await
    }

    /// Refresh every `period` until `shutdown` resolves
    ///
    /// Failed refreshes are logged and keep the previous state. `on_update`
    /// sees the bell after each successful refresh.
    pub async fn poll<S, F>(&mut self, period: Duration, shutdown: S, mut on_update: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&Self),
    {
        let mut ticker = tokio::time::interval(period);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    debug!("Notification polling stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match self.refresh().await {
                        Ok(_) => on_update(self),
                        Err(e) => warn!(error = %e, "Failed to refresh notifications"),
                    }
                }
            }
        }
    }

    /// Dropdown markup
    pub fn render_dropdown(&self, now: DateTime<Utc>) -> String {
        if self.recent.is_empty() {
            return r#"<div class="empty-state">No new notifications</div>"#.to_string();
        }
        self.recent
            .iter()
            .map(|n| {
                format!(
                    concat!(
                        r#"<div class="dropdown-notification-item" data-id="{id}">"#,
                        r#"<div class="notification-title">{title}</div>"#,
                        r#"<div class="notification-preview">{preview}</div>"#,
                        r#"<div class="notification-time">{time}</div>"#,
                        "</div>"
                    ),
                    id = escape_html(&n.id),
                    title = escape_html(&n.title),
                    preview = escape_html(&preview(&n.message)),
                    time = format_created(n, now),
                )
            })
            .collect()
    }
}

/// First [`PREVIEW_LENGTH`] characters of a message, marked when cut
pub fn preview(message: &str) -> String {
    if message.chars().count() <= PREVIEW_LENGTH {
        return message.to_string();
    }
    let mut out: String = message.chars().take(PREVIEW_LENGTH).collect();
    out.push_str("...");
    out
}
