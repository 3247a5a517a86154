//! Command handlers

use crate::output::{or_dash, table};
use crate::{Commands, DocumentCommand, SessionCommand, StatusArg};
use anyhow::{Context, bail};
use chrono::Utc;
use serde_json::Value;
use slms_client::models::NotificationStatus;
use slms_client::{
    ApiClient, ClientConfig, FileSessionStore, Filters, HttpClient, Session, SessionStore,
};
use slms_template::{
    DocumentContext, DocumentType, FileLoader, TemplateRegistry, documents_for_application_type,
};
use slms_web::charts::Chart;
use slms_web::notifications::{NotificationFilter, POLL_INTERVAL, format_time, format_type};
use slms_web::pages::{self, Navigation, PageKind};
use slms_web::widgets::{CardColor, Gradient};
use slms_web::{DepartmentDistributionChart, NotificationBell, NotificationCenter, PremiumCard};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run(
    command: Commands,
    config: &ClientConfig,
    app: &slms_utils::Config,
) -> anyhow::Result<()> {
    let session = Arc::new(FileSessionStore::new(&config.session_path));

    match command {
        Commands::Routes => {
            routes();
            Ok(())
        }
        Commands::Open { hash } => {
            open(&hash, session.token().is_some());
            Ok(())
        }
        Commands::Session(cmd) => session_command(cmd, &*session),
        Commands::Students {
            search,
            department,
            semester,
            status,
        } => {
            let api = api(config, session)?;
            let students = match search.filter(|s| !s.trim().is_empty()) {
                Some(query) => api.students().search(&query).await?,
                None => {
                    let filters = Filters::new()
                        .with_opt("department", department)
                        .with_opt("semester", semester)
                        .with_opt("status", status);
                    api.students().list(filters).await?
                }
            };

            let mut out = table(["ID", "Roll", "Name", "Department", "Semester", "Status"]);
            for s in &students {
                out.add_row([
                    s.id.clone(),
                    s.current_roll_number.clone(),
                    s.full_name_english.clone(),
                    or_dash(s.department_name()).to_string(),
                    s.semester.map_or_else(|| "-".to_string(), |n| n.to_string()),
                    or_dash(s.status.as_deref()).to_string(),
                ]);
            }
            println!("{out}");
            println!("{} student(s)", students.len());
            Ok(())
        }
        Commands::Document(DocumentCommand::Types { application_type }) => {
            document_types(application_type.as_deref());
            Ok(())
        }
        Commands::Document(DocumentCommand::Render {
            student_id,
            document_type,
            out,
            templates,
            institute,
        }) => {
            let api = api(config, session)?;
            let student = api.students().get(&student_id).await?;
            let record = student.to_record()?;

            let registry = registry(templates.as_deref(), institute)?;
            let rendered = registry.render(document_type, &record)?;
            if !rendered.is_complete() {
                warn!(
                    missing = ?rendered.empty_placeholders,
                    "Student record is missing fields used by the {document_type} template"
                );
            }

            match out {
                Some(path) => {
                    std::fs::write(&path, &rendered.html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Wrote {}", rendered.title);
                }
                None => println!("{}", rendered.html),
            }
            Ok(())
        }
        Commands::Notifications {
            status,
            notification_type,
            search,
            watch,
        } => {
            if !app.features.notifications {
                bail!("Notifications are disabled (SLMS_DISABLE_NOTIFICATIONS)");
            }
            let api = api(config, session)?;
            if watch {
                return watch_notifications(api).await;
            }

            let filter = NotificationFilter {
                status: status_filter(status),
                notification_type,
                search: search.unwrap_or_default(),
            };
            let mut center = NotificationCenter::new(api).with_filter(filter);
            center.load().await?;

            let now = Utc::now();
            let mut out = table(["ID", "Type", "Title", "Status", "Received"]);
            for n in center.notifications() {
                out.add_row([
                    n.id.clone(),
                    format_type(&n.notification_type).to_string(),
                    n.title.clone(),
                    n.status.as_str().to_string(),
                    n.created_at
                        .map(|at| format_time(at, now))
                        .unwrap_or_default(),
                ]);
            }
            if center.notifications().is_empty() {
                println!("No notifications");
            } else {
                println!("{out}");
            }
            Ok(())
        }
        Commands::Dashboard { html } => {
            let api = api(config, session)?;
            let stats = api.dashboard().stats().await?;

            let mut out = table(["Metric", "Value"]);
            out.add_row(["Students".to_string(), stats.students.total.to_string()]);
            out.add_row(["Active".to_string(), stats.students.active.to_string()]);
            out.add_row(["Discontinued".to_string(), stats.students.discontinued.to_string()]);
            out.add_row(["Alumni".to_string(), stats.alumni.total.to_string()]);
            out.add_row(["Pending applications".to_string(), stats.applications.pending.to_string()]);
            println!("{out}");

            if let Some(path) = html {
                let cards = [
                    PremiumCard::new("Total Students", stats.students.total)
                        .with_icon("users")
                        .with_href("#/students"),
                    PremiumCard::new("Alumni", stats.alumni.total)
                        .with_icon("graduation-cap")
                        .with_color(CardColor::Purple)
                        .with_gradient(Gradient::Secondary)
                        .with_href("#/alumni"),
                    PremiumCard::new("Pending Applications", stats.applications.pending)
                        .with_icon("file-text")
                        .with_color(CardColor::Amber)
                        .with_gradient(Gradient::Warning)
                        .with_href("#/applications"),
                    PremiumCard::new("Discontinued", stats.students.discontinued)
                        .with_icon("user-x")
                        .with_color(CardColor::Red)
                        .with_gradient(Gradient::Danger)
                        .with_href("#/discontinued"),
                ];
                let chart = DepartmentDistributionChart::from_counts(
                    "department-distribution",
                    department_counts(&stats.students.by_department),
                )?;
                write_dashboard(&path, &cards, &chart, app.features.dark_mode)?;
                info!(path = %path.display(), "Wrote dashboard");
            }
            Ok(())
        }
    }
}

fn api(config: &ClientConfig, session: Arc<FileSessionStore>) -> anyhow::Result<ApiClient> {
    let http = HttpClient::new(config.clone(), session)?;
    Ok(ApiClient::new(Arc::new(http)))
}

fn routes() {
    let mut out = table(["Route", "Page", "Access"]);
    for kind in PageKind::ROUTED {
        out.add_row([
            kind.template().unwrap_or_default(),
            kind.title(),
            if kind.is_public() { "public" } else { "signed in" },
        ]);
    }
    println!("{out}");
}

fn open(hash: &str, authenticated: bool) {
    match pages::navigate(hash, authenticated) {
        Navigation::Redirect(path) => println!("Redirect to {path} (not signed in)"),
        Navigation::Render(page) => {
            println!("{} ({})", page.kind, page.location.path);
            for (name, value) in page.params.iter() {
                println!("  {name} = {value}");
            }
            for (name, value) in &page.location.query {
                println!("  ?{name} = {value}");
            }
            if let Some(doc) = page.document_type() {
                println!("  document: {}", doc.metadata().name);
            }
        }
    }
}

fn parse_user(raw: &str) -> anyhow::Result<Value> {
    let user: Value = serde_json::from_str(raw).context("--user must be valid JSON")?;
    anyhow::ensure!(user.is_object(), "--user must be a JSON object");
    Ok(user)
}

fn session_command(cmd: SessionCommand, store: &dyn SessionStore) -> anyhow::Result<()> {
    match cmd {
        SessionCommand::Set { token, user } => {
            let user = user.map(|u| parse_user(&u)).transpose()?;
            store.save(&Session {
                auth_token: Some(token),
                user,
            })?;
            println!("Session saved");
        }
        SessionCommand::Show => {
            let session = store.load()?;
            match session.auth_token.as_deref().filter(|t| !t.is_empty()) {
                Some(token) => println!("Signed in (token {})", mask(token)),
                None => println!("Not signed in"),
            }
            if let Some(user) = session.user {
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
        }
        SessionCommand::Clear => {
            store.clear()?;
            println!("Session cleared");
        }
    }
    Ok(())
}

fn mask(token: &str) -> String {
    let count = token.chars().count();
    let tail: String = token.chars().skip(count.saturating_sub(4)).collect();
    format!("...{tail}")
}

fn document_types(application_type: Option<&str>) {
    let types: Vec<DocumentType> = match application_type {
        Some(kind) => documents_for_application_type(kind).to_vec(),
        None => DocumentType::ALL.to_vec(),
    };
    if types.is_empty() {
        println!("No documents are issued for this application type");
        return;
    }

    let mut out = table(["Type", "Name", "Description"]);
    for doc in types {
        let meta = doc.metadata();
        out.add_row([doc.slug(), meta.name, meta.description]);
    }
    println!("{out}");
}

fn registry(templates: Option<&Path>, institute: Option<String>) -> anyhow::Result<TemplateRegistry> {
    let registry = TemplateRegistry::with_builtin();
    if let Some(name) = institute {
        registry.set_context(DocumentContext::default().with_institute_name(name));
    }
    if let Some(dir) = templates {
        registry
            .load_overrides(&FileLoader::new(dir))
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
    }
    Ok(registry)
}

fn status_filter(status: StatusArg) -> Option<NotificationStatus> {
    match status {
        StatusArg::All => None,
        StatusArg::Unread => Some(NotificationStatus::Unread),
        StatusArg::Read => Some(NotificationStatus::Read),
        StatusArg::Archived => Some(NotificationStatus::Archived),
    }
}

async fn watch_notifications(api: ApiClient) -> anyhow::Result<()> {
    let mut bell = NotificationBell::new(api);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for interrupt");
        }
    };
    println!("Watching notifications, Ctrl-C to stop");
    bell.poll(POLL_INTERVAL, shutdown, |bell| {
        let badge = bell.badge().unwrap_or_else(|| "0".to_string());
        println!("[{}] unread: {badge}", Utc::now().format("%H:%M:%S"));
    })
    .await;
    Ok(())
}

/// Department counts from the stats body, either `{name: count}` or
/// `[{department|name, count}]`
fn department_counts(value: &Value) -> Vec<(String, u64)> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, count)| Some((name.clone(), count.as_u64()?)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let name = item.get("department").or_else(|| item.get("name"))?;
                let count = item.get("count")?.as_u64()?;
                Some((name.as_str()?.to_string(), count))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn write_dashboard(
    path: &Path,
    cards: &[PremiumCard],
    chart: &DepartmentDistributionChart,
    dark_mode: bool,
) -> anyhow::Result<()> {
    let mut html = String::from(if dark_mode {
        "<div class=\"dark\" data-theme=\"dark\">\n"
    } else {
        "<div data-theme=\"light\">\n"
    });
    html.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">"#);
    for card in cards {
        html.push_str(&card.render());
    }
    html.push_str("</div>\n");
    html.push_str(&chart.canvas());
    html.push_str(&format!(
        "\n<script type=\"application/json\" data-chart=\"{}\">{}</script>\n",
        chart.container_id(),
        serde_json::to_string(&chart.config())?,
    ));
    html.push_str("</div>\n");
    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_department_counts_shapes() {
        assert_eq!(
            department_counts(&json!({ "Civil": 40, "Power": 12 })),
            vec![("Civil".to_string(), 40), ("Power".to_string(), 12)]
        );
        assert_eq!(
            department_counts(&json!([
                { "department": "Computer", "count": 55 },
                { "name": "Civil", "count": 40 },
                { "name": "Broken" },
            ])),
            vec![("Computer".to_string(), 55), ("Civil".to_string(), 40)]
        );
        assert!(department_counts(&Value::Null).is_empty());
    }

    #[test]
    fn test_parse_user() {
        let user = parse_user(r#"{"username": "registrar"}"#).unwrap();
        assert_eq!(user["username"], "registrar");

        for bad in [r#""registrar""#, "3", "[1]", "null"] {
            let err = parse_user(bad).unwrap_err();
            assert_eq!(err.to_string(), "--user must be a JSON object");
        }
        assert_eq!(
            parse_user("{oops").unwrap_err().to_string(),
            "--user must be valid JSON"
        );
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdef123456"), "...3456");
        assert_eq!(mask("ab"), "...ab");
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(status_filter(StatusArg::All), None);
        assert_eq!(status_filter(StatusArg::Archived), Some(NotificationStatus::Archived));
    }

    #[test]
    fn test_session_commands() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        session_command(
            SessionCommand::Set {
                token: "tok-1".into(),
                user: Some(r#"{"username":"admin"}"#.into()),
            },
            &store,
        )
        .unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.user().unwrap()["username"], "admin");

        session_command(SessionCommand::Clear, &store).unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_session_set_rejects_bad_user() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        let result = session_command(
            SessionCommand::Set {
                token: "t".into(),
                user: Some("not json".into()),
            },
            &store,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("admit-card.html"), "<p>{{INSTITUTE_NAME}}</p>").unwrap();

        let registry = registry(Some(dir.path()), Some("Sylhet Polytechnic".into())).unwrap();
        let doc = registry.render(DocumentType::AdmitCard, &json!({})).unwrap();
        assert_eq!(doc.html, "<p>Sylhet Polytechnic</p>");
    }

    #[test]
    fn test_write_dashboard() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.html");
        let chart =
            DepartmentDistributionChart::from_counts("dept", vec![("Civil".to_string(), 3)])
                .unwrap();

        write_dashboard(&path, &[PremiumCard::new("Students", 3)], &chart, true).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with(r#"<div class="dark" data-theme="dark">"#));
        assert!(html.contains("glass-card"));
        assert!(html.contains(r#"<canvas id="dept"></canvas>"#));
        assert!(html.contains(r#""type":"pie""#));

        write_dashboard(&path, &[], &chart, false).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with(r#"<div data-theme="light">"#));
        assert!(!html.contains("class=\"dark\""));
    }
}
