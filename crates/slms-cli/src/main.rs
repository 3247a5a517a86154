//! Command-line interface for the SLMS client

mod commands;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use slms_client::{
    ClientConfig, ClientConfigBuilder, ClientError, FileSessionStore, SessionStore,
};
use slms_template::DocumentType;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "slms")]
#[command(about = "Student Lifecycle Management System client", long_about = None)]
struct Cli {
    /// Backend origin, e.g. http://localhost:8000
    #[arg(long, global = true, env = "SLMS_API_BASE_URL")]
    api_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "SLMS_API_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Session file holding the auth token
    #[arg(long, global = true, env = "SLMS_SESSION_PATH")]
    session: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List application routes
    Routes,
    /// Resolve a location hash to a page
    Open {
        /// Hash such as '#/student/42'
        hash: String,
    },
    /// Manage the stored session
    #[command(subcommand)]
    Session(SessionCommand),
    /// List or search students
    Students {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        semester: Option<u32>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Generate and inspect documents
    #[command(subcommand)]
    Document(DocumentCommand),
    /// List notifications
    Notifications {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        #[arg(long = "type")]
        notification_type: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Keep polling the unread count until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show dashboard statistics
    Dashboard {
        /// Also write the dashboard cards and chart as HTML
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Store an auth token
    Set {
        token: String,
        /// Signed-in user as a JSON object
        #[arg(long)]
        user: Option<String>,
    },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
enum DocumentCommand {
    /// Render a document for a student
    Render {
        student_id: String,
        document_type: DocumentType,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Directory of <type>.html files overriding the bundled templates
        #[arg(long)]
        templates: Option<PathBuf>,
        #[arg(long)]
        institute: Option<String>,
    },
    /// List document types
    Types {
        /// Only types issued for this application type
        #[arg(long)]
        application_type: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatusArg {
    All,
    Unread,
    Read,
    Archived,
}

impl Cli {
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    /// Flags are applied over the environment before anything is validated
    fn client_config_with<F>(&self, lookup: F) -> anyhow::Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ClientConfigBuilder::from_lookup(lookup);
        if let Some(url) = &self.api_url {
            builder = builder.api_base_url(url.clone());
        }
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(path) = &self.session {
            builder = builder.session_path(path.clone());
        }
        builder.build().context("Invalid client configuration")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = slms_utils::Config::from_env();

    if cli.json_logs {
        slms_utils::init_tracing_json(app.default_log_filter());
    } else {
        slms_utils::init_tracing_with(app.default_log_filter());
    }

    let config = cli.client_config()?;
    debug!(api = %config.api_root(), "Starting slms");
    let session = FileSessionStore::new(&config.session_path);

    match commands::run(cli.command, &config, &app).await {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<ClientError>() {
            Some(client_err) => {
                let outcome = slms_web::handle_error(client_err);
                if outcome.clear_session {
                    session.clear().context("Failed to clear session")?;
                    info!("Cleared stored session");
                }
                eprintln!("{}", outcome.message);
                if let Some(path) = outcome.redirect {
                    eprintln!("Sign in again with `slms session set <token>` ({path})");
                }
                std::process::exit(1);
            }
            None => Err(err),
        },
    }
}
