use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;

use career_connect::config::{AppConfig, AppEnvironment};
use career_connect::error::AppError;
use career_connect::notifications::{
    render, AccountRole, Mailer, NotificationDispatcher, NotificationEvent,
};
use career_connect::telemetry;
use career_connect::workflows::applications::{
    application_router, ApplicationRouterState, ApplicationStatus, ApplicationStatusWorkflow,
    ApplicationSubmissionService, JobId, JobSnapshot, MemoryApplicationRepository,
    MemoryJobDirectory,
};

#[derive(Parser, Debug)]
#[command(
    name = "CareerConnect",
    about = "Job board application intake and notification service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render a notification email template to stdout with sample data
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Template to render
    #[arg(long, value_enum, default_value = "confirmation")]
    template: PreviewTemplate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PreviewTemplate {
    NewApplication,
    Confirmation,
    StatusUpdate,
    Welcome,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Preview(args) => run_preview(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let mailer = Arc::new(Mailer::from_config(&config.mail)?);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::clone(&mailer),
        config.links.clone(),
    ));

    let repository = Arc::new(MemoryApplicationRepository::default());
    let jobs = Arc::new(MemoryJobDirectory::default());
    if config.environment == AppEnvironment::Development {
        seed_demo_jobs(&jobs);
    }

    let service = Arc::new(ApplicationSubmissionService::new(
        Arc::clone(&repository),
        Arc::clone(&jobs),
        Arc::clone(&dispatcher),
    ));
    let workflow = Arc::new(ApplicationStatusWorkflow::with_policy(
        config.status_policy,
        Arc::clone(&repository),
        Arc::clone(&dispatcher),
    ));
    let state = Arc::new(ApplicationRouterState { service, workflow });

    let readiness = Arc::new(AtomicBool::new(false));
    let ops = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .with_state(Arc::clone(&readiness));

    let app = application_router(state).merge(ops);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, mail_disabled = mailer.is_disabled(), "career connect service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Listings normally arrive from the job-board CRUD service; in development
/// the directory is seeded so intake can be exercised immediately.
fn seed_demo_jobs(jobs: &MemoryJobDirectory) {
    jobs.register(JobSnapshot {
        job_id: JobId("job-000001".to_string()),
        title: "Senior Backend Engineer".to_string(),
        employer_name: "Meera Iyer".to_string(),
        employer_email: "meera@nimbusworks.example".to_string(),
        company_note: Some("We review every application within five business days.".to_string()),
    });
    jobs.register(JobSnapshot {
        job_id: JobId("job-000002".to_string()),
        title: "Product Designer".to_string(),
        employer_name: "Dev Kapoor".to_string(),
        employer_email: "dev@brighthire.example".to_string(),
        company_note: None,
    });
    info!("seeded demo job listings");
}

fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let event = sample_event(args.template);
    println!("{}", render(&event, &config.links));
    Ok(())
}

fn sample_event(template: PreviewTemplate) -> NotificationEvent {
    match template {
        PreviewTemplate::NewApplication => NotificationEvent::NewApplication {
            employer_name: "Meera Iyer".to_string(),
            job_title: "Senior Backend Engineer".to_string(),
            applicant_name: "Asha Rao".to_string(),
            applicant_email: "asha@example.com".to_string(),
            applicant_phone: "9990001111".to_string(),
        },
        PreviewTemplate::Confirmation => NotificationEvent::ApplicationConfirmation {
            applicant_name: "Asha Rao".to_string(),
            job_title: "Senior Backend Engineer".to_string(),
            company_note: None,
        },
        PreviewTemplate::StatusUpdate => NotificationEvent::StatusUpdate {
            applicant_name: "Asha Rao".to_string(),
            job_title: "Senior Backend Engineer".to_string(),
            status: ApplicationStatus::Shortlisted,
            message: Some("We would like to schedule an interview next week.".to_string()),
        },
        PreviewTemplate::Welcome => NotificationEvent::Welcome {
            name: "Asha Rao".to_string(),
            role: AccountRole::JobSeeker,
        },
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(readiness): State<Arc<AtomicBool>>) -> impl IntoResponse {
    let ready = readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}
