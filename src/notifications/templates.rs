use std::fmt::Write as _;

use chrono::{Datelike, Local};

use super::event::{AccountRole, NotificationEvent};
use crate::workflows::applications::domain::ApplicationStatus;

/// Base URL configuration for the links embedded in every email.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new("http://localhost:5173")
    }
}

impl LinkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let raw = base_url.into();
        Self {
            base_url: raw.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Landing page for everything application-related.
    fn applications_link(&self) -> String {
        format!("{}/applications/me", self.base_url)
    }

    /// Site root, used only by the welcome email.
    fn root_link(&self) -> &str {
        &self.base_url
    }
}

/// Render the email for `event` as a complete, self-contained HTML document.
///
/// Deterministic given its inputs except for the embedded current-date stamps
/// (footer year, submitted/joined rows). All styles are inline so the document
/// renders without network access to assets.
pub fn render(event: &NotificationEvent, links: &LinkConfig) -> String {
    match event {
        NotificationEvent::NewApplication {
            employer_name,
            job_title,
            applicant_name,
            applicant_email,
            applicant_phone,
        } => new_application(
            employer_name,
            job_title,
            applicant_name,
            applicant_email,
            applicant_phone,
            &links.applications_link(),
        ),
        NotificationEvent::ApplicationConfirmation {
            applicant_name,
            job_title,
            company_note,
        } => application_confirmation(
            applicant_name,
            job_title,
            company_note.as_deref(),
            &links.applications_link(),
        ),
        NotificationEvent::StatusUpdate {
            applicant_name,
            job_title,
            status,
            message,
        } => status_update(
            applicant_name,
            job_title,
            *status,
            message.as_deref(),
            &links.applications_link(),
        ),
        NotificationEvent::Welcome { name, role } => welcome(name, *role, links.root_link()),
    }
}

const DEFAULT_COMPANY_NOTE: &str =
    "The employer will review your application and reach out if there's a match.";

/// Badge color for a status row: terminal outcomes are green/red, everything
/// else falls back to blue.
fn status_badge_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Shortlisted | ApplicationStatus::Hired => "green",
        ApplicationStatus::Rejected => "red",
        _ => "blue",
    }
}

fn new_application(
    employer_name: &str,
    job_title: &str,
    applicant_name: &str,
    applicant_email: &str,
    applicant_phone: &str,
    link: &str,
) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "<p>Hello <strong>{}</strong>,</p>",
        escape_html(employer_name)
    )
    .expect("write greeting");
    body.push_str(
        "<p>You have received a new application for your job posting. Here are the details:</p>\n",
    );
    body.push_str("<div class=\"info-card\">\n");
    info_row(&mut body, "Job Title", &escape_html(job_title));
    info_row(&mut body, "Applicant", &escape_html(applicant_name));
    info_row(&mut body, "Email", &escape_html(applicant_email));
    info_row(&mut body, "Phone", &escape_html(applicant_phone));
    info_row(&mut body, "Status", &badge("amber", "Under Review"));
    body.push_str("</div>\n");
    body.push_str("<p>Log in to your dashboard to review the application and resume.</p>\n");
    cta(&mut body, link, "View Applications →");
    base_layout(&body)
}

fn application_confirmation(
    applicant_name: &str,
    job_title: &str,
    company_note: Option<&str>,
    link: &str,
) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "<p>Hi <strong>{}</strong>,</p>",
        escape_html(applicant_name)
    )
    .expect("write greeting");
    body.push_str("<p>Your application has been successfully submitted! 🎉</p>\n");
    body.push_str("<div class=\"info-card\">\n");
    info_row(&mut body, "Job Applied For", &escape_html(job_title));
    info_row(&mut body, "Submitted On", &current_date_stamp());
    info_row(&mut body, "Status", &badge("amber", "Under Review"));
    body.push_str("</div>\n");
    writeln!(
        body,
        "<p>{}</p>",
        escape_html(company_note.unwrap_or(DEFAULT_COMPANY_NOTE))
    )
    .expect("write note");
    cta(&mut body, link, "View My Applications →");
    base_layout(&body)
}

fn status_update(
    applicant_name: &str,
    job_title: &str,
    status: ApplicationStatus,
    message: Option<&str>,
    link: &str,
) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "<p>Hi <strong>{}</strong>,</p>",
        escape_html(applicant_name)
    )
    .expect("write greeting");
    body.push_str("<p>There's an update on your application:</p>\n");
    body.push_str("<div class=\"info-card\">\n");
    info_row(&mut body, "Job", &escape_html(job_title));
    info_row(
        &mut body,
        "New Status",
        &badge(status_badge_class(status), status.label()),
    );
    body.push_str("</div>\n");
    // No paragraph at all when the employer left no message.
    if let Some(message) = message {
        writeln!(body, "<p>{}</p>", escape_html(message)).expect("write message");
    }
    body.push_str("<p>Log in to your dashboard to see more details.</p>\n");
    cta(&mut body, link, "View My Applications →");
    base_layout(&body)
}

fn welcome(name: &str, role: AccountRole, link: &str) -> String {
    let mut body = String::new();
    writeln!(body, "<p>Welcome, <strong>{}</strong>! 👋</p>", escape_html(name))
        .expect("write greeting");
    writeln!(
        body,
        "<p>Your CareerConnect account has been created successfully as a <strong>{}</strong>.</p>",
        role.label()
    )
    .expect("write role line");
    body.push_str("<div class=\"info-card\">\n");
    // The account-type badge carries no status dot.
    info_row(
        &mut body,
        "Account Type",
        &format!("<span class=\"badge blue\">{}</span>", role.label()),
    );
    info_row(&mut body, "Joined", &current_date_stamp());
    body.push_str("</div>\n");
    let guidance = match role {
        AccountRole::Employer => {
            "You can now post jobs and review applications from talented candidates."
        }
        AccountRole::JobSeeker => {
            "You can now browse thousands of job listings and apply with a single click."
        }
    };
    writeln!(body, "<p>{guidance}</p>").expect("write guidance");
    cta(&mut body, link, "Get Started →");
    base_layout(&body)
}

/// Current date rendered as day/month-abbreviation/year, e.g. `5 Aug 2026`.
fn current_date_stamp() -> String {
    Local::now().format("%-d %b %Y").to_string()
}

fn info_row(html: &mut String, label: &str, value_html: &str) {
    writeln!(
        html,
        "  <div class=\"row\"><span class=\"label\">{label}</span><span class=\"value\">{value_html}</span></div>"
    )
    .expect("write info row");
}

fn badge(class: &str, text: &str) -> String {
    format!("<span class=\"badge {class}\">● {text}</span>")
}

fn cta(html: &mut String, link: &str, label: &str) {
    writeln!(
        html,
        "<div class=\"cta\">\n  <a href=\"{}\">{label}</a>\n</div>",
        escape_html(link)
    )
    .expect("write cta");
}

const LAYOUT_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>CareerConnect</title>
  <style>
    * { margin:0; padding:0; box-sizing:border-box; }
    body { font-family: 'Segoe UI', Arial, sans-serif; background:#07091a; color:#f1f5f9; }
    .wrapper { max-width:600px; margin:40px auto; background:#0c0f24; border-radius:16px; overflow:hidden; border:1px solid rgba(255,255,255,0.08); }
    .header { background:linear-gradient(135deg,#6366f1,#4f46e5); padding:32px 40px; text-align:center; }
    .header h1 { color:#fff; font-size:28px; font-weight:800; margin-top:12px; }
    .body { padding:36px 40px; }
    .body p { font-size:15px; line-height:1.7; color:#94a3b8; margin-bottom:14px; }
    .body p strong { color:#f1f5f9; }
    .info-card { background:rgba(255,255,255,0.04); border:1px solid rgba(255,255,255,0.08); border-radius:12px; padding:20px 24px; margin:20px 0; }
    .info-card .row { display:flex; justify-content:space-between; padding:8px 0; border-bottom:1px solid rgba(255,255,255,0.06); font-size:14px; }
    .info-card .row:last-child { border-bottom:none; }
    .info-card .row .label { color:#475569; font-weight:600; }
    .info-card .row .value { color:#f1f5f9; font-weight:500; text-align:right; max-width:60%; }
    .cta { text-align:center; margin:28px 0 10px; }
    .cta a { display:inline-block; padding:13px 32px; background:linear-gradient(135deg,#6366f1,#4f46e5); color:#fff; text-decoration:none; border-radius:8px; font-size:15px; font-weight:700; }
    .badge { display:inline-block; padding:4px 12px; border-radius:99px; font-size:12px; font-weight:700; }
    .badge.amber  { background:rgba(245,158,11,0.15); color:#f59e0b; border:1px solid rgba(245,158,11,0.3); }
    .badge.green  { background:rgba(16,185,129,0.15); color:#10b981; border:1px solid rgba(16,185,129,0.3); }
    .badge.red    { background:rgba(244,63,94,0.15);  color:#f43f5e; border:1px solid rgba(244,63,94,0.3); }
    .badge.blue   { background:rgba(99,102,241,0.15); color:#818cf8; border:1px solid rgba(99,102,241,0.3); }
    .footer { padding:20px 40px; text-align:center; background:#07091a; border-top:1px solid rgba(255,255,255,0.06); }
    .footer p { font-size:12px; color:#334155; }
  </style>
</head>
<body>
  <div class="wrapper">
    <div class="header">
      <h1>CareerConnect</h1>
    </div>
    <div class="body">
"##;

/// Shared shell (header, body slot, footer) so visual identity stays in one
/// place; each event supplies only its body content.
fn base_layout(body_html: &str) -> String {
    let mut html = String::with_capacity(LAYOUT_HEAD.len() + body_html.len() + 512);
    html.push_str(LAYOUT_HEAD);
    html.push_str(body_html);
    html.push_str("    </div>\n    <div class=\"footer\">\n");
    writeln!(
        html,
        "      <p>© {} CareerConnect. All rights reserved.</p>",
        Local::now().year()
    )
    .expect("write footer year");
    html.push_str(
        "      <p style=\"margin-top:6px;\">This is an automated email — please do not reply.</p>\n",
    );
    html.push_str("    </div>\n  </div>\n</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
