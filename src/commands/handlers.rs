use log::info;
use std::path::Path;

use crate::auth::{Authenticator, Credential};
use crate::commands::parser::{Command, USAGE};
use crate::error::PortalError;
use crate::error::handlers::{exit_code, handle_error, login_failure_message};
use crate::guard::{Navigation, RouteTable};
use crate::report::{Attachment, Category, IssueDraft, ReportForm};
use crate::session::{Role, SessionState};

const REPORT_ROUTE: &str = "/report";

#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    /// Carries the process exit code.
    Failure(i32),
}

#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

impl CommandResult {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: message.into(),
        }
    }

    fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Failure(code),
            message: message.into(),
        }
    }
}

/// Everything a command may touch.
pub struct CommandContext {
    pub auth: Authenticator,
    pub routes: RouteTable,
    pub report_form: ReportForm,
}

// Handle a single command against the shared context
pub async fn handle_command(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Login {
            email,
            password,
            role,
        } => handle_cmd_login(ctx, email, password, role).await,
        Command::Logout => handle_cmd_logout(ctx),
        Command::Status => handle_cmd_status(ctx),
        Command::Visit(path) => handle_cmd_visit(ctx, &path),
        Command::Classify { image, category } => {
            let session = ctx.auth.store().get();
            if let Navigation::Redirect(target) = ctx.routes.navigate(REPORT_ROUTE, &session) {
                info!("Access to {} denied, redirecting to {}", REPORT_ROUTE, target);
                return CommandResult::failure(
                    1,
                    format!("Log in as a citizen to report issues ({target})."),
                );
            }
            match handle_cmd_classify(ctx, &image, category).await {
                Ok(message) => CommandResult::success(message),
                Err(e) => {
                    handle_error(&e);
                    CommandResult::failure(exit_code(&e), e.to_string())
                }
            }
        }
        Command::Help => CommandResult::success(USAGE),
        Command::Unknown(raw) => {
            CommandResult::failure(64, format!("Unknown command: {raw:?}\n{USAGE}"))
        }
    }
}

async fn handle_cmd_login(
    ctx: &CommandContext,
    email: String,
    password: String,
    role: Option<Role>,
) -> CommandResult {
    let mut credential = Credential::new(email, password);
    credential.role = role;

    match ctx.auth.login(&credential).await {
        Ok(session) => {
            let landing = match session.identity() {
                Some(identity) if identity.role == Role::Admin => "/admin",
                _ => "/dashboard",
            };
            let view = match ctx.routes.navigate(landing, &session) {
                Navigation::Render(view) => view.to_string(),
                other => format!("{other:?}"),
            };
            CommandResult::success(format!(
                "Logged in as {}. Opening {}.",
                describe(&session.state()),
                view
            ))
        }
        Err(e) => {
            let message = login_failure_message(&e);
            let err = PortalError::from(e);
            handle_error(&err);
            CommandResult::failure(exit_code(&err), message)
        }
    }
}

fn handle_cmd_logout(ctx: &CommandContext) -> CommandResult {
    ctx.auth.logout();
    CommandResult::success("Logged out.")
}

fn handle_cmd_status(ctx: &CommandContext) -> CommandResult {
    let session = ctx.auth.store().get();
    CommandResult::success(format!(
        "{} ({} mode)",
        describe(&session.state()),
        ctx.auth.mode()
    ))
}

fn handle_cmd_visit(ctx: &CommandContext, path: &str) -> CommandResult {
    let session = ctx.auth.store().get();
    match ctx.routes.navigate(path, &session) {
        Navigation::Render(view) => CommandResult::success(format!("Showing {view}.")),
        Navigation::Redirect(target) => {
            info!("Access to {} denied, redirecting to {}", path, target);
            CommandResult::failure(1, format!("Access denied. Redirecting to {target}."))
        }
        Navigation::NotFound => CommandResult::failure(1, format!("No page at {path}.")),
    }
}

async fn handle_cmd_classify(
    ctx: &CommandContext,
    image: &str,
    category: Category,
) -> Result<String, PortalError> {
    let path = Path::new(image);
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.to_string());

    let draft = IssueDraft {
        title: file_name.clone(),
        description: format!("{category} reported from {file_name}"),
        category: Some(category),
        images: vec![Attachment::new(file_name, content_type_for(path), bytes)],
        ..IssueDraft::default()
    };

    let message = match ctx.report_form.prepare(&draft).await? {
        Some(prediction) => format!(
            "Report ready: {} confirmed ({:.1}% confidence).",
            prediction.prediction,
            prediction.confidence * 100.0
        ),
        None => format!("Report ready: {category} (not classified)."),
    };
    Ok(message)
}

fn describe(state: &SessionState<'_>) -> String {
    match state {
        SessionState::Anonymous => "Anonymous".to_string(),
        SessionState::Authenticated(identity) => format!(
            "{} <{}> [{}]",
            identity.display_name, identity.email, identity.role
        ),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
