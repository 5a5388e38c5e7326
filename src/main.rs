//! Civic Portal - Entry Point
//!
//! Runs one portal command (login, logout, status, visit, classify) against
//! the persisted session in the configured storage directory.

use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use civic_portal::auth::{AuthOptions, Authenticator};
use civic_portal::commands::{CommandContext, CommandStatus, handle_command, parse_args};
use civic_portal::config::PortalConfig;
use civic_portal::error::PortalError;
use civic_portal::error::handlers::{exit_code, handle_error};
use civic_portal::guard::RouteTable;
use civic_portal::report::{ClassifierClient, ReportForm};
use civic_portal::session::SessionStore;
use civic_portal::storage::FileStore;
use civic_portal::utils::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let ctx = match build_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            handle_error(&e);
            eprintln!("{e}");
            return exit(exit_code(&e));
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = handle_command(&ctx, parse_args(&args)).await;

    match result.status {
        CommandStatus::Success => {
            println!("{}", result.message);
            ExitCode::SUCCESS
        }
        CommandStatus::Failure(code) => {
            eprintln!("{}", result.message);
            exit(code)
        }
    }
}

fn build_context() -> Result<CommandContext, PortalError> {
    let config = PortalConfig::load()?;
    info!(
        "Loaded configuration (auth: {}, storage: {})",
        config.auth_mode(),
        config.storage_dir
    );

    let backend = FileStore::open(config.storage_path())?;
    let store = Arc::new(SessionStore::init(backend));
    let auth = Authenticator::new(config.auth_mode(), store, AuthOptions::from(&config))?;

    let classifier = ClassifierClient::new(&config.classifier_url, config.request_timeout())?;
    let report_form = ReportForm::with_classifier(classifier, config.low_confidence_threshold);

    Ok(CommandContext {
        auth,
        routes: RouteTable::new(),
        report_form,
    })
}

fn exit(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => {
            error!("Exit code {} out of range", code);
            ExitCode::FAILURE
        }
    }
}
