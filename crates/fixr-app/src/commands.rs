//! Subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fixr_ai::{
    submit_problem, HttpTransport, HttpTransportConfig, ImageHandle, ProblemReport, SendOutcome,
    ServiceCategory, Session, Urgency,
};
use fixr_auth::{AuthClient, AuthError, AuthSession, CredentialStore};
use fixr_common::{FixrError, Result};
use fixr_config::FixrConfig;
use tracing::info;

use crate::render::format_message;
use crate::repl;

fn auth_error(e: AuthError) -> FixrError {
    FixrError::Auth(e.user_message())
}

pub(crate) fn transport_config(config: &FixrConfig) -> HttpTransportConfig {
    HttpTransportConfig::new(config.api.ai_url.clone())
        .with_request_timeout(Duration::from_secs(config.transport.request_timeout.into()))
        .with_connect_timeout(Duration::from_secs(config.transport.connect_timeout.into()))
}

fn transport(config: &FixrConfig) -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new(transport_config(config)))
}

/// A fresh conversation wired to the configured backend.
pub(crate) fn new_session(config: &FixrConfig) -> Session {
    Session::with_greeting(transport(config), config.chat.greeting.clone()).with_request_timeout(
        Duration::from_secs(config.transport.request_timeout.into()),
    )
}

fn auth_client(config: &FixrConfig) -> AuthClient {
    AuthClient::with_timeouts(
        config.api.auth_url.clone(),
        Duration::from_secs(config.transport.connect_timeout.into()),
        Duration::from_secs(config.transport.request_timeout.into()),
    )
}

fn credential_store() -> Result<CredentialStore> {
    CredentialStore::default_location().map_err(auth_error)
}

pub async fn chat(config: &FixrConfig) -> Result<()> {
    if let Ok(store) = credential_store() {
        if let Some(auth) = store.load() {
            info!(user = %auth.user.email, "chatting as signed-in user");
        }
    }
    let session = Arc::new(new_session(config));
    repl::run(session).await?;
    Ok(())
}

pub async fn analyze(config: &FixrConfig, image: PathBuf) -> Result<()> {
    let session = new_session(config);
    let outcome = session.send_image(ImageHandle::from_path(image)).await;

    for message in session.messages().iter().skip(1) {
        println!("{}", format_message(message));
    }

    match outcome {
        SendOutcome::Failed(message) => Err(FixrError::Ai(message.text)),
        _ => Ok(()),
    }
}

pub async fn submit(
    config: &FixrConfig,
    description: &str,
    category: ServiceCategory,
    urgency: Urgency,
    location: &str,
    image: Option<PathBuf>,
) -> Result<()> {
    let mut report = ProblemReport::new(description, category, urgency, location)
        .map_err(|e| FixrError::InvalidInput(e.to_string()))?;
    if let Some(path) = image {
        report = report.with_image(ImageHandle::from_path(path));
    }

    let transport = transport(config);
    let report = submit_problem(transport.as_ref(), report).await;

    let json = serde_json::to_string_pretty(&report).map_err(|e| FixrError::Other(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn remember(session: &AuthSession) -> Result<()> {
    credential_store()?.save(session).map_err(auth_error)?;
    println!("Signed in as {} <{}>", session.user.name, session.user.email);
    Ok(())
}

pub async fn register(config: &FixrConfig, name: &str, email: &str, password: &str) -> Result<()> {
    let session = auth_client(config)
        .register(name, email, password)
        .await
        .map_err(auth_error)?;
    remember(&session)
}

pub async fn login(config: &FixrConfig, email: &str, password: &str) -> Result<()> {
    let session = auth_client(config)
        .login(email, password)
        .await
        .map_err(auth_error)?;
    remember(&session)
}

pub fn logout() -> Result<()> {
    credential_store()?.clear().map_err(auth_error)?;
    println!("Signed out");
    Ok(())
}

pub fn whoami() -> Result<()> {
    match credential_store()?.load() {
        Some(session) => println!("{} <{}>", session.user.name, session.user.email),
        None => println!("Not signed in"),
    }
    Ok(())
}
