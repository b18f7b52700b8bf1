//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_tracker` - Shared utility to connect and load the tracker
//! - `run_confirmed` - Two-phase confirmation for destructive commands
//! - `user_error` - Text printed when a command fails
//! - `cmd_whoami` - Show the logged-in user

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::config::SESSION_ENV;
use spendwise_core::{
    Config, ConfirmedOutcome, Error, PendingToken, Period, RemoteClient, RemoteStore, Tracker,
};
use tracing::debug;

/// Load config, connect to the remote and run the startup sequence
pub async fn open_tracker(
    config_path: Option<&Path>,
    month: Option<&str>,
) -> Result<(Tracker<RemoteClient>, Config)> {
    let config = Config::load(config_path).context("Failed to load config")?;
    let remote = RemoteClient::from_config(&config).context("Failed to create remote client")?;
    debug!(url = %config.server_url, has_session = config.session_cookie.is_some(), "Connecting");
    let mut tracker = Tracker::new(remote);

    if let Some(month) = month {
        let period: Period = month.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        tracker.select_period(period);
    }

    match tracker.init().await {
        Ok(_) => {}
        Err(Error::Unauthenticated) => anyhow::bail!(
            "Not logged in to {}. Log in with the browser and set {} to the session cookie.",
            config.server_url,
            SESSION_ENV
        ),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load data from {}", config.server_url))
        }
    }

    Ok((tracker, config))
}

/// Ask before a destructive action unless `yes`, then run or cancel it
///
/// Returns `None` when the user declined.
pub async fn run_confirmed<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    token: PendingToken,
    yes: bool,
) -> Result<Option<ConfirmedOutcome>> {
    if !yes {
        if let Some(action) = tracker.pending_confirmation() {
            println!("⚠️  {}", action.title());
            println!("   {}", action.message());
            println!();
        }
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            tracker.cancel(token)?;
            println!("Cancelled.");
            return Ok(None);
        }
    }

    let outcome = tracker.confirm(token).await?;
    Ok(Some(outcome))
}

/// Message shown for a failed command
///
/// Errors from the tracker go through `user_message`, so a remote failure
/// reads the same whatever its cause. Local config and file errors keep
/// their full chain. The detail is always logged at debug.
pub fn user_error(err: &anyhow::Error) -> String {
    let detail = format!("{:#}", err);
    debug!(error = %detail, "Command failed");
    match err.chain().find_map(|e| e.downcast_ref::<Error>()) {
        Some(Error::Config(_) | Error::Io(_) | Error::Csv(_)) | None => detail,
        Some(core) => core.user_message(),
    }
}

pub fn cmd_whoami<R: RemoteStore>(tracker: &Tracker<R>) -> Result<()> {
    let user = tracker
        .user()
        .ok_or_else(|| anyhow::anyhow!("Not logged in"))?;

    println!();
    println!("👤 {}", user.label());
    if let Some(email) = &user.email {
        println!("   Email: {}", email);
    }
    println!("   Server: {}", tracker.remote().endpoint());
    if tracker.registry().using_defaults() {
        println!("   ⚠️  Categories: built-in defaults (server list unavailable)");
    }
    println!();

    Ok(())
}
