//! `collab` command line.
//!
//! Every subcommand resolves configuration, restores the saved session for
//! the role it needs and then calls into [`CampaignWorkflow`]. Output goes to
//! stdout, diagnostics to stderr through `tracing`.

mod account;
mod brand;
mod creator;

use crate::api::HttpCampaignApi;
use crate::config::CollabConfig;
use crate::domain::{status_category, CampaignEventEnvelope};
use crate::paths;
use crate::session::{AuthSession, Role, SessionStore};
use crate::structured_logger::StructuredLogger;
use crate::workflow::CampaignWorkflow;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cqrs_es::DomainEvent;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

pub use brand::BrandCommands;
pub use creator::CreatorCommands;

#[derive(Parser, Debug)]
#[command(name = "collab")]
#[command(about = "Brand and creator campaign collaboration from the terminal")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("COLLAB_GIT_SHA"), ")"))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (defaults to ~/.campaign-collab/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a session token for a role
    Login {
        #[arg(long, value_enum)]
        role: Role,
        #[arg(long)]
        token: String,
        /// Creator or brand id, when the token does not carry one
        #[arg(long)]
        actor_id: Option<String>,
    },

    /// Remove the saved session for a role
    Logout {
        #[arg(long, value_enum)]
        role: Role,
    },

    /// Fetch the profile behind the saved session
    Whoami {
        #[arg(long, value_enum)]
        role: Role,
    },

    /// Print the presentation category of a status string
    StatusCategory { status: String },

    /// Brand workflow
    Brand {
        #[command(subcommand)]
        command: BrandCommands,
    },

    /// Creator workflow
    Creator {
        #[command(subcommand)]
        command: CreatorCommands,
    },
}

/// Resolved configuration plus the workflow wired to the HTTP backend.
pub(crate) struct CliContext {
    pub config: CollabConfig,
    pub workflow: CampaignWorkflow,
    events: broadcast::Receiver<CampaignEventEnvelope>,
}

impl CliContext {
    fn build(config: CollabConfig, session: &AuthSession) -> Self {
        let logger = open_logger(&session.session_id.to_string());
        let mut api = HttpCampaignApi::new(&config);
        if let Some(logger) = &logger {
            api = api.with_logger(logger.clone());
        }
        let workflow = CampaignWorkflow::new(Arc::new(api), &config, logger);
        let events = workflow.subscribe_events();
        Self {
            config,
            workflow,
            events,
        }
    }

    pub fn currency(&self) -> &str {
        &self.config.display.currency_symbol
    }
}

fn open_logger(session_id: &str) -> Option<Arc<StructuredLogger>> {
    let opened = paths::session_logs_dir(session_id)
        .and_then(|dir| StructuredLogger::new(session_id, &dir));
    match opened {
        Ok(logger) => {
            tracing::debug!(
                session_id = logger.session_id(),
                run_id = logger.run_id(),
                path = %logger.path().display(),
                "Audit log opened"
            );
            Some(Arc::new(logger))
        }
        Err(e) => {
            tracing::warn!("Audit log unavailable: {:#}", e);
            None
        }
    }
}

/// Events are traced when the command finishes, including on error.
impl Drop for CliContext {
    fn drop(&mut self) {
        while let Ok(envelope) = self.events.try_recv() {
            tracing::debug!(
                campaign_id = %envelope.aggregate_id,
                sequence = envelope.sequence,
                event = %envelope.event.event_type(),
                "Campaign event"
            );
        }
    }
}

/// Restores the saved session for `role` and builds a context around it.
pub(crate) fn session_context(
    config: &Option<PathBuf>,
    role: Role,
) -> Result<(AuthSession, CliContext)> {
    let session = SessionStore::require(role)?;
    let config = CollabConfig::resolve(config.as_deref())?;
    let ctx = CliContext::build(config, &session);
    Ok((session, ctx))
}

pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Run using the current process arguments.
pub async fn run() -> Result<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_tracing(cli.verbose);
    execute(cli).await
}

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login {
            role,
            token,
            actor_id,
        } => account::login(role, &token, actor_id),
        Commands::Logout { role } => account::logout(role),
        Commands::Whoami { role } => account::whoami(&cli.config, role).await,
        Commands::StatusCategory { status } => {
            let category = status_category(&status);
            println!("{} {:?}", category.marker(), category);
            Ok(())
        }
        Commands::Brand { command } => brand::execute(command, &cli.config).await,
        Commands::Creator { command } => creator::execute(command, &cli.config).await,
    }
}

/// Parses `id=value` pairs used by review flags.
pub(crate) fn split_pair(raw: &str) -> Result<(String, String)> {
    let (id, value) = raw
        .split_once('=')
        .with_context(|| format!("expected <creator-id>=<text>, got '{}'", raw))?;
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("missing creator id in '{}'", raw);
    }
    Ok((id.to_string(), value.trim().to_string()))
}

pub(crate) fn print_lines(title: &str, lines: &[String]) {
    println!("{}", title);
    for line in lines {
        println!("  {}", line);
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
