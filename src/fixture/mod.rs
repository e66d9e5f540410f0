//! Per-scenario database reset.
//!
//! Every scenario must start against an empty, freshly migrated database.
//! The reset shells out to external tools and blocks until they exit.
//! Failures here are environment faults: the caller aborts the whole run
//! rather than failing a single scenario.
//!
//! Implementations:
//! - `EvictingFixtureStore`: terminates other connections first (Postgres
//!   refuses to drop a database that still has sessions attached)
//! - `MigrationFixtureStore`: runs the migration reset command only

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::{FixtureConfig, FixtureStoreType};
use crate::process::{CommandRunner, CommandSpec};

mod database_url;
mod migrate;
mod postgres;

pub use database_url::DatabaseUrl;
pub use migrate::MigrationFixtureStore;
pub use postgres::{eviction_query, EvictingFixtureStore};

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Errors raised by the reset protocol.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Invalid database URL: {reason}")]
    InvalidDatabaseUrl { reason: String },

    #[error("Fixture store '{store}' requires a {expected} database URL, got '{scheme}'")]
    UnsupportedScheme {
        store: FixtureStoreType,
        expected: &'static str,
        scheme: String,
    },

    #[error("Migration command cannot be empty")]
    EmptyMigrationCommand,

    #[error("Failed to start {step} command '{command}': {source}")]
    Spawn {
        step: ResetStep,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} command '{command}' exited with {}", format_code(.code))]
    CommandFailed {
        step: ResetStep,
        command: String,
        code: Option<i32>,
    },
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Stage of the reset protocol a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    EvictConnections,
    ResetSchema,
}

impl std::fmt::Display for ResetStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetStep::EvictConnections => write!(f, "connection eviction"),
            ResetStep::ResetSchema => write!(f, "schema reset"),
        }
    }
}

/// Returns the application database to an empty, migrated baseline.
#[async_trait]
pub trait ResetFixtureStore: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Reset the database. Blocks until every external command has exited.
    async fn reset(&self) -> Result<()>;
}

/// Run one protocol step, mapping spawn failures and non-zero exits.
pub(crate) async fn run_step(
    runner: &dyn CommandRunner,
    step: ResetStep,
    spec: &CommandSpec,
) -> Result<()> {
    let outcome = runner
        .run(spec)
        .await
        .map_err(|source| FixtureError::Spawn {
            step,
            command: spec.to_string(),
            source,
        })?;

    if !outcome.success() {
        error!(%step, command = %spec, code = ?outcome.code, "Reset step failed");
        return Err(FixtureError::CommandFailed {
            step,
            command: spec.to_string(),
            code: outcome.code,
        });
    }
    Ok(())
}

/// Initialize the fixture store selected by configuration.
pub fn init_fixture_store(
    config: &FixtureConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<Arc<dyn ResetFixtureStore>> {
    info!(store = %config.store, "Fixture store");

    match config.store {
        FixtureStoreType::Postgres => {
            let url = DatabaseUrl::parse(&config.database_url)?;
            if !url.is_postgres() {
                return Err(FixtureError::UnsupportedScheme {
                    store: config.store,
                    expected: "postgres",
                    scheme: url.scheme,
                });
            }
            Ok(Arc::new(EvictingFixtureStore::new(
                url,
                config.admin_client.clone(),
                MigrationFixtureStore::new(
                    &config.migration_command,
                    &config.database_url,
                    runner.clone(),
                )?,
                runner,
            )))
        }
        FixtureStoreType::MigrateOnly => Ok(Arc::new(MigrationFixtureStore::new(
            &config.migration_command,
            &config.database_url,
            runner,
        )?)),
    }
}
