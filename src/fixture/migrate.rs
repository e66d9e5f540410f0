//! Migration-only fixture store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{run_step, FixtureError, ResetFixtureStore, ResetStep, Result};
use crate::config::DATABASE_URL_ENV_VAR;
use crate::process::{CommandRunner, CommandSpec};

/// Drops and recreates the schema with the configured migration tool.
pub struct MigrationFixtureStore {
    command: CommandSpec,
    runner: Arc<dyn CommandRunner>,
}

impl MigrationFixtureStore {
    /// The migration tool receives the connection string through
    /// `DATABASE_URL`.
    pub fn new(
        migration_command: &[String],
        database_url: &str,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let command = CommandSpec::from_argv(migration_command)
            .ok_or(FixtureError::EmptyMigrationCommand)?
            .env(DATABASE_URL_ENV_VAR, database_url);
        Ok(Self { command, runner })
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }
}

#[async_trait]
impl ResetFixtureStore for MigrationFixtureStore {
    fn name(&self) -> &'static str {
        "migrate_only"
    }

    async fn reset(&self) -> Result<()> {
        run_step(self.runner.as_ref(), ResetStep::ResetSchema, &self.command).await?;
        info!(command = %self.command, "Schema reset");
        Ok(())
    }
}
