//! Postgres fixture store with connection eviction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{run_step, DatabaseUrl, MigrationFixtureStore, ResetFixtureStore, ResetStep, Result};
use crate::process::{CommandRunner, CommandSpec};

/// Maintenance database the admin client connects to. Connecting to the
/// target database itself would leave one session that cannot be evicted.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Build the query terminating every other session on `database`.
pub fn eviction_query(database: &str) -> String {
    format!(
        "SELECT pg_terminate_backend(pg_stat_activity.pid) \
         FROM pg_stat_activity \
         WHERE pg_stat_activity.datname = '{}' \
         AND pid <> pg_backend_pid();",
        database.replace('\'', "''")
    )
}

/// Evicts open connections, then resets the schema.
pub struct EvictingFixtureStore {
    evict: CommandSpec,
    migrate: MigrationFixtureStore,
    runner: Arc<dyn CommandRunner>,
}

impl EvictingFixtureStore {
    pub fn new(
        url: DatabaseUrl,
        admin_client: String,
        migrate: MigrationFixtureStore,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let mut evict = CommandSpec::new(admin_client).args(["-h", url.host.as_str()]);
        if let Some(port) = url.port {
            evict = evict.arg("-p").arg(port.to_string());
        }
        evict = evict
            .args(["-U", url.user.as_str(), "-d", MAINTENANCE_DATABASE])
            .arg("-c")
            .arg(eviction_query(&url.database));
        if let Some(password) = url.password {
            evict = evict.env("PGPASSWORD", password);
        }

        Self {
            evict,
            migrate,
            runner,
        }
    }

    pub fn eviction_command(&self) -> &CommandSpec {
        &self.evict
    }
}

#[async_trait]
impl ResetFixtureStore for EvictingFixtureStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn reset(&self) -> Result<()> {
        debug!(command = %self.evict, "Evicting database connections");
        run_step(
            self.runner.as_ref(),
            ResetStep::EvictConnections,
            &self.evict,
        )
        .await?;
        info!("Database connections evicted");

        self.migrate.reset().await
    }
}
