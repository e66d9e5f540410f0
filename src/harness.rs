//! Test environment bootstrap.
//!
//! A `Harness` is built once per run from the loaded configuration. Before
//! every scenario it resets the application database and hands out a fresh
//! `ScenarioSession`. A failed reset is an environment fault: the run is
//! aborted with exit status 1 instead of failing one scenario.

use std::sync::Arc;

use tracing::{error, info};

use crate::browser::{Browser, BrowserError, WebDriverBrowser};
use crate::config::{ConfigError, HarnessConfig};
use crate::context::ExecutionContext;
use crate::fixture::{init_fixture_store, FixtureError, ResetFixtureStore};
use crate::process::SystemCommandRunner;
use crate::steps::{Step, StepError, StepRunner};

/// Process exit status used when the environment cannot be prepared.
pub const ENVIRONMENT_FAULT_EXIT_CODE: i32 = 1;

/// Errors that make the whole run unusable.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Fixture store error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("Browser setup failed: {0}")]
    Browser(#[from] BrowserError),
}

/// Process-wide test environment.
pub struct Harness {
    browser: Arc<dyn Browser>,
    fixtures: Arc<dyn ResetFixtureStore>,
}

impl Harness {
    /// Build the fixture store and open the browser session.
    ///
    /// Reset commands run quietly; their output is discarded.
    pub async fn start(config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let fixtures = init_fixture_store(&config.fixtures, Arc::new(SystemCommandRunner::quiet()))?;
        let browser = WebDriverBrowser::connect(&config.app, &config.browser).await?;

        info!(
            base_url = %config.app.base_url,
            fixture_store = fixtures.name(),
            "Harness started"
        );
        Ok(Self::new(Arc::new(browser), fixtures))
    }

    /// Assemble a harness from already-built parts.
    pub fn new(browser: Arc<dyn Browser>, fixtures: Arc<dyn ResetFixtureStore>) -> Self {
        Self { browser, fixtures }
    }

    /// Reset the database and browser state, then start a new scenario.
    ///
    /// Blocks until the reset commands have exited.
    pub async fn prepare_scenario(&self) -> Result<ScenarioSession, HarnessError> {
        self.fixtures.reset().await?;
        self.browser.reset_session().await?;
        Ok(ScenarioSession::new(self.browser.clone()))
    }

    /// Like `prepare_scenario`, but aborts the process on failure.
    pub async fn prepare_scenario_or_abort(&self) -> ScenarioSession {
        match self.prepare_scenario().await {
            Ok(session) => session,
            Err(e) => abort_run(&e),
        }
    }

    /// End the browser session.
    pub async fn shutdown(&self) -> Result<(), HarnessError> {
        self.browser.quit().await?;
        Ok(())
    }
}

/// Log an environment fault and terminate the run.
pub fn abort_run(err: &HarnessError) -> ! {
    error!(error = %err, "Aborting test run: environment could not be prepared");
    std::process::exit(ENVIRONMENT_FAULT_EXIT_CODE)
}

/// State owned by exactly one scenario.
pub struct ScenarioSession {
    browser: Arc<dyn Browser>,
    context: ExecutionContext,
}

impl ScenarioSession {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self {
            browser,
            context: ExecutionContext::new(),
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Run one step of the scenario.
    pub async fn run(&mut self, step: Step) -> Result<(), StepError> {
        StepRunner::new(self.browser.as_ref(), &mut self.context)
            .run(&step)
            .await
    }
}
