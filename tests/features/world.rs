//! Cucumber world wrapping one scenario session.

use cucumber::World;

use rustodon_features::harness::ScenarioSession;
use rustodon_features::steps::Step;

/// Per-scenario world. The session is attached by the `before` hook once the
/// database has been reset.
#[derive(Default, World)]
pub struct FeatureWorld {
    session: Option<ScenarioSession>,
}

// cucumber::World derive requires Debug
impl std::fmt::Debug for FeatureWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureWorld")
            .field(
                "assertions",
                &self.session.as_ref().map(|s| s.context().assertions()),
            )
            .finish()
    }
}

impl FeatureWorld {
    pub fn begin(&mut self, session: ScenarioSession) {
        self.session = Some(session);
    }

    /// Run a step, failing the scenario on any error.
    pub async fn step(&mut self, step: Step) {
        let sentence = step.to_string();
        let session = self
            .session
            .as_mut()
            .expect("scenario session not attached by the before hook");
        if let Err(e) = session.run(step).await {
            panic!("{}: {}", sentence, e);
        }
    }
}
