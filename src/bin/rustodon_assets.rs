//! rustodon-assets: static asset build
//!
//! Compiles `style/style.scss`, minifies the accessibility script to
//! `accessibility.min.js` and, when configured, compresses the icon sprite.
//! All tasks run concurrently; the exit status is 1 if any of them fails.
//!
//! ## Configuration
//! - RUSTODON_FEATURES_CONFIG: YAML file with an `assets` section (optional)
//! - RUSTODON_FEATURES_LOG: tracing filter (default: info)

use tracing::{error, info};

use rustodon_features::assets::{run_pipeline, AssetTask};
use rustodon_features::config::HarnessConfig;
use rustodon_features::process::SystemCommandRunner;
use rustodon_features::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = HarnessConfig::load(std::env::args().nth(1).as_deref())?;
    let tasks = AssetTask::from_config(&config.assets);
    info!(tasks = tasks.len(), "Building assets");

    let runner = SystemCommandRunner::inherit();
    match run_pipeline(&tasks, &config.assets.tools, &runner).await {
        Ok(outputs) => {
            for output in outputs {
                info!(output = %output.display(), "Wrote");
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Asset build failed");
            std::process::exit(1);
        }
    }
}
