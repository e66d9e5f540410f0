//! Build-time asset pipeline.
//!
//! Compiles the stylesheet, minifies the accessibility script and optionally
//! compresses the icon sprite by shelling out to the configured tools. Tasks
//! have no data dependency on each other and run concurrently; the build
//! succeeds only if every task does.

use std::fmt;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{error, info};

use crate::config::{AssetConfig, AssetPaths, AssetTools};
use crate::process::{CommandRunner, CommandSpec};

/// One failed pipeline task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task: &'static str,
    pub reason: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.task, self.reason)
    }
}

/// Errors raised by the asset pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("{} asset task(s) failed: {}", .0.len(), join_failures(.0))]
    Failed(Vec<TaskFailure>),
}

fn join_failures(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single asset transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetTask {
    /// Sass source compiled to compressed CSS.
    Stylesheet(AssetPaths),
    /// Script minified to `<stem>.min.js`.
    Script(AssetPaths),
    /// SVG sprite compressed to `<stem>.min.svg`.
    IconSprite(AssetPaths),
}

impl AssetTask {
    /// Tasks enabled by configuration. The icon sprite is optional.
    pub fn from_config(config: &AssetConfig) -> Vec<AssetTask> {
        let mut tasks = vec![
            AssetTask::Stylesheet(config.stylesheet.clone()),
            AssetTask::Script(config.script.clone()),
        ];
        if let Some(icons) = &config.icons {
            tasks.push(AssetTask::IconSprite(icons.clone()));
        }
        tasks
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetTask::Stylesheet(_) => "stylesheet",
            AssetTask::Script(_) => "script",
            AssetTask::IconSprite(_) => "icons",
        }
    }

    fn paths(&self) -> &AssetPaths {
        match self {
            AssetTask::Stylesheet(paths) | AssetTask::Script(paths) | AssetTask::IconSprite(paths) => {
                paths
            }
        }
    }

    /// Where the task writes its result.
    pub fn output(&self) -> PathBuf {
        let paths = self.paths();
        match self {
            AssetTask::Stylesheet(_) => output_path(&paths.source, &paths.dest, "css"),
            AssetTask::Script(_) => output_path(&paths.source, &paths.dest, "min.js"),
            AssetTask::IconSprite(_) => output_path(&paths.source, &paths.dest, "min.svg"),
        }
    }

    /// The external command performing the task.
    pub fn command(&self, tools: &AssetTools) -> CommandSpec {
        let source = self.paths().source.to_string_lossy().into_owned();
        let output = self.output().to_string_lossy().into_owned();
        match self {
            AssetTask::Stylesheet(_) => CommandSpec::new(tools.sass.as_str())
                .args(["--style=compressed", "--source-map"])
                .arg(source)
                .arg(output),
            AssetTask::Script(_) => CommandSpec::new(tools.terser.as_str())
                .arg(source)
                .args(["--compress", "--mangle", "--source-map", "--output"])
                .arg(output),
            AssetTask::IconSprite(_) => CommandSpec::new(tools.svgo.as_str())
                .arg("--multipass")
                .arg(source)
                .arg("-o")
                .arg(output),
        }
    }
}

/// `dest/<file stem>.<extension>`.
fn output_path(source: &Path, dest: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.join(format!("{}.{}", stem, extension))
}

async fn run_task(task: &AssetTask, tools: &AssetTools, runner: &dyn CommandRunner) -> Result<PathBuf, TaskFailure> {
    let fail = |reason: String| TaskFailure {
        task: task.name(),
        reason,
    };

    tokio::fs::create_dir_all(&task.paths().dest)
        .await
        .map_err(|e| fail(format!("cannot create {}: {}", task.paths().dest.display(), e)))?;

    let command = task.command(tools);
    let outcome = runner
        .run(&command)
        .await
        .map_err(|e| fail(format!("failed to start '{}': {}", command, e)))?;
    if !outcome.success() {
        return Err(fail(format!("'{}' exited with {:?}", command, outcome.code)));
    }

    let output = task.output();
    info!(task = task.name(), output = %output.display(), "Asset built");
    Ok(output)
}

/// Run every task concurrently and wait for all of them.
///
/// Returns the produced files in task order, or every failure at once.
pub async fn run_pipeline(
    tasks: &[AssetTask],
    tools: &AssetTools,
    runner: &dyn CommandRunner,
) -> Result<Vec<PathBuf>, AssetError> {
    let results = join_all(tasks.iter().map(|task| run_task(task, tools, runner))).await;

    let mut outputs = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(output) => outputs.push(output),
            Err(failure) => {
                error!(task = failure.task, reason = %failure.reason, "Asset task failed");
                failures.push(failure);
            }
        }
    }

    if failures.is_empty() {
        Ok(outputs)
    } else {
        Err(AssetError::Failed(failures))
    }
}
