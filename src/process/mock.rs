//! Mock command runner for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CommandOutcome, CommandRunner, CommandSpec};

/// Scripted result for a program.
#[derive(Debug, Clone, Copy)]
enum Scripted {
    Exit(i32),
    SpawnError,
}

/// Records every command and replays scripted exit codes.
///
/// Programs without a script exit with code 0.
#[derive(Default)]
pub struct MockCommandRunner {
    executed: Mutex<Vec<CommandSpec>>,
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an exit code for the next run of `program`.
    pub fn push_exit(&self, program: &str, code: i32) {
        self.push(program, Scripted::Exit(code));
    }

    /// Make the next run of `program` fail to spawn.
    pub fn push_spawn_error(&self, program: &str) {
        self.push(program, Scripted::SpawnError);
    }

    /// Commands executed so far, in order.
    pub fn executed(&self) -> Vec<CommandSpec> {
        self.executed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Program names executed so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.executed().into_iter().map(|s| s.program).collect()
    }

    fn push(&self, program: &str, scripted: Scripted) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts
                .entry(program.to_string())
                .or_default()
                .push_back(scripted);
        }
    }

    fn next(&self, program: &str) -> Scripted {
        self.scripts
            .lock()
            .ok()
            .and_then(|mut scripts| scripts.get_mut(program).and_then(VecDeque::pop_front))
            .unwrap_or(Scripted::Exit(0))
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutcome> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(spec.clone());
        }
        match self.next(&spec.program) {
            Scripted::Exit(code) => Ok(CommandOutcome { code: Some(code) }),
            Scripted::SpawnError => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("mock: {} not found", spec.program),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runner_replays_in_order() {
        let runner = MockCommandRunner::new();
        runner.push_exit("psql", 2);

        let first = runner.run(&CommandSpec::new("psql")).await.unwrap();
        let second = runner.run(&CommandSpec::new("psql")).await.unwrap();

        assert_eq!(first.code, Some(2));
        assert!(second.success());
        assert_eq!(runner.programs(), vec!["psql", "psql"]);
    }

    #[tokio::test]
    async fn test_mock_runner_spawn_error() {
        let runner = MockCommandRunner::new();
        runner.push_spawn_error("diesel");
        assert!(runner.run(&CommandSpec::new("diesel")).await.is_err());
        assert_eq!(runner.executed().len(), 1);
    }
}
