//! External command execution.
//!
//! The fixture reset protocol and the asset pipeline both shell out to
//! external tools. Commands are described by a `CommandSpec` and executed
//! through the `CommandRunner` trait so that callers can be tested without
//! spawning anything.

use std::collections::BTreeMap;
use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

#[cfg(test)]
pub mod mock;

/// One synchronous invocation of an external program.
///
/// The program is executed directly, no shell interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Build from a command array where the first element is the executable.
    /// Returns `None` for an empty array.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

// Env values can hold credentials, only their names are shown.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.env.keys() {
            write!(f, "{}=*** ", key)?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command and wait for it to exit.
    ///
    /// An `Err` means the process could not be started at all.
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutcome>;
}

/// Output handling for spawned commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Discard stdout and stderr.
    Quiet,
    /// Share the parent's stdout and stderr.
    Inherit,
}

/// Runs commands as child processes of the current process.
///
/// There is no timeout: a command that hangs blocks its caller.
#[derive(Debug, Clone, Copy)]
pub struct SystemCommandRunner {
    output: OutputMode,
}

impl SystemCommandRunner {
    pub fn quiet() -> Self {
        Self {
            output: OutputMode::Quiet,
        }
    }

    pub fn inherit() -> Self {
        Self {
            output: OutputMode::Inherit,
        }
    }

    fn stdio(&self) -> Stdio {
        match self.output {
            OutputMode::Quiet => Stdio::null(),
            OutputMode::Inherit => Stdio::inherit(),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutcome> {
        info!(command = %spec, "Running external command");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::null())
            .stdout(self.stdio())
            .stderr(self.stdio());

        let status = cmd.status().await.map_err(|e| {
            error!(program = %spec.program, error = %e, "Failed to spawn command");
            e
        })?;

        debug!(program = %spec.program, status = ?status, "Command exited");
        Ok(CommandOutcome {
            code: status.code(),
        })
    }
}
