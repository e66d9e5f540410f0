//! Per-scenario execution context.
//!
//! An `ExecutionContext` is created immediately before a scenario starts and
//! dropped when it ends. It is never shared between scenarios.

/// Assertion state for one scenario.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    assertions: usize,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of assertions evaluated so far, passed or failed.
    pub fn assertions(&self) -> usize {
        self.assertions
    }

    /// Fail with `message` unless `condition` holds.
    pub fn assert(&mut self, condition: bool, message: impl FnOnce() -> String) -> Result<(), String> {
        self.assertions += 1;
        if condition {
            Ok(())
        } else {
            Err(message())
        }
    }

    /// Fail unless `haystack` contains `needle`.
    pub fn assert_includes(&mut self, haystack: &str, needle: &str) -> Result<(), String> {
        self.assert(haystack.contains(needle), || {
            format!("Expected page to include {:?}", needle)
        })
    }

    /// Fail if `haystack` contains `needle`.
    pub fn refute_includes(&mut self, haystack: &str, needle: &str) -> Result<(), String> {
        self.assert(!haystack.contains(needle), || {
            format!("Expected page not to include {:?}", needle)
        })
    }
}
