//! Shared helpers for the harness binaries and test targets.

pub mod bootstrap;
