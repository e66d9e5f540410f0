//! Cucumber step definitions.

pub mod accessibility;
pub mod content;
