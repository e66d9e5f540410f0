//! rustodon-features - acceptance harness for the rustodon web UI
//!
//! Drives a running rustodon instance through a WebDriver browser using a
//! fixed step vocabulary, resets the application database before every
//! scenario, and builds the static assets the UI ships with.

pub mod assets;
pub mod browser;
pub mod config;
pub mod context;
pub mod fixture;
pub mod harness;
pub mod process;
pub mod steps;
pub mod utils;
