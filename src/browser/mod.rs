//! Browser automation.
//!
//! The step vocabulary talks to the page through the `Browser` trait. Every
//! operation is fail-fast: a missing element is reported immediately and
//! nothing in this layer retries.
//!
//! Implementations:
//! - `WebDriverBrowser`: a WebDriver session (chromedriver, geckodriver)
//! - `MockBrowser`: scripted in-memory page for testing

use async_trait::async_trait;

pub mod webdriver;

pub use webdriver::WebDriverBrowser;

/// Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors that can occur while driving the browser.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Unable to find {locator}")]
    ElementNotFound { locator: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidUrl { path: String, reason: String },

    #[error("WebDriver error: {0}")]
    Driver(String),
}

impl BrowserError {
    pub fn not_found(locator: impl Into<String>) -> Self {
        BrowserError::ElementNotFound {
            locator: locator.into(),
        }
    }
}

/// Key combinations the accessibility bindings react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChord {
    Space,
    Enter,
    CtrlEnter,
}

impl std::fmt::Display for KeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyChord::Space => write!(f, "space"),
            KeyChord::Enter => write!(f, "enter"),
            KeyChord::CtrlEnter => write!(f, "ctrl+enter"),
        }
    }
}

/// A hyperlink as rendered in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Raw `href` attribute.
    pub href: String,
    /// Visible text.
    pub text: String,
}

/// Operations the step vocabulary needs from a browser session.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to `path` relative to the application base URL and wait for
    /// the page to finish loading.
    async fn visit(&self, path: &str) -> Result<()>;

    /// Path of the page currently shown, relative to the application base
    /// URL. Reflects any redirect the application answered with.
    async fn current_path(&self) -> Result<String>;

    /// Set the value of the input, textarea or select identified by id,
    /// name, placeholder or label text.
    async fn fill_in(&self, field: &str, value: &str) -> Result<()>;

    /// Click the first element matching a CSS selector.
    async fn click(&self, css: &str) -> Result<()>;

    /// Click the first link or button identified by id, name, value, title
    /// or text.
    async fn click_link_or_button(&self, locator: &str) -> Result<()>;

    /// Source of the current page.
    async fn body(&self) -> Result<String>;

    /// Number of elements matching `css` inside the first element matching
    /// `scope`. A missing scope is an error, zero matches is not.
    async fn count_within(&self, scope: &str, css: &str) -> Result<usize>;

    /// All links inside the first element matching `scope`.
    async fn links_within(&self, scope: &str) -> Result<Vec<Link>>;

    /// Send a key chord to the first element matching `css`.
    async fn press_key(&self, css: &str, chord: KeyChord) -> Result<()>;

    /// Whether the checkbox or radio matching `css` is checked.
    async fn is_checked(&self, css: &str) -> Result<bool>;

    /// Drop cookies and other per-session state between scenarios.
    async fn reset_session(&self) -> Result<()>;

    /// End the browser session.
    async fn quit(&self) -> Result<()>;
}
