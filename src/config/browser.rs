//! Application and browser-driver configuration types.

use serde::Deserialize;

/// Application under test.
///
/// The harness never starts the application itself; it must already be
/// reachable at `base_url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute URL every navigation path is resolved against.
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
        }
    }
}

/// Browser engine discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEngine {
    #[default]
    Chrome,
    Firefox,
}

impl std::fmt::Display for BrowserEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowserEngine::Chrome => write!(f, "chrome"),
            BrowserEngine::Firefox => write!(f, "firefox"),
        }
    }
}

/// WebDriver session configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver server (chromedriver, geckodriver, selenium) URL.
    pub webdriver_url: String,
    /// Which browser the session is requested for.
    pub engine: BrowserEngine,
    /// Run without a visible window.
    pub headless: bool,
    /// Extra Chrome arguments, without leading dashes. Firefox sessions
    /// ignore them.
    pub args: Vec<String>,
    /// When true, element queries skip elements that are not displayed.
    /// Default: false, so hidden elements still match.
    pub ignore_hidden_elements: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            engine: BrowserEngine::Chrome,
            headless: true,
            args: vec!["disable-gpu".to_string()],
            ignore_hidden_elements: false,
        }
    }
}
