//! WebDriver-backed browser.

use async_trait::async_trait;
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities, FirefoxCapabilities};
use tracing::{debug, info};
use url::Url;

use super::{Browser, BrowserError, KeyChord, Link, Result};
use crate::config::{AppConfig, BrowserConfig, BrowserEngine};

impl From<WebDriverError> for BrowserError {
    fn from(e: WebDriverError) -> Self {
        BrowserError::Driver(e.to_string())
    }
}

/// A single WebDriver session shared by every scenario of a run.
pub struct WebDriverBrowser {
    driver: WebDriver,
    base_url: Url,
    ignore_hidden_elements: bool,
}

impl WebDriverBrowser {
    /// Open a session on the configured WebDriver server.
    pub async fn connect(app: &AppConfig, config: &BrowserConfig) -> Result<Self> {
        let base_url = base_url(&app.base_url)?;

        info!(
            webdriver = %config.webdriver_url,
            engine = %config.engine,
            headless = config.headless,
            base_url = %base_url,
            "Starting browser session"
        );

        let driver = match config.engine {
            BrowserEngine::Chrome => {
                WebDriver::new(config.webdriver_url.as_str(), chrome_capabilities(config)?).await?
            }
            BrowserEngine::Firefox => {
                WebDriver::new(config.webdriver_url.as_str(), firefox_capabilities(config)?).await?
            }
        };

        Ok(Self {
            driver,
            base_url,
            ignore_hidden_elements: config.ignore_hidden_elements,
        })
    }

    async fn filter_hidden(&self, elements: Vec<WebElement>) -> Result<Vec<WebElement>> {
        if !self.ignore_hidden_elements {
            return Ok(elements);
        }
        let mut visible = Vec::with_capacity(elements.len());
        for element in elements {
            if element.is_displayed().await? {
                visible.push(element);
            }
        }
        Ok(visible)
    }

    async fn find_all(&self, by: By) -> Result<Vec<WebElement>> {
        let elements = self.driver.find_all(by).await?;
        self.filter_hidden(elements).await
    }

    async fn first(&self, by: By, locator: &str) -> Result<WebElement> {
        self.find_all(by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::not_found(locator))
    }

    async fn scope(&self, scope: &str) -> Result<WebElement> {
        self.first(By::Css(scope), &format!("scope '{}'", scope))
            .await
    }

    async fn find_all_within(&self, scope: &WebElement, by: By) -> Result<Vec<WebElement>> {
        let elements = scope.find_all(by).await?;
        self.filter_hidden(elements).await
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn visit(&self, path: &str) -> Result<()> {
        let url = resolve(&self.base_url, path)?;
        debug!(url = %url, "Visiting");
        self.driver.goto(url.as_str()).await?;
        Ok(())
    }

    async fn current_path(&self) -> Result<String> {
        let url = self.driver.current_url().await?;
        Ok(relative_path(&self.base_url, &url))
    }

    async fn fill_in(&self, field: &str, value: &str) -> Result<()> {
        let element = self
            .first(By::XPath(field_xpath(field)), &format!("field '{}'", field))
            .await?;
        element.clear().await?;
        element.send_keys(value).await?;
        Ok(())
    }

    async fn click(&self, css: &str) -> Result<()> {
        let element = self.first(By::Css(css), &format!("css '{}'", css)).await?;
        element.click().await?;
        Ok(())
    }

    async fn click_link_or_button(&self, locator: &str) -> Result<()> {
        let element = self
            .first(
                By::XPath(link_or_button_xpath(locator)),
                &format!("link or button '{}'", locator),
            )
            .await?;
        element.click().await?;
        Ok(())
    }

    async fn body(&self) -> Result<String> {
        Ok(self.driver.source().await?)
    }

    async fn count_within(&self, scope: &str, css: &str) -> Result<usize> {
        let scope = self.scope(scope).await?;
        Ok(self.find_all_within(&scope, By::Css(css)).await?.len())
    }

    async fn links_within(&self, scope: &str) -> Result<Vec<Link>> {
        let scope = self.scope(scope).await?;
        let mut links = Vec::new();
        for anchor in self.find_all_within(&scope, By::Css("a[href]")).await? {
            links.push(Link {
                href: anchor.attr("href").await?.unwrap_or_default(),
                text: anchor.text().await?,
            });
        }
        Ok(links)
    }

    async fn press_key(&self, css: &str, chord: KeyChord) -> Result<()> {
        let element = self.first(By::Css(css), &format!("css '{}'", css)).await?;
        match chord {
            KeyChord::Space => element.send_keys(Key::Space).await?,
            KeyChord::Enter => element.send_keys(Key::Enter).await?,
            KeyChord::CtrlEnter => element.send_keys(Key::Control + Key::Enter).await?,
        }
        Ok(())
    }

    async fn is_checked(&self, css: &str) -> Result<bool> {
        let element = self.first(By::Css(css), &format!("css '{}'", css)).await?;
        Ok(element.is_selected().await?)
    }

    async fn reset_session(&self) -> Result<()> {
        self.driver.delete_all_cookies().await?;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        info!("Closing browser session");
        self.driver.clone().quit().await?;
        Ok(())
    }
}

fn chrome_capabilities(config: &BrowserConfig) -> Result<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    if config.headless {
        caps.set_headless()?;
    }
    for arg in &config.args {
        caps.add_arg(&format!("--{}", arg))?;
    }
    Ok(caps)
}

/// `args` are chromium switches and are not forwarded to Firefox.
fn firefox_capabilities(config: &BrowserConfig) -> Result<FirefoxCapabilities> {
    let mut caps = DesiredCapabilities::firefox();
    if config.headless {
        caps.set_headless()?;
    }
    if !config.args.is_empty() {
        debug!(args = ?config.args, "Ignoring chrome-only browser args");
    }
    Ok(caps)
}

/// Parse the base URL, forcing a trailing slash so relative joins keep any
/// path prefix.
fn base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| BrowserError::InvalidUrl {
        path: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Resolve an application path against the base URL.
fn resolve(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| BrowserError::InvalidUrl {
            path: path.to_string(),
            reason: e.to_string(),
        })
}

/// Path of `url` below the base URL, always starting with `/`. URLs outside
/// the base keep their full path.
fn relative_path(base: &Url, url: &Url) -> String {
    match url.path().strip_prefix(base.path()) {
        Some(rest) if url.origin() == base.origin() => format!("/{}", rest),
        _ => url.path().to_string(),
    }
}

/// Quote a string as an XPath 1.0 literal.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

fn field_xpath(locator: &str) -> String {
    let l = xpath_literal(locator);
    format!(
        "//*[self::input or self::textarea or self::select]\
         [@id={l} or @name={l} or @placeholder={l} or @id=//label[normalize-space(.)={l}]/@for]",
        l = l
    )
}

fn link_or_button_xpath(locator: &str) -> String {
    let l = xpath_literal(locator);
    format!(
        "//a[@href][@id={l} or @title={l} or contains(normalize-space(string(.)), {l})] \
         | //button[@id={l} or @name={l} or @value={l} or @title={l} or contains(normalize-space(string(.)), {l})] \
         | //input[@type='submit' or @type='button' or @type='reset' or @type='image']\
         [@id={l} or @name={l} or @value={l} or @title={l}]",
        l = l
    )
}
