//! Executes steps against a browser.

use tracing::{debug, info};

use super::{Action, Presence, Step, StepError};
use crate::browser::Browser;
use crate::context::ExecutionContext;

/// Runs steps for one scenario.
///
/// Execution stops at the first failing action; there is no retry.
pub struct StepRunner<'a> {
    browser: &'a dyn Browser,
    context: &'a mut ExecutionContext,
}

impl<'a> StepRunner<'a> {
    pub fn new(browser: &'a dyn Browser, context: &'a mut ExecutionContext) -> Self {
        Self { browser, context }
    }

    /// Run a step, expanding composites in order.
    pub async fn run(&mut self, step: &Step) -> Result<(), StepError> {
        info!(step = %step, "Step");
        for action in step.plan() {
            self.execute(&action).await?;
        }
        Ok(())
    }

    async fn execute(&mut self, action: &Action) -> Result<(), StepError> {
        debug!(?action, "Action");
        match action {
            Action::Visit(path) => self.browser.visit(path).await?,
            Action::FillIn { field, value } => self.browser.fill_in(field, value).await?,
            Action::Click(css) => self.browser.click(css).await?,
            Action::ClickLinkOrButton(locator) => {
                self.browser.click_link_or_button(locator).await?
            }
            Action::AssertText { text, presence } => {
                let body = self.browser.body().await?;
                let checked = match presence {
                    Presence::Present => self.context.assert_includes(&body, text),
                    Presence::Absent => self.context.refute_includes(&body, text),
                };
                checked.map_err(StepError::Assertion)?;
            }
            Action::AssertPath(expected) => {
                let actual = self.browser.current_path().await?;
                self.context
                    .assert(&actual == expected, || {
                        format!("Expected to be on {:?}, but was on {:?}", expected, actual)
                    })
                    .map_err(StepError::Assertion)?;
            }
            Action::AssertProfileLink { username, scope } => {
                let links = self.browser.links_within(scope).await?;
                let handle = format!("@{}", username);
                let found = links
                    .iter()
                    .any(|link| link.href.contains(username.as_str()) && link.text.contains(&handle));
                self.context
                    .assert(found, || {
                        format!(
                            "Expected a link to the profile for {:?} with text {:?} in {:?}",
                            username, handle, scope
                        )
                    })
                    .map_err(StepError::Assertion)?;
            }
            Action::AssertLink { href, scope } => {
                let links = self.browser.links_within(scope).await?;
                let found = links.iter().any(|link| &link.href == href);
                self.context
                    .assert(found, || {
                        format!("Expected a link to {:?} in {:?}", href, scope)
                    })
                    .map_err(StepError::Assertion)?;
            }
            Action::AssertTag {
                tag,
                scope,
                presence,
            } => {
                let count = self.browser.count_within(scope, tag).await?;
                let holds = match presence {
                    Presence::Present => count > 0,
                    Presence::Absent => count == 0,
                };
                self.context
                    .assert(holds, || match presence {
                        Presence::Present => {
                            format!("Expected at least one <{}> in {:?}, found none", tag, scope)
                        }
                        Presence::Absent => {
                            format!("Expected no <{}> in {:?}, found {}", tag, scope, count)
                        }
                    })
                    .map_err(StepError::Assertion)?;
            }
            Action::PressKey { target, chord } => self.browser.press_key(target, *chord).await?,
            Action::AssertChecked { target, checked } => {
                let actual = self.browser.is_checked(target).await?;
                self.context
                    .assert(actual == *checked, || {
                        format!(
                            "Expected {:?} to be {}",
                            target,
                            if *checked { "checked" } else { "unchecked" }
                        )
                    })
                    .map_err(StepError::Assertion)?;
            }
        }
        Ok(())
    }
}
