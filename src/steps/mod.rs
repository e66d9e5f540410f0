//! Step vocabulary.
//!
//! Every sentence a scenario may use is one `Step` variant with typed
//! parameters. Composite steps (`Login`, `UserExists`, `BeUser`, `HaveBio`,
//! `Logout`) are macros over other steps and expand in a fixed order, since
//! each one depends on the side effects of the previous (a created user, an
//! authenticated session).
//!
//! Steps are planned into browser-level `Action`s, which `StepRunner`
//! executes fail-fast.

use std::fmt;

use crate::browser::{BrowserError, KeyChord};

mod page;
mod runner;

pub use page::Page;
pub use runner::StepRunner;

/// Password every user created by `UserExists` gets.
pub const DEFAULT_PASSWORD: &str = "password";
/// Mail domain for users created by `UserExists`.
pub const TEST_EMAIL_DOMAIN: &str = "test.org";

/// Submit control of the signup form.
pub const SIGNUP_SUBMIT: &str = "form#signup button[type='submit']";
/// Submit control of the signin form.
pub const SIGNIN_SUBMIT: &str = "form#signin button[type='submit']";
/// Biography field on the settings page.
pub const BIOGRAPHY_FIELD: &str = "summary";
/// Control saving the biography.
pub const BIOGRAPHY_SUBMIT: &str = "update";
/// Control ending the session.
pub const SIGN_OUT: &str = "sign out.";

/// Errors that fail the current scenario.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Assertion failed: {0}")]
    Assertion(String),
}

/// Whether an assertion expects something to be there or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// At least one match.
    Present,
    /// Exactly zero matches.
    Absent,
}

/// One sentence of the step vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Visit(Page),
    FillSignupForm {
        username: String,
        password: String,
        email: String,
    },
    FillLoginForm {
        username: String,
        password: String,
    },
    SubmitSignupForm,
    SubmitLoginForm,
    Login {
        username: String,
        password: String,
    },
    UserExists {
        username: String,
    },
    BeUser {
        username: String,
    },
    FillBiographyForm {
        bio: String,
    },
    SubmitBiographyForm,
    HaveBio {
        bio: String,
    },
    SignOut,
    Logout,
    SeeText {
        text: String,
        presence: Presence,
    },
    /// The browser ended up on `page`, with no redirect elsewhere.
    SeePage(Page),
    SeeProfileLink {
        username: String,
        scope: String,
    },
    SeeLink {
        href: String,
        scope: String,
    },
    SeeTag {
        tag: String,
        scope: String,
        presence: Presence,
    },
    PressKey {
        chord: KeyChord,
        target: String,
    },
    SeeChecked {
        target: String,
        checked: bool,
    },
}

/// A browser-level operation. Steps are planned into these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Visit(String),
    FillIn { field: String, value: String },
    Click(String),
    ClickLinkOrButton(String),
    AssertText { text: String, presence: Presence },
    AssertPath(String),
    AssertProfileLink { username: String, scope: String },
    AssertLink { href: String, scope: String },
    AssertTag { tag: String, scope: String, presence: Presence },
    PressKey { target: String, chord: KeyChord },
    AssertChecked { target: String, checked: bool },
}

fn fill(field: &str, value: &str) -> Action {
    Action::FillIn {
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl Step {
    /// The steps a composite stands for, in execution order. `None` for
    /// primitive steps.
    pub fn expand(&self) -> Option<Vec<Step>> {
        match self {
            Step::Login { username, password } => Some(vec![
                Step::Visit(Page::SignIn),
                Step::FillLoginForm {
                    username: username.clone(),
                    password: password.clone(),
                },
                Step::SubmitLoginForm,
            ]),
            Step::UserExists { username } => Some(vec![
                Step::Visit(Page::SignUp),
                Step::FillSignupForm {
                    username: username.clone(),
                    password: DEFAULT_PASSWORD.to_string(),
                    email: format!("{}@{}", username, TEST_EMAIL_DOMAIN),
                },
                Step::SubmitSignupForm,
            ]),
            Step::BeUser { username } => Some(vec![
                Step::UserExists {
                    username: username.clone(),
                },
                Step::Login {
                    username: username.clone(),
                    password: DEFAULT_PASSWORD.to_string(),
                },
            ]),
            Step::HaveBio { bio } => Some(vec![
                Step::Visit(Page::Settings),
                Step::FillBiographyForm { bio: bio.clone() },
                Step::SubmitBiographyForm,
            ]),
            Step::Logout => Some(vec![Step::Visit(Page::Home), Step::SignOut]),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.expand().is_some()
    }

    /// Flatten this step into browser actions, expanding composites
    /// recursively.
    pub fn plan(&self) -> Vec<Action> {
        if let Some(steps) = self.expand() {
            return steps.iter().flat_map(Step::plan).collect();
        }

        match self {
            Step::Visit(page) => vec![Action::Visit(page.path())],
            Step::FillSignupForm {
                username,
                password,
                email,
            } => vec![
                fill("username", username),
                fill("email", email),
                fill("password", password),
            ],
            Step::FillLoginForm { username, password } => {
                vec![fill("username", username), fill("password", password)]
            }
            Step::SubmitSignupForm => vec![Action::Click(SIGNUP_SUBMIT.to_string())],
            Step::SubmitLoginForm => vec![Action::Click(SIGNIN_SUBMIT.to_string())],
            Step::FillBiographyForm { bio } => vec![fill(BIOGRAPHY_FIELD, bio)],
            Step::SubmitBiographyForm => {
                vec![Action::ClickLinkOrButton(BIOGRAPHY_SUBMIT.to_string())]
            }
            Step::SignOut => vec![Action::ClickLinkOrButton(SIGN_OUT.to_string())],
            Step::SeeText { text, presence } => vec![Action::AssertText {
                text: text.clone(),
                presence: *presence,
            }],
            Step::SeePage(page) => vec![Action::AssertPath(page.path())],
            Step::SeeProfileLink { username, scope } => vec![Action::AssertProfileLink {
                username: username.clone(),
                scope: scope.clone(),
            }],
            Step::SeeLink { href, scope } => vec![Action::AssertLink {
                href: href.clone(),
                scope: scope.clone(),
            }],
            Step::SeeTag {
                tag,
                scope,
                presence,
            } => vec![Action::AssertTag {
                tag: tag.clone(),
                scope: scope.clone(),
                presence: *presence,
            }],
            Step::PressKey { chord, target } => vec![Action::PressKey {
                target: target.clone(),
                chord: *chord,
            }],
            Step::SeeChecked { target, checked } => vec![Action::AssertChecked {
                target: target.clone(),
                checked: *checked,
            }],
            // Composites returned above
            Step::Login { .. }
            | Step::UserExists { .. }
            | Step::BeUser { .. }
            | Step::HaveBio { .. }
            | Step::Logout => Vec::new(),
        }
    }
}

fn not(presence: &Presence) -> &'static str {
    match presence {
        Presence::Present => "",
        Presence::Absent => " not",
    }
}

/// Renders the sentence a scenario uses for this step.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Visit(page) => write!(f, "I visit {}", page),
            Step::FillSignupForm {
                username,
                password,
                email,
            } => write!(
                f,
                "I fill in the signup form with the username \"{}\", password \"{}\" and email \"{}\"",
                username, password, email
            ),
            Step::FillLoginForm { username, password } => write!(
                f,
                "I fill in the login form with the username \"{}\" and password \"{}\"",
                username, password
            ),
            Step::SubmitSignupForm => write!(f, "I submit the signup form"),
            Step::SubmitLoginForm => write!(f, "I submit the login form"),
            Step::Login { username, password } => write!(
                f,
                "I login with username \"{}\" and password \"{}\"",
                username, password
            ),
            Step::UserExists { username } => write!(f, "the user \"{}\" exists", username),
            Step::BeUser { username } => write!(f, "I am the user \"{}\"", username),
            Step::FillBiographyForm { bio } => {
                write!(f, "I fill in the biography form with \"{}\"", bio)
            }
            Step::SubmitBiographyForm => write!(f, "I submit the biography form"),
            Step::HaveBio { bio } => write!(f, "I have the bio \"{}\"", bio),
            Step::SignOut => write!(f, "I click \"{}\"", SIGN_OUT),
            Step::Logout => write!(f, "I logout"),
            Step::SeeText { text, presence } => {
                write!(f, "I should{} see \"{}\"", not(presence), text)
            }
            Step::SeePage(page) => write!(f, "I should be on {}", page),
            Step::SeeProfileLink { username, scope } => write!(
                f,
                "I should see a link to the profile for \"{}\" in \"{}\"",
                username, scope
            ),
            Step::SeeLink { href, scope } => {
                write!(f, "I should see a link to \"{}\" in \"{}\"", href, scope)
            }
            Step::SeeTag {
                tag,
                scope,
                presence,
            } => write!(
                f,
                "I should{} see a \"{}\" tag in \"{}\"",
                not(presence),
                tag,
                scope
            ),
            Step::PressKey {
                chord: KeyChord::CtrlEnter,
                target,
            } => write!(f, "I press ctrl+enter in \"{}\"", target),
            Step::PressKey { chord, target } => {
                write!(f, "I press {} on \"{}\"", chord, target)
            }
            Step::SeeChecked { target, checked } => write!(
                f,
                "\"{}\" should{} be checked",
                target,
                if *checked { "" } else { " not" }
            ),
        }
    }
}
