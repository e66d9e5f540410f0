//! Named pages of the application under test.

use std::fmt;

/// A logical page and the fixed route it lives at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    SignUp,
    SignIn,
    Settings,
    UserProfile(String),
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::SignUp => "/auth/sign_up".to_string(),
            Page::SignIn => "/auth/sign_in".to_string(),
            Page::Settings => "/settings/profile".to_string(),
            Page::UserProfile(username) => format!("/users/{}", username),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Home => write!(f, "the homepage"),
            Page::SignUp => write!(f, "the signup page"),
            Page::SignIn => write!(f, "the signin page"),
            Page::Settings => write!(f, "the settings page"),
            Page::UserProfile(username) => write!(f, "the user profile page for \"{}\"", username),
        }
    }
}
