//! Account, biography and page content step definitions.

use cucumber::{given, then, when};

use rustodon_features::steps::{Presence, Step};

use crate::world::FeatureWorld;

// --- Given steps ---

#[given(expr = "the user {string} exists")]
async fn user_exists(world: &mut FeatureWorld, username: String) {
    world.step(Step::UserExists { username }).await;
}

#[given(expr = "I am the user {string}")]
async fn be_user(world: &mut FeatureWorld, username: String) {
    world.step(Step::BeUser { username }).await;
}

#[given(expr = "I have the bio {string}")]
async fn have_bio(world: &mut FeatureWorld, bio: String) {
    world.step(Step::HaveBio { bio }).await;
}

// --- When steps ---

#[when(expr = "I fill in the signup form with the username {string}, password {string} and email {string}")]
async fn fill_signup_form(
    world: &mut FeatureWorld,
    username: String,
    password: String,
    email: String,
) {
    world
        .step(Step::FillSignupForm {
            username,
            password,
            email,
        })
        .await;
}

#[when(expr = "I fill in the login form with the username {string} and password {string}")]
async fn fill_login_form(world: &mut FeatureWorld, username: String, password: String) {
    world
        .step(Step::FillLoginForm { username, password })
        .await;
}

#[when("I submit the signup form")]
async fn submit_signup_form(world: &mut FeatureWorld) {
    world.step(Step::SubmitSignupForm).await;
}

#[when("I submit the login form")]
async fn submit_login_form(world: &mut FeatureWorld) {
    world.step(Step::SubmitLoginForm).await;
}

#[when(expr = "I login with username {string} and password {string}")]
async fn login(world: &mut FeatureWorld, username: String, password: String) {
    world.step(Step::Login { username, password }).await;
}

#[when(expr = "I fill in the biography form with {string}")]
async fn fill_biography_form(world: &mut FeatureWorld, bio: String) {
    world.step(Step::FillBiographyForm { bio }).await;
}

#[when("I submit the biography form")]
async fn submit_biography_form(world: &mut FeatureWorld) {
    world.step(Step::SubmitBiographyForm).await;
}

// --- Then steps ---

#[then(expr = "I should see {string}")]
async fn should_see(world: &mut FeatureWorld, text: String) {
    world
        .step(Step::SeeText {
            text,
            presence: Presence::Present,
        })
        .await;
}

#[then(expr = "I should not see {string}")]
async fn should_not_see(world: &mut FeatureWorld, text: String) {
    world
        .step(Step::SeeText {
            text,
            presence: Presence::Absent,
        })
        .await;
}

#[then(expr = "I should see a link to the profile for {string} in {string}")]
async fn should_see_profile_link(world: &mut FeatureWorld, username: String, scope: String) {
    world
        .step(Step::SeeProfileLink { username, scope })
        .await;
}

#[then(expr = "I should see a link to {string} in {string}")]
async fn should_see_link(world: &mut FeatureWorld, href: String, scope: String) {
    world.step(Step::SeeLink { href, scope }).await;
}

#[then(expr = "I should see a {string} tag in {string}")]
async fn should_see_tag(world: &mut FeatureWorld, tag: String, scope: String) {
    world
        .step(Step::SeeTag {
            tag,
            scope,
            presence: Presence::Present,
        })
        .await;
}

#[then(expr = "I should not see a {string} tag in {string}")]
async fn should_not_see_tag(world: &mut FeatureWorld, tag: String, scope: String) {
    world
        .step(Step::SeeTag {
            tag,
            scope,
            presence: Presence::Absent,
        })
        .await;
}
