//! Keyboard accessibility step definitions.

use cucumber::{then, when};

use rustodon_features::browser::KeyChord;
use rustodon_features::steps::Step;

use crate::world::FeatureWorld;

#[when(expr = "I press space on {string}")]
async fn press_space(world: &mut FeatureWorld, target: String) {
    world
        .step(Step::PressKey {
            chord: KeyChord::Space,
            target,
        })
        .await;
}

#[when(expr = "I press enter on {string}")]
async fn press_enter(world: &mut FeatureWorld, target: String) {
    world
        .step(Step::PressKey {
            chord: KeyChord::Enter,
            target,
        })
        .await;
}

#[when(expr = "I press ctrl+enter in {string}")]
async fn press_ctrl_enter(world: &mut FeatureWorld, target: String) {
    world
        .step(Step::PressKey {
            chord: KeyChord::CtrlEnter,
            target,
        })
        .await;
}

#[then(expr = "{string} should be checked")]
async fn should_be_checked(world: &mut FeatureWorld, target: String) {
    world
        .step(Step::SeeChecked {
            target,
            checked: true,
        })
        .await;
}

#[then(expr = "{string} should not be checked")]
async fn should_not_be_checked(world: &mut FeatureWorld, target: String) {
    world
        .step(Step::SeeChecked {
            target,
            checked: false,
        })
        .await;
}
