use firewheel::input::{Action, action_for};
use winit::keyboard::KeyCode;

#[test]
fn every_documented_key_is_bound() {
    let bindings = [
        (KeyCode::KeyR, Action::ToggleReflection),
        (KeyCode::KeyT, Action::CycleTextures),
        (KeyCode::ArrowUp, Action::MoveForward),
        (KeyCode::ArrowDown, Action::MoveBackward),
        (KeyCode::ArrowLeft, Action::TurnLeft),
        (KeyCode::ArrowRight, Action::TurnRight),
        (KeyCode::F1, Action::ToggleFullscreen),
        (KeyCode::Escape, Action::Quit),
    ];
    for (key, action) in bindings {
        assert_eq!(action_for(key), Some(action), "{:?}", key);
    }
}

#[test]
fn letters_without_a_binding_are_ignored() {
    for key in [KeyCode::KeyA, KeyCode::KeyW, KeyCode::Enter, KeyCode::F11] {
        assert_eq!(action_for(key), None);
    }
}
