//! Fixed keyboard bindings.

use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleReflection,
    CycleTextures,
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
    ToggleFullscreen,
    Quit,
}

pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyR => Some(Action::ToggleReflection),
        KeyCode::KeyT => Some(Action::CycleTextures),
        KeyCode::ArrowUp => Some(Action::MoveForward),
        KeyCode::ArrowDown => Some(Action::MoveBackward),
        KeyCode::ArrowLeft => Some(Action::TurnLeft),
        KeyCode::ArrowRight => Some(Action::TurnRight),
        KeyCode::F1 => Some(Action::ToggleFullscreen),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for(KeyCode::KeyQ), None);
        assert_eq!(action_for(KeyCode::Space), None);
    }
}
