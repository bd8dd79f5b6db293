use std::sync::Once;

use gpui::{App, KeyBinding, actions};

pub const INPUT_KEY_CONTEXT: &str = "signup_form_input";

actions!(
    signup_form_input,
    [
        MoveLeft,
        MoveRight,
        MoveHome,
        MoveEnd,
        DeleteBackward,
        DeleteForward,
        Submit,
    ]
);

static BINDINGS_INIT: Once = Once::new();

pub fn ensure_input_keybindings(cx: &mut App) {
    BINDINGS_INIT.call_once(|| cx.bind_keys(input_bindings()));
}

fn input_bindings() -> Vec<KeyBinding> {
    let context = Some(INPUT_KEY_CONTEXT);
    vec![
        KeyBinding::new("left", MoveLeft, context),
        KeyBinding::new("right", MoveRight, context),
        KeyBinding::new("home", MoveHome, context),
        KeyBinding::new("end", MoveEnd, context),
        KeyBinding::new("backspace", DeleteBackward, context),
        KeyBinding::new("delete", DeleteForward, context),
        KeyBinding::new("enter", Submit, context),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_navigation_editing_and_submit() {
        assert_eq!(input_bindings().len(), 7);
    }
}
