use std::{
    collections::HashMap,
    rc::Rc,
    sync::{LazyLock, Mutex},
};

use gpui::{
    App, FocusHandle, Hsla, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, px, rgb,
};

use super::actions::{
    DeleteBackward, DeleteForward, INPUT_KEY_CONTEXT, MoveEnd, MoveHome, MoveLeft, MoveRight,
    Submit, ensure_input_keybindings,
};
use super::control;
use super::edit_state::{EditState, byte_index_at_char};
use super::{BORDER_COLOR, ERROR_COLOR, FOCUS_COLOR, MUTED_COLOR, TEXT_COLOR};
use super::{BlurHandler, ChangeHandler, SubmitHandler};

pub const MASK_CHAR: char = '•';
const CARET_HEIGHT_PX: f32 = 17.0;

static INPUT_FOCUS_HANDLES: LazyLock<Mutex<HashMap<String, FocusHandle>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// One mask glyph per char of `value`.
pub fn masked_text(value: &str) -> String {
    value.chars().map(|_| MASK_CHAR).collect()
}

/// Single-line controlled text input. The value comes from the caller on
/// every render; edits are reported through `on_change` and leaving the
/// field through `on_blur`.
#[derive(IntoElement)]
pub struct TextInput {
    id: SharedString,
    value: SharedString,
    placeholder: Option<SharedString>,
    error: Option<SharedString>,
    masked: bool,
    disabled: bool,
    on_change: Option<ChangeHandler>,
    on_blur: Option<BlurHandler>,
    on_submit: Option<SubmitHandler>,
}

impl TextInput {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            value: SharedString::default(),
            placeholder: None,
            error: None,
            masked: false,
            disabled: false,
            on_change: None,
            on_blur: None,
            on_submit: None,
        }
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn error(mut self, error: Option<SharedString>) -> Self {
        self.error = error;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    pub fn on_blur(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_blur = Some(Rc::new(handler));
        self
    }

    pub fn on_submit(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_submit = Some(Rc::new(handler));
        self
    }

    pub fn display_value(&self) -> String {
        if self.masked {
            masked_text(&self.value)
        } else {
            self.value.to_string()
        }
    }

    fn focus_handle(&self, cx: &App) -> FocusHandle {
        if let Ok(mut handles) = INPUT_FOCUS_HANDLES.lock() {
            return handles
                .entry(self.id.to_string())
                .or_insert_with(|| cx.focus_handle())
                .clone();
        }
        cx.focus_handle()
    }
}

/// Runs `edit` against the latest text of input `id`, stores the new caret
/// and reports a changed value.
fn apply_edit(
    id: &str,
    rendered: &str,
    on_change: Option<&ChangeHandler>,
    window: &mut Window,
    cx: &mut App,
    edit: impl FnOnce(&mut EditState) -> bool,
) {
    let current = control::latest_text(id, rendered);
    let mut state = EditState::new(current, control::caret(id, rendered.chars().count()));
    let changed = edit(&mut state);
    control::set_caret(id, state.caret);
    if changed {
        control::set_latest_text(id, state.value.clone());
        if let Some(handler) = on_change {
            handler(state.value.into(), window, cx);
        }
    }
    window.refresh();
}

impl RenderOnce for TextInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        ensure_input_keybindings(cx);
        let focus_handle = self.focus_handle(cx);
        let id = self.id.to_string();
        let rendered = self.value.to_string();
        control::set_latest_text(&id, rendered.clone());
        let focused =
            !self.disabled && (control::focused_state(&id) || focus_handle.is_focused(window));
        let caret = control::caret(&id, rendered.chars().count());

        let border = if self.error.is_some() {
            ERROR_COLOR
        } else if focused {
            FOCUS_COLOR
        } else {
            BORDER_COLOR
        };
        let mut input = div()
            .id(self.id.clone())
            .focusable()
            .key_context(INPUT_KEY_CONTEXT)
            .track_focus(&focus_handle)
            .flex()
            .flex_row()
            .items_center()
            .w_full()
            .px_2()
            .py_1()
            .border_1()
            .rounded_md()
            .border_color(Hsla::from(rgb(border)))
            .text_color(Hsla::from(rgb(TEXT_COLOR)));

        let shown = self.display_value();
        if shown.is_empty() && !focused {
            let placeholder = self.placeholder.clone().unwrap_or_default();
            input = input.child(
                div()
                    .text_color(Hsla::from(rgb(MUTED_COLOR)))
                    .child(placeholder),
            );
        } else if focused {
            let split = byte_index_at_char(&shown, caret);
            let (before, after) = shown.split_at(split);
            input = input
                .child(SharedString::from(before.to_string()))
                .child(
                    div()
                        .w(px(1.0))
                        .h(px(CARET_HEIGHT_PX))
                        .bg(Hsla::from(rgb(TEXT_COLOR))),
                )
                .child(SharedString::from(after.to_string()));
        } else {
            input = input.child(SharedString::from(shown));
        }

        if self.disabled {
            return input.cursor_default().opacity(0.55);
        }

        let focus_id = id.clone();
        let handle_for_click = focus_handle.clone();
        let blur_id = id.clone();
        let on_blur = self.on_blur.clone();
        input = input
            .cursor_text()
            .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                control::set_focused_state(&focus_id, true);
                window.focus(&handle_for_click);
                window.refresh();
            })
            .on_mouse_down_out(move |_, window, cx| {
                if !control::focused_state(&blur_id) {
                    return;
                }
                control::set_focused_state(&blur_id, false);
                if let Some(handler) = on_blur.as_ref() {
                    handler(window, cx);
                }
                window.refresh();
            });

        input = input
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                move |_: &MoveLeft, window, cx| {
                    apply_edit(&id, &rendered, None, window, cx, |state| {
                        state.move_left();
                        false
                    })
                }
            })
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                move |_: &MoveRight, window, cx| {
                    apply_edit(&id, &rendered, None, window, cx, |state| {
                        state.move_right();
                        false
                    })
                }
            })
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                move |_: &MoveHome, window, cx| {
                    apply_edit(&id, &rendered, None, window, cx, |state| {
                        state.move_home();
                        false
                    })
                }
            })
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                move |_: &MoveEnd, window, cx| {
                    apply_edit(&id, &rendered, None, window, cx, |state| {
                        state.move_end();
                        false
                    })
                }
            })
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                let on_change = self.on_change.clone();
                move |_: &DeleteBackward, window, cx| {
                    apply_edit(&id, &rendered, on_change.as_ref(), window, cx, |state| {
                        state.delete_backward()
                    })
                }
            })
            .on_action({
                let (id, rendered) = (id.clone(), rendered.clone());
                let on_change = self.on_change.clone();
                move |_: &DeleteForward, window, cx| {
                    apply_edit(&id, &rendered, on_change.as_ref(), window, cx, |state| {
                        state.delete_forward()
                    })
                }
            })
            .on_action({
                let on_submit = self.on_submit.clone();
                move |_: &Submit, window, cx| {
                    if let Some(handler) = on_submit.as_ref() {
                        handler(window, cx);
                    }
                }
            })
            .on_key_down({
                let on_change = self.on_change.clone();
                move |event, window, cx| {
                    if event.keystroke.modifiers.control
                        || event.keystroke.modifiers.platform
                        || event.keystroke.modifiers.function
                        || event.keystroke.modifiers.alt
                    {
                        return;
                    }
                    let Some(typed) = event.keystroke.key_char.as_ref() else {
                        return;
                    };
                    apply_edit(&id, &rendered, on_change.as_ref(), window, cx, |state| {
                        state.insert_text(typed)
                    });
                    cx.stop_propagation();
                }
            });
        input
    }
}

/// A [`TextInput`] that shows one mask glyph per char.
#[derive(IntoElement)]
pub struct PasswordInput {
    inner: TextInput,
}

impl PasswordInput {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            inner: TextInput::new(id).masked(true),
        }
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.inner = self.inner.value(value);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.inner = self.inner.placeholder(placeholder);
        self
    }

    pub fn error(mut self, error: Option<SharedString>) -> Self {
        self.inner = self.inner.error(error);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.inner = self.inner.disabled(disabled);
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.inner = self.inner.on_change(handler);
        self
    }

    pub fn on_blur(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.inner = self.inner.on_blur(handler);
        self
    }

    pub fn on_submit(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.inner = self.inner.on_submit(handler);
        self
    }

    pub fn display_value(&self) -> String {
        self.inner.display_value()
    }
}

impl RenderOnce for PasswordInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        self.inner.render(window, cx)
    }
}
