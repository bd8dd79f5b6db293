use std::rc::Rc;

use gpui::{
    App, Hsla, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, rgb,
};

use super::control::{self, OPENED_SLOT};
use super::{BORDER_COLOR, ERROR_COLOR, FOCUS_COLOR, HOVER_COLOR, MUTED_COLOR, TEXT_COLOR};
use super::{BlurHandler, ChangeHandler};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: SharedString,
    pub label: SharedString,
}

impl SelectOption {
    pub fn new(value: impl Into<SharedString>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn labeled(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The label of the option whose value is `value`, if any.
pub fn selected_label(options: &[SelectOption], value: &str) -> Option<SharedString> {
    options
        .iter()
        .find(|option| option.value.as_ref() == value)
        .map(|option| option.label.clone())
}

/// Single-choice dropdown. Picking an option reports it through `on_change`;
/// closing the dropdown, by picking or by clicking elsewhere, reports
/// `on_blur`.
#[derive(IntoElement)]
pub struct Select {
    id: SharedString,
    value: Option<SharedString>,
    options: Vec<SelectOption>,
    placeholder: Option<SharedString>,
    error: Option<SharedString>,
    disabled: bool,
    on_change: Option<ChangeHandler>,
    on_blur: Option<BlurHandler>,
}

impl Select {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            value: None,
            options: Vec::new(),
            placeholder: None,
            error: None,
            disabled: false,
            on_change: None,
            on_blur: None,
        }
    }

    /// An empty value selects nothing.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options.extend(options);
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

    pub fn trigger_text(&self) -> Option<SharedString> {
        self.value
            .as_ref()
            .and_then(|value| selected_label(&self.options, value))
            .or_else(|| self.placeholder.clone())
    }

    fn close(id: &str, on_blur: Option<&BlurHandler>, window: &mut Window, cx: &mut App) {
        control::set_bool_state(id, OPENED_SLOT, false);
        if let Some(handler) = on_blur {
            handler(window, cx);
        }
        window.refresh();
    }
}

impl RenderOnce for Select {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let id = self.id.to_string();
        let opened = !self.disabled && control::bool_state(&id, OPENED_SLOT, false);
        let border = if self.error.is_some() {
            ERROR_COLOR
        } else if opened {
            FOCUS_COLOR
        } else {
            BORDER_COLOR
        };
        let trigger_color = if self.value.is_some() {
            TEXT_COLOR
        } else {
            MUTED_COLOR
        };

        let mut trigger = div()
            .id(SharedString::from(control::slot(&id, "trigger")))
            .w_full()
            .px_2()
            .py_1()
            .border_1()
            .rounded_md()
            .border_color(Hsla::from(rgb(border)))
            .text_color(Hsla::from(rgb(trigger_color)))
            .child(self.trigger_text().unwrap_or_default());
        if self.disabled {
            trigger = trigger.cursor_default().opacity(0.55);
        } else {
            let id = id.clone();
            let on_blur = self.on_blur.clone();
            trigger = trigger.cursor_pointer().on_click(move |_, window, cx| {
                if opened {
                    Self::close(&id, on_blur.as_ref(), window, cx);
                } else {
                    control::set_bool_state(&id, OPENED_SLOT, true);
                    window.refresh();
                }
            });
        }

        let mut container = div()
            .id(self.id.clone())
            .flex()
            .flex_col()
            .gap_1()
            .w_full()
            .child(trigger);
        if !opened {
            return container;
        }

        let rows = self.options.iter().map(|option| {
            let selected = self.value.as_ref() == Some(&option.value);
            let value = option.value.clone();
            let id = id.clone();
            let on_change = self.on_change.clone();
            let on_blur = self.on_blur.clone();
            let mut row = div()
                .id(SharedString::from(control::slot(&id, &format!("option-{value}"))))
                .px_2()
                .py_1()
                .cursor_pointer()
                .hover(|style| style.bg(Hsla::from(rgb(HOVER_COLOR))))
                .child(option.label.clone());
            if selected {
                row = row.bg(Hsla::from(rgb(HOVER_COLOR)));
            }
            row.on_click(move |_, window, cx| {
                if let Some(handler) = on_change.as_ref() {
                    handler(value.clone(), window, cx);
                }
                Self::close(&id, on_blur.as_ref(), window, cx);
            })
        });
        let dropdown = div()
            .flex()
            .flex_col()
            .border_1()
            .rounded_md()
            .border_color(Hsla::from(rgb(BORDER_COLOR)))
            .children(rows);

        let on_blur = self.on_blur.clone();
        container = container
            .child(dropdown)
            .on_mouse_down_out(move |_, window, cx| {
                Self::close(&id, on_blur.as_ref(), window, cx)
            });
        container
    }
}
