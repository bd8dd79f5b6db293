use gpui::{
    AnyElement, App, Component, FontWeight, Hsla, InteractiveElement, IntoElement,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    rgb,
};
use tracing::{debug, warn};

use super::controller::SignUpController;
use super::model::{Gender, InputKind, SignUpField};
use crate::form::{FieldView, SubmitOutcome};
use crate::widgets::{PasswordInput, Select, SelectOption, TextInput};

const ERROR_COLOR: u32 = 0xd32f2f;
const MUTED_COLOR: u32 = 0x757575;
const PRIMARY_COLOR: u32 = 0x1976d2;
const PRIMARY_FG: u32 = 0xffffff;

pub(crate) const SUBMIT_LABEL: &str = "Sign up";
pub(crate) const SUBMITTING_LABEL: &str = "Signing up...";

/// Draws the sign-up form from the controller's current state, with every
/// input's change and blur routed back into the controller.
#[derive(Clone)]
pub struct SignUpView {
    controller: SignUpController,
}

impl SignUpView {
    pub fn new(controller: SignUpController) -> Self {
        Self { controller }
    }
}

impl RenderOnce for SignUpView {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let title = div()
            .text_xl()
            .font_weight(FontWeight::SEMIBOLD)
            .child(SUBMIT_LABEL);
        let mut root = div().flex().flex_col().gap_4().child(title);

        for field in SignUpField::ALL {
            root = match self.controller.field_view(field) {
                Ok(view) => root.child(field_row(&self.controller, field, view)),
                Err(error) => root.child(error_text(error.to_string())),
            };
        }

        let submitting = self.controller.is_submitting().unwrap_or(true);
        root = root.child(submit_button(self.controller.clone(), submitting));

        if let Ok(Some(readout)) = self.controller.last_readout() {
            root = root.child(
                div()
                    .text_sm()
                    .text_color(Hsla::from(rgb(MUTED_COLOR)))
                    .child(SharedString::from(readout)),
            );
        }
        root
    }
}

impl IntoElement for SignUpView {
    type Element = Component<Self>;

    fn into_element(self) -> Self::Element {
        Component::new(self)
    }
}

pub(crate) fn input_id(field: SignUpField) -> SharedString {
    SharedString::from(format!("signup-{}", field.as_str()))
}

pub(crate) fn placeholder(field: SignUpField) -> &'static str {
    match field {
        SignUpField::Name => "Jane Doe",
        SignUpField::Email => "jane@example.com",
        SignUpField::Dob => "YYYY-MM-DD",
        SignUpField::Gender => "Select gender",
        SignUpField::Phone => "0912345678",
        SignUpField::Password => "Password",
        SignUpField::ConfirmPassword => "Confirm password",
    }
}

pub(crate) fn gender_options() -> Vec<SelectOption> {
    Gender::ALL
        .into_iter()
        .map(|gender| SelectOption::new(gender.as_str()))
        .collect()
}

pub(crate) fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

fn field_row(
    controller: &SignUpController,
    field: SignUpField,
    view: FieldView<String>,
) -> impl IntoElement {
    let mut row = div()
        .flex()
        .flex_col()
        .gap_2()
        .child(div().child(field.label()))
        .child(field_input(controller, field, &view));
    if let Some(error) = view.error {
        row = row.child(error_text(error));
    }
    row
}

fn field_input(
    controller: &SignUpController,
    field: SignUpField,
    view: &FieldView<String>,
) -> AnyElement {
    let on_change = {
        let controller = controller.clone();
        move |value: SharedString, window: &mut Window, _: &mut App| {
            if let Err(error) = controller.change(field, value.to_string()) {
                warn!(field = %field, error = %error, "sign-up change rejected");
            }
            window.refresh();
        }
    };
    let on_blur = {
        let controller = controller.clone();
        move |window: &mut Window, _: &mut App| {
            if let Err(error) = controller.blur(field) {
                warn!(field = %field, error = %error, "sign-up blur rejected");
            }
            window.refresh();
        }
    };
    let on_submit = {
        let controller = controller.clone();
        move |window: &mut Window, cx: &mut App| spawn_submit(controller.clone(), window, cx)
    };

    match field.input_kind() {
        InputKind::Select => Select::new(input_id(field))
            .options(gender_options())
            .placeholder(placeholder(field))
            .value(view.value.clone())
            .error(view.error.clone())
            .on_change(on_change)
            .on_blur(on_blur)
            .into_any_element(),
        InputKind::Password => PasswordInput::new(input_id(field))
            .placeholder(placeholder(field))
            .value(view.value.clone())
            .error(view.error.clone())
            .on_change(on_change)
            .on_blur(on_blur)
            .on_submit(on_submit)
            .into_any_element(),
        InputKind::Text | InputKind::Email | InputKind::Date => TextInput::new(input_id(field))
            .placeholder(placeholder(field))
            .value(view.value.clone())
            .error(view.error.clone())
            .on_change(on_change)
            .on_blur(on_blur)
            .on_submit(on_submit)
            .into_any_element(),
    }
}

fn error_text(message: impl Into<SharedString>) -> impl IntoElement {
    div()
        .text_sm()
        .text_color(Hsla::from(rgb(ERROR_COLOR)))
        .child(message.into())
}

/// Runs the submit on the foreground executor and redraws once it settles.
/// Validation failures are already visible through field errors, so only
/// controller errors are logged.
fn spawn_submit(controller: SignUpController, window: &mut Window, cx: &mut App) {
    let window_handle = window.window_handle();
    cx.spawn(async move |cx| {
        match controller.submit().await {
            Ok(SubmitOutcome::Submitted) => {}
            Ok(SubmitOutcome::Blocked) => debug!("sign-up submit blocked by validation"),
            Err(error) => warn!(error = %error, "sign-up submit failed"),
        }
        if let Err(error) = window_handle.update(cx, |_, window, _| window.refresh()) {
            debug!(error = %error, "sign-up window closed before submit settled");
        }
    })
    .detach();
    window.refresh();
}

fn submit_button(controller: SignUpController, submitting: bool) -> impl IntoElement {
    let button = div()
        .id("signup-submit")
        .px_4()
        .py_2()
        .rounded_md()
        .bg(Hsla::from(rgb(PRIMARY_COLOR)))
        .text_color(Hsla::from(rgb(PRIMARY_FG)))
        .child(submit_label(submitting));
    if submitting {
        return button.cursor_default().opacity(0.55);
    }

    button
        .cursor_pointer()
        .on_click(move |_, window, cx| spawn_submit(controller.clone(), window, cx))
}
