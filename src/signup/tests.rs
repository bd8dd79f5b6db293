use super::*;
use crate::form::{FormError, SubmitOutcome, SubmitState};
use crate::widgets::PasswordInput;
use futures::executor::block_on;
use futures::task::noop_waker_ref;
use gpui::SharedString;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::task::{Context, Poll};

fn valid_form() -> SignUpForm {
    SignUpForm {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        dob: "1990-01-01".into(),
        gender: "Female".into(),
        phone: "0912345678".into(),
        password: "Abcdef1!".into(),
        confirm_password: "Abcdef1!".into(),
    }
}

fn fast_rules() -> SignUpRules {
    SignUpRules::compile(RulesConfig {
        submit_delay_ms: 5,
        ..RulesConfig::default()
    })
    .expect("rules compile")
}

fn error_for(rules: &SignUpRules, form: &SignUpForm, field: SignUpField) -> Option<SignUpError> {
    rules.check(field, form).err()
}

fn fill(controller: &SignUpController, form: &SignUpForm) {
    for field in SignUpField::ALL {
        controller
            .change(field, form.value(field))
            .expect("change field");
    }
}

#[test]
fn valid_values_produce_no_errors() {
    let errors = SignUpRules::default().validate(&valid_form());
    assert_eq!(errors.len(), SignUpField::ALL.len());
    assert!(errors.values().all(Option::is_none));
}

#[test]
fn empty_form_reports_every_required_message() {
    let errors = SignUpRules::default().validate(&SignUpForm::default());
    let messages = SignUpField::ALL
        .into_iter()
        .map(|field| {
            errors
                .get(&field.key())
                .cloned()
                .flatten()
                .map(|error| error.to_string())
        })
        .collect::<Vec<_>>();
    assert_eq!(
        messages,
        vec![
            Some("Name is required".to_string()),
            Some("Email is required".to_string()),
            Some("Date of birth is required".to_string()),
            Some("Gender is required".to_string()),
            Some("Phone is required".to_string()),
            Some("Please enter your password".to_string()),
            Some("Please confirm your password".to_string()),
        ]
    );
}

#[test]
fn name_length_is_bounded_in_characters() {
    let rules = SignUpRules::default();
    let mut form = valid_form();

    form.name = "Jo".into();
    assert_eq!(
        error_for(&rules, &form, SignUpField::Name),
        Some(SignUpError::NameTooShort { min: 3 })
    );
    form.name = "Zoë".into();
    assert_eq!(error_for(&rules, &form, SignUpField::Name), None);
    form.name = "a".repeat(20);
    assert_eq!(error_for(&rules, &form, SignUpField::Name), None);
    form.name = "a".repeat(21);
    assert_eq!(
        error_for(&rules, &form, SignUpField::Name),
        Some(SignUpError::NameTooLong { max: 20 })
    );
    assert_eq!(
        SignUpError::NameTooLong { max: 20 }.to_string(),
        "Name must be at most 20 characters"
    );
}

#[test]
fn email_must_have_address_shape() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    for bad in ["jane", "jane@", "@example.com", "jane@example", "jane doe@example.com"] {
        form.email = bad.into();
        assert_eq!(
            error_for(&rules, &form, SignUpField::Email),
            Some(SignUpError::InvalidEmail),
            "{bad} should be rejected"
        );
    }
    form.email = "jane.doe+signup@mail.example.org".into();
    assert_eq!(error_for(&rules, &form, SignUpField::Email), None);
}

#[test]
fn date_of_birth_must_be_a_calendar_date() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    form.dob = "1990-02-30".into();
    assert_eq!(
        error_for(&rules, &form, SignUpField::Dob),
        Some(SignUpError::InvalidDate)
    );
    form.dob = "not a date".into();
    assert_eq!(
        error_for(&rules, &form, SignUpField::Dob),
        Some(SignUpError::InvalidDate)
    );
    form.dob = "2000-02-29".into();
    assert_eq!(error_for(&rules, &form, SignUpField::Dob), None);
}

#[test]
fn gender_must_be_a_listed_option() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    form.gender = "Other".into();
    let error = error_for(&rules, &form, SignUpField::Gender);
    assert_eq!(error, Some(SignUpError::InvalidGender));
    assert_eq!(
        error.map(|error| error.to_string()),
        Some("Gender must be one of Male, Female, None".to_string())
    );
    form.gender = "None".into();
    assert_eq!(error_for(&rules, &form, SignUpField::Gender), None);
}

#[test]
fn phone_follows_the_configured_pattern() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    for good in ["0912345678", "0312345678", "8412345678", "0912345678é"] {
        form.phone = good.into();
        assert_eq!(error_for(&rules, &form, SignUpField::Phone), None, "{good}");
    }
    for bad in ["12345", "0112345678", "09123", "0912345678a"] {
        form.phone = bad.into();
        assert_eq!(
            error_for(&rules, &form, SignUpField::Phone),
            Some(SignUpError::InvalidPhone),
            "{bad}"
        );
    }

    let us_rules = SignUpRules::compile(RulesConfig {
        phone_pattern: r"^\+1[0-9]{10}$".into(),
        ..RulesConfig::default()
    })
    .expect("rules compile");
    form.phone = "+15551234567".into();
    assert_eq!(error_for(&us_rules, &form, SignUpField::Phone), None);
    form.phone = "0912345678".into();
    assert_eq!(
        error_for(&us_rules, &form, SignUpField::Phone),
        Some(SignUpError::InvalidPhone)
    );
}

#[test]
fn password_needs_length_case_digit_and_symbol() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    for weak in ["Abcdefg!", "abcdef1!", "Abcdefg1", "Abc1!", "ABCDEF1!"] {
        form.password = weak.into();
        form.confirm_password = weak.into();
        assert_eq!(
            error_for(&rules, &form, SignUpField::Password),
            Some(SignUpError::WeakPassword { min: 8 }),
            "{weak} should be rejected"
        );
    }
    assert_eq!(
        SignUpError::WeakPassword { min: 8 }.to_string(),
        "Password must contain at least 8 characters, one uppercase, one number and one special case character"
    );

    let relaxed = SignUpRules::compile(RulesConfig {
        password_require_lowercase: false,
        ..RulesConfig::default()
    })
    .expect("rules compile");
    form.password = "ABCDEF1!".into();
    assert_eq!(error_for(&relaxed, &form, SignUpField::Password), None);
}

#[test]
fn confirm_password_mismatch_ignores_its_own_shape() {
    let rules = SignUpRules::default();
    let mut form = valid_form();
    for confirm in ["x", "Abcdef1?", "abcdef1!"] {
        form.confirm_password = confirm.into();
        let error = error_for(&rules, &form, SignUpField::ConfirmPassword);
        assert_eq!(error, Some(SignUpError::PasswordMismatch));
        assert_eq!(
            error.map(|error| error.field()),
            Some(SignUpField::ConfirmPassword)
        );
    }
}

#[test]
fn config_loads_partial_toml_over_defaults() {
    let config = RulesConfig::from_toml_str(
        r#"
        phone_pattern = '^\+44[0-9]{10}$'
        submit_delay_ms = 50
        "#,
    )
    .expect("config parses");
    assert_eq!(config.phone_pattern, r"^\+44[0-9]{10}$");
    assert_eq!(config.submit_delay_ms, 50);
    assert_eq!(config.name_min_len, 3);
    assert_eq!(config.password_special_chars, DEFAULT_PASSWORD_SPECIAL_CHARS);
    assert!(SignUpRules::compile(config).is_ok());
}

#[test]
fn config_errors_are_reported() {
    assert!(matches!(
        RulesConfig::from_toml_str("name_min_len = \"three\""),
        Err(RulesConfigError::Parse(_))
    ));
    let bad_pattern = SignUpRules::compile(RulesConfig {
        email_pattern: "([a-z".into(),
        ..RulesConfig::default()
    });
    assert!(matches!(
        bad_pattern,
        Err(RulesConfigError::InvalidPattern {
            field: SignUpField::Email,
            ..
        })
    ));
    assert_eq!(
        SignUpRules::compile(RulesConfig {
            name_min_len: 10,
            name_max_len: 5,
            ..RulesConfig::default()
        })
        .err(),
        Some(RulesConfigError::InvalidNameBounds { min: 10, max: 5 })
    );
}

#[test]
fn untouched_invalid_field_shows_nothing_until_blur() {
    let controller = SignUpController::new(SignUpRules::default()).expect("controller");

    controller.change(SignUpField::Name, "").expect("change");
    assert_eq!(
        controller
            .errors()
            .expect("errors")
            .get(&SignUpField::Name.key())
            .cloned()
            .flatten(),
        Some(SignUpError::Required(SignUpField::Name))
    );
    assert_eq!(controller.visible_error(SignUpField::Name).expect("error"), None);

    controller.blur_by_name("name").expect("blur");
    assert_eq!(
        controller.visible_error(SignUpField::Name).expect("error"),
        Some(SharedString::from("Name is required"))
    );
    assert_eq!(
        controller.visible_error(SignUpField::Email).expect("error"),
        None
    );
}

#[test]
fn changing_password_revalidates_confirmation() {
    let controller = SignUpController::new(SignUpRules::default()).expect("controller");
    fill(&controller, &valid_form());
    controller.blur(SignUpField::ConfirmPassword).expect("blur");
    assert_eq!(
        controller
            .visible_error(SignUpField::ConfirmPassword)
            .expect("error"),
        None
    );

    controller
        .change_by_name("password", "Zyxwvu9#")
        .expect("change password");
    assert_eq!(
        controller
            .visible_error(SignUpField::ConfirmPassword)
            .expect("error"),
        Some(SharedString::from("Passwords not match."))
    );
}

#[test]
fn unknown_field_names_are_rejected() {
    let controller = SignUpController::new(SignUpRules::default()).expect("controller");
    assert_eq!(
        controller.change_by_name("username", "jane"),
        Err(FormError::UnknownField("username".into()))
    );
    assert_eq!(
        controller.blur_by_name("confirm_password"),
        Err(FormError::UnknownField("confirm_password".into()))
    );
}

#[test]
fn weak_password_blocks_submit_and_reveals_only_that_error() {
    let submitted = Rc::new(RefCell::new(Vec::new()));
    let controller = {
        let submitted = submitted.clone();
        SignUpController::new(fast_rules())
            .expect("controller")
            .on_submitted(move |payload| submitted.borrow_mut().push(payload.clone()))
    };
    let mut form = valid_form();
    form.password = "Abcdefg!".into();
    form.confirm_password = "Abcdefg!".into();
    fill(&controller, &form);

    let outcome = block_on(controller.submit()).expect("submit");
    assert_eq!(outcome, SubmitOutcome::Blocked);
    assert!(submitted.borrow().is_empty());
    assert_eq!(controller.last_submission().expect("last"), None);

    let visible = SignUpField::ALL
        .into_iter()
        .filter_map(|field| {
            controller
                .visible_error(field)
                .expect("error")
                .map(|message| (field, message))
        })
        .collect::<Vec<_>>();
    assert_eq!(
        visible,
        vec![(
            SignUpField::Password,
            SharedString::from(
                "Password must contain at least 8 characters, one uppercase, one number and one special case character"
            )
        )]
    );
}

#[test]
fn successful_submit_surfaces_payload_and_readout() {
    let submitted = Rc::new(RefCell::new(Vec::new()));
    let controller = {
        let submitted = submitted.clone();
        SignUpController::new(fast_rules())
            .expect("controller")
            .on_submitted(move |payload| submitted.borrow_mut().push(payload.clone()))
    };
    fill(&controller, &valid_form());

    let outcome = block_on(controller.submit()).expect("submit");
    assert_eq!(outcome, SubmitOutcome::Submitted);
    let expected = SubmissionPayload::from(&valid_form());
    assert_eq!(submitted.borrow().as_slice(), &[expected.clone()]);
    assert_eq!(controller.last_submission().expect("last"), Some(expected));
    assert_eq!(
        controller.form().submit_state().expect("state"),
        SubmitState::Succeeded
    );
    assert!(!controller.is_submitting().expect("submitting"));

    let readout = controller
        .last_readout()
        .expect("readout")
        .expect("readout present");
    assert!(readout.starts_with("{\n  \"name\": \"Jane Doe\","));
    assert!(readout.contains("\"confirmPassword\": \"Abcdef1!\""));
}

#[test]
fn submit_is_disabled_while_in_flight() {
    let controller = SignUpController::new(fast_rules()).expect("controller");
    fill(&controller, &valid_form());

    let mut first = Box::pin(controller.submit());
    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));
    assert!(controller.is_submitting().expect("submitting"));
    assert_eq!(
        block_on(controller.submit()),
        Err(FormError::AlreadySubmitting)
    );

    assert_eq!(block_on(first), Ok(SubmitOutcome::Submitted));
    assert!(!controller.is_submitting().expect("submitting"));
    assert_eq!(
        block_on(controller.submit()),
        Ok(SubmitOutcome::Submitted)
    );
}

#[test]
fn reset_discards_values_and_readout() {
    let controller = SignUpController::new(fast_rules()).expect("controller");
    fill(&controller, &valid_form());
    block_on(controller.submit()).expect("submit");

    controller.reset().expect("reset");
    assert_eq!(controller.values().expect("values"), SignUpForm::default());
    assert_eq!(controller.last_readout().expect("readout"), None);
    assert!(controller.touched().expect("touched").values().all(|t| !t));
}

#[test]
fn reset_during_submit_is_rejected_and_submit_completes() {
    let controller = SignUpController::new(fast_rules()).expect("controller");
    fill(&controller, &valid_form());

    let mut first = Box::pin(controller.submit());
    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));

    assert_eq!(controller.reset(), Err(FormError::AlreadySubmitting));
    assert_eq!(controller.values().expect("values"), valid_form());

    assert_eq!(block_on(first), Ok(SubmitOutcome::Submitted));
    assert_eq!(
        controller.last_submission().expect("last submission"),
        Some(SubmissionPayload::from(&valid_form()))
    );
    assert_eq!(
        controller.form().submit_state().expect("submit state"),
        SubmitState::Succeeded
    );
}

#[test]
fn field_view_carries_value_and_visible_error() {
    let controller = SignUpController::new(SignUpRules::default()).expect("controller");
    controller
        .change(SignUpField::Phone, "12345")
        .expect("change");
    controller.blur(SignUpField::Phone).expect("blur");

    let view = controller.field_view(SignUpField::Phone).expect("view");
    assert_eq!(view.key.as_str(), "phone");
    assert_eq!(view.value, "12345");
    assert!(view.touched);
    assert_eq!(view.error, Some(SharedString::from("Phone number is not valid")));
}

fn into_any(element: impl gpui::IntoElement) -> gpui::AnyElement {
    element.into_any_element()
}

#[test]
fn smoke_sign_up_view_renders_into_any_element() {
    let controller = SignUpController::new(fast_rules()).expect("controller");
    let _ = into_any(SignUpView::new(controller.clone()));

    fill(&controller, &valid_form());
    block_on(controller.submit()).expect("submit");
    let _ = into_any(SignUpView::new(controller));
}

#[test]
fn every_field_gets_its_own_input_id() {
    let ids = SignUpField::ALL.map(view::input_id);
    assert_eq!(ids[0], SharedString::from("signup-name"));
    assert_eq!(ids[6], SharedString::from("signup-confirmPassword"));
    for (index, id) in ids.iter().enumerate() {
        assert!(!ids[index + 1..].contains(id), "{id}");
    }
}

#[test]
fn password_fields_render_masked() {
    for field in [SignUpField::Password, SignUpField::ConfirmPassword] {
        assert_eq!(field.input_kind(), InputKind::Password);
        let input = PasswordInput::new(view::input_id(field)).value("Abcdef1!");
        assert_eq!(input.display_value(), "••••••••");
    }
}

#[test]
fn gender_select_lists_every_option() {
    let values = view::gender_options()
        .into_iter()
        .map(|option| option.value.to_string())
        .collect::<Vec<_>>();
    assert_eq!(values, ["Male", "Female", "None"]);
    assert_eq!(view::placeholder(SignUpField::Gender), "Select gender");
}

#[test]
fn submit_button_label_follows_submit_state() {
    let controller = SignUpController::new(fast_rules()).expect("controller");
    fill(&controller, &valid_form());
    assert_eq!(
        view::submit_label(controller.is_submitting().expect("submitting")),
        view::SUBMIT_LABEL
    );

    let mut first = Box::pin(controller.submit());
    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));
    assert_eq!(
        view::submit_label(controller.is_submitting().expect("submitting")),
        view::SUBMITTING_LABEL
    );

    assert_eq!(block_on(first), Ok(SubmitOutcome::Submitted));
    assert_eq!(
        view::submit_label(controller.is_submitting().expect("submitting")),
        view::SUBMIT_LABEL
    );
}
