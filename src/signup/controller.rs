use std::cell::RefCell;
use std::rc::Rc;

use futures_timer::Delay;
use gpui::SharedString;
use tracing::info;

use super::model::{SignUpField, SignUpForm};
use super::payload::SubmissionPayload;
use super::rules::{SignUpError, SignUpRules};
use crate::form::{
    FieldErrors, FieldLens, FieldView, FormController, FormError, FormModel, FormOptions,
    FormResult, SubmitOutcome, TouchedFields,
};

pub type SubmittedHandler = Rc<dyn Fn(&SubmissionPayload)>;

/// Binds `$lens` to the derived lens of `$field` and evaluates `$body`.
macro_rules! with_lens {
    ($field:expr, |$lens:ident| $body:expr) => {{
        let fields = SignUpForm::fields();
        match $field {
            SignUpField::Name => {
                let $lens = fields.name();
                $body
            }
            SignUpField::Email => {
                let $lens = fields.email();
                $body
            }
            SignUpField::Dob => {
                let $lens = fields.dob();
                $body
            }
            SignUpField::Gender => {
                let $lens = fields.gender();
                $body
            }
            SignUpField::Phone => {
                let $lens = fields.phone();
                $body
            }
            SignUpField::Password => {
                let $lens = fields.password();
                $body
            }
            SignUpField::ConfirmPassword => {
                let $lens = fields.confirm_password();
                $body
            }
        }
    }};
}

/// The sign-up form controller: change, blur and submit handlers for the
/// hosting UI, with the sign-up ruleset registered on every field.
#[derive(Clone)]
pub struct SignUpController {
    form: FormController<SignUpForm, SignUpError>,
    rules: Rc<SignUpRules>,
    last_submission: Rc<RefCell<Option<SubmissionPayload>>>,
    on_submitted: Option<SubmittedHandler>,
}

impl SignUpController {
    pub fn new(rules: SignUpRules) -> FormResult<Self> {
        Self::with_options(rules, FormOptions::default())
    }

    pub fn with_options(rules: SignUpRules, options: FormOptions) -> FormResult<Self> {
        let form = FormController::new(SignUpForm::default(), options);
        let rules = Rc::new(rules);
        for field in SignUpField::ALL {
            with_lens!(field, |lens| register_rule(&form, lens, field, &rules))?;
        }
        let fields = SignUpForm::fields();
        form.register_dependency(fields.password(), fields.confirm_password())?;

        Ok(Self {
            form,
            rules,
            last_submission: Rc::new(RefCell::new(None)),
            on_submitted: None,
        })
    }

    /// Called with the payload once a submission completes.
    pub fn on_submitted(mut self, handler: impl Fn(&SubmissionPayload) + 'static) -> Self {
        self.on_submitted = Some(Rc::new(handler));
        self
    }

    pub fn form(&self) -> &FormController<SignUpForm, SignUpError> {
        &self.form
    }

    pub fn rules(&self) -> &SignUpRules {
        &self.rules
    }

    pub fn change(&self, field: SignUpField, value: impl Into<String>) -> FormResult<()> {
        let value = value.into();
        with_lens!(field, |lens| self.form.set(lens, value))
    }

    pub fn change_by_name(&self, name: &str, value: impl Into<String>) -> FormResult<()> {
        self.change(name.parse()?, value)
    }

    pub fn blur(&self, field: SignUpField) -> FormResult<()> {
        with_lens!(field, |lens| self.form.touch(lens))
    }

    pub fn blur_by_name(&self, name: &str) -> FormResult<()> {
        self.blur(name.parse()?)
    }

    pub fn values(&self) -> FormResult<SignUpForm> {
        self.form.model()
    }

    pub fn errors(&self) -> FormResult<FieldErrors<SignUpError>> {
        self.form.errors()
    }

    pub fn touched(&self) -> FormResult<TouchedFields> {
        self.form.touched()
    }

    /// The message shown beneath `field`; `None` until the field is touched.
    pub fn visible_error(&self, field: SignUpField) -> FormResult<Option<SharedString>> {
        with_lens!(field, |lens| self.form.field_error_for_display(lens))
    }

    pub fn field_view(&self, field: SignUpField) -> FormResult<FieldView<String>> {
        with_lens!(field, |lens| self.form.field_view(lens))
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        self.form.is_submitting()
    }

    /// Validates every field; when all pass, waits the configured delay in
    /// place of a network call and then surfaces the payload. Submitting
    /// again before that completes fails with `AlreadySubmitting`.
    pub async fn submit(&self) -> FormResult<SubmitOutcome> {
        let delay = self.rules.config().submit_delay();
        let last_submission = self.last_submission.clone();
        let on_submitted = self.on_submitted.clone();
        self.form
            .submit_async(move |model: &SignUpForm| {
                let payload = SubmissionPayload::from(model);
                async move {
                    Delay::new(delay).await;
                    info!(delay_ms = delay.as_millis() as u64, "sign-up submitted");
                    if let Some(handler) = on_submitted {
                        handler(&payload);
                    }
                    *last_submission
                        .try_borrow_mut()
                        .map_err(|_| FormError::StateBusy("recording submission"))? = Some(payload);
                    Ok::<(), FormError>(())
                }
            })
            .await
    }

    pub fn last_submission(&self) -> FormResult<Option<SubmissionPayload>> {
        Ok(self
            .last_submission
            .try_borrow()
            .map_err(|_| FormError::StateBusy("reading last submission"))?
            .clone())
    }

    /// The pretty JSON readout of the last successful submission.
    pub fn last_readout(&self) -> FormResult<Option<String>> {
        Ok(self
            .last_submission()?
            .and_then(|payload| payload.to_pretty_json().ok()))
    }

    /// Clears values, field meta and the readout. Fails with
    /// `AlreadySubmitting` while a submit is in flight.
    pub fn reset(&self) -> FormResult<()> {
        self.form.reset_to_initial()?;
        *self
            .last_submission
            .try_borrow_mut()
            .map_err(|_| FormError::StateBusy("clearing last submission"))? = None;
        Ok(())
    }
}

fn register_rule<L>(
    form: &FormController<SignUpForm, SignUpError>,
    lens: L,
    field: SignUpField,
    rules: &Rc<SignUpRules>,
) -> FormResult<()>
where
    L: FieldLens<SignUpForm, Value = String>,
{
    let rules = rules.clone();
    form.register_field_validator(lens, move |model: &SignUpForm, _value: &String| {
        rules.check(field, model)
    })
}
