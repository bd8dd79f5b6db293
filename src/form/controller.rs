use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::rc::Rc;

use tracing::{debug, warn};

use super::validation::{FormModel, ValidationError};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What a submit attempt did with the current model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    Blocked,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub validate_on_change: bool,
    pub validate_on_blur: bool,
    pub touch_all_on_submit: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
            touch_all_on_submit: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMeta<E> {
    pub dirty: bool,
    pub touched: bool,
    pub error: Option<E>,
}

impl<E> Default for FieldMeta<E> {
    fn default() -> Self {
        Self {
            dirty: false,
            touched: false,
            error: None,
        }
    }
}

/// Field key to the field's current message, one entry per field.
pub type FieldErrors<E> = BTreeMap<FieldKey, Option<E>>;

/// Field key to whether the user has left the field at least once.
pub type TouchedFields = BTreeMap<FieldKey, bool>;

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub is_dirty: bool,
    pub is_valid: bool,
    pub field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StateBusy(&'static str),
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    AlreadySubmitting,
    UnknownField(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StateBusy(context) => {
                write!(f, "form state already borrowed while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid submit state transition: {from:?} -> {to:?}")
            }
            FormError::AlreadySubmitting => f.write_str("form submit is already in progress"),
            FormError::UnknownField(name) => write!(f, "unknown form field `{name}`"),
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) type FieldValidatorFn<T, E> = Rc<dyn Fn(&T) -> Result<(), E>>;

pub(super) struct FormState<T, E> {
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T, E> FormState<T, E> {
    pub(super) fn ensure_meta(&mut self, key: FieldKey) -> &mut FieldMeta<E> {
        self.field_meta.entry(key).or_default()
    }
}

/// Owns one form's values and per-field meta for the lifetime of a display
/// session. Clones share the same state, so a clone can be moved into UI
/// callbacks. All access happens on the UI thread.
#[derive(Clone)]
pub struct FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub(super) options: FormOptions,
    pub(super) state: Rc<RefCell<FormState<T, E>>>,
    pub(super) field_validators: Rc<RefCell<BTreeMap<FieldKey, Vec<FieldValidatorFn<T, E>>>>>,
    pub(super) dependencies: Rc<RefCell<BTreeMap<FieldKey, BTreeSet<FieldKey>>>>,
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn new(initial: T, options: FormOptions) -> Self {
        let field_meta = T::field_keys()
            .iter()
            .map(|key| (*key, FieldMeta::default()))
            .collect();
        Self {
            options,
            state: Rc::new(RefCell::new(FormState {
                initial_model: initial.clone(),
                model: initial,
                submit_state: SubmitState::Idle,
                submit_count: 0,
                field_meta,
            })),
            field_validators: Rc::new(RefCell::new(BTreeMap::new())),
            dependencies: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn model(&self) -> FormResult<T> {
        Ok(borrow(&self.state, "reading form model")?.model.clone())
    }

    pub fn submit_state(&self) -> FormResult<SubmitState> {
        Ok(borrow(&self.state, "reading submit state")?.submit_state)
    }

    /// True while a validated submit is in flight; the submit control is
    /// disabled for that window.
    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(self.submit_state()? == SubmitState::Submitting)
    }

    pub fn submit(&self, f: impl FnOnce(&T) -> FormResult<()>) -> FormResult<SubmitOutcome> {
        if !self.begin_submit()? {
            return Ok(SubmitOutcome::Blocked);
        }
        let model = self.enter_submitting()?;
        let submit_result = f(&model);
        self.finish_submit(submit_result)?;
        Ok(SubmitOutcome::Submitted)
    }

    pub async fn submit_async<F, Fut>(&self, f: F) -> FormResult<SubmitOutcome>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = FormResult<()>>,
    {
        if !self.begin_submit()? {
            return Ok(SubmitOutcome::Blocked);
        }
        let model = self.enter_submitting()?;
        let submit_result = f(&model).await;
        self.finish_submit(submit_result)?;
        Ok(SubmitOutcome::Submitted)
    }

    /// Restores the initial model and clears all field meta. Rejected with
    /// `AlreadySubmitting` while a submission is in flight, since finishing
    /// it would otherwise drive the state machine from `Idle`.
    pub fn reset_to_initial(&self) -> FormResult<()> {
        let mut state = borrow_mut(&self.state, "resetting form")?;
        if state.submit_state == SubmitState::Submitting {
            warn!("reset rejected while a submission is in flight");
            return Err(FormError::AlreadySubmitting);
        }
        state.model = state.initial_model.clone();
        state.submit_state = SubmitState::Idle;
        state.submit_count = 0;
        for meta in state.field_meta.values_mut() {
            *meta = FieldMeta::default();
        }
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<T, E>> {
        let state = borrow(&self.state, "creating form snapshot")?;
        let is_valid = state.field_meta.values().all(|meta| meta.error.is_none());
        Ok(FormSnapshot {
            model: state.model.clone(),
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            is_dirty: state.field_meta.values().any(|meta| meta.dirty),
            is_valid,
            field_meta: state.field_meta.clone(),
        })
    }

    pub fn field_meta<L>(&self, lens: L) -> FormResult<Option<FieldMeta<E>>>
    where
        L: super::validation::FieldLens<T>,
    {
        Ok(borrow(&self.state, "reading field meta")?
            .field_meta
            .get(&lens.key())
            .cloned())
    }

    /// Validates the whole model, and when it passes moves to `Submitting`.
    /// Returns false when submission is blocked by a field error.
    fn begin_submit(&self) -> FormResult<bool> {
        {
            let mut state = borrow_mut(&self.state, "preparing submit")?;
            if state.submit_state == SubmitState::Submitting {
                warn!("submit requested while a submission is in flight");
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
            if self.options.touch_all_on_submit {
                for meta in state.field_meta.values_mut() {
                    meta.touched = true;
                }
            }
        }

        if !self.validate_form()? {
            let mut state = borrow_mut(&self.state, "handling submit validation failure")?;
            transition_submit_state(&mut state, SubmitState::Failed)?;
            let failing = failing_keys(&state.field_meta);
            debug!(fields = ?failing, "submit blocked by field validation");
            return Ok(false);
        }
        Ok(true)
    }

    fn enter_submitting(&self) -> FormResult<T> {
        let mut state = borrow_mut(&self.state, "moving submit state to submitting")?;
        transition_submit_state(&mut state, SubmitState::Submitting)?;
        debug!(submit_count = state.submit_count, "form submitting");
        Ok(state.model.clone())
    }

    fn finish_submit(&self, submit_result: FormResult<()>) -> FormResult<()> {
        let mut state = borrow_mut(&self.state, "completing submit")?;
        if submit_result.is_ok() {
            transition_submit_state(&mut state, SubmitState::Succeeded)?;
        } else {
            transition_submit_state(&mut state, SubmitState::Failed)?;
        }
        submit_result
    }
}

pub(super) fn transition_submit_state<T, E>(
    state: &mut FormState<T, E>,
    next: SubmitState,
) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Validating)
            | (SubmitState::Validating, SubmitState::Submitting)
            | (SubmitState::Validating, SubmitState::Failed)
            | (SubmitState::Submitting, SubmitState::Succeeded)
            | (SubmitState::Submitting, SubmitState::Failed)
            | (SubmitState::Succeeded, SubmitState::Validating)
            | (SubmitState::Failed, SubmitState::Validating)
            | (_, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn failing_keys<E>(field_meta: &BTreeMap<FieldKey, FieldMeta<E>>) -> Vec<FieldKey> {
    field_meta
        .iter()
        .filter_map(|(key, meta)| meta.error.is_some().then_some(*key))
        .collect()
}

pub(super) fn borrow<'a, T>(cell: &'a RefCell<T>, context: &'static str) -> FormResult<Ref<'a, T>> {
    cell.try_borrow().map_err(|_| FormError::StateBusy(context))
}

pub(super) fn borrow_mut<'a, T>(
    cell: &'a RefCell<T>,
    context: &'static str,
) -> FormResult<RefMut<'a, T>> {
    cell.try_borrow_mut()
        .map_err(|_| FormError::StateBusy(context))
}
