use std::collections::BTreeMap;
use std::rc::Rc;

use gpui::SharedString;
use tracing::debug;

use super::controller::{
    FieldErrors, FieldKey, FieldValidatorFn, FormController, FormResult, TouchedFields, borrow,
    borrow_mut,
};

pub trait ValidationError: Clone + 'static {
    fn message(&self) -> SharedString;
}

pub trait FieldLens<T>: Copy + 'static {
    type Value: Clone + PartialEq + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + 'static {
    type Fields;

    fn fields() -> Self::Fields;

    /// Every field key of the model, in declaration order.
    fn field_keys() -> &'static [FieldKey];
}

pub trait FieldValidator<T, L, E>
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E>;
}

impl<T, L, E, F> FieldValidator<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a T, &'a L::Value) -> Result<(), E>,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E> {
        (self)(model, value)
    }
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    /// Adds a rule for the lens' field. Rules for one field run in
    /// registration order and the first failure becomes the field's error.
    pub fn register_field_validator<L, V>(&self, lens: L, validator: V) -> FormResult<()>
    where
        L: FieldLens<T>,
        V: FieldValidator<T, L, E> + 'static,
    {
        let key = lens.key();
        let validator = Rc::new(validator);
        let wrapped: FieldValidatorFn<T, E> =
            Rc::new(move |model: &T| validator.validate(model, lens.get(model)));
        let mut validators = borrow_mut(&self.field_validators, "registering field validator")?;
        validators.entry(key).or_default().push(wrapped);
        Ok(())
    }

    /// Re-validates `dependent` whenever `source` changes.
    pub fn register_dependency<S, D>(&self, source: S, dependent: D) -> FormResult<()>
    where
        S: FieldLens<T>,
        D: FieldLens<T>,
    {
        let mut dependencies = borrow_mut(&self.dependencies, "registering dependency")?;
        dependencies
            .entry(source.key())
            .or_default()
            .insert(dependent.key());
        Ok(())
    }

    /// Change handler.
    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = borrow_mut(&self.state, "writing form model")?;
            lens.set(&mut state.model, value);
            let is_dirty = lens.get(&state.model) != lens.get(&state.initial_model);
            state.ensure_meta(key).dirty = is_dirty;
        }
        debug!(field = %key, "field changed");

        if self.options.validate_on_change {
            let _ = self.validate_field_by_key(key)?;
            self.revalidate_dependents(key)?;
        }
        Ok(())
    }

    /// Blur handler.
    pub fn touch<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = borrow_mut(&self.state, "touching field")?;
            state.ensure_meta(key).touched = true;
        }
        debug!(field = %key, "field touched");

        if self.options.validate_on_blur {
            let _ = self.validate_field_by_key(key)?;
        }
        Ok(())
    }

    pub fn validate_field<L>(&self, lens: L) -> FormResult<bool>
    where
        L: FieldLens<T>,
    {
        self.validate_field_by_key(lens.key())
    }

    /// Runs every registered rule against the current model and stores the
    /// outcome for every field. Returns true when no field failed.
    pub fn validate_form(&self) -> FormResult<bool> {
        let model = borrow(&self.state, "reading model for form validation")?
            .model
            .clone();
        let field_validators = borrow(
            &self.field_validators,
            "reading field validators for form validation",
        )?
        .clone();

        let mut field_errors = BTreeMap::<FieldKey, Option<E>>::new();
        for (key, validators) in field_validators {
            field_errors.insert(key, first_failure(&validators, &model));
        }

        let mut state = borrow_mut(&self.state, "applying form validation result")?;
        for (key, meta) in state.field_meta.iter_mut() {
            meta.error = field_errors.remove(key).flatten();
        }
        for (key, error) in field_errors {
            state.ensure_meta(key).error = error;
        }
        let is_valid = state.field_meta.values().all(|meta| meta.error.is_none());
        debug!(is_valid, "form validated");
        Ok(is_valid)
    }

    /// Current message per field, with an entry for every known field.
    pub fn errors(&self) -> FormResult<FieldErrors<E>> {
        Ok(borrow(&self.state, "reading field errors")?
            .field_meta
            .iter()
            .map(|(key, meta)| (*key, meta.error.clone()))
            .collect())
    }

    pub fn touched(&self) -> FormResult<TouchedFields> {
        Ok(borrow(&self.state, "reading touched fields")?
            .field_meta
            .iter()
            .map(|(key, meta)| (*key, meta.touched))
            .collect())
    }

    pub(super) fn validate_field_by_key(&self, key: FieldKey) -> FormResult<bool> {
        let model = borrow(&self.state, "reading model for field validation")?
            .model
            .clone();
        let validators = borrow(
            &self.field_validators,
            "reading field validators for key validation",
        )?
        .get(&key)
        .cloned()
        .unwrap_or_default();

        let error = first_failure(&validators, &model);
        let is_valid = error.is_none();
        borrow_mut(&self.state, "writing field validation result")?
            .ensure_meta(key)
            .error = error;
        debug!(field = %key, is_valid, "field validated");
        Ok(is_valid)
    }

    pub(super) fn revalidate_dependents(&self, source: FieldKey) -> FormResult<()> {
        let dependents = borrow(&self.dependencies, "reading field dependencies")?
            .get(&source)
            .cloned()
            .unwrap_or_default();
        for dependent in dependents {
            let _ = self.validate_field_by_key(dependent)?;
        }
        Ok(())
    }
}

fn first_failure<T, E>(validators: &[FieldValidatorFn<T, E>], model: &T) -> Option<E> {
    validators
        .iter()
        .find_map(|validator| validator(model).err())
}
