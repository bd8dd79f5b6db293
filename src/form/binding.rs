use gpui::SharedString;

use super::controller::{FieldKey, FormController, FormResult, borrow};
use super::validation::{FieldLens, FormModel, ValidationError};

/// Presentation-ready state of one field: what to show in the input and the
/// message to show beneath it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldView<V> {
    pub key: FieldKey,
    pub value: V,
    pub touched: bool,
    pub error: Option<SharedString>,
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    /// The field's message, but only once the field has been touched.
    pub fn field_error_for_display<L>(&self, lens: L) -> FormResult<Option<SharedString>>
    where
        L: FieldLens<T>,
    {
        self.display_error_message(lens.key())
    }

    pub fn field_view<L>(&self, lens: L) -> FormResult<FieldView<L::Value>>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        let (value, touched) = {
            let state = borrow(&self.state, "reading field for binding")?;
            let touched = state.field_meta.get(&key).is_some_and(|meta| meta.touched);
            (lens.get(&state.model).clone(), touched)
        };
        Ok(FieldView {
            key,
            value,
            touched,
            error: self.display_error_message(key)?,
        })
    }

    fn display_error_message(&self, key: FieldKey) -> FormResult<Option<SharedString>> {
        let state = borrow(&self.state, "reading display error message")?;
        let Some(meta) = state.field_meta.get(&key) else {
            return Ok(None);
        };
        if !meta.touched {
            return Ok(None);
        }
        Ok(meta.error.as_ref().map(ValidationError::message))
    }
}
