mod binding;
mod controller;
mod validation;


pub use controller::{
    FieldErrors, FieldKey, FieldMeta, FormController, FormError, FormOptions, FormResult,
    FormSnapshot, SubmitOutcome, SubmitState, TouchedFields,
};
pub use binding::FieldView;
pub use signup_form_derive::FormModel;
pub use validation::{FieldLens, FieldValidator, FormModel, ValidationError};
