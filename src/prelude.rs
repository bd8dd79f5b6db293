pub use crate::form::{
    FieldErrors, FieldKey, FieldLens, FieldView, FormController, FormError, FormModel,
    FormOptions, FormResult, SubmitOutcome, SubmitState, TouchedFields, ValidationError,
};
pub use crate::signup::{
    Gender, InputKind, RulesConfig, RulesConfigError, SignUpController, SignUpError, SignUpField,
    SignUpForm, SignUpRules, SignUpView, SubmissionPayload,
};
pub use crate::widgets::{PasswordInput, Select, SelectOption, TextInput};
