mod controller;
mod model;
mod payload;
mod rules;
mod view;

#[cfg(test)]
mod tests;

pub use controller::{SignUpController, SubmittedHandler};
pub use model::{
    Gender, InputKind, SignUpField, SignUpForm, SignUpFormConfirmPasswordLens, SignUpFormDobLens,
    SignUpFormEmailLens, SignUpFormFields, SignUpFormGenderLens, SignUpFormNameLens,
    SignUpFormPasswordLens, SignUpFormPhoneLens,
};
pub use payload::SubmissionPayload;
pub use rules::{
    DEFAULT_EMAIL_PATTERN, DEFAULT_PASSWORD_SPECIAL_CHARS, DEFAULT_PHONE_PATTERN, RulesConfig,
    RulesConfigError, SignUpError, SignUpRules,
};
pub use view::SignUpView;
