//! A client-side sign-up form: field state with touched/error tracking, a
//! declarative validation ruleset, and a mocked submit that echoes the
//! collected values after a short delay.

pub mod form;
pub mod prelude;
pub mod signup;
pub mod widgets;

pub use crate::signup::{
    RulesConfig, SignUpController, SignUpError, SignUpField, SignUpForm, SignUpRules, SignUpView,
    SubmissionPayload,
};
