use serde::{Deserialize, Serialize};

use super::model::SignUpForm;

/// The complete set of field values at the moment of a successful submit.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SubmissionPayload {
    /// The readout shown to the user: pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&SignUpForm> for SubmissionPayload {
    fn from(form: &SignUpForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            dob: form.dob.clone(),
            gender: form.gender.clone(),
            phone: form.phone.clone(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
        }
    }
}
