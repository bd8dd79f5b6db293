use signup_form::form::{FieldLens, FormModel};

#[derive(Clone, signup_form::form::FormModel)]
struct AccountForm {
    #[form(key = "confirmPassword")]
    confirm_password: String,
    date_of_birth: String,
}

fn main() {
    let fields = AccountForm::fields();
    assert_eq!(fields.confirm_password().key().as_str(), "confirmPassword");
    assert_eq!(fields.date_of_birth().key().as_str(), "date_of_birth");
    let keys = AccountForm::field_keys()
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["confirmPassword", "date_of_birth"]);
}
