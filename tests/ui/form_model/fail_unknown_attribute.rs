#[derive(Clone, signup_form::form::FormModel)]
struct AccountForm {
    #[form(rename = "emailAddress")]
    email: String,
}

fn main() {
    let form = AccountForm {
        email: String::new(),
    };
    drop(form.email);
}
