#[derive(Clone, signup_form::form::FormModel)]
struct AccountForm {
    #[form(key = "")]
    email: String,
}

fn main() {
    let form = AccountForm {
        email: String::new(),
    };
    drop(form.email);
}
