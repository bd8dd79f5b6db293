#[derive(Clone, signup_form::form::FormModel)]
struct Wrapper<T> {
    value: T,
}

fn main() {
    let wrapper = Wrapper {
        value: String::new(),
    };
    drop(wrapper.value);
}
