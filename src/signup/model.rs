use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::form::{FieldKey, FormError, FormModel};

/// Values held by the sign-up form. Every field is the raw string the input
/// produced; `dob` is the `YYYY-MM-DD` value of a date input.
#[derive(Clone, Debug, Default, Eq, PartialEq, FormModel)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub password: String,
    #[form(key = "confirmPassword")]
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::Name => &self.name,
            SignUpField::Email => &self.email,
            SignUpField::Dob => &self.dob,
            SignUpField::Gender => &self.gender,
            SignUpField::Phone => &self.phone,
            SignUpField::Password => &self.password,
            SignUpField::ConfirmPassword => &self.confirm_password,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SignUpField {
    Name,
    Email,
    Dob,
    Gender,
    Phone,
    Password,
    ConfirmPassword,
}

/// How a field is entered, which decides the input the view draws.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    Date,
    Select,
    Password,
}

impl SignUpField {
    pub const ALL: [SignUpField; 7] = [
        SignUpField::Name,
        SignUpField::Email,
        SignUpField::Dob,
        SignUpField::Gender,
        SignUpField::Phone,
        SignUpField::Password,
        SignUpField::ConfirmPassword,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SignUpField::Name => "name",
            SignUpField::Email => "email",
            SignUpField::Dob => "dob",
            SignUpField::Gender => "gender",
            SignUpField::Phone => "phone",
            SignUpField::Password => "password",
            SignUpField::ConfirmPassword => "confirmPassword",
        }
    }

    pub const fn key(self) -> FieldKey {
        FieldKey::new(self.as_str())
    }

    pub const fn label(self) -> &'static str {
        match self {
            SignUpField::Name => "Name",
            SignUpField::Email => "Email",
            SignUpField::Dob => "Date of birth",
            SignUpField::Gender => "Gender",
            SignUpField::Phone => "Phone",
            SignUpField::Password => "Password",
            SignUpField::ConfirmPassword => "Confirm password",
        }
    }

    pub const fn input_kind(self) -> InputKind {
        match self {
            SignUpField::Name | SignUpField::Phone => InputKind::Text,
            SignUpField::Email => InputKind::Email,
            SignUpField::Dob => InputKind::Date,
            SignUpField::Gender => InputKind::Select,
            SignUpField::Password | SignUpField::ConfirmPassword => InputKind::Password,
        }
    }
}

impl Display for SignUpField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignUpField {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SignUpField::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| FormError::UnknownField(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gender {
    Male,
    Female,
    None,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::None];

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::None => "None",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == value)
            .ok_or(())
    }
}
