//! The sign-up validation ruleset.
//!
//! Each field has an ordered list of checks; the first failing check decides
//! the field's message. Patterns that are regional or policy specific (phone
//! numbers, password symbols, name length) come from [`RulesConfig`] rather
//! than being fixed in code.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use chrono::NaiveDate;
use gpui::SharedString;
use regex::Regex;
use serde::Deserialize;

use super::model::{Gender, SignUpField, SignUpForm};
use crate::form::{FieldErrors, ValidationError};

pub const DEFAULT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
/// Searched, not anchored. The trailing boundary is ASCII-only so a letter
/// such as `é` right after the digits still ends the number.
pub const DEFAULT_PHONE_PATTERN: &str = r"(84|0[3|5|7|8|9])+([0-9]{8})(?-u:\b)";
pub const DEFAULT_PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()-_=+{};:,<.>";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub email_pattern: String,
    pub phone_pattern: String,
    pub password_min_len: usize,
    pub password_special_chars: String,
    pub password_require_lowercase: bool,
    pub submit_delay_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            name_min_len: 3,
            name_max_len: 20,
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
            password_min_len: 8,
            password_special_chars: DEFAULT_PASSWORD_SPECIAL_CHARS.to_string(),
            password_require_lowercase: true,
            submit_delay_ms: 500,
        }
    }
}

impl RulesConfig {
    /// Parses a TOML table; keys that are left out keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, RulesConfigError> {
        toml::from_str(source).map_err(|error| RulesConfigError::Parse(error.to_string()))
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RulesConfigError {
    Parse(String),
    InvalidPattern { field: SignUpField, error: String },
    InvalidNameBounds { min: usize, max: usize },
}

impl Display for RulesConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesConfigError::Parse(error) => write!(f, "failed to parse rules config: {error}"),
            RulesConfigError::InvalidPattern { field, error } => {
                write!(f, "invalid {field} pattern: {error}")
            }
            RulesConfigError::InvalidNameBounds { min, max } => {
                write!(f, "name length bounds are inverted: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for RulesConfigError {}

/// One fixed message per failing rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignUpError {
    Required(SignUpField),
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidEmail,
    InvalidDate,
    InvalidGender,
    InvalidPhone,
    WeakPassword { min: usize },
    PasswordMismatch,
}

impl SignUpError {
    pub fn field(&self) -> SignUpField {
        match self {
            SignUpError::Required(field) => *field,
            SignUpError::NameTooShort { .. } | SignUpError::NameTooLong { .. } => {
                SignUpField::Name
            }
            SignUpError::InvalidEmail => SignUpField::Email,
            SignUpError::InvalidDate => SignUpField::Dob,
            SignUpError::InvalidGender => SignUpField::Gender,
            SignUpError::InvalidPhone => SignUpField::Phone,
            SignUpError::WeakPassword { .. } => SignUpField::Password,
            SignUpError::PasswordMismatch => SignUpField::ConfirmPassword,
        }
    }
}

impl Display for SignUpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SignUpError::Required(SignUpField::Name) => f.write_str("Name is required"),
            SignUpError::Required(SignUpField::Email) => f.write_str("Email is required"),
            SignUpError::Required(SignUpField::Dob) => f.write_str("Date of birth is required"),
            SignUpError::Required(SignUpField::Gender) => f.write_str("Gender is required"),
            SignUpError::Required(SignUpField::Phone) => f.write_str("Phone is required"),
            SignUpError::Required(SignUpField::Password) => {
                f.write_str("Please enter your password")
            }
            SignUpError::Required(SignUpField::ConfirmPassword) => {
                f.write_str("Please confirm your password")
            }
            SignUpError::NameTooShort { min } => {
                write!(f, "Name must be at least {min} characters")
            }
            SignUpError::NameTooLong { max } => write!(f, "Name must be at most {max} characters"),
            SignUpError::InvalidEmail => f.write_str("Email must be a valid email"),
            SignUpError::InvalidDate => f.write_str("Date of birth must be a valid date"),
            SignUpError::InvalidGender => {
                let options = Gender::ALL.map(Gender::as_str).join(", ");
                write!(f, "Gender must be one of {options}")
            }
            SignUpError::InvalidPhone => f.write_str("Phone number is not valid"),
            SignUpError::WeakPassword { min } => write!(
                f,
                "Password must contain at least {min} characters, one uppercase, one number and one special case character"
            ),
            SignUpError::PasswordMismatch => f.write_str("Passwords not match."),
        }
    }
}

impl ValidationError for SignUpError {
    fn message(&self) -> SharedString {
        self.to_string().into()
    }
}

/// [`RulesConfig`] with its patterns compiled.
#[derive(Clone, Debug)]
pub struct SignUpRules {
    config: RulesConfig,
    email: Regex,
    phone: Regex,
}

impl Default for SignUpRules {
    fn default() -> Self {
        let config = RulesConfig::default();
        Self {
            email: Regex::new(&config.email_pattern).expect("default email pattern compiles"),
            phone: Regex::new(&config.phone_pattern).expect("default phone pattern compiles"),
            config,
        }
    }
}

impl SignUpRules {
    pub fn compile(config: RulesConfig) -> Result<Self, RulesConfigError> {
        if config.name_min_len > config.name_max_len {
            return Err(RulesConfigError::InvalidNameBounds {
                min: config.name_min_len,
                max: config.name_max_len,
            });
        }
        let email = compile_pattern(SignUpField::Email, &config.email_pattern)?;
        let phone = compile_pattern(SignUpField::Phone, &config.phone_pattern)?;
        Ok(Self {
            config,
            email,
            phone,
        })
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Checks one field against the current form. Only `confirmPassword`
    /// reads another field.
    pub fn check(&self, field: SignUpField, form: &SignUpForm) -> Result<(), SignUpError> {
        let value = form.value(field);
        if value.is_empty() {
            return Err(SignUpError::Required(field));
        }
        match field {
            SignUpField::Name => self.check_name(value),
            SignUpField::Email => self.check_email(value),
            SignUpField::Dob => check_date(value),
            SignUpField::Gender => check_gender(value),
            SignUpField::Phone => self.check_phone(value),
            SignUpField::Password => self.check_password(value),
            SignUpField::ConfirmPassword => {
                if value == form.password {
                    Ok(())
                } else {
                    Err(SignUpError::PasswordMismatch)
                }
            }
        }
    }

    /// Evaluates every field and returns each field's optional message.
    pub fn validate(&self, form: &SignUpForm) -> FieldErrors<SignUpError> {
        SignUpField::ALL
            .into_iter()
            .map(|field| (field.key(), self.check(field, form).err()))
            .collect()
    }

    fn check_name(&self, value: &str) -> Result<(), SignUpError> {
        let len = value.chars().count();
        if len < self.config.name_min_len {
            Err(SignUpError::NameTooShort {
                min: self.config.name_min_len,
            })
        } else if len > self.config.name_max_len {
            Err(SignUpError::NameTooLong {
                max: self.config.name_max_len,
            })
        } else {
            Ok(())
        }
    }

    fn check_email(&self, value: &str) -> Result<(), SignUpError> {
        if self.email.is_match(value) {
            Ok(())
        } else {
            Err(SignUpError::InvalidEmail)
        }
    }

    fn check_phone(&self, value: &str) -> Result<(), SignUpError> {
        if self.phone.is_match(value) {
            Ok(())
        } else {
            Err(SignUpError::InvalidPhone)
        }
    }

    fn check_password(&self, value: &str) -> Result<(), SignUpError> {
        let specials = &self.config.password_special_chars;
        let long_enough = value.chars().count() >= self.config.password_min_len;
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_lower =
            !self.config.password_require_lowercase || value.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_special = value.chars().any(|c| specials.contains(c));

        if long_enough && has_upper && has_lower && has_digit && has_special {
            Ok(())
        } else {
            Err(SignUpError::WeakPassword {
                min: self.config.password_min_len,
            })
        }
    }
}

fn compile_pattern(field: SignUpField, pattern: &str) -> Result<Regex, RulesConfigError> {
    Regex::new(pattern).map_err(|error| RulesConfigError::InvalidPattern {
        field,
        error: error.to_string(),
    })
}

fn check_date(value: &str) -> Result<(), SignUpError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| SignUpError::InvalidDate)
}

fn check_gender(value: &str) -> Result<(), SignUpError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| SignUpError::InvalidGender)
}
