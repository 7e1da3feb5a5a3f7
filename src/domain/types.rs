//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, French phone numbers, bounded free text) so
//! that once a value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use ammonia;
use phonenumber::{Mode, country, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Minimum number of characters in a first or last name.
pub const NAME_MIN_LEN: usize = 2;
/// Inclusive bounds on the experience description length, in characters.
pub const EXPERIENCE_MIN_LEN: usize = 50;
pub const EXPERIENCE_MAX_LEN: usize = 1000;
/// Host fragment every LinkedIn profile URL must contain.
pub const LINKEDIN_HOST: &str = "linkedin.com";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Text length fell outside the accepted range.
    #[error("length {len} is outside {min}..={max}")]
    InvalidLength { len: usize, min: usize, max: usize },
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Returns `true` for characters allowed in a person name: ASCII and
/// Latin-1 letters, spaces, hyphens and apostrophes.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (('\u{C0}'..='\u{FF}').contains(&c) && c != '\u{D7}' && c != '\u{F7}')
        || c.is_whitespace()
        || c == '-'
        || c == '\''
}

/// Checks that the email is well formed without normalizing it.
pub fn is_valid_email(value: &str) -> bool {
    normalize_email(value).is_ok()
}

/// Checks that the value is a dialable French number.
pub fn is_valid_french_phone(value: &str) -> bool {
    normalize_phone_to_e164(value).is_ok()
}

/// Normalizes a French phone number string to E.164 format.
///
/// National (`06 12 34 56 78`) and international (`+33 6…`, `0033 6…`)
/// spellings are accepted; dots, dashes and spaces are ignored.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .collect();
    if cleaned.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed =
        parse(Some(country::Id::FR), &cleaned).map_err(|_| TypeConstraintError::InvalidPhone)?;
    if parsed.code().value() != 33 || !phonenumber::is_valid(&parsed) {
        return Err(TypeConstraintError::InvalidPhone);
    }
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(TrainerId, "Unique identifier for a trainer record.");

/// Implements the usual accessors and conversions for a `String` newtype
/// whose constructor is `new<S: Into<String>>`.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrainerEmail(String);

impl TrainerEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_email(email)?))
    }
}

string_newtype_impls!(TrainerEmail);

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }
}

string_newtype_impls!(NonEmptyString);

/// First or last name of a trainer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Trims the name and checks its length and alphabet.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let inner = NonEmptyString::new(value)?.into_inner();
        if inner.chars().count() < NAME_MIN_LEN {
            return Err(TypeConstraintError::InvalidValue(format!(
                "name must have at least {NAME_MIN_LEN} characters"
            )));
        }
        if !inner.chars().all(is_name_char) {
            return Err(TypeConstraintError::InvalidValue(
                "name contains invalid characters".to_string(),
            ));
        }
        Ok(Self(inner))
    }
}

string_newtype_impls!(PersonName);

/// Normalized phone number wrapper (E.164, French numbering plan).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_phone_to_e164(&value.into())?))
    }
}

string_newtype_impls!(PhoneNumber);

/// Optional LinkedIn profile link.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LinkedinUrl(String);

impl LinkedinUrl {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;
        if !url.as_str().to_lowercase().contains(LINKEDIN_HOST) {
            return Err(TypeConstraintError::InvalidUrl);
        }
        Ok(Self(url.into_inner()))
    }
}

string_newtype_impls!(LinkedinUrl);

/// Free text stripped of markup, possibly empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CleanText(String);

impl CleanText {
    /// Sanitizes HTML and trims the result. Never fails.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Ok(Self::sanitize(value))
    }

    pub fn sanitize<S: Into<String>>(value: S) -> Self {
        Self(ammonia::clean(&value.into()).trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

string_newtype_impls!(CleanText);

/// Sanitized description of professional experience.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExperienceText(String);

impl ExperienceText {
    /// Sanitizes, then checks the trimmed length of what will be stored.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let cleaned = ammonia::clean(&value.into());
        let cleaned = cleaned.trim();
        let len = cleaned.chars().count();
        if len == 0 {
            return Err(TypeConstraintError::EmptyString);
        }
        if !(EXPERIENCE_MIN_LEN..=EXPERIENCE_MAX_LEN).contains(&len) {
            return Err(TypeConstraintError::InvalidLength {
                len,
                min: EXPERIENCE_MIN_LEN,
                max: EXPERIENCE_MAX_LEN,
            });
        }
        Ok(Self(cleaned.to_string()))
    }
}

string_newtype_impls!(ExperienceText);

macro_rules! tag_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty tag free of list delimiters.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?.into_inner();
                if inner.contains(',') {
                    return Err(TypeConstraintError::InvalidValue(
                        "tag cannot contain a comma".to_string(),
                    ));
                }
                Ok(Self(ammonia::clean(&inner)))
            }
        }

        string_newtype_impls!($name);
    };
}

tag_newtype!(Specialty, "Technical domain a trainer teaches (e.g. `cloud`).");
tag_newtype!(Region, "Geographic area a trainer is willing to work in.");

/// Moderation status of a trainer record.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrainerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TrainerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TrainerStatus::Pending => "pending",
            TrainerStatus::Approved => "approved",
            TrainerStatus::Rejected => "rejected",
        }
    }
}

impl Display for TrainerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainerStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TrainerStatus::Pending),
            "approved" => Ok(TrainerStatus::Approved),
            "rejected" => Ok(TrainerStatus::Rejected),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown status `{other}`"
            ))),
        }
    }
}

/// Declared availability of a trainer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    TempsPlein,
    TempsPartiel,
    Ponctuel,
    Weekends,
    Flexible,
}

impl Availability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Availability::TempsPlein => "temps-plein",
            Availability::TempsPartiel => "temps-partiel",
            Availability::Ponctuel => "ponctuel",
            Availability::Weekends => "weekends",
            Availability::Flexible => "flexible",
        }
    }

    /// Human readable label used in the registration summary.
    pub const fn label(self) -> &'static str {
        match self {
            Availability::TempsPlein => "Temps plein",
            Availability::TempsPartiel => "Temps partiel",
            Availability::Ponctuel => "Missions ponctuelles",
            Availability::Weekends => "Weekends uniquement",
            Availability::Flexible => "Flexible",
        }
    }

    /// Parses an optional select value; an empty string means "not given".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, TypeConstraintError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temps-plein" => Ok(Availability::TempsPlein),
            "temps-partiel" => Ok(Availability::TempsPartiel),
            "ponctuel" => Ok(Availability::Ponctuel),
            "weekends" => Ok(Availability::Weekends),
            "flexible" => Ok(Availability::Flexible),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown availability `{other}`"
            ))),
        }
    }
}
