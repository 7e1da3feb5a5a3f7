//! Values entered in the registration form.

use serde::{Deserialize, Serialize};

use crate::domain::document::DocumentMeta;

/// Every input of the registration form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    LinkedinUrl,
    Specialties,
    InterventionRegions,
    Availability,
    HourlyRate,
    Experience,
    Bio,
    CvFile,
    PhotoFile,
    RgpdConsent,
    MarketingConsent,
}

impl Field {
    /// Name of the matching form control.
    pub const fn name(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::LinkedinUrl => "linkedin_url",
            Field::Specialties => "specialties",
            Field::InterventionRegions => "intervention_regions",
            Field::Availability => "availability",
            Field::HourlyRate => "hourly_rate",
            Field::Experience => "experience",
            Field::Bio => "bio",
            Field::CvFile => "cv_file",
            Field::PhotoFile => "photo_file",
            Field::RgpdConsent => "rgpd_consent",
            Field::MarketingConsent => "marketing_consent",
        }
    }
}

/// A single user edit, as reported by the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEdit {
    /// New contents of a text input, select or textarea.
    Text(Field, String),
    /// A checkbox inside a multi-value group was (un)checked.
    Toggle {
        field: Field,
        value: String,
        checked: bool,
    },
    /// A file was picked or cleared.
    File(Field, Option<DocumentMeta>),
    /// A single checkbox changed.
    Flag(Field, bool),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Text(field, _)
            | FieldEdit::File(field, _)
            | FieldEdit::Flag(field, _)
            | FieldEdit::Toggle { field, .. } => *field,
        }
    }
}

/// Current contents of the registration form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub linkedin_url: String,
    pub specialties: Vec<String>,
    pub intervention_regions: Vec<String>,
    pub availability: String,
    pub hourly_rate: String,
    pub experience: String,
    pub bio: String,
    pub cv_file: Option<DocumentMeta>,
    pub photo_file: Option<DocumentMeta>,
    pub rgpd_consent: bool,
    pub marketing_consent: bool,
}

impl RegistrationDraft {
    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Company => Some(&mut self.company),
            Field::LinkedinUrl => Some(&mut self.linkedin_url),
            Field::Availability => Some(&mut self.availability),
            Field::HourlyRate => Some(&mut self.hourly_rate),
            Field::Experience => Some(&mut self.experience),
            Field::Bio => Some(&mut self.bio),
            _ => None,
        }
    }

    fn list_mut(&mut self, field: Field) -> Option<&mut Vec<String>> {
        match field {
            Field::Specialties => Some(&mut self.specialties),
            Field::InterventionRegions => Some(&mut self.intervention_regions),
            _ => None,
        }
    }

    /// Applies an edit; returns `false` when the edit does not fit the field.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        match edit {
            FieldEdit::Text(field, value) => match self.text_mut(field) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            FieldEdit::Toggle {
                field,
                value,
                checked,
            } => match self.list_mut(field) {
                Some(list) => {
                    let present = list.iter().any(|item| item == &value);
                    if checked && !present {
                        list.push(value);
                    } else if !checked {
                        list.retain(|item| item != &value);
                    }
                    true
                }
                None => false,
            },
            FieldEdit::File(Field::CvFile, meta) => {
                self.cv_file = meta;
                true
            }
            FieldEdit::File(Field::PhotoFile, meta) => {
                self.photo_file = meta;
                true
            }
            FieldEdit::Flag(Field::RgpdConsent, value) => {
                self.rgpd_consent = value;
                true
            }
            FieldEdit::Flag(Field::MarketingConsent, value) => {
                self.marketing_consent = value;
                true
            }
            FieldEdit::File(..) | FieldEdit::Flag(..) => false,
        }
    }
}
