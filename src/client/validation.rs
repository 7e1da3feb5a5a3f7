//! Per-step validation of the registration form.
//!
//! Every rule of a step is evaluated and all violations are collected in
//! field order, so the caller can display the whole list at once. The same
//! rules run on the server before a registration is persisted.

use serde::{Deserialize, Serialize};

use crate::client::draft::{Field, RegistrationDraft};
use crate::domain::document::{DocumentKind, DocumentMeta, format_file_size};
use crate::domain::types::{
    EXPERIENCE_MAX_LEN, EXPERIENCE_MIN_LEN, LINKEDIN_HOST, NAME_MIN_LEN, is_name_char,
    is_valid_email, is_valid_french_phone,
};

/// Number of specialties above which a non-blocking warning is shown.
pub const SPECIALTY_SOFT_LIMIT: usize = 5;

/// The four pages of the registration form.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Personal,
    Expertise,
    Documents,
    Consent,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Personal, Step::Expertise, Step::Documents, Step::Consent];

    /// One-based position shown in the progress bar.
    pub const fn index(self) -> usize {
        match self {
            Step::Personal => 1,
            Step::Expertise => 2,
            Step::Documents => 3,
            Step::Consent => 4,
        }
    }

    pub const fn next(self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Expertise),
            Step::Expertise => Some(Step::Documents),
            Step::Documents => Some(Step::Consent),
            Step::Consent => None,
        }
    }

    pub const fn previous(self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Expertise => Some(Step::Personal),
            Step::Documents => Some(Step::Expertise),
            Step::Consent => Some(Step::Documents),
        }
    }

    /// Step on which a field is entered.
    pub const fn of(field: Field) -> Step {
        match field {
            Field::FirstName
            | Field::LastName
            | Field::Email
            | Field::Phone
            | Field::Company
            | Field::LinkedinUrl => Step::Personal,
            Field::Specialties
            | Field::InterventionRegions
            | Field::Availability
            | Field::HourlyRate
            | Field::Experience
            | Field::Bio => Step::Expertise,
            Field::CvFile | Field::PhotoFile => Step::Documents,
            Field::RgpdConsent | Field::MarketingConsent => Step::Consent,
        }
    }
}

/// Category of a validation failure.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    TooShort,
    TooLong,
    InvalidFormat,
    TooLarge,
    UnsupportedType,
    ConsentRequired,
}

/// A blocking problem with one field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// A non-blocking remark about one field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: Field,
    pub message: String,
}

/// Outcome of validating one step.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepReport {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: Field, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, kind, message));
    }

    fn merge(&mut self, other: StepReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validates the fields of a single step.
pub fn validate_step(step: Step, draft: &RegistrationDraft) -> StepReport {
    match step {
        Step::Personal => validate_personal(draft),
        Step::Expertise => validate_expertise(draft),
        Step::Documents => validate_documents(draft),
        Step::Consent => validate_consent(draft),
    }
}

/// Validates every step in order.
pub fn validate_all(draft: &RegistrationDraft) -> StepReport {
    let mut report = StepReport::default();
    for step in Step::ALL {
        report.merge(validate_step(step, draft));
    }
    report
}

/// Advisory check of a single field, used while the user types.
pub fn validate_field(field: Field, draft: &RegistrationDraft) -> StepReport {
    let report = validate_step(Step::of(field), draft);
    StepReport {
        errors: report
            .errors
            .into_iter()
            .filter(|error| error.field == field)
            .collect(),
        warnings: report
            .warnings
            .into_iter()
            .filter(|warning| warning.field == field)
            .collect(),
    }
}

fn check_name(report: &mut StepReport, field: Field, value: &str, label: &str) {
    let value = value.trim();
    if value.is_empty() {
        report.error(field, ErrorKind::Required, format!("Le {label} est obligatoire"));
    } else if value.chars().count() < NAME_MIN_LEN {
        report.error(
            field,
            ErrorKind::TooShort,
            format!("Le {label} doit contenir au moins {NAME_MIN_LEN} caractères"),
        );
    } else if !value.chars().all(is_name_char) {
        report.error(
            field,
            ErrorKind::InvalidFormat,
            format!("Le {label} contient des caractères non autorisés"),
        );
    }
}

fn validate_personal(draft: &RegistrationDraft) -> StepReport {
    let mut report = StepReport::default();

    check_name(&mut report, Field::FirstName, &draft.first_name, "prénom");
    check_name(&mut report, Field::LastName, &draft.last_name, "nom");

    let email = draft.email.trim();
    if email.is_empty() {
        report.error(
            Field::Email,
            ErrorKind::Required,
            "L'adresse email est obligatoire",
        );
    } else if !is_valid_email(email) {
        report.error(Field::Email, ErrorKind::InvalidFormat, "Format d'email invalide");
    }

    let phone = draft.phone.trim();
    if phone.is_empty() {
        report.error(
            Field::Phone,
            ErrorKind::Required,
            "Le numéro de téléphone est obligatoire",
        );
    } else if !is_valid_french_phone(phone) {
        report.error(
            Field::Phone,
            ErrorKind::InvalidFormat,
            "Format de téléphone invalide (format français attendu)",
        );
    }

    let linkedin = draft.linkedin_url.trim();
    if !linkedin.is_empty() && !linkedin.to_lowercase().contains(LINKEDIN_HOST) {
        report.error(
            Field::LinkedinUrl,
            ErrorKind::InvalidFormat,
            format!("URL LinkedIn invalide (doit contenir {LINKEDIN_HOST})"),
        );
    }

    report
}

fn validate_expertise(draft: &RegistrationDraft) -> StepReport {
    let mut report = StepReport::default();

    if draft.specialties.is_empty() {
        report.error(
            Field::Specialties,
            ErrorKind::Required,
            "Sélectionnez au moins une spécialité",
        );
    } else if draft.specialties.len() > SPECIALTY_SOFT_LIMIT {
        report.warnings.push(FieldWarning {
            field: Field::Specialties,
            message: format!("Maximum {SPECIALTY_SOFT_LIMIT} spécialités recommandées"),
        });
    }

    if draft.intervention_regions.is_empty() {
        report.error(
            Field::InterventionRegions,
            ErrorKind::Required,
            "Sélectionnez au moins une zone d'intervention",
        );
    }

    let experience = draft.experience.trim();
    let len = experience.chars().count();
    if len == 0 {
        report.error(
            Field::Experience,
            ErrorKind::Required,
            "Description de l'expérience obligatoire",
        );
    } else if len < EXPERIENCE_MIN_LEN {
        report.error(
            Field::Experience,
            ErrorKind::TooShort,
            format!("Description trop courte ({len}/{EXPERIENCE_MIN_LEN} caractères minimum)"),
        );
    } else if len > EXPERIENCE_MAX_LEN {
        report.error(
            Field::Experience,
            ErrorKind::TooLong,
            format!("Description trop longue ({len}/{EXPERIENCE_MAX_LEN} caractères maximum)"),
        );
    }

    report
}

fn check_document(report: &mut StepReport, kind: DocumentKind, meta: &DocumentMeta) {
    let (field, too_large, unsupported) = match kind {
        DocumentKind::Cv => (
            Field::CvFile,
            "CV trop volumineux",
            "Format de CV non supporté. Utilisez PDF, DOC ou DOCX",
        ),
        DocumentKind::Photo => (
            Field::PhotoFile,
            "Photo trop volumineuse",
            "Format de photo non supporté. Utilisez JPG, PNG ou GIF",
        ),
    };

    if meta.size > kind.max_bytes() {
        report.error(
            field,
            ErrorKind::TooLarge,
            format!(
                "{too_large} ({}). Maximum: {}",
                format_file_size(meta.size),
                kind.max_label()
            ),
        );
    }
    if !kind.accepts_mime(&meta.mime_type) {
        report.error(field, ErrorKind::UnsupportedType, unsupported);
    }
}

fn validate_documents(draft: &RegistrationDraft) -> StepReport {
    let mut report = StepReport::default();

    match &draft.cv_file {
        None => report.error(Field::CvFile, ErrorKind::Required, "Le CV est obligatoire"),
        Some(cv) => check_document(&mut report, DocumentKind::Cv, cv),
    }
    if let Some(photo) = &draft.photo_file {
        check_document(&mut report, DocumentKind::Photo, photo);
    }

    report
}

fn validate_consent(draft: &RegistrationDraft) -> StepReport {
    let mut report = StepReport::default();
    if !draft.rgpd_consent {
        report.error(
            Field::RgpdConsent,
            ErrorKind::ConsentRequired,
            "Le consentement RGPD est obligatoire",
        );
    }
    report
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    pub(crate) fn complete_draft() -> RegistrationDraft {
        RegistrationDraft {
            first_name: "Éloïse".to_string(),
            last_name: "Durand-Martin".to_string(),
            email: "eloise@example.fr".to_string(),
            phone: "06 12 34 56 78".to_string(),
            company: "Formations ED".to_string(),
            linkedin_url: "https://www.linkedin.com/in/edurand".to_string(),
            specialties: vec!["cloud".to_string(), "devops".to_string()],
            intervention_regions: vec![
                "ile-de-france".to_string(),
                "bretagne".to_string(),
                "normandie".to_string(),
            ],
            availability: "flexible".to_string(),
            hourly_rate: "90€/h".to_string(),
            experience: "e".repeat(EXPERIENCE_MIN_LEN),
            bio: String::new(),
            cv_file: Some(DocumentMeta::new("cv.pdf", MIB, "application/pdf")),
            photo_file: None,
            rgpd_consent: true,
            marketing_consent: false,
        }
    }

    #[test]
    fn complete_draft_passes_every_step() {
        assert!(validate_all(&complete_draft()).is_valid());
    }

    #[test]
    fn personal_step_collects_every_error() {
        let draft = RegistrationDraft {
            first_name: "J".to_string(),
            last_name: "R2D2".to_string(),
            email: "nope".to_string(),
            phone: String::new(),
            linkedin_url: "https://example.com/me".to_string(),
            ..RegistrationDraft::default()
        };
        let report = validate_step(Step::Personal, &draft);
        let kinds: Vec<_> = report.errors.iter().map(|e| (e.field, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Field::FirstName, ErrorKind::TooShort),
                (Field::LastName, ErrorKind::InvalidFormat),
                (Field::Email, ErrorKind::InvalidFormat),
                (Field::Phone, ErrorKind::Required),
                (Field::LinkedinUrl, ErrorKind::InvalidFormat),
            ]
        );
    }

    #[test]
    fn linkedin_is_optional() {
        let draft = RegistrationDraft {
            linkedin_url: "  ".to_string(),
            ..complete_draft()
        };
        assert!(validate_step(Step::Personal, &draft).is_valid());
    }

    #[test]
    fn minimal_expertise_passes() {
        let report = validate_step(Step::Expertise, &complete_draft());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn many_specialties_only_warn() {
        let draft = RegistrationDraft {
            specialties: (0..6).map(|i| format!("s{i}")).collect(),
            ..complete_draft()
        };
        let report = validate_step(Step::Expertise, &draft);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, Field::Specialties);
    }

    #[test]
    fn experience_length_is_counted_in_characters() {
        let draft = RegistrationDraft {
            experience: format!("  {}  ", "é".repeat(EXPERIENCE_MIN_LEN - 1)),
            ..complete_draft()
        };
        let report = validate_step(Step::Expertise, &draft);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::TooShort);
        assert!(report.errors[0].message.contains("49/50"));

        let draft = RegistrationDraft {
            experience: "a".repeat(EXPERIENCE_MAX_LEN + 1),
            ..complete_draft()
        };
        assert_eq!(
            validate_step(Step::Expertise, &draft).errors[0].kind,
            ErrorKind::TooLong
        );
    }

    #[test]
    fn oversized_cv_reports_ceiling() {
        let draft = RegistrationDraft {
            cv_file: Some(DocumentMeta::new("cv.pdf", 6 * MIB, "application/pdf")),
            ..complete_draft()
        };
        let report = validate_step(Step::Documents, &draft);
        assert_eq!(report.errors.len(), 1);
        let error = &report.errors[0];
        assert_eq!(error.field, Field::CvFile);
        assert_eq!(error.kind, ErrorKind::TooLarge);
        assert!(error.message.contains("5MB"));
    }

    #[test]
    fn size_and_type_are_both_reported() {
        let draft = RegistrationDraft {
            photo_file: Some(DocumentMeta::new("me.bmp", 3 * MIB, "image/bmp")),
            ..complete_draft()
        };
        let report = validate_step(Step::Documents, &draft);
        let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::TooLarge, ErrorKind::UnsupportedType]);
        assert!(report.errors.iter().all(|e| e.field == Field::PhotoFile));
    }

    #[test]
    fn missing_cv_is_required() {
        let draft = RegistrationDraft {
            cv_file: None,
            ..complete_draft()
        };
        let report = validate_step(Step::Documents, &draft);
        assert_eq!(report.errors[0].kind, ErrorKind::Required);
    }

    #[test]
    fn consent_is_mandatory() {
        let draft = RegistrationDraft {
            rgpd_consent: false,
            marketing_consent: true,
            ..complete_draft()
        };
        let report = validate_step(Step::Consent, &draft);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::ConsentRequired);
    }

    #[test]
    fn validation_is_idempotent() {
        let draft = RegistrationDraft {
            first_name: String::new(),
            ..complete_draft()
        };
        for step in Step::ALL {
            assert_eq!(validate_step(step, &draft), validate_step(step, &draft));
        }
    }

    #[test]
    fn field_validation_filters_step_report() {
        let draft = RegistrationDraft {
            email: "bad".to_string(),
            phone: String::new(),
            ..complete_draft()
        };
        let report = validate_field(Field::Email, &draft);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, Field::Email);
    }

    #[test]
    fn step_navigation_is_bounded() {
        assert_eq!(Step::Personal.previous(), None);
        assert_eq!(Step::Consent.next(), None);
        assert_eq!(Step::of(Field::PhotoFile), Step::Documents);
        assert_eq!(Step::Consent.index(), 4);
    }
}
