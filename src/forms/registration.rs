use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::client::draft::RegistrationDraft;
use crate::domain::document::DocumentMeta;
use crate::dto::registration::RegistrationSubmission;
use crate::forms::checkbox;
use crate::storage::UploadedFile;

#[derive(MultipartForm)]
/// Multipart payload of the registration form.
///
/// Uploads are capped above the per-document limits so oversized files still
/// reach validation and get a proper message.
pub struct RegistrationForm {
    pub nonce: Option<Text<String>>,
    pub first_name: Option<Text<String>>,
    pub last_name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub company: Option<Text<String>>,
    pub linkedin_url: Option<Text<String>>,
    #[multipart(rename = "specialties[]")]
    pub specialties: Vec<Text<String>>,
    #[multipart(rename = "intervention_regions[]")]
    pub intervention_regions: Vec<Text<String>>,
    pub availability: Option<Text<String>>,
    pub hourly_rate: Option<Text<String>>,
    pub experience: Option<Text<String>>,
    pub bio: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub cv_file: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub photo_file: Option<TempFile>,
    pub rgpd_consent: Option<Text<String>>,
    pub marketing_consent: Option<Text<String>>,
}

fn optional_text(value: &Option<Text<String>>) -> String {
    value.as_ref().map(|v| v.0.clone()).unwrap_or_default()
}

fn texts(values: &[Text<String>]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.0.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Describes a parked upload; an empty part means no file was chosen.
fn uploaded_file(file: &Option<TempFile>) -> Option<UploadedFile> {
    let file = file.as_ref()?;
    let file_name = file.file_name.clone().unwrap_or_default();
    if file.size == 0 && file_name.is_empty() {
        return None;
    }
    let mime_type = file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
    Some(UploadedFile {
        meta: DocumentMeta::new(file_name, file.size as u64, mime_type),
        path: file.file.path().to_path_buf(),
    })
}

impl RegistrationForm {
    pub fn nonce(&self) -> &str {
        self.nonce.as_ref().map(|n| n.0.as_str()).unwrap_or_default()
    }

    /// Collects the submitted values.
    ///
    /// The returned paths point at temporary files owned by `self`, which must
    /// outlive the submission.
    pub fn submission(&self) -> RegistrationSubmission {
        let cv = uploaded_file(&self.cv_file);
        let photo = uploaded_file(&self.photo_file);

        let draft = RegistrationDraft {
            first_name: optional_text(&self.first_name),
            last_name: optional_text(&self.last_name),
            email: optional_text(&self.email),
            phone: optional_text(&self.phone),
            company: optional_text(&self.company),
            linkedin_url: optional_text(&self.linkedin_url),
            specialties: texts(&self.specialties),
            intervention_regions: texts(&self.intervention_regions),
            availability: optional_text(&self.availability),
            hourly_rate: optional_text(&self.hourly_rate),
            experience: optional_text(&self.experience),
            bio: optional_text(&self.bio),
            cv_file: cv.as_ref().map(|f| f.meta.clone()),
            photo_file: photo.as_ref().map(|f| f.meta.clone()),
            rgpd_consent: checkbox(self.rgpd_consent.as_ref().map(|v| v.0.as_str())),
            marketing_consent: checkbox(self.marketing_consent.as_ref().map(|v| v.0.as_str())),
        };

        RegistrationSubmission { draft, cv, photo }
    }
}
