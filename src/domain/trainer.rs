use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Availability, CleanText, ExperienceText, LinkedinUrl, PersonName, PhoneNumber, Region,
    Specialty, TrainerEmail, TrainerId, TrainerStatus,
};

/// Separator used when multi-value fields are stored as text.
pub const TAG_DELIMITER: &str = ", ";
/// Specialty filter value meaning "every specialty".
pub const ALL_SPECIALTIES: &str = "all";

/// Splits a delimited column back into its tags, skipping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Persisted trainer profile, including private contact data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Trainer {
    pub id: TrainerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub specialties: Vec<String>,
    pub intervention_regions: Vec<String>,
    pub experience: String,
    pub bio: String,
    pub availability: Option<Availability>,
    pub hourly_rate: String,
    pub linkedin_url: Option<String>,
    pub cv_file: String,
    pub photo_file: Option<String>,
    pub rgpd_consent: bool,
    pub marketing_consent: bool,
    pub status: TrainerStatus,
    pub admin_notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Trainer profile as exposed to visitors: no email, no phone, files resolved
/// to URLs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PublicTrainer {
    pub id: TrainerId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub specialties: Vec<String>,
    pub intervention_regions: Vec<String>,
    pub experience: String,
    pub bio: String,
    pub availability: Option<Availability>,
    pub hourly_rate: String,
    pub linkedin_url: Option<String>,
    pub cv_url: Option<String>,
    pub photo_url: Option<String>,
    pub status: TrainerStatus,
    pub created_at: NaiveDateTime,
}

/// Joins an upload base URL and a stored relative path.
pub fn resolve_file_url(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base_url.trim_end_matches('/'), path))
}

impl Trainer {
    /// Drops private contact data and resolves file references.
    pub fn into_public(self, uploads_base_url: &str) -> PublicTrainer {
        PublicTrainer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            specialties: self.specialties,
            intervention_regions: self.intervention_regions,
            experience: self.experience,
            bio: self.bio,
            availability: self.availability,
            hourly_rate: self.hourly_rate,
            linkedin_url: self.linkedin_url,
            cv_url: resolve_file_url(uploads_base_url, &self.cv_file),
            photo_url: self
                .photo_file
                .as_deref()
                .and_then(|photo| resolve_file_url(uploads_base_url, photo)),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Fully validated registration ready to be persisted with `pending` status.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTrainer {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: TrainerEmail,
    pub phone: PhoneNumber,
    pub company: CleanText,
    pub specialties: Vec<Specialty>,
    pub intervention_regions: Vec<Region>,
    pub experience: ExperienceText,
    pub bio: CleanText,
    pub availability: Option<Availability>,
    pub hourly_rate: CleanText,
    pub linkedin_url: Option<LinkedinUrl>,
    pub cv_file: String,
    pub photo_file: Option<String>,
    pub marketing_consent: bool,
}

impl NewTrainer {
    /// Specialties encoded for storage.
    pub fn specialties_text(&self) -> String {
        join_tags(self.specialties.iter().map(|s| s.as_str()))
    }

    /// Intervention regions encoded for storage.
    pub fn regions_text(&self) -> String {
        join_tags(self.intervention_regions.iter().map(|r| r.as_str()))
    }
}

fn join_tags<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.collect::<Vec<_>>().join(TAG_DELIMITER)
}

/// Aggregate counters shown on the public statistics block.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainerStats {
    pub total: usize,
    pub pending: usize,
    pub specialties: usize,
    pub this_month: usize,
}
