use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    trainer::{NewTrainer as DomainNewTrainer, Trainer as DomainTrainer, split_tags},
    types::{Availability, TrainerId, TrainerStatus, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trainers)]
/// Diesel model for [`crate::domain::trainer::Trainer`].
pub struct Trainer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub specialties: String,
    pub intervention_regions: String,
    pub experience: String,
    pub bio: String,
    pub availability: String,
    pub hourly_rate: String,
    pub linkedin_url: Option<String>,
    pub cv_file: String,
    pub photo_file: Option<String>,
    pub rgpd_consent: bool,
    pub marketing_consent: bool,
    pub status: String,
    pub admin_notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trainers)]
/// Insertable form of [`Trainer`]. New rows always start as `pending`.
pub struct NewTrainer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
    pub specialties: String,
    pub intervention_regions: String,
    pub experience: &'a str,
    pub bio: &'a str,
    pub availability: &'a str,
    pub hourly_rate: &'a str,
    pub linkedin_url: Option<&'a str>,
    pub cv_file: &'a str,
    pub photo_file: Option<&'a str>,
    pub rgpd_consent: bool,
    pub marketing_consent: bool,
    pub status: &'a str,
}

impl TryFrom<Trainer> for DomainTrainer {
    type Error = TypeConstraintError;

    fn try_from(trainer: Trainer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TrainerId::new(trainer.id)?,
            first_name: trainer.first_name,
            last_name: trainer.last_name,
            email: trainer.email,
            phone: trainer.phone,
            company: trainer.company,
            specialties: split_tags(&trainer.specialties),
            intervention_regions: split_tags(&trainer.intervention_regions),
            experience: trainer.experience,
            bio: trainer.bio,
            availability: Availability::parse_optional(&trainer.availability)?,
            hourly_rate: trainer.hourly_rate,
            linkedin_url: trainer.linkedin_url.filter(|url| !url.is_empty()),
            cv_file: trainer.cv_file,
            photo_file: trainer.photo_file.filter(|photo| !photo.is_empty()),
            rgpd_consent: trainer.rgpd_consent,
            marketing_consent: trainer.marketing_consent,
            status: trainer.status.parse::<TrainerStatus>()?,
            admin_notes: trainer.admin_notes,
            created_at: trainer.created_at,
            updated_at: trainer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTrainer> for NewTrainer<'a> {
    fn from(trainer: &'a DomainNewTrainer) -> Self {
        Self {
            first_name: trainer.first_name.as_str(),
            last_name: trainer.last_name.as_str(),
            email: trainer.email.as_str(),
            phone: trainer.phone.as_str(),
            company: trainer.company.as_str(),
            specialties: trainer.specialties_text(),
            intervention_regions: trainer.regions_text(),
            experience: trainer.experience.as_str(),
            bio: trainer.bio.as_str(),
            availability: trainer.availability.map(Availability::as_str).unwrap_or(""),
            hourly_rate: trainer.hourly_rate.as_str(),
            linkedin_url: trainer.linkedin_url.as_ref().map(|url| url.as_str()),
            cv_file: trainer.cv_file.as_str(),
            photo_file: trainer.photo_file.as_deref(),
            rgpd_consent: true,
            marketing_consent: trainer.marketing_consent,
            status: TrainerStatus::Pending.as_str(),
        }
    }
}
