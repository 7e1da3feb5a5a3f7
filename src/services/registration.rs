//! Registration of new trainers.

use crate::client::draft::RegistrationDraft;
use crate::client::validation::validate_all;
use crate::domain::document::DocumentKind;
use crate::domain::trainer::NewTrainer;
use crate::domain::types::{
    Availability, CleanText, ExperienceText, LinkedinUrl, PersonName, PhoneNumber, Region,
    Specialty, TrainerEmail,
};
use crate::dto::registration::{RegistrationOutcome, RegistrationSubmission};
use crate::repository::{TrainerReader, TrainerWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{UploadStore, UploadedFile};

pub const REGISTRATION_SUCCESS: &str = "Votre candidature a été envoyée avec succès ! Elle sera examinée par notre équipe.";

/// Converts a validated draft into the domain value, files left unset.
fn to_new_trainer(draft: &RegistrationDraft) -> ServiceResult<NewTrainer> {
    let linkedin_url = match draft.linkedin_url.trim() {
        "" => None,
        url => Some(LinkedinUrl::new(url)?),
    };

    Ok(NewTrainer {
        first_name: PersonName::new(draft.first_name.as_str())?,
        last_name: PersonName::new(draft.last_name.as_str())?,
        email: TrainerEmail::new(draft.email.as_str())?,
        phone: PhoneNumber::new(draft.phone.as_str())?,
        company: CleanText::sanitize(draft.company.as_str()),
        specialties: draft
            .specialties
            .iter()
            .map(|s| Specialty::new(s.as_str()))
            .collect::<Result<_, _>>()?,
        intervention_regions: draft
            .intervention_regions
            .iter()
            .map(|r| Region::new(r.as_str()))
            .collect::<Result<_, _>>()?,
        experience: ExperienceText::new(draft.experience.as_str())?,
        bio: CleanText::sanitize(draft.bio.as_str()),
        availability: Availability::parse_optional(&draft.availability)?,
        hourly_rate: CleanText::sanitize(draft.hourly_rate.as_str()),
        linkedin_url,
        cv_file: String::new(),
        photo_file: None,
        marketing_consent: draft.marketing_consent,
    })
}

fn store_file<S>(store: &S, kind: DocumentKind, file: &UploadedFile) -> ServiceResult<String>
where
    S: UploadStore + ?Sized,
{
    store.save(kind, file).map_err(|err| {
        log::error!("Failed to store {}: {err}", kind.field_name());
        ServiceError::from(err)
    })
}

/// Validates and stores a registration with `pending` status.
///
/// Every form rule is re-checked here. Files are written only once the
/// record is known to be acceptable and are removed again if the insert
/// fails.
pub fn register_trainer<R, S>(
    repo: &R,
    store: &S,
    submission: RegistrationSubmission,
) -> ServiceResult<RegistrationOutcome>
where
    R: TrainerReader + TrainerWriter + ?Sized,
    S: UploadStore + ?Sized,
{
    let RegistrationSubmission { draft, cv, photo } = submission;

    let report = validate_all(&draft);
    if !report.is_valid() {
        log::warn!(
            "Rejected registration with {} invalid field(s)",
            report.errors.len()
        );
        return Err(ServiceError::Validation(report.errors));
    }

    let mut new_trainer = to_new_trainer(&draft)?;

    let existing = repo
        .get_trainer_by_email(&new_trainer.email)
        .map_err(|err| {
            log::error!("Failed to look up trainer email: {err}");
            err
        })?;
    if existing.is_some() {
        return Err(ServiceError::Conflict("email_exists".to_string()));
    }

    let cv = cv.ok_or_else(|| ServiceError::Form("missing cv_file".to_string()))?;
    let cv_path = store_file(store, DocumentKind::Cv, &cv)?;

    let photo_path = match &photo {
        Some(photo) => match store_file(store, DocumentKind::Photo, photo) {
            Ok(path) => Some(path),
            Err(err) => {
                store.discard(&cv_path);
                return Err(err);
            }
        },
        None => None,
    };

    new_trainer.cv_file = cv_path;
    new_trainer.photo_file = photo_path;

    let trainer = match repo.create_trainer(&new_trainer) {
        Ok(trainer) => trainer,
        Err(err) => {
            store.discard(&new_trainer.cv_file);
            if let Some(photo) = &new_trainer.photo_file {
                store.discard(photo);
            }
            if err.is_unique_violation() {
                return Err(ServiceError::Conflict("email_exists".to_string()));
            }
            log::error!("Failed to create trainer: {err}");
            return Err(err.into());
        }
    };

    log::info!("Registered trainer {} (pending review)", trainer.id);

    Ok(RegistrationOutcome {
        trainer_id: trainer.id,
        message: REGISTRATION_SUCCESS.to_string(),
    })
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use chrono::Utc;

    use super::*;
    use crate::client::validation::tests::complete_draft;
    use crate::domain::document::DocumentMeta;
    use crate::domain::trainer::Trainer;
    use crate::domain::types::{TrainerId, TrainerStatus};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::storage::StorageError;

    #[derive(Default)]
    struct RecordingStore {
        saved: RefCell<Vec<String>>,
        discarded: RefCell<Vec<String>>,
        fail_photo: bool,
    }

    impl UploadStore for RecordingStore {
        fn save(&self, kind: DocumentKind, file: &UploadedFile) -> Result<String, StorageError> {
            if self.fail_photo && kind == DocumentKind::Photo {
                return Err(StorageError::TooLarge(kind.max_label()));
            }
            let path = format!("{}/{}", kind.directory(), file.meta.file_name);
            self.saved.borrow_mut().push(path.clone());
            Ok(path)
        }

        fn discard(&self, stored_path: &str) {
            self.discarded.borrow_mut().push(stored_path.to_string());
        }
    }

    fn upload(name: &str, mime: &str) -> UploadedFile {
        UploadedFile {
            meta: DocumentMeta::new(name, 1024, mime),
            path: PathBuf::from(format!("/tmp/{name}")),
        }
    }

    fn submission() -> RegistrationSubmission {
        let mut draft = complete_draft();
        draft.photo_file = Some(DocumentMeta::new("me.png", 1024, "image/png"));
        draft.cv_file = Some(DocumentMeta::new("cv.pdf", 1024, "application/pdf"));
        RegistrationSubmission {
            draft,
            cv: Some(upload("cv.pdf", "application/pdf")),
            photo: Some(upload("me.png", "image/png")),
        }
    }

    fn stored(new_trainer: &NewTrainer) -> Trainer {
        let now = Utc::now().naive_utc();
        Trainer {
            id: TrainerId::new(11).expect("valid trainer id"),
            first_name: new_trainer.first_name.to_string(),
            last_name: new_trainer.last_name.to_string(),
            email: new_trainer.email.to_string(),
            phone: new_trainer.phone.to_string(),
            company: new_trainer.company.to_string(),
            specialties: new_trainer.specialties.iter().map(|s| s.to_string()).collect(),
            intervention_regions: new_trainer
                .intervention_regions
                .iter()
                .map(|r| r.to_string())
                .collect(),
            experience: new_trainer.experience.to_string(),
            bio: new_trainer.bio.to_string(),
            availability: new_trainer.availability,
            hourly_rate: new_trainer.hourly_rate.to_string(),
            linkedin_url: new_trainer.linkedin_url.as_ref().map(|u| u.to_string()),
            cv_file: new_trainer.cv_file.clone(),
            photo_file: new_trainer.photo_file.clone(),
            rgpd_consent: true,
            marketing_consent: new_trainer.marketing_consent,
            status: TrainerStatus::Pending,
            admin_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn registers_pending_trainer_with_files() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_trainer()
            .withf(|t| t.cv_file == "trainer-files/cv/cv.pdf"
                && t.photo_file.as_deref() == Some("trainer-files/photos/me.png"))
            .times(1)
            .returning(|t| Ok(stored(t)));
        let store = RecordingStore::default();

        let outcome = register_trainer(&repo, &store, submission()).expect("registration succeeds");

        assert_eq!(outcome.trainer_id.get(), 11);
        assert_eq!(outcome.message, REGISTRATION_SUCCESS);
        assert_eq!(store.saved.borrow().len(), 2);
        assert!(store.discarded.borrow().is_empty());
    }

    #[test]
    fn invalid_submission_touches_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_email().times(0);
        repo.expect_create_trainer().times(0);
        let store = RecordingStore::default();
        let mut submission = submission();
        submission.draft.rgpd_consent = false;
        submission.draft.experience = "trop court".to_string();

        let result = register_trainer(&repo, &store, submission);

        match result {
            Err(ServiceError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let mut repo = MockRepository::new();
        let existing = submission();
        repo.expect_get_trainer_by_email().returning(move |_| {
            let new_trainer = to_new_trainer(&existing.draft).expect("valid draft");
            Ok(Some(stored(&new_trainer)))
        });
        repo.expect_create_trainer().times(0);
        let store = RecordingStore::default();

        let result = register_trainer(&repo, &store, submission());

        assert!(matches!(result, Err(ServiceError::Conflict(code)) if code == "email_exists"));
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn photo_failure_discards_cv() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_email().returning(|_| Ok(None));
        repo.expect_create_trainer().times(0);
        let store = RecordingStore {
            fail_photo: true,
            ..RecordingStore::default()
        };

        let result = register_trainer(&repo, &store, submission());

        assert!(matches!(result, Err(ServiceError::Storage(_))));
        assert_eq!(*store.discarded.borrow(), vec!["trainer-files/cv/cv.pdf"]);
    }

    #[test]
    fn insert_race_on_email_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_email().returning(|_| Ok(None));
        repo.expect_create_trainer().returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "Unique constraint violation: trainers.email".to_string(),
            ))
        });
        let store = RecordingStore::default();

        let result = register_trainer(&repo, &store, submission());

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(store.discarded.borrow().len(), 2);
    }
}
