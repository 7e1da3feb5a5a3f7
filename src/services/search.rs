//! Read-only services over approved trainers.

use chrono::{Datelike, NaiveDateTime, NaiveTime};

use crate::domain::trainer::{PublicTrainer, TrainerStats};
use crate::domain::types::{TrainerId, TrainerStatus};
use crate::dto::search::{SearchParams, SearchResult};
use crate::pagination::{normalize_page, normalize_page_size, page_links, total_pages};
use crate::repository::{TrainerReader, TrainerSearchQuery};
use crate::services::{ServiceError, ServiceResult};

/// Searches approved trainers by free text and specialty.
///
/// Blank filters match every approved trainer. Contact data is stripped from
/// the returned profiles and stored files are resolved against
/// `uploads_base_url`.
pub fn search_trainers<R>(
    repo: &R,
    params: SearchParams,
    uploads_base_url: &str,
) -> ServiceResult<SearchResult>
where
    R: TrainerReader + ?Sized,
{
    let page = normalize_page(params.page);
    let per_page = normalize_page_size(params.per_page);
    let search_term = params.search_term.trim().to_string();
    let specialty_filter = params.specialty_filter.trim().to_string();

    log::debug!(
        "Searching trainers: term='{search_term}', specialty='{specialty_filter}', page={page}, per_page={per_page}"
    );

    let query = TrainerSearchQuery::new()
        .search(search_term.as_str())
        .specialty(specialty_filter.as_str())
        .paginate(page, per_page);

    let (total, trainers) = repo.search_trainers(query).map_err(|err| {
        log::error!("Failed to search trainers: {err}");
        err
    })?;

    let total_pages = total_pages(total, per_page);
    let trainers: Vec<PublicTrainer> = trainers
        .into_iter()
        .map(|trainer| trainer.into_public(uploads_base_url))
        .collect();

    log::info!(
        "Trainer search returned {} of {total} result(s)",
        trainers.len()
    );

    Ok(SearchResult {
        trainers,
        total,
        page,
        per_page,
        total_pages,
        pages: page_links(total_pages, page),
        search_term,
        specialty_filter,
    })
}

/// Lists every approved trainer, newest first.
pub fn list_all_trainers<R>(
    repo: &R,
    page: Option<i64>,
    per_page: Option<i64>,
    uploads_base_url: &str,
) -> ServiceResult<SearchResult>
where
    R: TrainerReader + ?Sized,
{
    search_trainers(
        repo,
        SearchParams {
            page,
            per_page,
            ..SearchParams::default()
        },
        uploads_base_url,
    )
}

/// Loads the public profile of an approved trainer.
///
/// Unknown, pending and rejected trainers are all reported as not found.
pub fn get_trainer_profile<R>(
    repo: &R,
    trainer_id: i32,
    uploads_base_url: &str,
) -> ServiceResult<PublicTrainer>
where
    R: TrainerReader + ?Sized,
{
    let trainer_id = TrainerId::new(trainer_id).map_err(|_| ServiceError::NotFound)?;

    let trainer = repo
        .get_trainer_by_id(trainer_id)
        .map_err(|err| {
            log::error!("Failed to load trainer {trainer_id}: {err}");
            err
        })?
        .filter(|trainer| trainer.status == TrainerStatus::Approved)
        .ok_or(ServiceError::NotFound)?;

    Ok(trainer.into_public(uploads_base_url))
}

/// First instant of the calendar month containing `now`.
pub fn month_start(now: NaiveDateTime) -> NaiveDateTime {
    let date = now.date();
    date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN)
}

/// Aggregate counters for the public statistics block.
pub fn trainer_stats<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<TrainerStats>
where
    R: TrainerReader + ?Sized,
{
    let stats = repo.trainer_stats(month_start(now)).map_err(|err| {
        log::error!("Failed to compute trainer statistics: {err}");
        err
    })?;

    Ok(stats)
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::trainer::Trainer;
    use crate::domain::types::Availability;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn trainer(id: i32, status: TrainerStatus) -> Trainer {
        let now = Utc::now().naive_utc();
        Trainer {
            id: TrainerId::new(id).expect("valid trainer id"),
            first_name: "Alice".to_string(),
            last_name: "Martin".to_string(),
            email: format!("alice{id}@example.com"),
            phone: "+33612345678".to_string(),
            company: String::new(),
            specialties: vec!["docker".to_string()],
            intervention_regions: vec!["bretagne".to_string()],
            experience: "x".repeat(60),
            bio: String::new(),
            availability: Some(Availability::Flexible),
            hourly_rate: String::new(),
            linkedin_url: None,
            cv_file: "trainer-files/cv/a.pdf".to_string(),
            photo_file: Some("trainer-files/photos/a.png".to_string()),
            rgpd_consent: true,
            marketing_consent: false,
            status,
            admin_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_normalizes_paging_and_builds_result() {
        let mut repo = MockRepository::new();
        repo.expect_search_trainers()
            .withf(|query| {
                query.status == TrainerStatus::Approved
                    && query.term.as_deref() == Some("docker")
                    && query.specialty.is_none()
                    && query
                        .pagination
                        .as_ref()
                        .is_some_and(|p| p.page == 1 && p.per_page == 50)
            })
            .times(1)
            .returning(|_| {
                Ok((
                    75,
                    (1..=50)
                        .map(|id| trainer(id, TrainerStatus::Approved))
                        .collect(),
                ))
            });

        let result = search_trainers(
            &repo,
            SearchParams {
                search_term: " docker ".to_string(),
                specialty_filter: "all".to_string(),
                page: Some(0),
                per_page: Some(500),
            },
            "/uploads",
        )
        .expect("search succeeds");

        assert_eq!(result.total, 75);
        assert_eq!(result.page, 1);
        assert_eq!(result.per_page, 50);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.trainers.len(), 50);
        assert_eq!(result.search_term, "docker");
        assert_eq!(
            result.trainers[0].photo_url.as_deref(),
            Some("/uploads/trainer-files/photos/a.png")
        );
    }

    #[test]
    fn empty_result_has_no_pages() {
        let mut repo = MockRepository::new();
        repo.expect_search_trainers()
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let result = list_all_trainers(&repo, None, None, "/uploads").expect("list succeeds");

        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.per_page, 12);
        assert!(result.pages.is_empty());
    }

    #[test]
    fn search_failure_is_not_an_empty_success() {
        let mut repo = MockRepository::new();
        repo.expect_search_trainers()
            .returning(|_| Err(RepositoryError::ConnectionError("pool exhausted".to_string())));

        let result = list_all_trainers(&repo, None, None, "/uploads");

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn profile_hides_unapproved_trainers() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_id()
            .withf(|id| id.get() == 3)
            .returning(|_| Ok(Some(trainer(3, TrainerStatus::Pending))));

        let result = get_trainer_profile(&repo, 3, "/uploads");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn profile_rejects_invalid_id_without_query() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_id().times(0);

        assert!(matches!(
            get_trainer_profile(&repo, 0, "/uploads"),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn profile_of_approved_trainer_is_public() {
        let mut repo = MockRepository::new();
        repo.expect_get_trainer_by_id()
            .returning(|_| Ok(Some(trainer(5, TrainerStatus::Approved))));

        let profile = get_trainer_profile(&repo, 5, "https://cdn.example.com/")
            .expect("profile is visible");

        assert_eq!(
            profile.cv_url.as_deref(),
            Some("https://cdn.example.com/trainer-files/cv/a.pdf")
        );
    }
}
