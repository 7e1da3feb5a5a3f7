//! Persistence ports and their Diesel implementation.

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::trainer::{ALL_SPECIALTIES, NewTrainer, Trainer, TrainerStats};
use crate::domain::types::{TrainerEmail, TrainerId, TrainerStatus};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod trainer;

/// Diesel-backed repository shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip for this page; page 0 is treated as page 1.
    /// Saturates at `usize::MAX`.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Filters applied when looking up trainers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSearchQuery {
    pub status: TrainerStatus,
    pub term: Option<String>,
    pub specialty: Option<String>,
    pub pagination: Option<Pagination>,
}

impl Default for TrainerSearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerSearchQuery {
    /// Query over approved trainers with no text filters.
    pub fn new() -> Self {
        Self {
            status: TrainerStatus::Approved,
            term: None,
            specialty: None,
            pagination: None,
        }
    }

    /// Free-text filter; blank input leaves the query unfiltered.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.term = non_blank(term.into());
        self
    }

    /// Specialty filter; blank input and `all` leave the query unfiltered.
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty =
            non_blank(specialty.into()).filter(|s| !s.eq_ignore_ascii_case(ALL_SPECIALTIES));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub trait TrainerReader {
    fn get_trainer_by_id(&self, id: TrainerId) -> RepositoryResult<Option<Trainer>>;
    fn get_trainer_by_email(&self, email: &TrainerEmail) -> RepositoryResult<Option<Trainer>>;
    fn search_trainers(&self, query: TrainerSearchQuery) -> RepositoryResult<(usize, Vec<Trainer>)>;
    /// Counters for the statistics block; `month_start` bounds "this month".
    fn trainer_stats(&self, month_start: NaiveDateTime) -> RepositoryResult<TrainerStats>;
}

pub trait TrainerWriter {
    fn create_trainer(&self, new_trainer: &NewTrainer) -> RepositoryResult<Trainer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        let query = TrainerSearchQuery::new().search("   ").specialty("");
        assert_eq!(query.term, None);
        assert_eq!(query.specialty, None);
        assert_eq!(TrainerSearchQuery::new().specialty("All").specialty, None);
        assert_eq!(query.status, TrainerStatus::Approved);
    }

    #[test]
    fn filters_are_trimmed() {
        let query = TrainerSearchQuery::new()
            .search("  docker ")
            .specialty(" cloud")
            .paginate(2, 12);
        assert_eq!(query.term.as_deref(), Some("docker"));
        assert_eq!(query.specialty.as_deref(), Some("cloud"));
        assert_eq!(query.pagination.map(|p| p.offset()), Some(12));
    }

    #[test]
    fn page_zero_has_no_offset() {
        let pagination = Pagination {
            page: 0,
            per_page: 12,
        };
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 12,
        };
        assert_eq!(pagination.offset(), usize::MAX);
    }
}
