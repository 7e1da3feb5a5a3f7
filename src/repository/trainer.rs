//! Repository implementation for trainer records.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::lower_unicode,
    domain::{
        trainer::{NewTrainer, Trainer, TrainerStats, split_tags},
        types::{TrainerEmail, TrainerId, TrainerStatus},
    },
    models::trainer::{NewTrainer as DbNewTrainer, Trainer as DbTrainer},
    repository::{
        DieselRepository, TrainerReader, TrainerSearchQuery, TrainerWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Escape character used in LIKE patterns built from user input.
const LIKE_ESCAPE: char = '\\';

/// Builds a `%term%` pattern in which user-typed wildcards match literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Pattern for matching against `lower_unicode(column)`.
fn folded_like_pattern(term: &str) -> String {
    like_pattern(&term.to_lowercase())
}

fn into_domain(rows: Vec<DbTrainer>) -> RepositoryResult<Vec<Trainer>> {
    rows.into_iter()
        .map(|row| Trainer::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl TrainerReader for DieselRepository {
    fn get_trainer_by_id(&self, id: TrainerId) -> RepositoryResult<Option<Trainer>> {
        use crate::schema::trainers;

        let mut conn = self.conn()?;
        let trainer = trainers::table
            .find(id.get())
            .first::<DbTrainer>(&mut conn)
            .optional()?;

        trainer
            .map(|row| Trainer::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_trainer_by_email(&self, email: &TrainerEmail) -> RepositoryResult<Option<Trainer>> {
        use crate::schema::trainers;

        let mut conn = self.conn()?;
        let trainer = trainers::table
            .filter(trainers::email.eq(email.as_str()))
            .first::<DbTrainer>(&mut conn)
            .optional()?;

        trainer
            .map(|row| Trainer::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn search_trainers(&self, query: TrainerSearchQuery) -> RepositoryResult<(usize, Vec<Trainer>)> {
        use crate::schema::trainers;

        let mut conn = self.conn()?;

        let term_pattern = query.term.as_deref().map(folded_like_pattern);
        let specialty_pattern = query.specialty.as_deref().map(folded_like_pattern);

        let query_builder = || {
            let mut items = trainers::table
                .filter(trainers::status.eq(query.status.as_str()))
                .into_boxed::<Sqlite>();

            if let Some(pattern) = term_pattern.as_deref() {
                items = items.filter(
                    lower_unicode(trainers::first_name)
                        .like(pattern)
                        .escape(LIKE_ESCAPE)
                        .or(lower_unicode(trainers::last_name)
                            .like(pattern)
                            .escape(LIKE_ESCAPE))
                        .or(lower_unicode(trainers::specialties)
                            .like(pattern)
                            .escape(LIKE_ESCAPE))
                        .or(lower_unicode(trainers::bio).like(pattern).escape(LIKE_ESCAPE))
                        .or(lower_unicode(trainers::experience)
                            .like(pattern)
                            .escape(LIKE_ESCAPE))
                        .or(lower_unicode(trainers::company)
                            .like(pattern)
                            .escape(LIKE_ESCAPE)),
                );
            }

            if let Some(pattern) = specialty_pattern.as_deref() {
                items = items.filter(
                    lower_unicode(trainers::specialties)
                        .like(pattern)
                        .escape(LIKE_ESCAPE),
                );
            }

            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((trainers::created_at.desc(), trainers::id.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbTrainer>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }

    fn trainer_stats(&self, month_start: NaiveDateTime) -> RepositoryResult<TrainerStats> {
        use crate::schema::trainers;

        let mut conn = self.conn()?;
        let approved = TrainerStatus::Approved.as_str();

        let total = trainers::table
            .filter(trainers::status.eq(approved))
            .count()
            .get_result::<i64>(&mut conn)?;

        let pending = trainers::table
            .filter(trainers::status.eq(TrainerStatus::Pending.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        let this_month = trainers::table
            .filter(trainers::status.eq(approved))
            .filter(trainers::created_at.ge(month_start))
            .count()
            .get_result::<i64>(&mut conn)?;

        let specialties = trainers::table
            .filter(trainers::status.eq(approved))
            .select(trainers::specialties)
            .load::<String>(&mut conn)?
            .iter()
            .flat_map(|raw| split_tags(raw))
            .map(|tag| tag.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        Ok(TrainerStats {
            total: total as usize,
            pending: pending as usize,
            specialties,
            this_month: this_month as usize,
        })
    }
}

impl TrainerWriter for DieselRepository {
    fn create_trainer(&self, new_trainer: &NewTrainer) -> RepositoryResult<Trainer> {
        use crate::schema::trainers;

        let mut conn = self.conn()?;

        let db_new_trainer: DbNewTrainer = new_trainer.into();

        let created = diesel::insert_into(trainers::table)
            .values(&db_new_trainer)
            .get_result::<DbTrainer>(&mut conn)?;

        Trainer::try_from(created).map_err(RepositoryError::from)
    }
}
