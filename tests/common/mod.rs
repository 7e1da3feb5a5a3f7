//! Helpers shared by the integration tests.
#![allow(dead_code)]

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use trainer_registry::db::{DbPool, establish_connection_pool};
use trainer_registry::domain::trainer::{NewTrainer, Trainer};
use trainer_registry::domain::types::{
    Availability, CleanText, ExperienceText, PersonName, PhoneNumber, Region, Specialty,
    TrainerEmail, TrainerId, TrainerStatus,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();
        let pool = establish_connection_pool(&url).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Moderation happens outside the service; tests flip the status directly.
    pub fn set_status(&self, id: TrainerId, status: TrainerStatus) {
        use trainer_registry::schema::trainers;

        let mut conn = self.pool.get().expect("get connection");
        diesel::update(trainers::table.find(id.get()))
            .set(trainers::status.eq(status.as_str()))
            .execute(&mut conn)
            .expect("update status");
    }

    pub fn set_created_at(&self, id: TrainerId, created_at: chrono::NaiveDateTime) {
        use trainer_registry::schema::trainers;

        let mut conn = self.pool.get().expect("get connection");
        diesel::update(trainers::table.find(id.get()))
            .set(trainers::created_at.eq(created_at))
            .execute(&mut conn)
            .expect("update created_at");
    }
}

/// A valid registration whose email is derived from `tag`.
pub fn new_trainer(tag: &str, specialties: &[&str], experience: &str) -> NewTrainer {
    NewTrainer {
        first_name: PersonName::new("Alice").unwrap(),
        last_name: PersonName::new("Martin").unwrap(),
        email: TrainerEmail::new(format!("{tag}@example.com")).unwrap(),
        phone: PhoneNumber::new("06 12 34 56 78").unwrap(),
        company: CleanText::default(),
        specialties: specialties
            .iter()
            .map(|s| Specialty::new(*s).unwrap())
            .collect(),
        intervention_regions: vec![Region::new("bretagne").unwrap()],
        experience: ExperienceText::new(format!("{experience} {}", "x".repeat(60))).unwrap(),
        bio: CleanText::default(),
        availability: Some(Availability::Flexible),
        hourly_rate: CleanText::default(),
        linkedin_url: None,
        cv_file: format!("trainer-files/cv/{tag}.pdf"),
        photo_file: None,
        marketing_consent: false,
    }
}

/// Convenience for asserting on stored rows.
pub fn ids(trainers: &[Trainer]) -> Vec<i32> {
    trainers.iter().map(|t| t.id.get()).collect()
}
