//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::trainer::{NewTrainer, Trainer, TrainerStats};
use crate::domain::types::{TrainerEmail, TrainerId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{TrainerReader, TrainerSearchQuery, TrainerWriter};

mock! {
    pub Repository {}

    impl TrainerReader for Repository {
        fn get_trainer_by_id(&self, id: TrainerId) -> RepositoryResult<Option<Trainer>>;
        fn get_trainer_by_email(&self, email: &TrainerEmail) -> RepositoryResult<Option<Trainer>>;
        fn search_trainers(
            &self,
            query: TrainerSearchQuery,
        ) -> RepositoryResult<(usize, Vec<Trainer>)>;
        fn trainer_stats(&self, month_start: NaiveDateTime) -> RepositoryResult<TrainerStats>;
    }

    impl TrainerWriter for Repository {
        fn create_trainer(&self, new_trainer: &NewTrainer) -> RepositoryResult<Trainer>;
    }
}
