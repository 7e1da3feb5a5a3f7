//! DTOs produced by the registration service.

use serde::{Deserialize, Serialize};

use crate::client::draft::RegistrationDraft;
use crate::domain::types::TrainerId;
use crate::storage::UploadedFile;

/// Acknowledgement returned once a registration is stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub trainer_id: TrainerId,
    pub message: String,
}

/// Registration as received from the multipart form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationSubmission {
    /// Text fields, selections, consents and the metadata of both files.
    pub draft: RegistrationDraft,
    pub cv: Option<UploadedFile>,
    pub photo: Option<UploadedFile>,
}
