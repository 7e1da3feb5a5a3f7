//! Outcome of sending a registration to the server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::api::{ApiEnvelope, ApiErrorBody};

/// How long the form waits for the server before giving up.
pub const SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_SUCCESS: &str = "Inscription réussie !";
const DEFAULT_FAILURE: &str = "Erreur lors de l'inscription";

/// Successful registration as acknowledged by the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl SubmissionReceipt {
    pub fn user_message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_SUCCESS)
    }
}

/// Why a submission did not go through.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("network error")]
    Network,
    #[error("request timed out")]
    Timeout,
    #[error("server rejected the registration ({code}): {message}")]
    Server { code: String, message: String },
}

impl SubmissionError {
    /// Message safe to show next to the form.
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionError::Network => "Erreur de connexion. Veuillez réessayer.",
            SubmissionError::Timeout => "La requête a expiré. Veuillez réessayer.",
            SubmissionError::Server { message, .. } if !message.is_empty() => message,
            SubmissionError::Server { .. } => DEFAULT_FAILURE,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            SubmissionError::Network => "network_error",
            SubmissionError::Timeout => "timeout",
            SubmissionError::Server { code, .. } => code,
        }
    }
}

/// Interprets the JSON body returned by the registration endpoint.
///
/// Bodies that are not an envelope count as a network failure.
pub fn interpret_response(body: &str) -> Result<SubmissionReceipt, SubmissionError> {
    let envelope: ApiEnvelope<serde_json::Value> =
        serde_json::from_str(body).map_err(|_| SubmissionError::Network)?;

    if envelope.success {
        Ok(serde_json::from_value(envelope.data).unwrap_or_default())
    } else {
        let error: ApiErrorBody = serde_json::from_value(envelope.data).unwrap_or_default();
        Err(SubmissionError::Server {
            code: error.code,
            message: error.message,
        })
    }
}
