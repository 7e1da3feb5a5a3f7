//! HTTP handlers and the helpers that shape their JSON responses.

use actix_web::HttpResponse;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::dto::api::ApiEnvelope;
use crate::services::ServiceError;
use crate::storage::StorageError;

pub mod api;
pub mod registration;
pub mod trainers;

pub const INVALID_NONCE_MESSAGE: &str = "Token de sécurité invalide";
pub const INTERNAL_ERROR_MESSAGE: &str = "Erreur interne du serveur";

/// `200 OK` with `{"success": true, "data": …}`.
pub fn json_ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiEnvelope::ok(data))
}

/// Error envelope with a user-safe message and a machine readable code.
pub fn json_error(status: StatusCode, message: &str, code: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiEnvelope::error(message, code))
}

pub fn invalid_nonce() -> HttpResponse {
    json_error(StatusCode::FORBIDDEN, INVALID_NONCE_MESSAGE, "invalid_nonce")
}

pub fn blocking_failure(err: BlockingError) -> HttpResponse {
    log::error!("Blocking task failed: {err}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE,
        "server_error",
    )
}

/// Maps a service failure to its envelope.
///
/// `failure` is the message and code used for store and internal failures,
/// which differ per endpoint.
pub fn service_error_response(err: &ServiceError, failure: (&str, &str)) -> HttpResponse {
    match err {
        ServiceError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "Formateur introuvable", "not_found")
        }
        ServiceError::Conflict(code) => json_error(
            StatusCode::CONFLICT,
            "Un formateur avec cet email existe déjà",
            code,
        ),
        ServiceError::Validation(errors) => {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(". ");
            json_error(StatusCode::BAD_REQUEST, &message, "validation_error")
        }
        ServiceError::TypeConstraint(_) | ServiceError::Form(_) => json_error(
            StatusCode::BAD_REQUEST,
            "Données du formulaire invalides",
            "validation_error",
        ),
        ServiceError::Storage(StorageError::Io(_)) => {
            log::error!("Upload storage failed: {err}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erreur lors de l'enregistrement des fichiers",
                "upload_error",
            )
        }
        ServiceError::Storage(storage) => json_error(
            StatusCode::BAD_REQUEST,
            &format!("Fichier refusé : {storage}"),
            "upload_error",
        ),
        ServiceError::Repository(_) => {
            log::error!("{}: {err}", failure.0);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, failure.0, failure.1)
        }
    }
}
