use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;

use crate::dto::api::NonceBody;
use crate::repository::DieselRepository;
use crate::routes::{
    INTERNAL_ERROR_MESSAGE, blocking_failure, json_error, json_ok, service_error_response,
};
use crate::security::issue_nonce;
use crate::services::search::trainer_stats;

#[get("/nonce")]
pub async fn nonce(session: Session) -> impl Responder {
    match issue_nonce(&session) {
        Ok(nonce) => json_ok(NonceBody { nonce }),
        Err(err) => {
            log::error!("Failed to store session token: {err}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE,
                "server_error",
            )
        }
    }
}

#[get("/trainers/stats")]
pub async fn stats(repo: web::Data<DieselRepository>) -> HttpResponse {
    let now = Utc::now().naive_utc();
    match web::block(move || trainer_stats(repo.get_ref(), now)).await {
        Ok(Ok(stats)) => json_ok(stats),
        Ok(Err(err)) => service_error_response(
            &err,
            ("Erreur lors du chargement des statistiques", "stats_error"),
        ),
        Err(err) => blocking_failure(err),
    }
}
