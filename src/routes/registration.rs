use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, post, web};

use crate::dto::api::MessageBody;
use crate::forms::registration::RegistrationForm;
use crate::repository::DieselRepository;
use crate::routes::{blocking_failure, invalid_nonce, json_ok, service_error_response};
use crate::security::verify_nonce;
use crate::services::registration::register_trainer;
use crate::storage::LocalUploadStore;

const REGISTRATION_FAILURE: (&str, &str) = ("Erreur lors de l'inscription", "server_error");

#[post("/trainers/register")]
pub async fn register(
    session: Session,
    MultipartForm(form): MultipartForm<RegistrationForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalUploadStore>,
) -> HttpResponse {
    if !verify_nonce(&session, form.nonce()) {
        return invalid_nonce();
    }

    // The form owns the temporary files and has to live until they are copied.
    let result = web::block(move || {
        let submission = form.submission();
        register_trainer(repo.get_ref(), store.get_ref(), submission)
    })
    .await;

    match result {
        Ok(Ok(outcome)) => json_ok(MessageBody {
            message: outcome.message,
        }),
        Ok(Err(err)) => service_error_response(&err, REGISTRATION_FAILURE),
        Err(err) => blocking_failure(err),
    }
}
