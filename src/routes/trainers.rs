use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use validator::Validate;

use crate::dto::search::SearchParams;
use crate::forms::FormError;
use crate::forms::search::{ListForm, ProfileForm, SearchForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    blocking_failure, invalid_nonce, json_error, json_ok, service_error_response,
};
use crate::security::verify_nonce;
use crate::services::search::{get_trainer_profile, list_all_trainers, search_trainers};

const SEARCH_FAILURE: (&str, &str) = ("Erreur lors de la recherche", "search_error");
const PROFILE_FAILURE: (&str, &str) = ("Erreur lors du chargement", "profile_error");

fn invalid_form(err: FormError) -> HttpResponse {
    log::warn!("Rejected form: {err}");
    json_error(
        StatusCode::BAD_REQUEST,
        "Paramètres de recherche invalides",
        "validation_error",
    )
}

#[post("/trainers/search")]
pub async fn search(
    session: Session,
    form: web::Form<SearchForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    let form = form.into_inner();
    if !verify_nonce(&session, &form.nonce) {
        return invalid_nonce();
    }
    if let Err(err) = form.validate() {
        return invalid_form(err.into());
    }

    let params = SearchParams::from(form);
    let base_url = server_config.uploads_base_url.clone();

    match web::block(move || search_trainers(repo.get_ref(), params, &base_url)).await {
        Ok(Ok(result)) => json_ok(result),
        Ok(Err(err)) => service_error_response(&err, SEARCH_FAILURE),
        Err(err) => blocking_failure(err),
    }
}

#[post("/trainers/list")]
pub async fn list(
    session: Session,
    form: web::Form<ListForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    if !verify_nonce(&session, &form.nonce) {
        return invalid_nonce();
    }

    let (page, per_page) = (form.page(), form.per_page());
    let base_url = server_config.uploads_base_url.clone();

    match web::block(move || list_all_trainers(repo.get_ref(), page, per_page, &base_url)).await {
        Ok(Ok(result)) => json_ok(result),
        Ok(Err(err)) => service_error_response(&err, SEARCH_FAILURE),
        Err(err) => blocking_failure(err),
    }
}

#[post("/trainers/profile")]
pub async fn profile(
    session: Session,
    form: web::Form<ProfileForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    if !verify_nonce(&session, &form.nonce) {
        return invalid_nonce();
    }
    let trainer_id = match form.trainer_id() {
        Ok(trainer_id) => trainer_id.get(),
        Err(err) => return invalid_form(err),
    };
    let base_url = server_config.uploads_base_url.clone();

    match web::block(move || get_trainer_profile(repo.get_ref(), trainer_id, &base_url)).await {
        Ok(Ok(trainer)) => json_ok(trainer),
        Ok(Err(err)) => service_error_response(&err, PROFILE_FAILURE),
        Err(err) => blocking_failure(err),
    }
}
