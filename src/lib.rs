#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_multipart::form::MultipartFormConfig;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::error::InternalError;
#[cfg(feature = "server")]
use actix_web::http::StatusCode;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::storage::LocalUploadStore;

pub mod client;
pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
pub mod storage;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod security;

/// Upper bound for a whole registration request (both files plus fields).
#[cfg(feature = "server")]
pub const MAX_REQUEST_BYTES: usize = 25 * 1024 * 1024;

/// Registers every route and shared extractor configuration on an app.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected form payload: {err}");
        let response = routes::json_error(
            StatusCode::BAD_REQUEST,
            "Paramètres invalides",
            "validation_error",
        );
        InternalError::from_response(err, response).into()
    }))
    .app_data(
        MultipartFormConfig::default()
            .total_limit(MAX_REQUEST_BYTES)
            .error_handler(|err, _req| {
                log::warn!("Rejected multipart payload: {err}");
                let response = routes::json_error(
                    StatusCode::BAD_REQUEST,
                    "Erreur lors du téléchargement des fichiers",
                    "upload_error",
                );
                InternalError::from_response(err, response).into()
            }),
    )
    .service(
        web::scope("/api")
            .service(routes::api::nonce)
            .service(routes::api::stats)
            .service(routes::trainers::search)
            .service(routes::trainers::list)
            .service(routes::trainers::profile)
            .service(routes::registration::register),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    std::fs::create_dir_all(&server_config.upload_dir)?;
    let store = LocalUploadStore::new(&server_config.upload_dir);

    // Key for the session cookie carrying the anti-forgery token.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting trainer registry on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .service(Files::new("/uploads", &server_config.upload_dir))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
