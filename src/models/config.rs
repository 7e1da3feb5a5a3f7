//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Key material for the session cookie; at least 64 bytes.
    pub secret: String,
    /// Directory where uploaded CVs and photos are stored.
    pub upload_dir: String,
    /// Public URL prefix under which `upload_dir` is served.
    pub uploads_base_url: String,
}
