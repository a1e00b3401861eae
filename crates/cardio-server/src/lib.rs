//! Static asset server for the Cardio Risk web client.
//!
//! Serves the built client from a directory, answers `/health`, and returns
//! `index.html` for every other path so client-side routes resolve.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const PORT_VAR: &str = "PORT";
pub const DIST_DIR_VAR: &str = "CARDIO_DIST_DIR";
/// Entry document of the single-page client.
pub const INDEX_FILE: &str = "index.html";

/// Listen port and asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl ServerConfig {
    /// Read `PORT` and `CARDIO_DIST_DIR` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset or empty values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(PORT_VAR).filter(|v| !v.trim().is_empty()) {
            config.port = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {PORT_VAR} value `{raw}`"))?;
        }
        if let Some(dir) = lookup(DIST_DIR_VAR).filter(|v| !v.is_empty()) {
            config.dist_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// All interfaces on the configured port.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Router serving `dist_dir` with the health check and SPA fallback.
pub fn app(dist_dir: &Path) -> Router {
    let assets = ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join(INDEX_FILE)));
    Router::new()
        .route("/health", get(health))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "OK"
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    dist_dir: &Path,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, app(dist_dir))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_env_overrides() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("CARDIO_DIST_DIR", "public")]))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
