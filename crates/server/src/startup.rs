use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};
use service::auth::repository::memory::MemoryUserRepository;
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::catalog::CatalogStore;
use service::review::ReviewManager;
use service::runtime;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    runtime::ensure_env("data").await?;

    let mut cfg = configs::load_default().unwrap_or_default();
    cfg.normalize_and_validate()?;

    // Book catalog file store; seeds an empty catalog when the file is new
    let catalog = CatalogStore::new(&cfg.catalog.path).await?;

    // In-memory user list: registered users last for the process lifetime
    let users = Arc::new(MemoryUserRepository::default());

    let jwt_secret = if cfg.auth.jwt_secret.trim().is_empty() {
        "dev-secret-change-me".to_string()
    } else {
        cfg.auth.jwt_secret.clone()
    };
    let auth_service = Arc::new(AuthService::new(
        users,
        AuthConfig {
            jwt_secret: jwt_secret.clone(),
            token_ttl_secs: cfg.auth.token_ttl_secs,
        },
    ));

    let reviews = Arc::new(ReviewManager::new(Arc::clone(&catalog)));

    let state = auth::ServerState {
        catalog,
        reviews,
        auth_service,
        auth: auth::ServerAuthConfig { jwt_secret },
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, catalog = %cfg.catalog.path, "starting bookstore server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
