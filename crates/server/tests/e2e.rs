use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, auth};
use service::auth::repository::memory::MemoryUserRepository;
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::catalog::{Book, CatalogStore};
use service::review::ReviewManager;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated catalog file per test run
    let catalog_path = format!("target/test-data/{}/books.json", Uuid::new_v4());
    let catalog = CatalogStore::new(&catalog_path).await?;
    catalog
        .save_all(&[Book {
            isbn: "0001".into(),
            title: "Nineteen Eighty-Four".into(),
            author: "George Orwell".into(),
            reviews: Vec::new(),
        }])
        .await?;

    let users = Arc::new(MemoryUserRepository::default());
    let auth_service = Arc::new(AuthService::new(
        users,
        AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_secs: 3600,
        },
    ));
    let reviews = Arc::new(ReviewManager::new(Arc::clone(&catalog)));
    let state = auth::ServerState {
        catalog,
        reviews,
        auth_service,
        auth: auth::ServerAuthConfig {
            jwt_secret: "test-secret".into(),
        },
    };

    let app: Router = routes::build_router(cors(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_register_login_and_review_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // Register
    let res = c
        .post(format!("{}/register", app.base_url))
        .json(&json!({"username": "bob", "password": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // Login
    let res = c
        .post(format!("{}/login", app.base_url))
        .json(&json!({"username": "bob", "password": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Login successful!");
    let token = body["token"].as_str().expect("token").to_string();

    // Create the review
    let res = c
        .put(format!("{}/review/0001", app.base_url))
        .bearer_auth(&token)
        .json(&json!({"review": "great"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["reviews"], json!([{"username": "bob", "review": "great"}]));

    // Replace, not append
    let res = c
        .put(format!("{}/review/0001", app.base_url))
        .bearer_auth(&token)
        .json(&json!({"review": "better"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["reviews"], json!([{"username": "bob", "review": "better"}]));

    // Delete
    let res = c
        .delete(format!("{}/review/0001", app.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["reviews"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn e2e_review_requires_token() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .put(format!("{}/review/0001", app.base_url))
        .json(&json!({"review": "sneaky"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = c
        .put(format!("{}/review/0001", app.base_url))
        .bearer_auth("garbage")
        .json(&json!({"review": "sneaky"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn e2e_root_page_serves_html() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/?isbn=0001", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains("Books for ISBN: 0001"));
    assert!(html.contains("Nineteen Eighty-Four"));
    Ok(())
}
