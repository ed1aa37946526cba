use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use blog_api_rust::handlers::{blogs, categories, users};
use blog_api_rust::middleware::access;
use blog_api_rust::store::{MemoryStore, RecordStore, SharedStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    let config = blog_api_rust::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Blog API in {:?} mode", config.environment);

    let store: SharedStore = Arc::new(MemoryStore::new());
    if let Err(e) = store.connect().await {
        tracing::error!("store connect failed at startup: {}", e);
    }

    let app = app(store);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Blog API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(category_routes())
        .merge(blog_routes())
        .with_state(store)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn user_routes() -> Router<SharedStore> {
    Router::new().route(
        "/users",
        get(users::user_list)
            .post(users::user_create)
            .patch(users::user_rename)
            .delete(users::user_delete),
    )
}

fn category_routes() -> Router<SharedStore> {
    Router::new()
        .route(
            "/categories",
            get(categories::category_list).post(categories::category_create),
        )
        .route(
            "/categories/:id",
            axum::routing::patch(categories::category_update).delete(categories::category_delete),
        )
}

fn blog_routes() -> Router<SharedStore> {
    Router::new()
        .route("/blogs", get(blogs::blog_list).post(blogs::blog_create))
        .route(
            "/blogs/:id",
            get(blogs::blog_get).patch(blogs::blog_update).delete(blogs::blog_delete),
        )
        // Access gate on the blog resource path only
        .route_layer(axum::middleware::from_fn(access::require_bearer))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Blog API (Rust)",
            "version": version,
            "description": "Users, categories and blogs over a document record store",
            "endpoints": {
                "users": "/users (open)",
                "categories": "/categories[/:id]?userId= (open)",
                "blogs": "/blogs[/:id]?userId=&categoryId= (bearer token required)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(store): axum::extract::State<SharedStore>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
