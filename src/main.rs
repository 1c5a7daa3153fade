use axum::{
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod store;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up NEO4J_URI, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bakehouse_api=info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = crate::config::config();
    tracing::info!("Starting Bakehouse API in {:?} mode", config.environment);

    // Best-effort constraints; the server serves degraded when the store is down
    store::GraphManager::init_schema().await;

    let app = app();

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Bakehouse API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(order_routes())
        .merge(product_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use handlers::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
}

fn order_routes() -> Router {
    use handlers::orders;

    Router::new()
        // Collection path registered with and without the trailing slash
        .route("/api/orders", post(orders::create))
        .route("/api/orders/", post(orders::create))
        .route("/api/orders/baker/me", get(orders::baker_orders))
        .route("/api/orders/admin/all", get(orders::all_orders))
        .route("/api/orders/:order_id/status", put(orders::update_status))
}

fn product_routes() -> Router {
    use handlers::products;

    Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route("/api/products/", get(products::list).post(products::create))
        .route("/api/products/baker/me", get(products::baker_products))
        .route(
            "/api/products/:product_id",
            put(products::update).delete(products::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Bakehouse API",
        "version": version,
        "description": "Bakery marketplace REST API over a Neo4j graph",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/me (protected)",
            "products": "/api/products/ (GET public, POST baker), /api/products/baker/me, /api/products/:id",
            "orders": "/api/orders/ (customer), /api/orders/baker/me, /api/orders/admin/all, /api/orders/:id/status",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store::GraphManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "healthy",
                "database": "neo4j",
                "timestamp": now
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "database_error": e.to_string(),
                "timestamp": now
            })),
        ),
    }
}
