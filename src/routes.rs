//! HTTP routes. Each handler forwards to the [`AggregationPipeline`] and
//! returns its list as JSON; failures never change the status code.
//!
//! | Path | Feed |
//! |------|------|
//! | `/api/articles` | general technology news, label "Tech" |
//! | `/api/articles/trending` | top stories, label "Trending" |
//! | `/api/articles/{slug}` | one route per catalog category |
//! | `/api/categories` | catalog listing |
//! | `/health` | liveness, no upstream call |

use crate::catalog::{self, CategoryEntry};
use crate::models::NormalizedArticle;
use crate::pipeline::AggregationPipeline;
use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn latest(State(pipeline): State<AggregationPipeline>) -> Json<Vec<NormalizedArticle>> {
    Json(pipeline.fetch(None).await)
}

async fn trending(State(pipeline): State<AggregationPipeline>) -> Json<Vec<NormalizedArticle>> {
    Json(pipeline.fetch_trending().await)
}

async fn categories() -> Json<&'static [CategoryEntry]> {
    Json(catalog::entries())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the application router.
pub fn router(pipeline: AggregationPipeline, allowed_origin: HeaderValue) -> Router {
    let mut app = Router::new()
        .route("/api/articles", get(latest))
        .route("/api/articles/trending", get(trending))
        .route("/api/categories", get(categories))
        .route("/health", get(health));

    for entry in catalog::entries() {
        let id = entry.id;
        app = app.route(
            &format!("/api/articles/{}", entry.slug),
            get(move |State(pipeline): State<AggregationPipeline>| async move {
                Json(pipeline.fetch(Some(id)).await)
            }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}
