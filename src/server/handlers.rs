//! Request handlers.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::stars::populate;

use super::assets;
use super::templates;
use super::AppState;

/// Landing page: the base document populated with a fresh starfield.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let page = templates::index_page(&state.settings.site);

    let stars = &state.settings.stars;
    let html = match stars.seed {
        Some(seed) => populate(&page, stars, &mut StdRng::seed_from_u64(seed)),
        None => populate(&page, stars, &mut rand::rng()),
    };

    Html(html)
}

/// Serve CSS.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::CSS)
}

/// Status API: the effective settings, for quick inspection.
pub async fn api_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let settings = &state.settings;
    Json(serde_json::json!({
        "site": {
            "title": settings.site.title,
        },
        "stars": {
            "count": settings.stars.count,
            "container_id": settings.stars.container_id,
            "seeded": settings.stars.seed.is_some(),
        },
    }))
}
