// Route definitions

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::AppState;

// Declare submodules for different route groups
mod api;
mod directory;
mod sell;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        // Listings
        .route("/search", post(api::search_listings))
        .route("/brands", get(api::get_brands))
        .route("/navigation", get(api::resolve_navigation))
        .route("/navigation/close", get(api::close_navigation))
        // Static segments take priority over `:id`
        .route("/listings/featured", get(api::get_featured))
        .route("/listings/:id", get(api::get_listing))
        .route("/listings/:id/price-evaluation", get(api::get_price_evaluation))
        .route("/listings/:id/financing", post(api::quote_financing))
        .route("/listings/:id/insurance", post(api::quote_insurance))
        // Dealership directory
        .route("/dealerships", get(directory::list_dealerships))
        .route("/dealerships/locations", get(directory::get_locations))
        .route("/dealerships/:id", get(directory::get_dealership))
        .route("/dealerships/:id/listings", post(directory::dealership_listings))
        // Sell-your-car wizard
        .route("/sell/estimate", post(sell::estimate))
        .route("/sell/submit", post(sell::submit));

    let static_dir = app_state.settings.static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
