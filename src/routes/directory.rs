// Handlers for the dealership directory

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    dealerships,
    error::{AppError, AppResult},
    models::{Dealership, FilterCriteria, Listing, SearchResponse},
    AppState,
};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct DirectoryQuery {
    q: String,
    location: String,
}

pub async fn list_dealerships(
    State(app_state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Json<Vec<Arc<Dealership>>> {
    tracing::info!("API call: list_dealerships q={:?} location={:?}", query.q, query.location);
    let found = dealerships::search_dealerships(app_state.catalog.dealerships(), &query.q, &query.location);
    Json(found.into_iter().cloned().collect())
}

pub async fn get_locations(State(app_state): State<AppState>) -> Json<Vec<String>> {
    Json(dealerships::locations(app_state.catalog.dealerships()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealershipDetails {
    dealership: Arc<Dealership>,
    listing_count: usize,
}

fn find_dealership(app_state: &AppState, id: &str) -> AppResult<Arc<Dealership>> {
    app_state
        .catalog
        .dealership(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Dealership '{}' not found", id)))
}

pub async fn get_dealership(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DealershipDetails>> {
    let dealership = find_dealership(&app_state, &id)?;
    let listing_count =
        dealerships::dealership_inventory(app_state.catalog.listings(), &id, &FilterCriteria::default()).len();
    Ok(Json(DealershipDetails {
        dealership,
        listing_count,
    }))
}

pub async fn dealership_listings(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(filters): Json<FilterCriteria>,
) -> AppResult<Json<SearchResponse>> {
    find_dealership(&app_state, &id)?;
    let matched: Vec<Listing> = dealerships::dealership_inventory(app_state.catalog.listings(), &id, &filters)
        .into_iter()
        .cloned()
        .collect();
    tracing::info!("Dealership {} inventory: {} listings matched.", id, matched.len());
    Ok(Json(SearchResponse {
        count: matched.len(),
        listings: matched,
    }))
}
