// Handlers for listing search, listing details and the per-listing calculators

use axum::{
    extract::{Path, Query, State},
    Json,
};
use cached::Cached;
use serde::{Deserialize, Serialize};

use crate::{
    carousel::{cards_to_show, Carousel, CarouselView},
    error::{AppError, AppResult},
    financing::{self, FinancingQuote, FinancingRequest},
    insurance::{self, InsuranceQuote, InsuranceRequest},
    models::{Listing, SearchRequest, SearchResponse},
    navigation::{self, View},
    pricing::{self, PriceEvaluation},
    query, AppState,
};

fn find_listing<'c>(app_state: &'c AppState, id: &str) -> AppResult<&'c Listing> {
    app_state
        .catalog
        .listing(id)
        .ok_or_else(|| AppError::NotFound(format!("Listing '{}' not found", id)))
}

pub async fn search_listings(
    State(app_state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    tracing::info!(
        search_text = %request.search_text,
        active_filters = request.filters.active_count(),
        "[HANDLER] /api/search - Request received."
    );

    let listings = app_state.catalog.listings();
    let key = (request.search_text, request.filters);

    let mut cache = app_state.query_cache.lock().await;
    let positions = match cache.cache_get(&key).cloned() {
        Some(hit) => {
            tracing::debug!("[HANDLER] /api/search - Cache hit.");
            hit
        }
        None => {
            let positions = query::positions(listings, &key.0, &key.1);
            cache.cache_set(key, positions.clone());
            positions
        }
    };
    drop(cache);

    let matched: Vec<Listing> = positions.iter().map(|&i| listings[i].clone()).collect();
    tracing::info!("[HANDLER] /api/search - {} of {} listings matched.", matched.len(), listings.len());
    Ok(Json(SearchResponse {
        count: matched.len(),
        listings: matched,
    }))
}

pub async fn get_brands(State(app_state): State<AppState>) -> Json<Vec<String>> {
    Json(app_state.catalog.brands())
}

#[derive(Deserialize)]
pub struct FeaturedQuery {
    width: Option<u32>,
    // Card the visitor jumped to, if any
    index: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedResponse {
    listings: Vec<Listing>,
    carousel: CarouselView,
}

pub async fn get_featured(
    State(app_state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Json<FeaturedResponse> {
    let featured = app_state.catalog.featured();
    // Desktop layout when the client does not say
    let visible = cards_to_show(query.width.unwrap_or(1280));
    let now = std::time::Instant::now();
    let mut carousel = Carousel::new(featured.len(), visible, now);
    if let Some(index) = query.index {
        carousel.go_to(index, now);
    }
    Json(FeaturedResponse {
        listings: featured.to_vec(),
        carousel: carousel.view(now),
    })
}

#[derive(Deserialize)]
pub struct NavigationQuery {
    fragment: String,
    // Fragment of the view the visitor is on; home when absent
    from: Option<String>,
}

fn parse_fragment(fragment: &str, current: &View) -> AppResult<View> {
    navigation::navigate(current, fragment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown route '{}'", fragment)))
}

// Resolves `fragment` as reached from `from`, checking that linked listings exist
fn resolve(app_state: &AppState, query: &NavigationQuery) -> AppResult<View> {
    let current = match query.from.as_deref() {
        Some(from) => parse_fragment(from, &View::Home)?,
        None => View::Home,
    };
    match parse_fragment(&query.fragment, &current)? {
        View::CarDetails { id, .. } => {
            navigation::open_details(&current, &id, |id| app_state.catalog.listing(id).is_some())
                .ok_or_else(|| AppError::NotFound(format!("Listing '{}' not found", id)))
        }
        view => Ok(view),
    }
}

pub async fn resolve_navigation(
    State(app_state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> AppResult<Json<View>> {
    Ok(Json(resolve(&app_state, &query)?))
}

// The view shown after closing the details view at `fragment`
pub async fn close_navigation(
    State(app_state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> AppResult<Json<View>> {
    let current = resolve(&app_state, &query)?;
    tracing::debug!("Closing {} from {:?}", query.fragment, query.from);
    Ok(Json(navigation::close_details(&current)))
}

pub async fn get_listing(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Listing>> {
    tracing::info!("[HANDLER] /api/listings/:id - Request received for id: {}", id);
    Ok(Json(find_listing(&app_state, &id)?.clone()))
}

pub async fn get_price_evaluation(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PriceEvaluation>> {
    let listing = find_listing(&app_state, &id)?;
    let evaluation = pricing::evaluate_listing(listing)?;
    tracing::info!("Price evaluation for {}: {}", id, evaluation.label);
    Ok(Json(evaluation))
}

pub async fn quote_financing(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FinancingRequest>,
) -> AppResult<Json<FinancingQuote>> {
    tracing::info!("API call: quote_financing for {} with {:?}", id, request);
    let listing = find_listing(&app_state, &id)?;
    let quote = financing::quote(listing.price, &request, &app_state.settings.financing)?;
    Ok(Json(quote))
}

pub async fn quote_insurance(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<InsuranceRequest>,
) -> AppResult<Json<Vec<InsuranceQuote>>> {
    tracing::info!("API call: quote_insurance for {} with {:?}", id, request);
    let listing = find_listing(&app_state, &id)?;
    Ok(Json(insurance::quotes(listing.price, &request)?))
}
