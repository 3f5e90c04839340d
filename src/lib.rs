// Car marketplace storefront service
// The query engine and calculators are plain modules; routes wire them to HTTP.

use axum::extract::FromRef;
use cached::SizedCache;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod dealerships;
pub mod error;
pub mod financing;
pub mod insurance;
pub mod models;
pub mod navigation;
pub mod pricing;
pub mod query;
pub mod routes;
pub mod sell;
pub mod valuation;

use crate::{catalog::Catalog, config::Settings, models::FilterCriteria};

// Memoized search results: catalog positions keyed on (search text, filters)
pub type QueryCache = SizedCache<(String, FilterCriteria), Vec<usize>>;

// Shared application state
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<Catalog>,
    pub query_cache: Arc<Mutex<QueryCache>>,
}

impl AppState {
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        let cache_size = settings.query_cache_size.max(1);
        AppState {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            query_cache: Arc::new(Mutex::new(SizedCache::with_size(cache_size))),
        }
    }
}
