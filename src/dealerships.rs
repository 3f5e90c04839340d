// Dealership directory: search, location list and per-dealer inventory

use crate::{
    models::{Dealership, FilterCriteria, Listing},
    query,
};
use std::sync::Arc;

// Dealerships whose name or address contains `text`, narrowed to those whose
// address contains `location`. Both checks ignore case; empty means no constraint.
pub fn search_dealerships<'d>(
    dealerships: &'d [Arc<Dealership>],
    text: &str,
    location: &str,
) -> Vec<&'d Arc<Dealership>> {
    let text = text.to_lowercase();
    let location = location.to_lowercase();
    dealerships
        .iter()
        .filter(|d| {
            text.is_empty()
                || d.name.to_lowercase().contains(&text)
                || d.address.to_lowercase().contains(&text)
        })
        .filter(|d| location.is_empty() || d.address.to_lowercase().contains(&location))
        .collect()
}

// City of a dealership: the last comma-separated part of its address
fn city(address: &str) -> Option<&str> {
    address
        .rsplit(',')
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

// Distinct cities in first-seen order
pub fn locations(dealerships: &[Arc<Dealership>]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for city in dealerships.iter().filter_map(|d| city(&d.address)) {
        if !seen.iter().any(|s| s == city) {
            seen.push(city.to_string());
        }
    }
    seen
}

// Listings sold by one dealership, narrowed by the structured filter
pub fn dealership_inventory<'l>(
    listings: &'l [Listing],
    dealership_id: &str,
    filters: &FilterCriteria,
) -> Vec<&'l Listing> {
    let mut active = query::filter_predicates(filters);
    active.insert(0, Box::new(move |l: &Listing| query::sold_by(l, dealership_id)));
    query::select(listings, &active)
}
