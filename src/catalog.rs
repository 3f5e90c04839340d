// Static catalog of dealerships and listings, loaded once at startup

use crate::models::{Dealership, Listing, PriceRating};
use serde::Deserialize;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs,
    path::Path,
    sync::Arc,
};
use thiserror::Error;

// Catalog compiled into the binary, used when no override file is configured
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

// Number of listings shown in the featured carousel
pub const FEATURED_COUNT: usize = 6;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate dealership id '{0}'")]
    DuplicateDealership(String),
    #[error("duplicate listing id '{0}'")]
    DuplicateListing(String),
    #[error("listing '{listing}' references unknown dealership '{dealership}'")]
    UnknownDealership { listing: String, dealership: String },
}

// Listing as stored in the catalog document, before the dealership is resolved
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingRecord {
    id: String,
    title: String,
    brand: String,
    model: String,
    #[serde(default)]
    description: String,
    price: u32,
    original_price: Option<u32>,
    year: u16,
    mileage: u32,
    power: u16,
    fuel: String,
    transmission: String,
    body_type: String,
    #[serde(default)]
    lifestyle_tags: Vec<String>,
    electric_vehicle_type: Option<String>,
    environmental_badge: Option<String>,
    dealership_id: String,
    #[serde(default)]
    engine: String,
    #[serde(default)]
    color: String,
    doors: u8,
    seats: u8,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    location: String,
    price_rating: PriceRating,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    is_certified: bool,
    warranty_months: Option<u16>,
    co2_emissions: Option<u16>,
    euro_standard: Option<String>,
    electric_range: Option<String>,
    #[serde(rename = "tour360Url")]
    tour_360_url: Option<String>,
}

impl ListingRecord {
    fn into_listing(self, dealership: Arc<Dealership>) -> Listing {
        Listing {
            id: self.id,
            title: self.title,
            brand: self.brand,
            model: self.model,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            year: self.year,
            mileage: self.mileage,
            power: self.power,
            fuel: self.fuel,
            transmission: self.transmission,
            body_type: self.body_type,
            lifestyle_tags: self.lifestyle_tags,
            electric_vehicle_type: self.electric_vehicle_type,
            environmental_badge: self.environmental_badge,
            dealership,
            engine: self.engine,
            color: self.color,
            doors: self.doors,
            seats: self.seats,
            images: self.images,
            features: self.features,
            location: self.location,
            price_rating: self.price_rating,
            is_new: self.is_new,
            is_certified: self.is_certified,
            warranty_months: self.warranty_months,
            co2_emissions: self.co2_emissions,
            euro_standard: self.euro_standard,
            electric_range: self.electric_range,
            tour_360_url: self.tour_360_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    dealerships: Vec<Dealership>,
    listings: Vec<ListingRecord>,
}

#[derive(Debug)]
pub struct Catalog {
    dealerships: Vec<Arc<Dealership>>,
    listings: Vec<Listing>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    // Loads the configured file if any, otherwise the embedded catalog
    pub fn load(path: Option<&str>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => {
                tracing::info!("Loading catalog from {}", p);
                Self::from_file(p)
            }
            None => {
                tracing::info!("Loading embedded catalog");
                Self::embedded()
            }
        }
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(content)?;

        let mut by_id: HashMap<String, Arc<Dealership>> = HashMap::new();
        let mut dealerships = Vec::with_capacity(document.dealerships.len());
        for dealership in document.dealerships {
            if by_id.contains_key(&dealership.id) {
                return Err(CatalogError::DuplicateDealership(dealership.id));
            }
            let shared = Arc::new(dealership);
            by_id.insert(shared.id.clone(), Arc::clone(&shared));
            dealerships.push(shared);
        }

        let mut seen = HashSet::new();
        let mut listings = Vec::with_capacity(document.listings.len());
        for record in document.listings {
            if !seen.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateListing(record.id));
            }
            let dealership = by_id.get(&record.dealership_id).cloned().ok_or_else(|| {
                CatalogError::UnknownDealership {
                    listing: record.id.clone(),
                    dealership: record.dealership_id.clone(),
                }
            })?;
            listings.push(record.into_listing(dealership));
        }

        tracing::debug!(
            dealerships = dealerships.len(),
            listings = listings.len(),
            "Catalog parsed"
        );
        Ok(Catalog { dealerships, listings })
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn dealerships(&self) -> &[Arc<Dealership>] {
        &self.dealerships
    }

    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn dealership(&self, id: &str) -> Option<&Arc<Dealership>> {
        self.dealerships.iter().find(|d| d.id == id)
    }

    pub fn featured(&self) -> &[Listing] {
        &self.listings[..self.listings.len().min(FEATURED_COUNT)]
    }

    // Distinct brands, sorted, for the brand selector
    pub fn brands(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|l| l.brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"{
        "dealerships": [
            {"id":"d1","name":"Motor Centro","rating":4.6,"reviews":120,"phone":"1","email":"a@b.c",
             "address":"Calle A 1, Madrid","openingHours":"9-20","certified":true}
        ],
        "listings": [
            {"id":"1","title":"Seat Ibiza","brand":"Seat","model":"Ibiza","price":12000,"year":2019,
             "mileage":40000,"power":95,"fuel":"Gasolina","transmission":"Manual","bodyType":"Compacto",
             "dealershipId":"d1","doors":5,"seats":5,"priceRating":"good"}
        ]
    }"#;

    #[test]
    fn embedded_catalog_is_consistent() {
        let catalog = Catalog::embedded().expect("embedded catalog must load");
        assert!(!catalog.listings().is_empty());
        assert!(catalog.featured().len() <= FEATURED_COUNT);
        for listing in catalog.listings() {
            assert!(catalog.dealership(&listing.dealership.id).is_some());
        }
    }

    #[test]
    fn listings_share_their_dealership() {
        let catalog = Catalog::from_json(TINY).unwrap();
        let listing = catalog.listing("1").unwrap();
        let dealership = catalog.dealership("d1").unwrap();
        assert!(Arc::ptr_eq(&listing.dealership, dealership));
        assert_eq!(catalog.brands(), vec!["Seat".to_string()]);
    }

    #[test]
    fn unknown_dealership_is_rejected() {
        let bad = TINY.replace(r#""dealershipId":"d1""#, r#""dealershipId":"zz""#);
        let err = Catalog::from_json(&bad).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDealership { .. }));
    }

    #[test]
    fn duplicate_dealership_is_rejected() {
        let document = r#"{"dealerships":[
            {"id":"d1","name":"A","rating":4,"reviews":1,"phone":"","email":"","address":"","openingHours":"","certified":false},
            {"id":"d1","name":"B","rating":4,"reviews":1,"phone":"","email":"","address":"","openingHours":"","certified":false}
        ],"listings":[]}"#;
        assert!(matches!(
            Catalog::from_json(document),
            Err(CatalogError::DuplicateDealership(id)) if id == "d1"
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Catalog::from_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
