// Data structures shared by the catalog, the query engine and the API layer

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// A dealership as listed in the directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dealership {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub rating: f32,
    pub reviews: u32,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: Option<String>,
    pub opening_hours: String,
    pub certified: bool,
}

// Editorial price tag stored with each listing
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceRating {
    Excellent,
    Good,
    Fair,
    High,
}

// A vehicle offered for sale
//
// The dealership is shared with every other listing of the same dealer and is
// never mutated once the catalog is loaded.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub description: String,

    // Numeric attributes
    pub price: u32,
    pub original_price: Option<u32>,
    pub year: u16,
    pub mileage: u32,
    pub power: u16,

    // Categorical attributes, one value per listing
    pub fuel: String,
    pub transmission: String,
    pub body_type: String,

    // Tags and optional electric attributes
    pub lifestyle_tags: Vec<String>,
    pub electric_vehicle_type: Option<String>,
    pub environmental_badge: Option<String>,

    pub dealership: Arc<Dealership>,

    // Presentation details, not used for filtering
    pub engine: String,
    pub color: String,
    pub doors: u8,
    pub seats: u8,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub location: String,
    pub price_rating: PriceRating,
    pub is_new: bool,
    pub is_certified: bool,
    pub warranty_months: Option<u16>,
    pub co2_emissions: Option<u16>,
    pub euro_standard: Option<String>,
    pub electric_range: Option<String>,
    #[serde(rename = "tour360Url")]
    pub tour_360_url: Option<String>,
}

// Structured filter received from the search form.
// Every field is optional; an absent field (or an empty set) imposes no constraint.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub year_min: Option<u16>,
    pub year_max: Option<u16>,
    pub mileage_max: Option<u32>,
    pub fuel: Vec<String>,
    pub transmission: Vec<String>,
    pub body_type: Vec<String>,
    pub dealership: Option<String>,
    pub lifestyle_tag: Vec<String>,
    pub electric_vehicle_type: Vec<String>,
    pub environmental_badge: Vec<String>,
}

// Text fields coming from form inputs arrive as "" when cleared
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterCriteria {
    // Number of active constraints, used for the filter badge
    pub fn active_count(&self) -> usize {
        let scalars = [
            non_empty(&self.brand).is_some(),
            non_empty(&self.model).is_some(),
            self.price_min.is_some(),
            self.price_max.is_some(),
            self.year_min.is_some(),
            self.year_max.is_some(),
            self.mileage_max.is_some(),
            non_empty(&self.dealership).is_some(),
        ];
        let sets = [
            &self.fuel,
            &self.transmission,
            &self.body_type,
            &self.lifestyle_tag,
            &self.electric_vehicle_type,
            &self.environmental_badge,
        ];
        scalars.iter().filter(|active| **active).count()
            + sets.iter().filter(|set| !set.is_empty()).count()
    }
}

// Request body for POST /api/search
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub search_text: String,
    pub filters: FilterCriteria,
}

// Response body for searches
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub count: usize,
    pub listings: Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_criteria_accepts_partial_json() {
        let filters: FilterCriteria =
            serde_json::from_str(r#"{"priceMax":30000,"fuel":["Diésel"]}"#).unwrap();
        assert_eq!(filters.price_max, Some(30000));
        assert_eq!(filters.fuel, vec!["Diésel".to_string()]);
        assert!(filters.brand.is_none());
        assert!(filters.lifestyle_tag.is_empty());
        assert_eq!(filters.active_count(), 2);
    }

    #[test]
    fn cleared_text_filters_are_not_counted_as_active() {
        let filters = FilterCriteria {
            brand: Some(String::new()),
            model: Some(String::new()),
            dealership: Some("d1".into()),
            ..Default::default()
        };
        assert_eq!(filters.active_count(), 1);
    }

    #[test]
    fn empty_sets_are_not_counted_as_active() {
        let filters = FilterCriteria {
            fuel: Vec::new(),
            brand: Some("BMW".into()),
            ..Default::default()
        };
        assert_eq!(filters.active_count(), 1);
    }

    #[test]
    fn search_request_defaults_when_fields_missing() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.search_text.is_empty());
        assert_eq!(req.filters, FilterCriteria::default());
    }
}
