// Listing query engine: one predicate per active criterion, all of which must hold.
// The selection keeps the input order.

use crate::models::{non_empty, FilterCriteria, Listing};

// A single criterion bound to its filter value.
pub type Predicate<'a> = Box<dyn Fn(&Listing) -> bool + 'a>;

// Case-insensitive substring match against title, brand, model or description.
// `needle` must already be lowercase.
pub fn matches_text(listing: &Listing, needle: &str) -> bool {
    [
        &listing.title,
        &listing.brand,
        &listing.model,
        &listing.description,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn matches_brand(listing: &Listing, brand: &str) -> bool {
    listing.brand == brand
}

// `needle` must already be lowercase.
pub fn matches_model(listing: &Listing, needle: &str) -> bool {
    listing.model.to_lowercase().contains(needle)
}

pub fn within_price(listing: &Listing, min: Option<u32>, max: Option<u32>) -> bool {
    min.is_none_or(|min| listing.price >= min) && max.is_none_or(|max| listing.price <= max)
}

pub fn within_year(listing: &Listing, min: Option<u16>, max: Option<u16>) -> bool {
    min.is_none_or(|min| listing.year >= min) && max.is_none_or(|max| listing.year <= max)
}

pub fn within_mileage(listing: &Listing, max: u32) -> bool {
    listing.mileage <= max
}

// Single-valued attribute membership. An empty set accepts everything.
pub fn value_in(value: &str, accepted: &[String]) -> bool {
    accepted.is_empty() || accepted.iter().any(|a| a == value)
}

// Optional attribute membership. A listing without the attribute is rejected
// whenever the set is non-empty.
pub fn optional_value_in(value: Option<&str>, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    value.is_some_and(|v| accepted.iter().any(|a| a == v))
}

// True when any tag of the listing is accepted. An empty set accepts everything.
pub fn any_tag_in(tags: &[String], accepted: &[String]) -> bool {
    accepted.is_empty() || tags.iter().any(|tag| accepted.contains(tag))
}

pub fn sold_by(listing: &Listing, dealership_id: &str) -> bool {
    listing.dealership.id == dealership_id
}

// Predicates for the structured filter only, without free-text search.
pub fn filter_predicates(filters: &FilterCriteria) -> Vec<Predicate<'_>> {
    let mut active: Vec<Predicate<'_>> = Vec::new();

    if let Some(brand) = non_empty(&filters.brand) {
        active.push(Box::new(move |l: &Listing| matches_brand(l, brand)));
    }
    if let Some(model) = non_empty(&filters.model) {
        let needle = model.to_lowercase();
        active.push(Box::new(move |l: &Listing| matches_model(l, &needle)));
    }
    if filters.price_min.is_some() || filters.price_max.is_some() {
        let (min, max) = (filters.price_min, filters.price_max);
        active.push(Box::new(move |l: &Listing| within_price(l, min, max)));
    }
    if filters.year_min.is_some() || filters.year_max.is_some() {
        let (min, max) = (filters.year_min, filters.year_max);
        active.push(Box::new(move |l: &Listing| within_year(l, min, max)));
    }
    if let Some(max) = filters.mileage_max {
        active.push(Box::new(move |l: &Listing| within_mileage(l, max)));
    }
    if !filters.fuel.is_empty() {
        active.push(Box::new(move |l: &Listing| value_in(&l.fuel, &filters.fuel)));
    }
    if !filters.transmission.is_empty() {
        active.push(Box::new(move |l: &Listing| value_in(&l.transmission, &filters.transmission)));
    }
    if !filters.body_type.is_empty() {
        active.push(Box::new(move |l: &Listing| value_in(&l.body_type, &filters.body_type)));
    }
    if let Some(dealership) = non_empty(&filters.dealership) {
        active.push(Box::new(move |l: &Listing| sold_by(l, dealership)));
    }
    if !filters.lifestyle_tag.is_empty() {
        active.push(Box::new(move |l: &Listing| any_tag_in(&l.lifestyle_tags, &filters.lifestyle_tag)));
    }
    if !filters.electric_vehicle_type.is_empty() {
        active.push(Box::new(move |l: &Listing| {
            optional_value_in(l.electric_vehicle_type.as_deref(), &filters.electric_vehicle_type)
        }));
    }
    if !filters.environmental_badge.is_empty() {
        active.push(Box::new(move |l: &Listing| {
            optional_value_in(l.environmental_badge.as_deref(), &filters.environmental_badge)
        }));
    }

    active
}

// All active predicates for a search: free text first, then the structured filter.
pub fn predicates<'a>(search_text: &str, filters: &'a FilterCriteria) -> Vec<Predicate<'a>> {
    let mut active: Vec<Predicate<'a>> = Vec::new();
    if !search_text.is_empty() {
        let needle = search_text.to_lowercase();
        active.push(Box::new(move |l: &Listing| matches_text(l, &needle)));
    }
    active.extend(filter_predicates(filters));
    active
}

// Listings satisfying every predicate, in input order.
pub fn select<'l>(listings: &'l [Listing], active: &[Predicate<'_>]) -> Vec<&'l Listing> {
    listings
        .iter()
        .filter(|listing| active.iter().all(|p| p(*listing)))
        .collect()
}

// Positions in `listings` of the matching entries, ascending.
pub fn positions(listings: &[Listing], search_text: &str, filters: &FilterCriteria) -> Vec<usize> {
    let active = predicates(search_text, filters);
    listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| active.iter().all(|p| p(*listing)))
        .map(|(i, _)| i)
        .collect()
}

// Runs a search over the collection. Never mutates its inputs and never fails.
pub fn query<'l>(
    listings: &'l [Listing],
    search_text: &str,
    filters: &FilterCriteria,
) -> Vec<&'l Listing> {
    let active = predicates(search_text, filters);
    let result = select(listings, &active);
    tracing::debug!(
        predicates = active.len(),
        matched = result.len(),
        total = listings.len(),
        "Query evaluated"
    );
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Dealership, PriceRating};
    use std::sync::Arc;

    pub(crate) fn dealer(id: &str) -> Arc<Dealership> {
        Arc::new(Dealership {
            id: id.to_string(),
            name: format!("Concesionario {id}"),
            logo: None,
            rating: 4.5,
            reviews: 100,
            phone: "+34 900 000 000".into(),
            email: "ventas@example.com".into(),
            address: "Calle Mayor 1, Madrid".into(),
            website: None,
            opening_hours: "L-V 9:00-20:00".into(),
            certified: true,
        })
    }

    pub(crate) fn listing(id: &str, brand: &str, price: u32, year: u16, fuel: &str, tags: &[&str]) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("{brand} {id}"),
            brand: brand.to_string(),
            model: "Serie".into(),
            description: "Vehículo en perfecto estado".into(),
            price,
            original_price: None,
            year,
            mileage: 30_000,
            power: 150,
            fuel: fuel.to_string(),
            transmission: "Manual".into(),
            body_type: "Berlina".into(),
            lifestyle_tags: tags.iter().map(|t| t.to_string()).collect(),
            electric_vehicle_type: None,
            environmental_badge: None,
            dealership: dealer("d1"),
            engine: "2.0".into(),
            color: "Blanco".into(),
            doors: 5,
            seats: 5,
            images: Vec::new(),
            features: Vec::new(),
            location: "Madrid".into(),
            price_rating: PriceRating::Good,
            is_new: false,
            is_certified: true,
            warranty_months: None,
            co2_emissions: None,
            euro_standard: None,
            electric_range: None,
            tour_360_url: None,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("1", "Toyota", 20_000, 2020, "Gasolina", &["familiar"]),
            listing("2", "BMW", 35_000, 2022, "Diésel", &["deportivo"]),
        ]
    }

    fn ids(result: &[&Listing]) -> Vec<String> {
        result.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let listings = sample();
        let result = query(&listings, "", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn concrete_filter_scenarios() {
        let listings = sample();

        let price = FilterCriteria { price_max: Some(30_000), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &price)), vec!["1"]);

        let fuel = FilterCriteria { fuel: vec!["Diésel".into()], ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &fuel)), vec!["2"]);

        let tags = FilterCriteria {
            lifestyle_tag: vec!["familiar".into(), "deportivo".into()],
            ..Default::default()
        };
        assert_eq!(ids(&query(&listings, "", &tags)), vec!["1", "2"]);

        let none = FilterCriteria {
            brand: Some("BMW".into()),
            year_min: Some(2023),
            ..Default::default()
        };
        assert!(query(&listings, "", &none).is_empty());
    }

    #[test]
    fn search_text_is_case_insensitive() {
        let listings = sample();
        let upper = query(&listings, "BMW", &FilterCriteria::default());
        let lower = query(&listings, "bmw", &FilterCriteria::default());
        assert_eq!(ids(&upper), vec!["2"]);
        assert_eq!(ids(&upper), ids(&lower));
    }

    #[test]
    fn search_text_matches_description() {
        let mut listings = sample();
        listings[1].description = "Techo solar panorámico".into();
        let result = query(&listings, "PANORÁMICO", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn brand_is_case_sensitive_but_model_is_not() {
        let mut listings = sample();
        listings[0].model = "Corolla".into();
        let brand = FilterCriteria { brand: Some("bmw".into()), ..Default::default() };
        assert!(query(&listings, "", &brand).is_empty());

        let model = FilterCriteria { model: Some("coro".into()), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &model)), vec!["1"]);
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let listings = sample();
        assert!(within_price(&listings[0], Some(20_000), Some(20_000)));
        assert!(within_year(&listings[1], Some(2022), Some(2022)));
        assert!(within_mileage(&listings[0], 30_000));
        assert!(!within_mileage(&listings[0], 29_999));
    }

    #[test]
    fn lower_and_upper_bounds_exclude_just_outside() {
        let listings = sample();

        let price_min = FilterCriteria { price_min: Some(20_001), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &price_min)), vec!["2"]);

        let year_min = FilterCriteria { year_min: Some(2021), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &year_min)), vec!["2"]);

        let year_max = FilterCriteria { year_max: Some(2021), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &year_max)), vec!["1"]);

        let price_max = FilterCriteria { price_max: Some(34_999), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &price_max)), vec!["1"]);
    }

    #[test]
    fn transmission_filter_is_set_membership() {
        let mut listings = sample();
        listings[1].transmission = "Automático".into();

        let manual = FilterCriteria { transmission: vec!["Manual".into()], ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &manual)), vec!["1"]);

        let either = FilterCriteria {
            transmission: vec!["Automático".into(), "Manual".into()],
            ..Default::default()
        };
        assert_eq!(ids(&query(&listings, "", &either)), vec!["1", "2"]);

        let unknown = FilterCriteria { transmission: vec!["CVT".into()], ..Default::default() };
        assert!(query(&listings, "", &unknown).is_empty());
    }

    #[test]
    fn empty_sets_behave_like_absent_filters() {
        let listings = sample();
        let filters = FilterCriteria {
            fuel: Vec::new(),
            electric_vehicle_type: Vec::new(),
            ..Default::default()
        };
        assert_eq!(query(&listings, "", &filters).len(), 2);
        assert!(predicates("", &filters).is_empty());
    }

    #[test]
    fn optional_attributes_exclude_listings_without_value() {
        let mut listings = sample();
        listings[1].electric_vehicle_type = Some("PHEV".into());
        listings[1].environmental_badge = Some("ECO".into());

        let ev = FilterCriteria { electric_vehicle_type: vec!["PHEV".into()], ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &ev)), vec!["2"]);

        let badge = FilterCriteria { environmental_badge: vec!["0".into()], ..Default::default() };
        assert!(query(&listings, "", &badge).is_empty());
    }

    #[test]
    fn dealership_filter_matches_id() {
        let mut listings = sample();
        listings[1].dealership = dealer("d2");
        let filters = FilterCriteria { dealership: Some("d2".into()), ..Default::default() };
        assert_eq!(ids(&query(&listings, "", &filters)), vec!["2"]);
    }

    #[test]
    fn cleared_text_inputs_impose_no_constraint() {
        let listings = sample();
        let filters = FilterCriteria {
            brand: Some(String::new()),
            model: Some(String::new()),
            dealership: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query(&listings, "", &filters).len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let listings = sample();
        let filters = FilterCriteria { price_max: Some(30_000), ..Default::default() };
        let once: Vec<Listing> = query(&listings, "toyota", &filters).into_iter().cloned().collect();
        let twice = query(&once, "toyota", &filters);
        assert_eq!(ids(&twice), once.iter().map(|l| l.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn adding_constraints_never_grows_result() {
        let listings = sample();
        let loose = FilterCriteria { year_min: Some(2019), ..Default::default() };
        let tight = FilterCriteria { fuel: vec!["Gasolina".into()], ..loose.clone() };
        let loose_ids = ids(&query(&listings, "", &loose));
        let tight_ids = ids(&query(&listings, "", &tight));
        assert!(tight_ids.len() <= loose_ids.len());
        assert!(tight_ids.iter().all(|id| loose_ids.contains(id)));
    }

    #[test]
    fn positions_agree_with_query() {
        let listings = sample();
        let filters = FilterCriteria { fuel: vec!["Diésel".into()], ..Default::default() };
        assert_eq!(positions(&listings, "", &filters), vec![1]);
        assert_eq!(positions(&listings, "", &FilterCriteria::default()), vec![0, 1]);
    }

    #[test]
    fn each_active_criterion_yields_one_predicate() {
        let filters = FilterCriteria {
            brand: Some("BMW".into()),
            price_min: Some(1),
            price_max: Some(2),
            fuel: vec!["Diésel".into()],
            ..Default::default()
        };
        assert_eq!(predicates("x", &filters).len(), 4);
        assert_eq!(filter_predicates(&filters).len(), 3);
    }
}
