// Price evaluation of a listing against an estimated market value.
// The ratio price / market value falls into one of five ordered bands.

use crate::{error::CalculatorError, models::Listing};
use serde::Serialize;

// Market value assumed when a listing has no original price
const MARKET_MARKUP: f64 = 1.2;

// Gauge position is clamped so the marker never sits on the edge
const GAUGE_MIN: f64 = 2.0;
const GAUGE_MAX: f64 = 98.0;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PriceBand {
    GreatDeal,
    GoodPrice,
    FairPrice,
    HighPrice,
    Overpriced,
}

impl PriceBand {
    pub const ALL: [PriceBand; 5] = [
        PriceBand::GreatDeal,
        PriceBand::GoodPrice,
        PriceBand::FairPrice,
        PriceBand::HighPrice,
        PriceBand::Overpriced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::GreatDeal => "Súper oferta",
            PriceBand::GoodPrice => "Buen precio",
            PriceBand::FairPrice => "Precio justo",
            PriceBand::HighPrice => "Precio alto",
            PriceBand::Overpriced => "Muy caro",
        }
    }

    // Range of the band as multiples of market value
    pub fn bounds(self) -> (f64, f64) {
        match self {
            PriceBand::GreatDeal => (0.70, 0.85),
            PriceBand::GoodPrice => (0.85, 0.95),
            PriceBand::FairPrice => (0.95, 1.05),
            PriceBand::HighPrice => (1.05, 1.15),
            PriceBand::Overpriced => (1.15, 1.30),
        }
    }

    pub fn classify(ratio: f64) -> PriceBand {
        Self::ALL
            .into_iter()
            .find(|band| band != &PriceBand::Overpriced && ratio <= band.bounds().1)
            .unwrap_or(PriceBand::Overpriced)
    }
}

pub fn market_value(listing: &Listing) -> f64 {
    listing
        .original_price
        .map(f64::from)
        .unwrap_or_else(|| f64::from(listing.price) * MARKET_MARKUP)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandRange {
    pub band: PriceBand,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEvaluation {
    pub price: u32,
    pub market_value: u32,
    pub ratio: f64,
    pub band: PriceBand,
    pub label: &'static str,
    // Marker position on the gauge, percent
    pub position: f64,
    pub difference: i64,
    pub savings: u32,
    pub savings_percent: u32,
    pub verdict: &'static str,
    pub ranges: Vec<BandRange>,
}

pub fn evaluate(price: u32, market_value: f64, original_price: Option<u32>) -> Result<PriceEvaluation, CalculatorError> {
    if market_value.is_nan() || market_value <= 0.0 {
        return Err(CalculatorError::NoMarketValue);
    }
    let price_f = f64::from(price);
    let ratio = price_f / market_value;
    let band = PriceBand::classify(ratio);

    let (low, _) = PriceBand::GreatDeal.bounds();
    let (_, high) = PriceBand::Overpriced.bounds();
    let position = ((price_f - market_value * low) / (market_value * (high - low)) * 100.0)
        .clamp(GAUGE_MIN, GAUGE_MAX);

    let savings = original_price.map_or(0, |orig| orig.saturating_sub(price));
    let savings_percent = match original_price {
        Some(orig) if orig > 0 => (f64::from(savings) / f64::from(orig) * 100.0).round() as u32,
        _ => 0,
    };

    let verdict = if price_f < market_value * 0.9 {
        "Excelente oportunidad"
    } else if price_f < market_value {
        "Buen precio"
    } else {
        "Considerar negociación"
    };

    let ranges = PriceBand::ALL
        .into_iter()
        .map(|band| {
            let (min, max) = band.bounds();
            BandRange {
                band,
                label: band.label(),
                min: (market_value * min).round() as u32,
                max: (market_value * max).round() as u32,
            }
        })
        .collect();

    Ok(PriceEvaluation {
        price,
        market_value: market_value.round() as u32,
        ratio,
        band,
        label: band.label(),
        position,
        difference: (price_f - market_value).round() as i64,
        savings,
        savings_percent,
        verdict,
        ranges,
    })
}

pub fn evaluate_listing(listing: &Listing) -> Result<PriceEvaluation, CalculatorError> {
    evaluate(listing.price, market_value(listing), listing.original_price)
}
