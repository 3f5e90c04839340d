// Illustrative insurance quotes for a listing

use crate::error::CalculatorError;
use serde::{Deserialize, Serialize};

const MIN_DRIVER_AGE: u32 = 18;
// Yearly premium as a share of the vehicle price
const BASE_RATE: f64 = 0.05;
// Discount for paying the whole year at once
const ANNUAL_DISCOUNT: f64 = 0.85;

// Insurer name and multiplier over the base premium
const INSURERS: [(&str, f64); 3] = [("Mutua Madrileña", 0.9), ("Mapfre", 1.0), ("AXA", 1.1)];

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Coverage {
    Comprehensive,
    ThirdParty,
}

impl Coverage {
    fn factor(self) -> f64 {
        match self {
            Coverage::Comprehensive => 1.0,
            Coverage::ThirdParty => 0.7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Coverage::Comprehensive => "Todo Riesgo",
            Coverage::ThirdParty => "Terceros Completo",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceRequest {
    pub driver_age: u32,
    pub driving_years: u32,
    pub coverage: Coverage,
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceQuote {
    pub provider: &'static str,
    pub coverage: &'static str,
    pub monthly: u32,
    pub annual: u32,
}

fn age_factor(age: u32) -> f64 {
    if age < 25 {
        1.5
    } else if age > 50 {
        0.8
    } else {
        1.0
    }
}

fn experience_factor(years: u32) -> f64 {
    if years < 5 { 1.3 } else { 1.0 }
}

pub fn quotes(price: u32, request: &InsuranceRequest) -> Result<Vec<InsuranceQuote>, CalculatorError> {
    if request.driver_age < MIN_DRIVER_AGE {
        return Err(CalculatorError::DriverTooYoung {
            age: request.driver_age,
            min: MIN_DRIVER_AGE,
        });
    }

    let base_monthly = f64::from(price) * BASE_RATE / 12.0
        * age_factor(request.driver_age)
        * experience_factor(request.driving_years)
        * request.coverage.factor();

    Ok(INSURERS
        .iter()
        .map(|&(provider, multiplier)| {
            let monthly = base_monthly * multiplier;
            InsuranceQuote {
                provider,
                coverage: request.coverage.label(),
                monthly: monthly.round() as u32,
                annual: (monthly * 12.0 * ANNUAL_DISCOUNT).round() as u32,
            }
        })
        .collect())
}
