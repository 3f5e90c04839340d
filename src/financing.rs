// Loan quotes for a listing

use crate::error::CalculatorError;
use serde::{Deserialize, Serialize};

// A lender and its fixed annual rate
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Lender {
    pub provider: String,
    pub annual_rate: f64,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FinancingSettings {
    pub lenders: Vec<Lender>,
    pub down_payment_share: f64,
    pub default_term_months: u32,
    // Share of monthly income a payment may take
    pub affordability_share: f64,
}

impl Default for FinancingSettings {
    fn default() -> Self {
        let lender = |provider: &str, annual_rate: f64, recommended: bool, features: &[&str]| Lender {
            provider: provider.to_string(),
            annual_rate,
            recommended,
            features: features.iter().map(|f| f.to_string()).collect(),
        };
        Self {
            lenders: vec![
                lender(
                    "Banco Santander",
                    3.9,
                    true,
                    &["Sin comisiones de apertura", "Gestión 100% online", "Aprobación en 24h"],
                ),
                lender(
                    "BBVA Auto",
                    4.2,
                    false,
                    &["Seguro de vida incluido", "Carencia de 3 meses"],
                ),
                lender(
                    "CaixaBank",
                    4.5,
                    false,
                    &["Descuentos por domiciliación", "Asesoramiento personalizado"],
                ),
            ],
            down_payment_share: 0.2,
            default_term_months: 60,
            affordability_share: 0.3,
        }
    }
}

// Monthly payment of an amortizing loan. A zero rate spreads the principal evenly.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> Result<f64, CalculatorError> {
    if term_months == 0 {
        return Err(CalculatorError::ZeroTerm);
    }
    let n = f64::from(term_months);
    let r = annual_rate / 100.0 / 12.0;
    if r == 0.0 {
        return Ok(principal / n);
    }
    let growth = (1.0 + r).powf(n);
    Ok(principal * r * growth / (growth - 1.0))
}

// Request body for POST /api/listings/:id/financing
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancingRequest {
    pub down_payment: Option<u32>,
    pub term_months: Option<u32>,
    pub monthly_income: Option<u32>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOffer {
    pub provider: String,
    pub annual_rate: f64,
    pub monthly_payment: u32,
    pub total_amount: u64,
    pub down_payment: u32,
    pub term_months: u32,
    pub recommended: bool,
    pub features: Vec<String>,
    // None when no income was given
    pub affordable: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingQuote {
    pub price: u32,
    pub down_payment: u32,
    pub down_payment_percent: u32,
    pub term_months: u32,
    pub max_affordable_payment: Option<u32>,
    pub offers: Vec<FinancingOffer>,
}

pub fn quote(
    price: u32,
    request: &FinancingRequest,
    settings: &FinancingSettings,
) -> Result<FinancingQuote, CalculatorError> {
    let down_payment = request
        .down_payment
        .unwrap_or_else(|| (f64::from(price) * settings.down_payment_share).round() as u32);
    if down_payment > price {
        return Err(CalculatorError::DownPaymentTooHigh { down_payment, price });
    }
    let term_months = request.term_months.unwrap_or(settings.default_term_months);
    let principal = f64::from(price - down_payment);
    let max_affordable = request
        .monthly_income
        .map(|income| f64::from(income) * settings.affordability_share);

    let offers = settings
        .lenders
        .iter()
        .map(|lender| {
            let payment = monthly_payment(principal, lender.annual_rate, term_months)?;
            let total = payment * f64::from(term_months) + f64::from(down_payment);
            Ok(FinancingOffer {
                provider: lender.provider.clone(),
                annual_rate: lender.annual_rate,
                monthly_payment: payment.round() as u32,
                total_amount: total.round() as u64,
                down_payment,
                term_months,
                recommended: lender.recommended,
                features: lender.features.clone(),
                affordable: max_affordable.map(|max| payment <= max),
            })
        })
        .collect::<Result<Vec<_>, CalculatorError>>()?;

    let down_payment_percent = if price == 0 {
        0
    } else {
        (f64::from(down_payment) / f64::from(price) * 100.0).round() as u32
    };

    Ok(FinancingQuote {
        price,
        down_payment,
        down_payment_percent,
        term_months,
        max_affordable_payment: max_affordable.map(|m| m.round() as u32),
        offers,
    })
}
