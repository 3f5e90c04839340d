// Trade-in estimate shown at the end of the sell-your-car wizard

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    #[serde(rename = "Excelente")]
    Excellent,
    #[serde(rename = "Muy bueno")]
    VeryGood,
    #[serde(rename = "Bueno")]
    Good,
    #[serde(rename = "Regular")]
    Fair,
    #[serde(rename = "Necesita reparaciones")]
    NeedsRepair,
}

impl Condition {
    pub fn factor(self) -> f64 {
        match self {
            Condition::Excellent => 1.0,
            Condition::VeryGood => 0.9,
            Condition::Good => 0.8,
            Condition::Fair => 0.6,
            Condition::NeedsRepair => 0.4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ValuationSettings {
    pub base_price: f64,
    pub reference_year: u16,
    // Years from the reference year to a full-value car
    pub year_span: f64,
    pub min_year_factor: f64,
    // Mileage at which the mileage factor bottoms out
    pub mileage_span: f64,
    pub min_mileage_factor: f64,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            base_price: 25_000.0,
            reference_year: 2010,
            year_span: 14.0,
            min_year_factor: 0.5,
            mileage_span: 200_000.0,
            min_mileage_factor: 0.3,
        }
    }
}

impl ValuationSettings {
    pub fn year_factor(&self, year: u16) -> f64 {
        let age = f64::from(year) - f64::from(self.reference_year);
        (age / self.year_span).max(self.min_year_factor)
    }

    pub fn mileage_factor(&self, mileage: u32) -> f64 {
        (1.0 - f64::from(mileage) / self.mileage_span).max(self.min_mileage_factor)
    }

    // An unknown condition is valued as "Bueno"
    pub fn estimate(&self, year: u16, mileage: u32, condition: Option<Condition>) -> u32 {
        let condition_factor = condition.unwrap_or(Condition::Good).factor();
        (self.base_price * self.year_factor(year) * self.mileage_factor(mileage) * condition_factor).round()
            as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_low_mileage_excellent_car() {
        let settings = ValuationSettings::default();
        // (2024 - 2010) / 14 = 1.0, 1 - 20000/200000 = 0.9
        assert_eq!(settings.estimate(2024, 20_000, Some(Condition::Excellent)), 22_500);
    }

    #[test]
    fn factors_are_clamped() {
        let settings = ValuationSettings::default();
        assert_eq!(settings.year_factor(2000), 0.5);
        assert_eq!(settings.mileage_factor(500_000), 0.3);
        assert_eq!(settings.estimate(2000, 500_000, Some(Condition::NeedsRepair)), 1_500);
    }

    #[test]
    fn missing_condition_counts_as_good() {
        let settings = ValuationSettings::default();
        assert_eq!(
            settings.estimate(2017, 100_000, None),
            settings.estimate(2017, 100_000, Some(Condition::Good))
        );
    }

    #[test]
    fn condition_uses_spanish_labels_on_the_wire() {
        let c: Condition = serde_json::from_str(r#""Muy bueno""#).unwrap();
        assert_eq!(c, Condition::VeryGood);
    }
}
