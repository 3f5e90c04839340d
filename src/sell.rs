// Sell-your-car wizard: vehicle details, photos, contact, then valuation.
// It only moves forward from a valid step.

use crate::valuation::{Condition, ValuationSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PHOTOS: usize = 3;
pub const MAX_PHOTOS: usize = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    VehicleInfo,
    Photos,
    Contact,
    Valuation,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::VehicleInfo => Some(Step::Photos),
            Step::Photos => Some(Step::Contact),
            Step::Contact => Some(Step::Valuation),
            Step::Valuation => None,
        }
    }

    fn previous(self) -> Step {
        match self {
            Step::VehicleInfo | Step::Photos => Step::VehicleInfo,
            Step::Contact => Step::Photos,
            Step::Valuation => Step::Contact,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SellError {
    #[error("step {0:?} is incomplete")]
    Incomplete(Step),
    #[error("the listing can only be published from the last step")]
    NotReady,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleInfo {
    pub brand: String,
    pub model: String,
    pub year: Option<u16>,
    pub mileage: Option<u32>,
    pub fuel: String,
    pub transmission: String,
    pub condition: Option<Condition>,
    pub location: String,
}

impl VehicleInfo {
    pub fn is_complete(&self) -> bool {
        [&self.brand, &self.model, &self.fuel, &self.transmission, &self.location]
            .iter()
            .all(|field| !field.is_empty())
            && self.year.is_some()
            && self.mileage.is_some()
            && self.condition.is_some()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ContactPreference {
    #[default]
    Phone,
    Email,
    Whatsapp,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: ContactPreference,
    pub available_time: String,
}

impl ContactInfo {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub vehicle: VehicleInfo,
    pub contact: ContactInfo,
    pub photos: Vec<String>,
    pub estimated_price: u32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SellWizard {
    step: Step,
    pub vehicle: VehicleInfo,
    pub contact: ContactInfo,
    photos: Vec<String>,
    estimated_price: Option<u32>,
}

impl Default for SellWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SellWizard {
    pub fn new() -> Self {
        SellWizard {
            step: Step::VehicleInfo,
            vehicle: VehicleInfo::default(),
            contact: ContactInfo::default(),
            photos: Vec::new(),
            estimated_price: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn estimated_price(&self) -> Option<u32> {
        self.estimated_price
    }

    // Adds photos up to the cap; returns how many were kept
    pub fn add_photos<I>(&mut self, photos: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.photos.len();
        let room = MAX_PHOTOS - before;
        self.photos.extend(photos.into_iter().take(room));
        self.photos.len() - before
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn is_step_valid(&self, step: Step) -> bool {
        match step {
            Step::VehicleInfo => self.vehicle.is_complete(),
            Step::Photos => self.photos.len() >= MIN_PHOTOS,
            Step::Contact => self.contact.is_complete(),
            Step::Valuation => true,
        }
    }

    pub fn advance(&mut self, valuation: &ValuationSettings) -> Result<Step, SellError> {
        if !self.is_step_valid(self.step) {
            return Err(SellError::Incomplete(self.step));
        }
        if let Some(next) = self.step.next() {
            if next == Step::Valuation {
                self.estimated_price = Some(estimate(&self.vehicle, valuation));
            }
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> Step {
        self.step = self.step.previous();
        self.step
    }

    pub fn publish(&self) -> Result<Submission, SellError> {
        let estimated_price = match (self.step, self.estimated_price) {
            (Step::Valuation, Some(price)) => price,
            _ => return Err(SellError::NotReady),
        };
        tracing::info!(
            brand = %self.vehicle.brand,
            model = %self.vehicle.model,
            estimated_price,
            "Sell listing published"
        );
        Ok(Submission {
            vehicle: self.vehicle.clone(),
            contact: self.contact.clone(),
            photos: self.photos.clone(),
            estimated_price,
            submitted_at: Utc::now(),
        })
    }
}

// Estimate from whatever the form holds; missing numbers fall back to the floor factors
pub fn estimate(vehicle: &VehicleInfo, valuation: &ValuationSettings) -> u32 {
    valuation.estimate(
        vehicle.year.unwrap_or(valuation.reference_year),
        vehicle.mileage.unwrap_or(u32::MAX),
        vehicle.condition,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_vehicle() -> VehicleInfo {
        VehicleInfo {
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: Some(2024),
            mileage: Some(20_000),
            fuel: "Híbrido".into(),
            transmission: "Automático".into(),
            condition: Some(Condition::Excellent),
            location: "Madrid".into(),
        }
    }

    fn photos(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("photo-{i}.jpg")).collect()
    }

    #[test]
    fn cannot_leave_incomplete_step() {
        let mut wizard = SellWizard::new();
        let settings = ValuationSettings::default();
        assert_eq!(
            wizard.advance(&settings),
            Err(SellError::Incomplete(Step::VehicleInfo))
        );
        assert_eq!(wizard.step(), Step::VehicleInfo);
    }

    #[test]
    fn full_walkthrough_computes_estimate_and_publishes() {
        let settings = ValuationSettings::default();
        let mut wizard = SellWizard::new();
        wizard.vehicle = filled_vehicle();
        assert_eq!(wizard.advance(&settings), Ok(Step::Photos));

        wizard.add_photos(photos(2));
        assert_eq!(wizard.advance(&settings), Err(SellError::Incomplete(Step::Photos)));
        wizard.add_photos(photos(1));
        assert_eq!(wizard.advance(&settings), Ok(Step::Contact));

        assert!(wizard.publish().is_err());
        wizard.contact = ContactInfo {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "600000000".into(),
            ..Default::default()
        };
        assert_eq!(wizard.advance(&settings), Ok(Step::Valuation));
        assert_eq!(wizard.estimated_price(), Some(22_500));
        assert_eq!(wizard.step().number(), 4);

        let submission = wizard.publish().unwrap();
        assert_eq!(submission.estimated_price, 22_500);
        assert_eq!(submission.photos.len(), 3);
    }

    #[test]
    fn photos_are_capped() {
        let mut wizard = SellWizard::new();
        assert_eq!(wizard.add_photos(photos(8)), 8);
        assert_eq!(wizard.add_photos(photos(5)), 2);
        assert_eq!(wizard.photos().len(), MAX_PHOTOS);
        assert_eq!(wizard.remove_photo(0), Some("photo-0.jpg".to_string()));
        assert_eq!(wizard.remove_photo(42), None);
    }

    #[test]
    fn back_stops_at_first_step() {
        let settings = ValuationSettings::default();
        let mut wizard = SellWizard::new();
        wizard.vehicle = filled_vehicle();
        wizard.advance(&settings).unwrap();
        assert_eq!(wizard.back(), Step::VehicleInfo);
        assert_eq!(wizard.back(), Step::VehicleInfo);
    }
}
