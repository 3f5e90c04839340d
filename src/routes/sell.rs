// Handlers for the sell-your-car wizard

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    sell::{self, ContactInfo, SellWizard, Submission, VehicleInfo},
    AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    estimated_price: u32,
    complete: bool,
}

pub async fn estimate(
    State(app_state): State<AppState>,
    Json(vehicle): Json<VehicleInfo>,
) -> Json<EstimateResponse> {
    let estimated_price = sell::estimate(&vehicle, &app_state.settings.valuation);
    tracing::info!("Sell estimate for {} {}: {}", vehicle.brand, vehicle.model, estimated_price);
    Json(EstimateResponse {
        estimated_price,
        complete: vehicle.is_complete(),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    vehicle: VehicleInfo,
    contact: ContactInfo,
    #[serde(default)]
    photos: Vec<String>,
}

// Runs the whole wizard on a filled-in form; the first incomplete step is reported
pub async fn submit(
    State(app_state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> AppResult<Json<Submission>> {
    let valuation = &app_state.settings.valuation;
    let mut wizard = SellWizard::new();
    wizard.vehicle = request.vehicle;
    wizard.advance(valuation)?;
    let kept = wizard.add_photos(request.photos);
    tracing::debug!("Kept {} photos", kept);
    wizard.advance(valuation)?;
    wizard.contact = request.contact;
    wizard.advance(valuation)?;
    Ok(Json(wizard.publish()?))
}
