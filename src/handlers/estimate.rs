use crate::{
    config::{Config, LimitsConfig},
    error::{error_type_name, AppError},
    metrics,
    pricing::{HouseAttributes, PriceBreakdown, PriceCalculator},
};
use arc_swap::ArcSwap;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

const ENDPOINT: &str = "/api/v1/house-price";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HousePriceRequest {
    pub area_m2: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub location_score: f64,
    pub year_built: i32,
    #[serde(default)]
    pub has_garage: bool,
    #[serde(default)]
    pub has_garden: bool,
    pub energy_rating: String,
    /// Reference year override; omitted in normal operation.
    #[serde(default)]
    pub current_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HousePriceResponse {
    pub estimated_price: f64,
    pub currency: String,
    pub confidence: f64,
    pub breakdown: BreakdownBody,
}

/// The component section of the response body, keyed the way existing
/// clients consume it.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownBody {
    pub base: f64,
    pub area_component: f64,
    pub rooms_component: f64,
    pub location_component: f64,
    pub features_component: f64,
    pub age_component: f64,
    pub energy_component: f64,
}

impl From<&PriceBreakdown> for BreakdownBody {
    fn from(b: &PriceBreakdown) -> Self {
        Self {
            base: b.base,
            area_component: b.area_component,
            rooms_component: b.rooms_component,
            location_component: b.location_component,
            features_component: b.features_component,
            age_component: b.age_component,
            energy_component: b.energy_component,
        }
    }
}

/// Handle POST /api/v1/house-price
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(request): Json<HousePriceRequest>,
) -> Result<Json<HousePriceResponse>, AppError> {
    let start = Instant::now();
    let config = state.config.load();

    metrics::record_request(ENDPOINT);

    let result = process_request(&config, request);

    match &result {
        Ok(response) => {
            metrics::record_duration(ENDPOINT, start.elapsed());
            metrics::record_estimate(&response.currency, response.estimated_price);
            tracing::info!(
                estimated_price = response.estimated_price,
                currency = %response.currency,
                confidence = response.confidence,
                duration_ms = start.elapsed().as_millis() as u64,
                "Estimated house price"
            );
        }
        Err(err) => {
            metrics::record_error(ENDPOINT, error_type_name(err));
            tracing::warn!(error = %err, "Rejected estimation request");
        }
    }

    result.map(Json)
}

fn process_request(
    config: &Config,
    request: HousePriceRequest,
) -> Result<HousePriceResponse, AppError> {
    let attrs = HouseAttributes {
        area_m2: request.area_m2,
        bedrooms: request.bedrooms,
        bathrooms: request.bathrooms,
        location_score: request.location_score,
        year_built: request.year_built,
        has_garage: request.has_garage,
        has_garden: request.has_garden,
        energy_rating: request.energy_rating,
        current_year: request.current_year,
    };

    validate_attributes(&attrs, &config.limits)?;

    let calculator = PriceCalculator::from_config(&config.pricing);
    let breakdown = calculator.estimate(&attrs)?;

    Ok(HousePriceResponse {
        estimated_price: breakdown.estimated_price,
        currency: config.pricing.currency.clone(),
        confidence: breakdown.confidence,
        breakdown: BreakdownBody::from(&breakdown),
    })
}

/// Range checks the calculator itself deliberately does not perform.
pub fn validate_attributes(attrs: &HouseAttributes, limits: &LimitsConfig) -> Result<(), AppError> {
    // The negated comparison also catches NaN.
    if !(attrs.area_m2 > 0.0) || attrs.area_m2 > limits.max_area_m2 {
        return Err(AppError::InvalidInput(format!(
            "area_m2 must be greater than 0 and at most {}, got {}",
            limits.max_area_m2, attrs.area_m2
        )));
    }

    if attrs.bedrooms > limits.max_bedrooms {
        return Err(AppError::InvalidInput(format!(
            "bedrooms must be at most {}, got {}",
            limits.max_bedrooms, attrs.bedrooms
        )));
    }

    if attrs.bathrooms > limits.max_bathrooms {
        return Err(AppError::InvalidInput(format!(
            "bathrooms must be at most {}, got {}",
            limits.max_bathrooms, attrs.bathrooms
        )));
    }

    if !(0.0..=10.0).contains(&attrs.location_score) {
        return Err(AppError::InvalidInput(format!(
            "location_score must be between 0 and 10, got {}",
            attrs.location_score
        )));
    }

    if attrs.year_built < limits.min_year_built || attrs.year_built > limits.max_year_built {
        return Err(AppError::InvalidInput(format!(
            "year_built must be between {} and {}, got {}",
            limits.min_year_built, limits.max_year_built, attrs.year_built
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(ArcSwap::from_pointee(Config::default())),
        }
    }

    fn typical_request() -> HousePriceRequest {
        HousePriceRequest {
            area_m2: 75.0,
            bedrooms: 2,
            bathrooms: 1,
            location_score: 7.0,
            year_built: 1998,
            has_garage: true,
            has_garden: false,
            energy_rating: "C".to_string(),
            current_year: None,
        }
    }

    #[tokio::test]
    async fn test_handle_estimate_success() {
        let response = handle_estimate(State(test_state()), Json(typical_request()))
            .await
            .unwrap();

        assert_eq!(response.estimated_price, 421_802.26);
        assert_eq!(response.currency, "EUR");
        assert_eq!(response.confidence, 0.90);
        assert_eq!(response.breakdown.base, 50_000.0);
        assert_eq!(response.breakdown.age_component, -45_374.0);
    }

    #[tokio::test]
    async fn test_handle_estimate_invalid_rating_is_422() {
        let mut request = typical_request();
        request.energy_rating = "Z".to_string();

        let err = handle_estimate(State(test_state()), Json(request))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let limits = LimitsConfig::default();

        let mut attrs = HouseAttributes {
            area_m2: 75.0,
            bedrooms: 2,
            bathrooms: 1,
            location_score: 7.0,
            year_built: 1998,
            has_garage: false,
            has_garden: false,
            energy_rating: "C".to_string(),
            current_year: None,
        };
        assert!(validate_attributes(&attrs, &limits).is_ok());

        attrs.area_m2 = 0.0;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.area_m2 = 2_500.0;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.area_m2 = f64::NAN;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.area_m2 = 75.0;

        attrs.bedrooms = 21;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.bedrooms = 2;

        attrs.location_score = 10.5;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.location_score = 7.0;

        attrs.year_built = 1700;
        assert!(validate_attributes(&attrs, &limits).is_err());
        attrs.year_built = 2150;
        assert!(validate_attributes(&attrs, &limits).is_err());
    }

    #[test]
    fn test_validation_error_carries_the_offending_value() {
        let limits = LimitsConfig::default();
        let attrs = HouseAttributes {
            area_m2: 3_000.0,
            bedrooms: 0,
            bathrooms: 0,
            location_score: 5.0,
            year_built: 2000,
            has_garage: false,
            has_garden: false,
            energy_rating: "A".to_string(),
            current_year: None,
        };

        let err = validate_attributes(&attrs, &limits).unwrap_err();
        assert!(err.to_string().contains("3000"));
    }

    #[test]
    fn test_process_request_uses_configured_currency() {
        let mut config = Config::default();
        config.pricing.currency = "USD".to_string();

        let response = process_request(&config, typical_request()).unwrap();
        assert_eq!(response.currency, "USD");
    }
}
