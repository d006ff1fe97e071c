use crate::config::PricingConfig;
use crate::error::AppError;
use crate::pricing::models::{EnergyRating, HouseAttributes, PriceBreakdown};
use crate::pricing::rates::RateTable;

// Confidence heuristic: start at the base, add a bonus per input that falls
// in its typical range, cap the result. These constants define what
// "confidence" means, so they are compiled in rather than configured.
const CONFIDENCE_BASE: f64 = 0.55;
const CONFIDENCE_TYPICAL_BONUS: f64 = 0.10;
const CONFIDENCE_ENERGY_BONUS: f64 = 0.05;
const CONFIDENCE_MAX: f64 = 0.95;
const TYPICAL_MIN_AREA_M2: f64 = 20.0;
const TYPICAL_MAX_AREA_M2: f64 = 250.0;
const TYPICAL_MIN_YEAR_BUILT: i32 = 1900;

/// Rule-based house price estimator.
///
/// Pure and deterministic: identical attributes (including the reference
/// year) produce an identical breakdown on every call.
pub struct PriceCalculator {
    rates: RateTable,
    default_current_year: i32,
}

impl PriceCalculator {
    pub fn new(rates: RateTable, default_current_year: i32) -> Self {
        Self {
            rates,
            default_current_year,
        }
    }

    pub fn from_config(pricing: &PricingConfig) -> Self {
        Self::new(pricing.rates.clone(), pricing.current_year)
    }

    /// Estimate a sale price and explain it.
    ///
    /// The only rejected input is an unrecognized energy rating; out-of-range
    /// continuous values are clamped instead.
    pub fn estimate(&self, attrs: &HouseAttributes) -> Result<PriceBreakdown, AppError> {
        let rating = EnergyRating::parse(&attrs.energy_rating).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "energy_rating must be one of A, B, C, D, E, F, G, got '{}'",
                attrs.energy_rating.trim()
            ))
        })?;

        let rates = &self.rates;
        let current_year = attrs.current_year.unwrap_or(self.default_current_year);

        let age = (current_year - attrs.year_built).max(0);
        let age_multiplier = (1.0 - rates.age_depreciation_per_year * age as f64)
            .clamp(rates.age_multiplier_floor, rates.age_multiplier_cap);

        let energy_multiplier = rating.multiplier(&rates.energy_multipliers);

        let base = rates.base_price;
        let area_component = attrs.area_m2 * rates.per_m2;
        let rooms_component = attrs.bedrooms as f64 * rates.per_bedroom
            + attrs.bathrooms as f64 * rates.per_bathroom;
        let location_component =
            attrs.location_score.clamp(0.0, 10.0) * rates.per_location_point;

        let mut features_component = 0.0;
        if attrs.has_garage {
            features_component += rates.garage_bonus;
        }
        if attrs.has_garden {
            features_component += rates.garden_bonus;
        }

        let pre_mult =
            base + area_component + rooms_component + location_component + features_component;
        let estimated = pre_mult * age_multiplier * energy_multiplier;

        // The multiplier effects re-expressed as additive deltas against the
        // subtotal. Approximate by construction, kept for output stability.
        let age_component = pre_mult * (age_multiplier - 1.0);
        let energy_component = (pre_mult + age_component) * (energy_multiplier - 1.0);

        let mut confidence = CONFIDENCE_BASE;
        if (TYPICAL_MIN_AREA_M2..=TYPICAL_MAX_AREA_M2).contains(&attrs.area_m2) {
            confidence += CONFIDENCE_TYPICAL_BONUS;
        }
        if (0.0..=10.0).contains(&attrs.location_score) {
            confidence += CONFIDENCE_TYPICAL_BONUS;
        }
        if attrs.year_built >= TYPICAL_MIN_YEAR_BUILT && attrs.year_built <= current_year {
            confidence += CONFIDENCE_TYPICAL_BONUS;
        }
        // The grade parsed above, so its bonus always applies.
        confidence += CONFIDENCE_ENERGY_BONUS;
        let confidence = confidence.clamp(0.0, CONFIDENCE_MAX);

        Ok(PriceBreakdown {
            estimated_price: round2(estimated),
            base: round2(base),
            area_component: round2(area_component),
            rooms_component: round2(rooms_component),
            location_component: round2(location_component),
            age_component: round2(age_component),
            features_component: round2(features_component),
            energy_component: round2(energy_component),
            confidence: round2(confidence),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
