use serde::Serialize;

use crate::pricing::rates::EnergyMultipliers;

/// Building energy-efficiency grade, A (best) through G (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyRating {
    /// Parse a grade leniently: surrounding whitespace and case are ignored.
    /// Anything outside A..G is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            _ => None,
        }
    }

    pub fn multiplier(self, table: &EnergyMultipliers) -> f64 {
        match self {
            Self::A => table.a,
            Self::B => table.b,
            Self::C => table.c,
            Self::D => table.d,
            Self::E => table.e,
            Self::F => table.f,
            Self::G => table.g,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

/// One house to price. Range checks on the numeric fields belong to the
/// caller; the calculator only validates the energy rating and clamps the
/// continuous inputs.
#[derive(Debug, Clone)]
pub struct HouseAttributes {
    pub area_m2: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// 0 (weak) to 10 (premium).
    pub location_score: f64,
    pub year_built: i32,
    pub has_garage: bool,
    pub has_garden: bool,
    /// Raw grade as received from the caller, parsed during estimation.
    pub energy_rating: String,
    /// Reference year for the age computation; falls back to the configured
    /// default when absent.
    pub current_year: Option<i32>,
}

/// Price estimate with its explanatory components, every field rounded to
/// two decimals.
///
/// The age and energy effects are multiplicative in the formula but are
/// reported as additive deltas against the pre-multiplier subtotal, so the
/// components are an audit aid rather than an exact partition of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub estimated_price: f64,
    pub base: f64,
    pub area_component: f64,
    pub rooms_component: f64,
    pub location_component: f64,
    pub age_component: f64,
    pub features_component: f64,
    pub energy_component: f64,
    /// Heuristic typicality score in [0, 0.95], not a statistical bound.
    pub confidence: f64,
}
