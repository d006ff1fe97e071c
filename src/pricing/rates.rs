use serde::{Deserialize, Serialize};

/// Market calibration knobs for the price formula.
///
/// The defaults are the calibrated production values. Alternate tables can be
/// supplied through configuration (or constructed directly in tests) without
/// touching the calculator itself.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateTable {
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_per_m2")]
    pub per_m2: f64,
    #[serde(default = "default_per_bedroom")]
    pub per_bedroom: f64,
    #[serde(default = "default_per_bathroom")]
    pub per_bathroom: f64,
    /// Price per point on the 0..10 location scale.
    #[serde(default = "default_per_location_point")]
    pub per_location_point: f64,
    #[serde(default = "default_garage_bonus")]
    pub garage_bonus: f64,
    #[serde(default = "default_garden_bonus")]
    pub garden_bonus: f64,
    /// Linear depreciation per year of age, applied as a multiplier
    /// `1 - rate * age` clamped to [floor, cap].
    #[serde(default = "default_age_depreciation_per_year")]
    pub age_depreciation_per_year: f64,
    #[serde(default = "default_age_multiplier_floor")]
    pub age_multiplier_floor: f64,
    /// Above 1.0 this leaves room for a new-build premium.
    #[serde(default = "default_age_multiplier_cap")]
    pub age_multiplier_cap: f64,
    #[serde(default)]
    pub energy_multipliers: EnergyMultipliers,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            per_m2: default_per_m2(),
            per_bedroom: default_per_bedroom(),
            per_bathroom: default_per_bathroom(),
            per_location_point: default_per_location_point(),
            garage_bonus: default_garage_bonus(),
            garden_bonus: default_garden_bonus(),
            age_depreciation_per_year: default_age_depreciation_per_year(),
            age_multiplier_floor: default_age_multiplier_floor(),
            age_multiplier_cap: default_age_multiplier_cap(),
            energy_multipliers: EnergyMultipliers::default(),
        }
    }
}

/// Premium/penalty multipliers per energy grade, A (best) through G (worst).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnergyMultipliers {
    #[serde(default = "default_energy_a")]
    pub a: f64,
    #[serde(default = "default_energy_b")]
    pub b: f64,
    #[serde(default = "default_energy_c")]
    pub c: f64,
    #[serde(default = "default_energy_d")]
    pub d: f64,
    #[serde(default = "default_energy_e")]
    pub e: f64,
    #[serde(default = "default_energy_f")]
    pub f: f64,
    #[serde(default = "default_energy_g")]
    pub g: f64,
}

impl Default for EnergyMultipliers {
    fn default() -> Self {
        Self {
            a: default_energy_a(),
            b: default_energy_b(),
            c: default_energy_c(),
            d: default_energy_d(),
            e: default_energy_e(),
            f: default_energy_f(),
            g: default_energy_g(),
        }
    }
}

fn default_base_price() -> f64 {
    50_000.0
}

fn default_per_m2() -> f64 {
    3_200.0
}

fn default_per_bedroom() -> f64 {
    12_000.0
}

fn default_per_bathroom() -> f64 {
    8_000.0
}

fn default_per_location_point() -> f64 {
    18_000.0
}

fn default_garage_bonus() -> f64 {
    15_000.0
}

fn default_garden_bonus() -> f64 {
    20_000.0
}

fn default_age_depreciation_per_year() -> f64 {
    0.0035
}

fn default_age_multiplier_floor() -> f64 {
    0.70
}

fn default_age_multiplier_cap() -> f64 {
    1.05
}

fn default_energy_a() -> f64 {
    1.06
}

fn default_energy_b() -> f64 {
    1.03
}

fn default_energy_c() -> f64 {
    1.01
}

fn default_energy_d() -> f64 {
    1.00
}

fn default_energy_e() -> f64 {
    0.97
}

fn default_energy_f() -> f64 {
    0.94
}

fn default_energy_g() -> f64 {
    0.90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_calibration() {
        let table = RateTable::default();
        assert_eq!(table.base_price, 50_000.0);
        assert_eq!(table.per_m2, 3_200.0);
        assert_eq!(table.per_bedroom, 12_000.0);
        assert_eq!(table.per_bathroom, 8_000.0);
        assert_eq!(table.per_location_point, 18_000.0);
        assert_eq!(table.age_depreciation_per_year, 0.0035);
        assert_eq!(table.energy_multipliers.a, 1.06);
        assert_eq!(table.energy_multipliers.g, 0.90);
    }

    #[test]
    fn test_partial_override_keeps_remaining_defaults() {
        let table: RateTable = toml::from_str(
            r#"
            base_price = 60000.0

            [energy_multipliers]
            a = 1.10
            "#,
        )
        .unwrap();

        assert_eq!(table.base_price, 60_000.0);
        assert_eq!(table.per_m2, 3_200.0);
        assert_eq!(table.energy_multipliers.a, 1.10);
        assert_eq!(table.energy_multipliers.b, 1.03);
    }
}
