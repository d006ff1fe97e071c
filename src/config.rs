use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pricing::RateTable;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pricing: PricingConfig::default(),
            limits: LimitsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Currency label attached to responses; the rate table is denominated in it.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Reference year for computing building age when a request omits one.
    #[serde(default = "default_current_year")]
    pub current_year: i32,
    #[serde(default)]
    pub rates: RateTable,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            current_year: default_current_year(),
            rates: RateTable::default(),
        }
    }
}

/// Request bounds enforced at the API boundary, not inside the calculator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_area_m2")]
    pub max_area_m2: f64,
    #[serde(default = "default_max_rooms")]
    pub max_bedrooms: u32,
    #[serde(default = "default_max_rooms")]
    pub max_bathrooms: u32,
    #[serde(default = "default_min_year_built")]
    pub min_year_built: i32,
    #[serde(default = "default_max_year_built")]
    pub max_year_built: i32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_area_m2: default_max_area_m2(),
            max_bedrooms: default_max_rooms(),
            max_bathrooms: default_max_rooms(),
            min_year_built: default_min_year_built(),
            max_year_built: default_max_year_built(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            endpoint: default_metrics_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_current_year() -> i32 {
    2026
}

fn default_max_area_m2() -> f64 {
    2000.0
}

fn default_max_rooms() -> u32 {
    20
}

fn default_min_year_built() -> i32 {
    1800
}

fn default_max_year_built() -> i32 {
    2100
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

/// Load configuration from a TOML file layered under HOUSE_PRICER environment
/// variables. A missing file is fine; every knob has a built-in default.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("HOUSE_PRICER").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.log_format != "pretty" && cfg.server.log_format != "json" {
        anyhow::bail!(
            "server.log_format must be 'pretty' or 'json', got '{}'",
            cfg.server.log_format
        );
    }

    if cfg.pricing.currency.is_empty() {
        anyhow::bail!("pricing.currency cannot be empty");
    }

    let rates = &cfg.pricing.rates;
    if rates.base_price < 0.0
        || rates.per_m2 <= 0.0
        || rates.per_bedroom < 0.0
        || rates.per_bathroom < 0.0
        || rates.per_location_point < 0.0
        || rates.garage_bonus < 0.0
        || rates.garden_bonus < 0.0
    {
        anyhow::bail!("pricing.rates must not contain negative amounts");
    }

    if rates.age_depreciation_per_year < 0.0 {
        anyhow::bail!("pricing.rates.age_depreciation_per_year must not be negative");
    }

    if rates.age_multiplier_floor <= 0.0 || rates.age_multiplier_floor > rates.age_multiplier_cap {
        anyhow::bail!(
            "pricing.rates age multiplier bounds are invalid: floor {} cap {}",
            rates.age_multiplier_floor,
            rates.age_multiplier_cap
        );
    }

    let energy = &rates.energy_multipliers;
    for (grade, value) in [
        ("a", energy.a),
        ("b", energy.b),
        ("c", energy.c),
        ("d", energy.d),
        ("e", energy.e),
        ("f", energy.f),
        ("g", energy.g),
    ] {
        if value <= 0.0 {
            anyhow::bail!("pricing.rates.energy_multipliers.{} must be positive", grade);
        }
    }

    if cfg.limits.max_area_m2 <= 0.0 {
        anyhow::bail!("limits.max_area_m2 must be positive");
    }

    if cfg.limits.min_year_built > cfg.limits.max_year_built {
        anyhow::bail!(
            "limits.min_year_built {} is greater than limits.max_year_built {}",
            cfg.limits.min_year_built,
            cfg.limits.max_year_built
        );
    }

    Ok(())
}
