pub mod calculator;
pub mod models;
pub mod rates;

pub use calculator::PriceCalculator;
pub use models::{EnergyRating, HouseAttributes, PriceBreakdown};
pub use rates::{EnergyMultipliers, RateTable};
