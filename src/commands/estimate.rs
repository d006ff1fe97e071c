use anyhow::Result;
use colored::Colorize;
use house_pricer::{
    config,
    handlers::estimate::validate_attributes,
    pricing::{HouseAttributes, PriceCalculator},
};
use std::path::PathBuf;

use crate::cli::EstimateArgs;

/// Execute the estimate command
///
/// Runs one estimation against the configured rate table and prints the
/// breakdown. Applies the same input bounds as the HTTP API.
pub fn execute(config_path: PathBuf, args: EstimateArgs) -> Result<()> {
    let cfg = config::load_config(&config_path)?;

    let attrs = HouseAttributes {
        area_m2: args.area_m2,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        location_score: args.location_score,
        year_built: args.year_built,
        has_garage: args.garage,
        has_garden: args.garden,
        energy_rating: args.energy_rating,
        current_year: args.current_year,
    };

    validate_attributes(&attrs, &cfg.limits)?;

    let calculator = PriceCalculator::from_config(&cfg.pricing);
    let breakdown = calculator.estimate(&attrs)?;

    println!(
        "{} {:.2} {} ({} {:.2})",
        "Estimated price:".bold(),
        breakdown.estimated_price,
        cfg.pricing.currency,
        "confidence".cyan(),
        breakdown.confidence
    );
    println!();
    println!("{}", "Breakdown:".bold());
    print_component("base", breakdown.base);
    print_component("area", breakdown.area_component);
    print_component("rooms", breakdown.rooms_component);
    print_component("location", breakdown.location_component);
    print_component("features", breakdown.features_component);
    print_component("age", breakdown.age_component);
    print_component("energy", breakdown.energy_component);

    Ok(())
}

fn print_component(name: &str, value: f64) {
    let rendered = format!("{:>12.2}", value);
    if value < 0.0 {
        println!("  {:<10} {}", name.cyan(), rendered.red());
    } else {
        println!("  {:<10} {}", name.cyan(), rendered);
    }
}
