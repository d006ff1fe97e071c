use anyhow::Result;
use colored::Colorize;
use house_pricer::config;
use std::path::PathBuf;

/// Execute the config show command
///
/// Displays the effective configuration after file and environment layering
pub fn show(config_path: PathBuf) -> Result<()> {
    let cfg = config::load_config(&config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Validates the configuration file
pub fn validate(config_path: PathBuf) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(&config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Currency".cyan(), cfg.pricing.currency);
    println!("  {}: {}", "Current year".cyan(), cfg.pricing.current_year);
    println!(
        "  {}: {:.2} + {:.2}/m²",
        "Base rates".cyan(),
        cfg.pricing.rates.base_price,
        cfg.pricing.rates.per_m2
    );
    println!(
        "  {}: area ≤ {} m², rooms ≤ {}, year {}..{}",
        "Limits".cyan(),
        cfg.limits.max_area_m2,
        cfg.limits.max_bedrooms,
        cfg.limits.min_year_built,
        cfg.limits.max_year_built
    );

    Ok(())
}
