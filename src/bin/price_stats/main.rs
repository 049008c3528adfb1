//! Aggregation orchestrator - loads the inputs, runs the pipeline, writes
//! the regional price-per-sqm statistics

use anyhow::{Context, Result};
use listing_stats::pipeline::filter::FilterConfig;
use listing_stats::pipeline::run::run;
use listing_stats::pipeline::{parse, write};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    info!("Starting listing aggregation pipeline");

    let config = Config::from_env()?;
    let filters = config.filter_config();
    info!("Configuration loaded");

    info!("Step 1/3: Loading region reference...");
    let regions = parse::read_region_lookup(&config.regions_path)?;
    info!("✓ Loaded {} districts", regions.len());

    info!("Step 2/3: Processing listings...");
    let listings = parse::read_listings(&config.listings_path)?;
    let summary = run(listings, &regions, &filters)?;
    info!("✓ {}", summary.metrics);

    info!("Step 3/3: Writing aggregates...");
    write::write_aggregates(&config.output_path, &summary.aggregates)?;
    info!(
        "✓ Wrote {} groups to {:?}",
        summary.aggregates.len(),
        config.output_path
    );

    Ok(())
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
struct Config {
    listings_path: PathBuf,
    regions_path: PathBuf,
    output_path: PathBuf,
    rent_ppsm_min: Option<Decimal>,
    rent_ppsm_max: Option<Decimal>,
    sale_ppsm_min: Option<Decimal>,
    sale_ppsm_max: Option<Decimal>,
}

impl Config {
    fn from_env() -> Result<Self> {
        Ok(Config {
            listings_path: env::var("LISTINGS_CSV")
                .unwrap_or_else(|_| "data/listings.csv".to_string())
                .into(),

            regions_path: env::var("REGIONS_CSV")
                .unwrap_or_else(|_| "data/districts.csv".to_string())
                .into(),

            output_path: env::var("OUTPUT_CSV")
                .unwrap_or_else(|_| "data/price_per_sqm.csv".to_string())
                .into(),

            rent_ppsm_min: decimal_var("RENT_PRICE_PER_SQM_MIN")?,
            rent_ppsm_max: decimal_var("RENT_PRICE_PER_SQM_MAX")?,
            sale_ppsm_min: decimal_var("SALE_PRICE_PER_SQM_MIN")?,
            sale_ppsm_max: decimal_var("SALE_PRICE_PER_SQM_MAX")?,
        })
    }

    /// Build the filter boundaries, starting from the defaults and applying
    /// any per-bound override. Inverted results are rejected by the
    /// pipeline before the first row.
    fn filter_config(&self) -> FilterConfig {
        let mut filters = FilterConfig::default();

        if let Some(min) = self.rent_ppsm_min {
            filters.rent_price_per_sqm.min = min;
        }
        if let Some(max) = self.rent_ppsm_max {
            filters.rent_price_per_sqm.max = max;
        }
        if let Some(min) = self.sale_ppsm_min {
            filters.sale_price_per_sqm.min = min;
        }
        if let Some(max) = self.sale_ppsm_max {
            filters.sale_price_per_sqm.max = max;
        }

        filters
    }
}

/// Read an optional decimal environment variable. A present but malformed
/// value is a configuration error, not a silent fallback.
fn decimal_var(name: &str) -> Result<Option<Decimal>> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("invalid {name}: {raw:?}"))?;
            Ok(Some(value))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("could not read {name}")),
    }
}
