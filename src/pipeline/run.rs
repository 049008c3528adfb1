//! Pipeline runner - wires the stages together in a single streaming pass

use crate::pipeline::aggregate::Aggregator;
use crate::pipeline::dedup::Deduplicator;
use crate::pipeline::filter::{passes_filters, ConfigError, FilterConfig};
use crate::pipeline::normalize::normalize;
use crate::pipeline::regions::{resolve_region, RegionLookup};
use crate::pipeline::types::{AggregateRow, Listing, StageMetrics};
use tracing::info;

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct PipelineSummary {
    pub aggregates: Vec<AggregateRow>,
    pub metrics: StageMetrics,
}

/// Run dedup -> normalize -> region join -> filters -> aggregation over a
/// stream of raw listings. Rows pass through one at a time; only the
/// per-group value buffers and the dedup identifier set grow with input
/// size. Boundary constants are validated before the first row is touched.
pub fn run<I>(
    listings: I,
    regions: &RegionLookup,
    config: &FilterConfig,
) -> Result<PipelineSummary, ConfigError>
where
    I: IntoIterator<Item = Listing>,
{
    config.validate()?;

    let mut metrics = StageMetrics::default();
    let mut dedup = Deduplicator::new();
    let mut aggregator = Aggregator::new();

    for listing in listings {
        metrics.rows_in += 1;

        if !dedup.keep(&listing) {
            metrics.duplicates_dropped += 1;
            continue;
        }

        let normalized = normalize(listing);
        let joined = resolve_region(normalized, regions);
        if joined.region.is_none() {
            metrics.regions_unmatched += 1;
        }

        if !passes_filters(&joined, config) {
            metrics.rows_filtered_out += 1;
            continue;
        }

        metrics.rows_aggregated += 1;
        aggregator.push(&joined);
    }

    let aggregates = aggregator.finish();
    metrics.groups = aggregates.len();

    info!("Pipeline complete: {}", metrics);

    Ok(PipelineSummary {
        aggregates,
        metrics,
    })
}
