// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-region orchestration: locate, aggregate, label, dimension.

use rayon::prelude::*;

use crate::aggregate::{aggregate, place_labels, AnnotationGroup, AnnotationLabel};
use crate::classify::ClassificationDefaulted;
use crate::config::LayoutConfig;
use crate::dimension::{DimensionRequest, SkippedDimension};
use crate::error::Result;
use crate::locator::locate;
use crate::model::{ElementId, Fixture, Region, Wall};
use crate::plan::plan_dimensions;

/// Everything produced for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayout {
    pub region: ElementId,
    /// Fixtures found inside the region, in input order.
    pub fixtures: Vec<ElementId>,
    pub groups: Vec<AnnotationGroup>,
    pub labels: Vec<AnnotationLabel>,
    pub dimensions: Vec<DimensionRequest>,
    pub skipped: Vec<SkippedDimension>,
    pub defaulted: Vec<ClassificationDefaulted>,
}

impl RegionLayout {
    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }
}

/// Lays out a single region.
///
/// Fails if `config` is invalid or if the region's solid cannot be tested;
/// a region error carries the region id and nothing partial is returned.
pub fn layout_region(
    region: &Region,
    candidates: &[Fixture],
    walls: &[Wall],
    config: &LayoutConfig,
) -> Result<RegionLayout> {
    config.validate()?;
    let inside = match locate(region, candidates, config) {
        Ok(inside) => inside,
        Err(err) => {
            tracing::warn!(region = %region.id, error = %err, "Region layout failed");
            return Err(err);
        }
    };

    let aggregation = aggregate(&inside, config);
    let labels = place_labels(&aggregation.groups, region.anchor(), config);
    let plan = plan_dimensions(&inside, walls, config);

    tracing::info!(
        region = %region.id,
        fixtures = inside.len(),
        groups = aggregation.groups.len(),
        dimensions = plan.requests.len(),
        skipped = plan.skipped.len(),
        "Region laid out"
    );

    Ok(RegionLayout {
        region: region.id,
        fixtures: inside.iter().map(|f| f.id).collect(),
        groups: aggregation.groups,
        labels,
        dimensions: plan.requests,
        skipped: plan.skipped,
        defaulted: aggregation.defaulted,
    })
}

/// Lays out independent regions in parallel against a shared fixture and
/// wall set. Results are returned in the order of `regions`; an invalid
/// `config` fails every region.
pub fn layout_regions(
    regions: &[Region],
    candidates: &[Fixture],
    walls: &[Wall],
    config: &LayoutConfig,
) -> Vec<Result<RegionLayout>> {
    let start = std::time::Instant::now();

    let results: Vec<_> = regions
        .par_iter()
        .map(|region| layout_region(region, candidates, walls, config))
        .collect();

    tracing::info!(
        regions = regions.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        elapsed_ms = start.elapsed().as_millis(),
        "Batch layout complete"
    );
    results
}
