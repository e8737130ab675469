// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project-level run and the JSON layout report handed to a renderer.

use rayon::prelude::*;
use serde::Serialize;

use fixture_layout_geometry::Point3;

use crate::classify::{ClassificationDefaulted, ClassificationKey};
use crate::config::LayoutConfig;
use crate::dimension::{DimensionKind, DimensionRequest, DimensionTarget, SkipReason, SkippedDimension};
use crate::error::{Error, Result};
use crate::layout::{layout_region, RegionLayout};
use crate::model::ElementId;
use crate::snapshot::ProjectSnapshot;

fn coords(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Report for a whole project run.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub summary: ReportSummary,
    pub regions: Vec<RegionOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub regions: usize,
    pub failed: usize,
    pub fixtures: usize,
    pub dimensions: usize,
    pub skipped: usize,
}

/// Per-region result, tagged by `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionOutcome {
    Ok(RegionReport),
    Failed(RegionFailure),
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionFailure {
    pub region: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fixtures: Vec<ElementId>,
    pub labels: Vec<LabelReport>,
    pub dimensions: Vec<DimensionReport>,
    pub skipped: Vec<SkipReport>,
    pub defaulted: Vec<ClassificationDefaulted>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelReport {
    pub group: ClassificationKey,
    pub count: usize,
    pub text: String,
    pub position: [f64; 3],
    pub headline_len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionReport {
    pub kind: DimensionKind,
    pub axis: &'static str,
    pub fixture: ElementId,
    pub target: ElementId,
    /// `"fixture"` or `"wall"`.
    pub target_kind: &'static str,
    pub point_a: [f64; 3],
    pub point_b: [f64; 3],
    pub value: f64,
    pub line: [[f64; 3]; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct SkipReport {
    pub fixture: ElementId,
    pub axis: &'static str,
    pub reason: SkipReason,
}

impl DimensionReport {
    fn new(request: &DimensionRequest, config: &LayoutConfig) -> Self {
        let (start, end) = request.dimension_line(config.dimension_line_half_length);
        let target_kind = match request.target {
            DimensionTarget::Fixture { .. } => "fixture",
            DimensionTarget::Wall { .. } => "wall",
        };
        Self {
            kind: request.kind,
            axis: request.axis.as_str(),
            fixture: request.fixture,
            target: request.target.id(),
            target_kind,
            point_a: coords(&request.point_a),
            point_b: coords(&request.point_b()),
            value: request.measured_value,
            line: [coords(&start), coords(&end)],
        }
    }
}

impl From<&SkippedDimension> for SkipReport {
    fn from(skip: &SkippedDimension) -> Self {
        Self {
            fixture: skip.fixture,
            axis: skip.axis.as_str(),
            reason: skip.reason,
        }
    }
}

impl RegionReport {
    pub fn new(layout: &RegionLayout, name: Option<String>, config: &LayoutConfig) -> Self {
        let labels = layout
            .groups
            .iter()
            .zip(&layout.labels)
            .map(|(group, label)| LabelReport {
                group: group.key.clone(),
                count: group.count,
                text: label.text.clone(),
                position: coords(&label.position),
                headline_len: label.headline_len,
            })
            .collect();

        Self {
            region: layout.region,
            name,
            fixtures: layout.fixtures.clone(),
            labels,
            dimensions: layout
                .dimensions
                .iter()
                .map(|d| DimensionReport::new(d, config))
                .collect(),
            skipped: layout.skipped.iter().map(SkipReport::from).collect(),
            defaulted: layout.defaulted.clone(),
        }
    }
}

impl LayoutReport {
    pub fn from_outcomes(regions: Vec<RegionOutcome>) -> Self {
        let mut summary = ReportSummary {
            regions: regions.len(),
            ..ReportSummary::default()
        };
        for outcome in &regions {
            match outcome {
                RegionOutcome::Ok(report) => {
                    summary.fixtures += report.fixtures.len();
                    summary.dimensions += report.dimensions.len();
                    summary.skipped += report.skipped.len();
                }
                RegionOutcome::Failed(_) => summary.failed += 1,
            }
        }
        Self { summary, regions }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Runs the whole project: builds walls and fixtures once, then lays out
/// each region (optionally only `only`) in parallel.
///
/// A region that cannot be built or tested becomes a
/// [`RegionOutcome::Failed`] entry; other regions are unaffected. Invalid
/// configuration or a malformed wall fails the whole run.
pub fn layout_project(
    project: &ProjectSnapshot,
    config: &LayoutConfig,
    only: Option<ElementId>,
) -> Result<LayoutReport> {
    config.validate()?;
    let walls = project.walls()?;
    let fixtures = project.fixtures();

    let outcomes: Vec<RegionOutcome> = project
        .regions
        .par_iter()
        .filter(|snapshot| only.map_or(true, |id| snapshot.id == id))
        .map(|snapshot| {
            let result = snapshot
                .to_region(config)
                .and_then(|region| layout_region(&region, &fixtures, &walls, config));
            match result {
                Ok(layout) => RegionOutcome::Ok(RegionReport::new(&layout, snapshot.name.clone(), config)),
                Err(err) => {
                    tracing::warn!(region = %snapshot.id, error = %err, "Region failed");
                    RegionOutcome::Failed(RegionFailure {
                        region: snapshot.id,
                        name: snapshot.name.clone(),
                        error: err.to_string(),
                    })
                }
            }
        })
        .collect();

    let report = LayoutReport::from_outcomes(outcomes);
    tracing::info!(
        regions = report.summary.regions,
        failed = report.summary.failed,
        fixtures = report.summary.fixtures,
        dimensions = report.summary.dimensions,
        "Project layout complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const PROJECT: &str = r#"{
        "regions": [
            {"id": 1, "name": "Office", "outline": [
                {"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 8}, {"x": 0, "y": 8}
            ], "height": 3},
            {"id": 2, "name": "Broken"}
        ],
        "fixtures": [
            {"id": 10, "location": {"x": 2, "y": 4, "z": 2.5}, "family_name": "Panel",
             "type_name": "600x600", "mounting_height": 9, "rated_power": "36"},
            {"id": 11, "location": {"x": 6, "y": 4, "z": 2.5}, "family_name": "Panel",
             "type_name": "600x600", "mounting_height": 9, "rated_power": "36"}
        ],
        "walls": [
            {"id": 90, "faces": [[
                {"x": 0, "y": -5, "z": 0}, {"x": 0, "y": 15, "z": 0},
                {"x": 0, "y": 15, "z": 3}, {"x": 0, "y": -5, "z": 3}
            ]]}
        ]
    }"#;

    fn run(only: Option<ElementId>) -> LayoutReport {
        let project = ProjectSnapshot::from_json_str(PROJECT).unwrap();
        layout_project(&project, &LayoutConfig::default(), only).unwrap()
    }

    #[test]
    fn failed_region_does_not_stop_the_others() {
        let report = run(None);

        assert_eq!(report.summary.regions, 2);
        assert_eq!(report.summary.failed, 1);
        assert!(report.has_failures());
        assert!(matches!(report.regions[0], RegionOutcome::Ok(_)));
        match &report.regions[1] {
            RegionOutcome::Failed(failure) => {
                assert_eq!(failure.region, ElementId(2));
                assert!(failure.error.contains("region 2"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn region_filter() {
        let report = run(Some(ElementId(1)));
        assert_eq!(report.summary.regions, 1);
        assert!(!report.has_failures());
    }

    #[test]
    fn report_json_shape() {
        let json: Value = serde_json::from_str(&run(Some(ElementId(1))).to_json(false).unwrap()).unwrap();
        let region = &json["regions"][0];

        assert_eq!(region["status"], "ok");
        assert_eq!(region["name"], "Office");
        assert_eq!(region["labels"][0]["text"], "2 - 600x600 - 36\n+2743 mm");
        assert_eq!(region["labels"][0]["group"]["height"], 2743);

        let dimensions = region["dimensions"].as_array().unwrap();
        let within = dimensions.iter().find(|d| d["kind"] == "within_cluster").unwrap();
        assert_eq!(within["axis"], "X");
        assert_eq!(within["value"], 4.0);
        assert_eq!(within["target_kind"], "fixture");
        assert_eq!(within["line"][0], serde_json::json!([2.0, 4.0, 2.5]));

        let boundary = dimensions.iter().find(|d| d["kind"] == "boundary").unwrap();
        assert_eq!(boundary["target"], 90);
        assert_eq!(boundary["value"], 2.0);
    }

    #[test]
    fn invalid_config_fails_the_run() {
        let project = ProjectSnapshot::from_json_str(PROJECT).unwrap();
        let config = LayoutConfig {
            wall_search_length: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            layout_project(&project, &config, None),
            Err(Error::InvalidConfig(_))
        ));
    }
}
