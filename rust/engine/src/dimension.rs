// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension requests handed to the rendering consumer.

use fixture_layout_geometry::{Axis, Point3};
use serde::Serialize;

use crate::model::{ElementId, Fixture};

/// Which rule produced a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    /// Spacing between neighbours inside one row or column.
    WithinCluster,
    /// Spacing between adjacent rows or columns.
    BetweenClusters,
    /// Distance from an extremal fixture to the nearest wall.
    Boundary,
}

/// Second endpoint of a dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionTarget {
    Fixture { id: ElementId, point: Point3<f64> },
    Wall { id: ElementId, point: Point3<f64> },
}

impl DimensionTarget {
    pub fn id(&self) -> ElementId {
        match self {
            DimensionTarget::Fixture { id, .. } | DimensionTarget::Wall { id, .. } => *id,
        }
    }

    pub fn point(&self) -> Point3<f64> {
        match self {
            DimensionTarget::Fixture { point, .. } | DimensionTarget::Wall { point, .. } => *point,
        }
    }
}

/// A linear dimension between a fixture and another fixture or a wall,
/// measured along `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRequest {
    pub kind: DimensionKind,
    pub axis: Axis,
    pub fixture: ElementId,
    pub point_a: Point3<f64>,
    pub target: DimensionTarget,
    pub measured_value: f64,
}

impl DimensionRequest {
    pub fn between_fixtures(
        kind: DimensionKind,
        axis: Axis,
        (a, point_a): (&Fixture, Point3<f64>),
        (b, point_b): (&Fixture, Point3<f64>),
    ) -> Self {
        Self {
            kind,
            axis,
            fixture: a.id,
            point_a,
            target: DimensionTarget::Fixture {
                id: b.id,
                point: point_b,
            },
            measured_value: (axis.coord(&point_b) - axis.coord(&point_a)).abs(),
        }
    }

    pub fn to_wall(
        axis: Axis,
        (fixture, point_a): (&Fixture, Point3<f64>),
        wall: ElementId,
        wall_point: Point3<f64>,
    ) -> Self {
        Self {
            kind: DimensionKind::Boundary,
            axis,
            fixture: fixture.id,
            point_a,
            target: DimensionTarget::Wall {
                id: wall,
                point: wall_point,
            },
            measured_value: (axis.coord(&wall_point) - axis.coord(&point_a)).abs(),
        }
    }

    pub fn point_b(&self) -> Point3<f64> {
        self.target.point()
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.point_a, &self.point_b())
    }

    /// Suggested dimension line: a segment along the measurement axis through
    /// the midpoint of the two endpoints.
    pub fn dimension_line(&self, half_length: f64) -> (Point3<f64>, Point3<f64>) {
        let mid = self.midpoint();
        let offset = self.axis.unit() * half_length;
        (mid - offset, mid + offset)
    }
}

/// Why a boundary dimension was not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No wall lies along the search ray.
    NoWall,
    /// The fixture exposes no reference plane for the axis.
    MissingReference,
}

/// A boundary dimension that was skipped without failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedDimension {
    pub fixture: ElementId,
    pub axis: Axis,
    pub reason: SkipReason,
}
