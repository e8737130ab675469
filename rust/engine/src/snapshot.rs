// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON input snapshots.
//!
//! A host application exports its regions, fixtures and walls once per run
//! into a [`ProjectSnapshot`]. Points are plain `{x, y, z}` objects so the
//! format stays independent of the math library.

use serde::{Deserialize, Serialize};

use fixture_layout_geometry::{Error as GeometryError, Point2, Point3};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::model::{ElementId, Fixture, FixtureReferences, Region, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PointSnapshot {
    pub fn to_nalgebra(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2Snapshot {
    pub x: f64,
    pub y: f64,
}

impl Point2Snapshot {
    pub fn to_nalgebra(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Whole-project input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub regions: Vec<RegionSnapshot>,
    #[serde(default)]
    pub fixtures: Vec<FixtureSnapshot>,
    #[serde(default)]
    pub walls: Vec<WallSnapshot>,
}

impl ProjectSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn fixtures(&self) -> Vec<Fixture> {
        self.fixtures.iter().map(FixtureSnapshot::to_fixture).collect()
    }

    /// Builds every wall. A malformed wall fails the whole call.
    pub fn walls(&self) -> Result<Vec<Wall>> {
        self.walls.iter().map(WallSnapshot::to_wall).collect()
    }
}

/// A region given either by explicit boundary faces or by a plan outline
/// extruded from `z_min` by `height`. Faces win if both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<Vec<PointSnapshot>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Vec<Point2Snapshot>>,
    #[serde(default)]
    pub z_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RegionSnapshot {
    pub fn to_region(&self, config: &LayoutConfig) -> Result<Region> {
        match (&self.faces, &self.outline, self.height) {
            (Some(faces), _, _) => {
                let polygons = faces
                    .iter()
                    .map(|face| face.iter().map(|p| p.to_nalgebra()).collect())
                    .collect();
                Region::from_polygons(self.id, polygons, config)
            }
            (None, Some(outline), Some(height)) => {
                let outline: Vec<Point2<f64>> = outline.iter().map(|p| p.to_nalgebra()).collect();
                Region::extruded(self.id, &outline, self.z_min, height, config)
            }
            _ => Err(Error::Region {
                region: self.id,
                source: GeometryError::MissingSolid,
            }),
        }
    }
}

/// Rated power as exported by the host: either already text or a bare
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PowerSnapshot {
    Text(String),
    Number(f64),
}

impl PowerSnapshot {
    pub fn to_label(&self) -> String {
        match self {
            PowerSnapshot::Text(text) => text.trim().to_string(),
            // Whole watts, half to even; `+ 0.0` folds negative zero.
            PowerSnapshot::Number(value) => (value.round_ties_even() + 0.0).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSnapshot {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PointSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_power: Option<PowerSnapshot>,
    #[serde(default)]
    pub references: FixtureReferences,
}

impl FixtureSnapshot {
    pub fn to_fixture(&self) -> Fixture {
        Fixture {
            id: self.id,
            location: self.location.map(PointSnapshot::to_nalgebra),
            level: self.level,
            family_name: self.family_name.clone(),
            type_name: self.type_name.clone(),
            mounting_height: self.mounting_height,
            rated_power: self.rated_power.as_ref().map(PowerSnapshot::to_label),
            references: self.references,
        }
    }
}

/// A straight wall body around a plan baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    pub start: Point2Snapshot,
    pub end: Point2Snapshot,
    pub thickness: f64,
    #[serde(default)]
    pub z_min: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSnapshot {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<Vec<PointSnapshot>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineSnapshot>,
}

impl WallSnapshot {
    pub fn to_wall(&self) -> Result<Wall> {
        match (&self.faces, &self.baseline) {
            (Some(faces), _) => Wall::from_polygons(
                self.id,
                faces
                    .iter()
                    .map(|face| face.iter().map(|p| p.to_nalgebra()).collect())
                    .collect(),
            ),
            (None, Some(b)) => Wall::from_baseline(
                self.id,
                b.start.to_nalgebra(),
                b.end.to_nalgebra(),
                b.thickness,
                b.z_min,
                b.height,
            ),
            (None, None) => Err(Error::Wall {
                wall: self.id,
                source: GeometryError::MissingSolid,
            }),
        }
    }
}
