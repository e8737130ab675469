// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input entities: regions, fixtures and walls.
//!
//! These are read-only snapshots built by the caller for one invocation.

use std::fmt;

use fixture_layout_geometry::{
    Axis, Hits, PlanarFace, Point2, Point3, Ray, RayIntersect, Result as GeometryResult, Solid,
    HIT_EPSILON,
};
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};

/// Opaque identity of a host element. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn yes() -> bool {
    true
}

/// Which centre reference planes a fixture exposes for dimensioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureReferences {
    /// Centre plane between left and right; used for X dimensions.
    #[serde(default = "yes")]
    pub left_right: bool,
    /// Centre plane between front and back; used for Y dimensions.
    #[serde(default = "yes")]
    pub front_back: bool,
}

impl Default for FixtureReferences {
    fn default() -> Self {
        Self {
            left_right: true,
            front_back: true,
        }
    }
}

impl FixtureReferences {
    /// True if the fixture can be referenced by a dimension along `axis`.
    pub fn supports(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.left_right,
            Axis::Y => self.front_back,
        }
    }
}

/// A point-located fixture with its classification attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: ElementId,
    /// Insertion point; `None` for objects that are not point-located.
    pub location: Option<Point3<f64>>,
    /// Host level (storey) the fixture belongs to.
    pub level: Option<ElementId>,
    pub family_name: Option<String>,
    pub type_name: Option<String>,
    /// Mounting height in internal units.
    pub mounting_height: Option<f64>,
    /// Rated power, already normalized to a display string.
    pub rated_power: Option<String>,
    pub references: FixtureReferences,
}

impl Fixture {
    /// A fixture at `location` with no classification attributes.
    pub fn at(id: ElementId, location: Point3<f64>) -> Self {
        Self {
            id,
            location: Some(location),
            level: None,
            family_name: None,
            type_name: None,
            mounting_height: None,
            rated_power: None,
            references: FixtureReferences::default(),
        }
    }

    pub fn with_level(mut self, level: ElementId) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_type(mut self, family_name: &str, type_name: &str) -> Self {
        self.family_name = Some(family_name.to_string());
        self.type_name = Some(type_name.to_string());
        self
    }

    pub fn with_height(mut self, mounting_height: f64) -> Self {
        self.mounting_height = Some(mounting_height);
        self
    }

    pub fn with_power(mut self, rated_power: &str) -> Self {
        self.rated_power = Some(rated_power.to_string());
        self
    }

    pub fn with_references(mut self, references: FixtureReferences) -> Self {
        self.references = references;
        self
    }

    /// True if both fixtures sit on the same host level.
    pub fn shares_level(&self, other: &Fixture) -> bool {
        self.level == other.level
    }
}

/// A room or space bounded by a solid.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: ElementId,
    solid: Solid,
}

impl Region {
    pub fn new(id: ElementId, solid: Solid) -> Self {
        Self { id, solid }
    }

    /// Builds a region from boundary polygons, checking closure when the
    /// configuration requires it. Failures carry the region's identity.
    pub fn from_polygons(
        id: ElementId,
        polygons: Vec<Vec<Point3<f64>>>,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let solid = Solid::from_polygons(polygons).map_err(Error::in_region(id))?;
        Self::checked(id, solid, config)
    }

    /// Builds a prismatic region over a plan outline.
    pub fn extruded(
        id: ElementId,
        outline: &[Point2<f64>],
        z_min: f64,
        height: f64,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let solid = Solid::extrude_polygon(outline, z_min, height).map_err(Error::in_region(id))?;
        Self::checked(id, solid, config)
    }

    fn checked(id: ElementId, solid: Solid, config: &LayoutConfig) -> Result<Self> {
        if config.require_closed_region {
            solid
                .ensure_closed(config.closed_solid_tolerance)
                .map_err(Error::in_region(id))?;
        }
        Ok(Self { id, solid })
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Reference point for label placement: the centre of the bounding box.
    pub fn anchor(&self) -> Point3<f64> {
        self.solid.bounding_box().center()
    }
}

/// A wall treated as a set of planar obstacle faces.
#[derive(Debug, Clone)]
pub struct Wall {
    pub id: ElementId,
    faces: Vec<PlanarFace>,
}

impl Wall {
    pub fn from_faces(id: ElementId, faces: Vec<PlanarFace>) -> Self {
        Self { id, faces }
    }

    pub fn from_polygons(id: ElementId, polygons: Vec<Vec<Point3<f64>>>) -> Result<Self> {
        let solid = Solid::from_polygons(polygons).map_err(|source| Error::Wall { wall: id, source })?;
        Ok(Self::from_faces(id, solid.faces().to_vec()))
    }

    /// Box-shaped wall body centred on a plan baseline.
    pub fn from_baseline(
        id: ElementId,
        start: Point2<f64>,
        end: Point2<f64>,
        thickness: f64,
        z_min: f64,
        height: f64,
    ) -> Result<Self> {
        Self::baseline_body(start, end, thickness, z_min, height)
            .map(|solid| Self::from_faces(id, solid.faces().to_vec()))
            .map_err(|source| Error::Wall { wall: id, source })
    }

    fn baseline_body(
        start: Point2<f64>,
        end: Point2<f64>,
        thickness: f64,
        z_min: f64,
        height: f64,
    ) -> GeometryResult<Solid> {
        let along = end - start;
        let normal = nalgebra::Vector2::new(-along.y, along.x).normalize() * (thickness / 2.0);
        let outline = [start - normal, end - normal, end + normal, start + normal];
        Solid::extrude_polygon(&outline, z_min, height)
    }

    pub fn faces(&self) -> &[PlanarFace] {
        &self.faces
    }
}

impl RayIntersect for Wall {
    fn intersect_ray(&self, ray: &Ray) -> Hits {
        self.faces
            .iter()
            .filter_map(|face| face.hit(ray, HIT_EPSILON))
            .collect()
    }
}
