// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixture-Layout Geometry
//!
//! Geometry primitives for laying out fixture annotations: principal axes,
//! bounded rays, planar faces, boundary-represented solids, and the
//! ray-casting containment test used to decide which fixtures sit inside a
//! region.

pub mod axis;
pub mod bounds;
pub mod containment;
pub mod error;
pub mod face;
pub mod ray;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use axis::{Axis, Sense};
pub use bounds::Aabb;
pub use containment::{is_inside, ContainmentTester};
pub use error::{Error, Result};
pub use face::{FaceDefect, PlanarFace};
pub use ray::{nearest_among, Hits, Ray, RayHit, RayIntersect, HIT_EPSILON};
pub use solid::Solid;
