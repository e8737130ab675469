// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-solid classification by ray-casting parity.
//!
//! A ray is cast from the query point towards +X and the face crossings are
//! summed over the whole solid: an odd total means the point is inside. The
//! ray direction carries a tiny fixed Y/Z tilt so that it does not run
//! exactly along face edges or through vertices of axis-aligned geometry.
//!
//! Points within `boundary_tolerance` of a face are inside. Ceiling-hosted
//! fixtures sit exactly on a region's top face, where parity alone is
//! undefined.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::ray::{Ray, RayIntersect};
use crate::solid::Solid;

/// Tolerance for the bounding-box early-out.
const BOUNDS_TOLERANCE: f64 = 1e-9;

fn cast_direction() -> Vector3<f64> {
    Vector3::new(1.0, 1e-7, -1e-8)
}

/// Ray-casting containment tester.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainmentTester {
    /// Multiplier on the solid's bounding-box diagonal added to the ray
    /// length, so the ray always exits the solid.
    pub safety_factor: f64,
    /// Points this close to a face count as inside.
    pub boundary_tolerance: f64,
}

impl Default for ContainmentTester {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl ContainmentTester {
    pub fn new(safety_factor: f64) -> Self {
        Self {
            safety_factor,
            boundary_tolerance: BOUNDS_TOLERANCE,
        }
    }

    pub fn with_boundary_tolerance(mut self, tolerance: f64) -> Self {
        self.boundary_tolerance = tolerance;
        self
    }

    /// True if `point` lies on one of the solid's faces.
    pub fn on_boundary(&self, solid: &Solid, point: &Point3<f64>) -> bool {
        solid
            .faces()
            .iter()
            .any(|face| face.touches(point, self.boundary_tolerance))
    }

    /// Length of the cast ray for `point`: the distance to the solid's far X
    /// extent plus the scaled bounding-box diagonal.
    pub fn ray_length(&self, solid: &Solid, point: &Point3<f64>) -> f64 {
        let bounds = solid.bounding_box();
        let to_far_side = (bounds.max.x - point.x).max(0.0);
        to_far_side + bounds.diagonal().max(1.0) * self.safety_factor.max(1.0)
    }

    /// Total number of face crossings along the cast ray.
    pub fn crossings(&self, solid: &Solid, point: &Point3<f64>) -> Result<usize> {
        if solid.face_count() == 0 {
            return Err(Error::EmptySolid);
        }
        if !point.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::NonFinitePoint);
        }

        let ray = Ray::new(*point, cast_direction(), self.ray_length(solid, point));
        Ok(solid
            .faces()
            .iter()
            .map(|face| face.crossing_count(&ray))
            .sum())
    }

    /// True if `point` lies inside `solid`.
    pub fn is_inside(&self, solid: &Solid, point: &Point3<f64>) -> Result<bool> {
        if !point.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::NonFinitePoint);
        }
        if !solid.bounding_box().contains(point, self.boundary_tolerance) {
            return Ok(false);
        }
        if self.on_boundary(solid, point) {
            return Ok(true);
        }
        Ok(self.crossings(solid, point)? % 2 == 1)
    }
}

/// [`ContainmentTester::is_inside`] with the default safety factor.
pub fn is_inside(solid: &Solid, point: &Point3<f64>) -> Result<bool> {
    ContainmentTester::default().is_inside(solid, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn unit_box() -> Solid {
        Solid::from_box(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap()
    }

    fn u_shape() -> Solid {
        Solid::extrude_polygon(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(9.0, 0.0),
                Point2::new(9.0, 9.0),
                Point2::new(6.0, 9.0),
                Point2::new(6.0, 3.0),
                Point2::new(3.0, 3.0),
                Point2::new(3.0, 9.0),
                Point2::new(0.0, 9.0),
            ],
            0.0,
            3.0,
        )
        .unwrap()
    }

    #[test]
    fn centre_of_box_is_inside() {
        assert!(is_inside(&unit_box(), &Point3::new(0.5, 0.5, 0.5)).unwrap());
    }

    #[test]
    fn points_outside_bounds_are_outside() {
        let solid = unit_box();
        for p in [
            Point3::new(-0.5, 0.5, 0.5),
            Point3::new(1.5, 0.5, 0.5),
            Point3::new(0.5, 0.5, 2.0),
            Point3::new(0.5, -3.0, 0.5),
        ] {
            assert!(!is_inside(&solid, &p).unwrap(), "{p:?}");
        }
    }

    #[test]
    fn ray_grazing_reflex_vertex_keeps_parity() {
        // The cast line y = 1 touches the reflex vertex (5, 1) from below.
        let solid = Solid::extrude_polygon(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 2.0),
                Point2::new(5.0, 1.0),
                Point2::new(0.0, 2.0),
            ],
            0.0,
            3.0,
        )
        .unwrap();
        let tester = ContainmentTester::default();
        let p = Point3::new(1.0, 1.0, 1.5);

        assert_eq!(tester.crossings(&solid, &p).unwrap() % 2, 1);
        assert!(tester.is_inside(&solid, &p).unwrap());
    }

    #[test]
    fn concave_notch_is_outside() {
        let solid = u_shape();
        assert!(is_inside(&solid, &Point3::new(1.5, 6.0, 1.0)).unwrap());
        assert!(is_inside(&solid, &Point3::new(7.5, 6.0, 1.0)).unwrap());
        assert!(is_inside(&solid, &Point3::new(4.5, 1.5, 1.0)).unwrap());
        assert!(!is_inside(&solid, &Point3::new(4.5, 6.0, 1.0)).unwrap());
    }

    #[test]
    fn points_on_top_and_bottom_faces_are_inside() {
        let solid = u_shape();
        let tester = ContainmentTester::default();

        for z in [0.0, 1.5, 3.0] {
            assert!(tester.is_inside(&solid, &Point3::new(1.5, 6.0, z)).unwrap(), "z = {z}");
        }
        // On the top plane but over the notch.
        assert!(!tester.is_inside(&solid, &Point3::new(4.5, 6.0, 3.0)).unwrap());
        assert!(!tester.is_inside(&solid, &Point3::new(1.5, 6.0, 3.0 + 1e-6)).unwrap());
    }

    #[test]
    fn point_on_side_wall_is_inside() {
        let tester = ContainmentTester::default();
        assert!(tester.on_boundary(&unit_box(), &Point3::new(1.0, 0.5, 0.5)));
        assert!(tester.is_inside(&unit_box(), &Point3::new(1.0, 0.5, 0.5)).unwrap());
        assert!(!tester.on_boundary(&unit_box(), &Point3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn non_finite_point_is_an_error() {
        let err = is_inside(&unit_box(), &Point3::new(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, Error::NonFinitePoint);
    }

    #[test]
    fn ray_length_exceeds_far_side() {
        let solid = unit_box();
        let tester = ContainmentTester::new(2.0);
        let len = tester.ray_length(&solid, &Point3::new(0.25, 0.5, 0.5));
        assert!(len > 0.75 + solid.bounding_box().diagonal());
    }
}
