// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded rays and the ray-intersection seam shared by faces, solids and
//! walls.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

use crate::axis::{Axis, Sense};

/// Hits closer than this to the ray origin are ignored.
pub const HIT_EPSILON: f64 = 1e-9;

/// A ray segment starting at `origin`, travelling along the unit vector
/// `direction` for at most `length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
    pub length: f64,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>, length: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            length,
        }
    }

    /// Ray cast from `origin` along a principal axis.
    pub fn along(origin: Point3<f64>, axis: Axis, sense: Sense, length: f64) -> Self {
        Self {
            origin,
            direction: axis.unit() * sense.sign(),
            length,
        }
    }

    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }

    /// True if `distance` lies on the ray segment (excluding the origin).
    pub fn accepts(&self, distance: f64) -> bool {
        distance > HIT_EPSILON && distance <= self.length
    }
}

/// A single ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin along the ray direction.
    pub distance: f64,
    pub point: Point3<f64>,
}

/// Intersection points reported by one target. Planar faces report at most
/// one, so the inline capacity covers the common case.
pub type Hits = SmallVec<[RayHit; 2]>;

/// Anything a bounded ray can be tested against.
pub trait RayIntersect {
    /// Returns every intersection of `ray` with this target.
    fn intersect_ray(&self, ray: &Ray) -> Hits;

    /// Number of intersection points along `ray`.
    fn crossing_count(&self, ray: &Ray) -> usize {
        self.intersect_ray(ray).len()
    }

    /// Closest intersection along `ray`, if any.
    fn nearest_hit(&self, ray: &Ray) -> Option<RayHit> {
        self.intersect_ray(ray)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Finds the closest hit among `targets`, returning the index of the target
/// that produced it. Equal distances keep the earlier target.
pub fn nearest_among<'a, T, I>(targets: I, ray: &Ray) -> Option<(usize, RayHit)>
where
    T: RayIntersect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(usize, RayHit)> = None;
    for (index, target) in targets.into_iter().enumerate() {
        if let Some(hit) = target.nearest_hit(ray) {
            match best {
                Some((_, current)) if current.distance <= hit.distance => {}
                _ => best = Some((index, hit)),
            }
        }
    }
    best
}
