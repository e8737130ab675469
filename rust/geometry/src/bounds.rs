// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Smallest box enclosing `points`, or `None` when there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    pub fn expand(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn diagonal(&self) -> f64 {
        self.extent().norm()
    }

    /// Inclusive containment test with a symmetric tolerance.
    pub fn contains(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - tolerance && p[i] <= self.max[i] + tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb::from_points(std::iter::empty::<&Point3<f64>>()).is_none());
    }

    #[test]
    fn encloses_points() {
        let pts = [
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(-3.0, 4.0, 2.0),
            Point3::new(0.0, 0.0, 5.0),
        ];
        let bb = Aabb::from_points(&pts).unwrap();

        assert_eq!(bb.min, Point3::new(-3.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(1.0, 4.0, 5.0));
        assert_eq!(bb.center(), Point3::new(-1.0, 1.0, 2.5));
        assert_relative_eq!(bb.diagonal(), (16.0f64 + 36.0 + 25.0).sqrt());
        assert!(bb.contains(&Point3::new(1.0, 4.0, 5.0), 0.0));
        assert!(!bb.contains(&Point3::new(1.1, 0.0, 0.0), 0.0));
        assert!(bb.contains(&Point3::new(1.1, 0.0, 0.0), 0.2));
    }
}
