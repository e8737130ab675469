// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary-represented solids: an unordered set of planar faces enclosing a
//! volume.

use nalgebra::{Point2, Point3, Vector3};
use rustc_hash::FxHashMap;

use crate::bounds::Aabb;
use crate::error::{Error, Result};
use crate::face::PlanarFace;
use crate::ray::{Hits, Ray, RayIntersect};

type VertexCell = (i64, i64, i64);

/// A polyhedral solid. Always holds at least one face.
#[derive(Debug, Clone)]
pub struct Solid {
    faces: Vec<PlanarFace>,
    bounds: Aabb,
}

impl Solid {
    /// Wraps already-built faces. Fails with [`Error::EmptySolid`] if there
    /// are none; closure is checked separately by [`Solid::ensure_closed`].
    pub fn from_faces(faces: Vec<PlanarFace>) -> Result<Self> {
        let bounds = Aabb::from_points(faces.iter().flat_map(|f| f.vertices()))
            .ok_or(Error::EmptySolid)?;
        Ok(Self { faces, bounds })
    }

    /// Builds a solid from raw polygon loops, reporting the first unusable
    /// one by index.
    pub fn from_polygons(polygons: Vec<Vec<Point3<f64>>>) -> Result<Self> {
        let faces = polygons
            .into_iter()
            .enumerate()
            .map(|(index, loop_)| {
                PlanarFace::new(loop_).map_err(|defect| Error::DegenerateFace {
                    index,
                    reason: defect.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_faces(faces)
    }

    /// Vertical prism over a simple (possibly concave) outline.
    pub fn extrude_polygon(outline: &[Point2<f64>], z_min: f64, height: f64) -> Result<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(Error::DegenerateFace {
                index: 0,
                reason: format!("extrusion height {height} is not positive"),
            });
        }

        let mut outline = outline.to_vec();
        if outline.len() > 3 && outline.first() == outline.last() {
            outline.pop();
        }

        let z_max = z_min + height;
        let bottom: Vec<Point3<f64>> = outline
            .iter()
            .rev()
            .map(|p| Point3::new(p.x, p.y, z_min))
            .collect();
        let top: Vec<Point3<f64>> = outline
            .iter()
            .map(|p| Point3::new(p.x, p.y, z_max))
            .collect();

        let n = outline.len();
        let mut polygons = Vec::with_capacity(n + 2);
        polygons.push(bottom);
        polygons.push(top);
        for i in 0..n {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            polygons.push(vec![
                Point3::new(a.x, a.y, z_min),
                Point3::new(b.x, b.y, z_min),
                Point3::new(b.x, b.y, z_max),
                Point3::new(a.x, a.y, z_max),
            ]);
        }

        Self::from_polygons(polygons)
    }

    /// Axis-aligned box between two corners.
    pub fn from_box(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        let outline = [
            Point2::new(min.x, min.y),
            Point2::new(max.x, min.y),
            Point2::new(max.x, max.y),
            Point2::new(min.x, max.y),
        ];
        Self::extrude_polygon(&outline, min.z, max.z - min.z)
    }

    pub fn faces(&self) -> &[PlanarFace] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn bounding_box(&self) -> &Aabb {
        &self.bounds
    }

    /// Average of all face vertices.
    pub fn centroid(&self) -> Point3<f64> {
        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        let mut count = 0usize;
        for v in self.faces.iter().flat_map(|f| f.vertices()) {
            sum += v.coords;
            count += 1;
        }
        Point3::from(sum / count as f64)
    }

    /// Counts boundary edges that are not matched by another face.
    ///
    /// Vertices are snapped to a grid of `tolerance` before comparison, so an
    /// edge shared by two faces with slightly different coordinates still
    /// pairs up. A watertight solid returns zero.
    pub fn open_edge_count(&self, tolerance: f64) -> usize {
        let cell = tolerance.max(1e-12);
        let snap = |p: &Point3<f64>| -> VertexCell {
            (
                (p.x / cell).round() as i64,
                (p.y / cell).round() as i64,
                (p.z / cell).round() as i64,
            )
        };

        let mut uses: FxHashMap<(VertexCell, VertexCell), usize> = FxHashMap::default();
        for face in &self.faces {
            for (a, b) in face.edges() {
                let (ka, kb) = (snap(a), snap(b));
                if ka == kb {
                    continue;
                }
                let key = if ka < kb { (ka, kb) } else { (kb, ka) };
                *uses.entry(key).or_default() += 1;
            }
        }

        uses.values().filter(|&&count| count % 2 == 1).count()
    }

    /// Fails with [`Error::OpenShell`] unless every edge is shared.
    pub fn ensure_closed(&self, tolerance: f64) -> Result<()> {
        match self.open_edge_count(tolerance) {
            0 => Ok(()),
            open => Err(Error::OpenShell(open)),
        }
    }
}

impl RayIntersect for Solid {
    fn intersect_ray(&self, ray: &Ray) -> Hits {
        self.faces
            .iter()
            .flat_map(|face| face.intersect_ray(ray))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Sense};
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn from_faces_rejects_empty() {
        assert_eq!(Solid::from_faces(Vec::new()).unwrap_err(), Error::EmptySolid);
    }

    #[test]
    fn from_polygons_reports_bad_face_index() {
        let err = Solid::from_polygons(vec![
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DegenerateFace { index: 1, .. }));
    }

    #[test]
    fn extruded_prism_is_closed() {
        let solid = Solid::extrude_polygon(&l_shape(), 0.0, 3.0).unwrap();
        assert_eq!(solid.face_count(), 8);
        assert_eq!(solid.open_edge_count(1e-6), 0);
        assert!(solid.ensure_closed(1e-6).is_ok());
    }

    #[test]
    fn missing_face_leaves_shell_open() {
        let solid = Solid::from_box(Point3::origin(), Point3::new(2.0, 2.0, 2.0)).unwrap();
        let partial = Solid::from_faces(solid.faces()[1..].to_vec()).unwrap();
        assert_eq!(partial.ensure_closed(1e-6).unwrap_err(), Error::OpenShell(4));
    }

    #[test]
    fn rejects_non_positive_height() {
        assert!(Solid::extrude_polygon(&l_shape(), 0.0, 0.0).is_err());
    }

    #[test]
    fn bounds_and_centroid_of_box() {
        let solid = Solid::from_box(Point3::new(-1.0, -2.0, 0.0), Point3::new(3.0, 2.0, 4.0)).unwrap();
        let bb = solid.bounding_box();
        assert_eq!(bb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(3.0, 2.0, 4.0));

        let c = solid.centroid();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_through_box_hits_two_faces() {
        let solid = Solid::from_box(Point3::origin(), Point3::new(4.0, 4.0, 4.0)).unwrap();
        let ray = Ray::along(Point3::new(-1.0, 1.0, 1.0), Axis::X, Sense::Positive, 100.0);
        let hits = solid.intersect_ray(&ray);

        assert_eq!(hits.len(), 2);
        let nearest = solid.nearest_hit(&ray).unwrap();
        assert_relative_eq!(nearest.distance, 1.0, epsilon = 1e-12);
    }
}
