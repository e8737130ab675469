// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon faces with a ray-intersection test.
//!
//! A ray is intersected with the face's supporting plane, and the hit point
//! is then classified with a 2D even-odd test in the plane's dominant
//! projection. This handles concave outlines without triangulating them.

use nalgebra::{Point3, Vector3};

use crate::ray::{Hits, Ray, RayHit, RayIntersect};

/// Rays whose direction is this close to parallel with a face plane miss it.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Why a polygon cannot be used as a face.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FaceDefect {
    #[error("face has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),

    #[error("face vertices have non-finite coordinates")]
    NonFinite,

    #[error("face has zero area")]
    ZeroArea,
}

/// A planar polygon bounded by a single outer loop.
#[derive(Debug, Clone)]
pub struct PlanarFace {
    vertices: Vec<Point3<f64>>,
    normal: Vector3<f64>,
    /// Coordinate indices of the projection plane.
    axes: (usize, usize),
    outline: Vec<[f64; 2]>,
}

impl PlanarFace {
    /// Builds a face from its boundary loop. A repeated closing vertex is
    /// dropped.
    pub fn new(mut vertices: Vec<Point3<f64>>) -> Result<Self, FaceDefect> {
        if vertices.len() > 3 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(FaceDefect::TooFewVertices(vertices.len()));
        }
        if vertices.iter().any(|v| !v.coords.iter().all(|c| c.is_finite())) {
            return Err(FaceDefect::NonFinite);
        }

        let normal = newell_normal(&vertices).ok_or(FaceDefect::ZeroArea)?;
        let axes = dominant_projection(&normal);
        let outline = vertices.iter().map(|v| project(v, axes)).collect();

        Ok(Self {
            vertices,
            normal,
            axes,
            outline,
        })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Unit normal following the right-hand rule of the vertex order.
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Consecutive vertex pairs of the boundary loop, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Tests whether a point already known to lie on the face plane is inside
    /// its boundary.
    pub fn contains_planar_point(&self, point: &Point3<f64>) -> bool {
        point_in_polygon_2d(&project(point, self.axes), &self.outline)
    }

    /// Like [`contains_planar_point`](Self::contains_planar_point), but points
    /// within `tolerance` of the outline also count.
    pub fn covers_planar_point(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let p = project(point, self.axes);
        point_in_polygon_2d(&p, &self.outline) || near_outline_2d(&p, &self.outline, tolerance)
    }

    /// Distance from `point` to the face's supporting plane.
    pub fn plane_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(*point - self.vertices[0])).abs()
    }

    /// True if `point` lies on the face, boundary included, within
    /// `tolerance`.
    pub fn touches(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        self.plane_distance(point) <= tolerance && self.covers_planar_point(point, tolerance)
    }

    /// Ray hit with the face; hits within `edge_tolerance` of the outline
    /// count. A zero tolerance gives the half-open even-odd rule used for
    /// parity counting.
    pub fn hit(&self, ray: &Ray, edge_tolerance: f64) -> Option<RayHit> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let distance = self.normal.dot(&(self.vertices[0] - ray.origin)) / denom;
        if !ray.accepts(distance) {
            return None;
        }

        let point = ray.point_at(distance);
        let inside = if edge_tolerance > 0.0 {
            self.covers_planar_point(&point, edge_tolerance)
        } else {
            self.contains_planar_point(&point)
        };
        inside.then_some(RayHit { distance, point })
    }
}

impl RayIntersect for PlanarFace {
    fn intersect_ray(&self, ray: &Ray) -> Hits {
        self.hit(ray, 0.0).into_iter().collect()
    }
}

/// Polygon normal using Newell's method. Returns `None` for degenerate loops.
fn newell_normal(verts: &[Point3<f64>]) -> Option<Vector3<f64>> {
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let n = verts.len();

    for i in 0..n {
        let curr = &verts[i];
        let next = &verts[(i + 1) % n];

        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }

    let len = normal.norm();
    if len < 1e-15 {
        return None;
    }
    Some(normal / len)
}

fn dominant_projection(normal: &Vector3<f64>) -> (usize, usize) {
    let abs_n = Vector3::new(normal.x.abs(), normal.y.abs(), normal.z.abs());
    if abs_n.z >= abs_n.x && abs_n.z >= abs_n.y {
        (0, 1) // XY
    } else if abs_n.y >= abs_n.x {
        (0, 2) // XZ
    } else {
        (1, 2) // YZ
    }
}

fn project(point: &Point3<f64>, (u, v): (usize, usize)) -> [f64; 2] {
    [point[u], point[v]]
}

/// 2D ray-casting point-in-polygon test.
fn point_in_polygon_2d(point: &[f64; 2], polygon: &[[f64; 2]]) -> bool {
    let n = polygon.len();
    let mut inside = false;

    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];

        if ((yi > point[1]) != (yj > point[1]))
            && (point[0] < (xj - xi) * (point[1] - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

fn near_outline_2d(point: &[f64; 2], polygon: &[[f64; 2]], tolerance: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| segment_distance_2d(point, &polygon[i], &polygon[(i + 1) % n]) <= tolerance)
}

fn segment_distance_2d(p: &[f64; 2], a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a[0] + t * dx, a[1] + t * dy);
    ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt()
}
