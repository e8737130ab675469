// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Containment on generated prisms.

use std::f64::consts::PI;

use fixture_layout_geometry::{is_inside, ContainmentTester, Point2, Point3, Solid};

/// Regular n-gon prism. Vertices are rotated half a step so that the +X
/// direction from the centre crosses the middle of an edge.
fn regular_prism(n: usize, radius: f64, centre: (f64, f64)) -> Solid {
    let outline: Vec<Point2<f64>> = (0..n)
        .map(|i| {
            let angle = PI / n as f64 + 2.0 * PI * i as f64 / n as f64;
            Point2::new(centre.0 + radius * angle.cos(), centre.1 + radius * angle.sin())
        })
        .collect();
    Solid::extrude_polygon(&outline, -1.0, 4.0).unwrap()
}

#[test]
fn centroid_of_extruded_polygons_is_inside() {
    for n in 3..=16 {
        for &(radius, centre) in &[(1.0, (0.0, 0.0)), (7.5, (120.0, -40.0)), (0.05, (3.0, 3.0))] {
            let solid = regular_prism(n, radius, centre);
            let centroid = solid.centroid();
            assert!(
                is_inside(&solid, &centroid).unwrap(),
                "centroid {centroid:?} of {n}-gon (r = {radius}) reported outside"
            );
        }
    }
}

#[test]
fn points_outside_bounds_are_outside() {
    let solid = regular_prism(6, 5.0, (0.0, 0.0));
    let tester = ContainmentTester::default();
    let bounds = *solid.bounding_box();

    let outside = [
        Point3::new(bounds.max.x + 0.01, 0.0, 1.0),
        Point3::new(bounds.min.x - 0.01, 0.0, 1.0),
        Point3::new(0.0, bounds.max.y + 3.0, 1.0),
        Point3::new(0.0, 0.0, bounds.max.z + 0.5),
        Point3::new(0.0, 0.0, bounds.min.z - 0.5),
        Point3::new(1e6, -1e6, 1e6),
    ];
    for point in outside {
        assert!(!tester.is_inside(&solid, &point).unwrap(), "{point:?}");
    }
}

#[test]
fn concave_prism_notch_is_outside() {
    // Star-ish outline with a deep notch on the +X side.
    let outline = [
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 4.0),
        Point2::new(3.0, 5.0),
        Point2::new(10.0, 6.0),
        Point2::new(10.0, 10.0),
        Point2::new(0.0, 10.0),
    ];
    let solid = Solid::extrude_polygon(&outline, 0.0, 3.0).unwrap();

    assert!(is_inside(&solid, &Point3::new(1.5, 5.0, 1.5)).unwrap());
    assert!(!is_inside(&solid, &Point3::new(8.0, 5.0, 1.5)).unwrap());
    assert!(is_inside(&solid, &Point3::new(8.0, 2.0, 1.5)).unwrap());
    assert!(is_inside(&solid, &Point3::new(8.0, 8.0, 1.5)).unwrap());
}
