// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Filters candidate fixtures down to those inside a region.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::model::{Fixture, Region};

/// Returns the candidates whose location lies inside `region`, in input
/// order. Candidates without a location are skipped. Any geometry failure
/// aborts the whole call; no partial list is returned.
pub fn locate<'a>(
    region: &Region,
    candidates: &'a [Fixture],
    config: &LayoutConfig,
) -> Result<Vec<&'a Fixture>> {
    let tester = config.containment();
    let mut inside = Vec::new();
    let mut unlocated = 0usize;

    for fixture in candidates {
        let Some(location) = fixture.location.as_ref() else {
            unlocated += 1;
            continue;
        };
        if tester
            .is_inside(region.solid(), location)
            .map_err(Error::in_region(region.id))?
        {
            inside.push(fixture);
        }
    }

    tracing::debug!(
        region = %region.id,
        candidates = candidates.len(),
        inside = inside.len(),
        unlocated,
        "Located fixtures"
    );

    Ok(inside)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementId;
    use fixture_layout_geometry::{Error as GeometryError, Point2, Point3};

    fn room() -> Region {
        Region::extruded(
            ElementId(100),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 8.0),
                Point2::new(0.0, 8.0),
            ],
            0.0,
            3.0,
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn keeps_inside_fixtures_in_input_order() {
        let candidates = vec![
            Fixture::at(ElementId(3), Point3::new(8.0, 2.0, 2.5)),
            Fixture::at(ElementId(1), Point3::new(12.0, 2.0, 2.5)),
            Fixture::at(ElementId(2), Point3::new(1.0, 7.0, 2.5)),
        ];

        let found = locate(&room(), &candidates, &LayoutConfig::default()).unwrap();
        let ids: Vec<_> = found.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![ElementId(3), ElementId(2)]);
    }

    #[test]
    fn unlocated_candidates_are_excluded() {
        let mut unplaced = Fixture::at(ElementId(9), Point3::origin());
        unplaced.location = None;
        let candidates = vec![unplaced, Fixture::at(ElementId(1), Point3::new(5.0, 4.0, 1.0))];

        let found = locate(&room(), &candidates, &LayoutConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ElementId(1));
    }

    #[test]
    fn non_finite_location_fails_whole_call() {
        let candidates = vec![
            Fixture::at(ElementId(1), Point3::new(5.0, 4.0, 1.0)),
            Fixture::at(ElementId(2), Point3::new(f64::INFINITY, 4.0, 1.0)),
        ];

        let err = locate(&room(), &candidates, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Region {
                region: ElementId(100),
                source: GeometryError::NonFinitePoint,
            }
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let candidates: Vec<_> = (0..20)
            .map(|i| Fixture::at(ElementId(i), Point3::new(i as f64 * 0.7, 3.0, 2.0)))
            .collect();
        let config = LayoutConfig::default();
        let region = room();

        let first = locate(&region, &candidates, &config).unwrap();
        let second = locate(&region, &candidates, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ceiling_and_floor_fixtures_are_inside() {
        let candidates = vec![
            Fixture::at(ElementId(1), Point3::new(5.0, 4.0, 3.0)),
            Fixture::at(ElementId(2), Point3::new(5.0, 4.0, 0.0)),
            Fixture::at(ElementId(3), Point3::new(5.0, 4.0, 3.01)),
            Fixture::at(ElementId(4), Point3::new(10.0, 8.0, 3.0)),
        ];

        let found = locate(&room(), &candidates, &LayoutConfig::default()).unwrap();
        let ids: Vec<_> = found.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![ElementId(1), ElementId(2), ElementId(4)]);
    }
}
