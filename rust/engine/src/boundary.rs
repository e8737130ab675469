// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary dimensions from the outermost fixtures to the nearest walls.
//!
//! Four extremal fixtures are picked per classification group. For each plan
//! axis, four rays are cast from them, one per slot:
//!
//! | slot | X axis          | Y axis          |
//! |------|-----------------|-----------------|
//! | 0    | min-X fixture, -X | min-X fixture, +Y |
//! | 1    | max-X fixture, +X | max-X fixture, -Y |
//! | 2    | min-Y fixture, -X | max-Y fixture, +Y |
//! | 3    | max-Y fixture, +X | min-Y fixture, -Y |
//!
//! Slots 0/2 and 1/3 cast in the same direction. When both members of such a
//! pair measure the same distance, the later slot is dropped so a symmetric
//! layout is not dimensioned twice against the same wall.

use std::cmp::Reverse;

use fixture_layout_geometry::{nearest_among, Axis, Ray, Sense};

use crate::cluster::{rounded_key, Placed};
use crate::config::LayoutConfig;
use crate::dimension::{DimensionRequest, SkipReason, SkippedDimension};
use crate::model::{Fixture, Wall};

/// Slot pairs compared during de-duplication; the second index is dropped.
const DEDUP_PAIRS: [(usize, usize); 2] = [(0, 2), (1, 3)];

/// The four outermost fixtures of a group. One fixture may fill several
/// roles.
#[derive(Debug, Clone, Copy)]
pub struct Extremes<'a> {
    /// Lowest X; ties prefer the highest Y.
    pub min_x: Placed<'a>,
    /// Highest X; ties prefer the lowest Y.
    pub max_x: Placed<'a>,
    /// Lowest Y; ties prefer the lowest X.
    pub min_y: Placed<'a>,
    /// Highest Y; ties prefer the highest X.
    pub max_y: Placed<'a>,
}

impl<'a> Extremes<'a> {
    /// Ray slots for `axis`, in the order documented at module level.
    pub fn slots(&self, axis: Axis) -> [(Placed<'a>, Sense); 4] {
        match axis {
            Axis::X => [
                (self.min_x, Sense::Negative),
                (self.max_x, Sense::Positive),
                (self.min_y, Sense::Negative),
                (self.max_y, Sense::Positive),
            ],
            Axis::Y => [
                (self.min_x, Sense::Positive),
                (self.max_x, Sense::Negative),
                (self.max_y, Sense::Positive),
                (self.min_y, Sense::Negative),
            ],
        }
    }
}

/// Selects the extremal fixtures using coordinates rounded to `decimals`.
/// Remaining ties go to the earliest fixture. Returns `None` when no fixture
/// has a location.
pub fn extremal_fixtures<'a>(fixtures: &[&'a Fixture], decimals: u32) -> Option<Extremes<'a>> {
    let placed: Vec<Placed<'a>> = fixtures
        .iter()
        .filter_map(|&f| f.location.map(|p| (f, p)))
        .collect();
    let key = |p: &Placed<'a>| (rounded_key(p.1.x, decimals), rounded_key(p.1.y, decimals));

    Some(Extremes {
        min_x: first_min_by_key(&placed, |p| {
            let (x, y) = key(p);
            (x, Reverse(y))
        })?,
        max_x: first_min_by_key(&placed, |p| {
            let (x, y) = key(p);
            (Reverse(x), y)
        })?,
        min_y: first_min_by_key(&placed, |p| {
            let (x, y) = key(p);
            (y, x)
        })?,
        max_y: first_min_by_key(&placed, |p| {
            let (x, y) = key(p);
            (Reverse(y), Reverse(x))
        })?,
    })
}

/// Like `Iterator::min_by_key`, which already keeps the first of equal
/// minima, but over a slice of copyable items.
fn first_min_by_key<T: Copy, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<T> {
    items.iter().min_by_key(|item| key(item)).copied()
}

/// Result of resolving boundary dimensions for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryResolution {
    pub requests: Vec<DimensionRequest>,
    pub skipped: Vec<SkippedDimension>,
}

/// Casts rays from the extremal fixtures to the nearest walls and returns
/// the resulting dimensions, X axis first.
///
/// An empty wall list yields nothing. A ray that finds no wall within
/// `wall_search_length`, or a fixture without a reference plane for the
/// axis, is recorded as skipped.
pub fn resolve_boundary_dimensions(
    fixtures: &[&Fixture],
    walls: &[Wall],
    config: &LayoutConfig,
) -> BoundaryResolution {
    let mut resolution = BoundaryResolution::default();
    if walls.is_empty() {
        return resolution;
    }
    let Some(extremes) = extremal_fixtures(fixtures, config.cluster_decimals) else {
        return resolution;
    };

    for axis in Axis::BOTH {
        let mut slots: [Option<DimensionRequest>; 4] = Default::default();

        for (slot, ((fixture, location), sense)) in extremes.slots(axis).into_iter().enumerate() {
            if !fixture.references.supports(axis) {
                resolution.skipped.push(SkippedDimension {
                    fixture: fixture.id,
                    axis,
                    reason: SkipReason::MissingReference,
                });
                continue;
            }

            let ray = Ray::along(location, axis, sense, config.wall_search_length);
            match nearest_among(walls, &ray) {
                Some((index, hit)) => {
                    slots[slot] = Some(DimensionRequest::to_wall(
                        axis,
                        (fixture, location),
                        walls[index].id,
                        hit.point,
                    ));
                }
                None => resolution.skipped.push(SkippedDimension {
                    fixture: fixture.id,
                    axis,
                    reason: SkipReason::NoWall,
                }),
            }
        }

        drop_positional_duplicates(&mut slots, config.value_epsilon);
        resolution.requests.extend(slots.into_iter().flatten());
    }

    if !resolution.skipped.is_empty() {
        tracing::warn!(
            skipped = resolution.skipped.len(),
            resolved = resolution.requests.len(),
            "Some boundary dimensions were skipped"
        );
    }
    resolution
}

/// Applies the fixed slot-pair rule: within each pair, drop the later slot if
/// both measure the same value.
fn drop_positional_duplicates(slots: &mut [Option<DimensionRequest>; 4], epsilon: f64) {
    for (first, second) in DEDUP_PAIRS {
        let duplicate = match (&slots[first], &slots[second]) {
            (Some(a), Some(b)) => (a.measured_value - b.measured_value).abs() <= epsilon,
            _ => false,
        };
        if duplicate {
            slots[second] = None;
        }
    }
}
