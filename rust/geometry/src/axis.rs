// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Principal plan axes used for clustering and dimensioning.

use nalgebra::{Point3, Vector3};

/// A principal axis in the plan (XY) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both plan axes in processing order.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// The other plan axis.
    pub fn opposite(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Coordinate of `point` along this axis.
    pub fn coord(self, point: &Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    /// Unit basis vector of this axis.
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::new(1.0, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
        }
    }
}

/// Which way along an axis a ray travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Negative,
    Positive,
}

impl Sense {
    pub fn sign(self) -> f64 {
        match self {
            Sense::Negative => -1.0,
            Sense::Positive => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for axis in Axis::BOTH {
            assert_eq!(axis.opposite().opposite(), axis);
            assert_ne!(axis.opposite(), axis);
        }
    }

    #[test]
    fn coord_reads_matching_component() {
        let p = Point3::new(1.5, -2.0, 7.0);
        assert_eq!(Axis::X.coord(&p), 1.5);
        assert_eq!(Axis::Y.coord(&p), -2.0);
    }

    #[test]
    fn unit_vectors() {
        assert_eq!(Axis::X.unit() * Sense::Negative.sign(), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(Axis::Y.unit() * Sense::Positive.sign(), Vector3::new(0.0, 1.0, 0.0));
    }
}
