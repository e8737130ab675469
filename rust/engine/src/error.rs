// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for layout operations.
//!
//! Only unusable geometry and bad input are errors. A boundary ray that
//! finds no wall, or a fixture that lacks a reference plane, is reported as a
//! [`SkippedDimension`](crate::dimension::SkippedDimension) instead, and
//! missing classification fields fall back to configured defaults.

use fixture_layout_geometry::Error as GeometryError;

use crate::model::ElementId;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while laying out a region.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The region's boundary solid is absent or unusable.
    #[error("region {region}: {source}")]
    Region {
        region: ElementId,
        source: GeometryError,
    },

    /// A wall's geometry could not be built.
    #[error("wall {wall}: {source}")]
    Wall {
        wall: ElementId,
        source: GeometryError,
    },

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot or report (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The region the error is attributed to, if any.
    pub fn region(&self) -> Option<ElementId> {
        match self {
            Error::Region { region, .. } => Some(*region),
            _ => None,
        }
    }

    pub(crate) fn in_region(region: ElementId) -> impl FnOnce(GeometryError) -> Error {
        move |source| Error::Region { region, source }
    }
}
