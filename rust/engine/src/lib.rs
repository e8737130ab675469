// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixture-Layout Engine
//!
//! Decides which lighting fixtures sit inside each room-like region, groups
//! them into stacked annotation labels, and plans linear dimensions between
//! neighbouring fixtures and from the outermost fixtures to the nearest
//! walls.
//!
//! ```rust,ignore
//! use fixture_layout_engine::{layout_region, LayoutConfig, Region};
//!
//! let config = LayoutConfig::default();
//! let layout = layout_region(&region, &fixtures, &walls, &config)?;
//! for label in &layout.labels {
//!     println!("{} at {:?}", label.text, label.position);
//! }
//! ```
//!
//! Each call works on read-only snapshots and returns plain values; drawing
//! the result is left to the caller.

pub mod aggregate;
pub mod boundary;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod dimension;
pub mod error;
pub mod layout;
pub mod locator;
pub mod model;
pub mod plan;
pub mod report;
pub mod snapshot;

pub use aggregate::{aggregate, place_labels, Aggregation, AnnotationGroup, AnnotationLabel};
pub use boundary::{extremal_fixtures, resolve_boundary_dimensions, BoundaryResolution, Extremes};
pub use classify::{display_height, ClassificationDefaulted, ClassificationKey, DefaultedField};
pub use cluster::{between_cluster_pairs, cluster_and_pair, clusters, Cluster};
pub use config::{ClassificationDefaults, DisplayUnits, LayoutConfig};
pub use dimension::{DimensionKind, DimensionRequest, DimensionTarget, SkipReason, SkippedDimension};
pub use error::{Error, Result};
pub use layout::{layout_region, layout_regions, RegionLayout};
pub use locator::locate;
pub use model::{ElementId, Fixture, FixtureReferences, Region, Wall};
pub use plan::{plan_dimensions, DimensionPlan};
pub use report::{layout_project, LayoutReport, RegionOutcome, RegionReport};
pub use snapshot::ProjectSnapshot;

pub use fixture_layout_geometry as geometry;
