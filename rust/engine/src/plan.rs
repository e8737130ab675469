// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full dimension plan for the fixtures of one region.

use std::collections::BTreeMap;

use fixture_layout_geometry::Axis;

use crate::boundary::resolve_boundary_dimensions;
use crate::classify::ClassificationKey;
use crate::cluster::{between_cluster_pairs, cluster_and_pair};
use crate::config::LayoutConfig;
use crate::dimension::{DimensionRequest, SkippedDimension};
use crate::model::{Fixture, Wall};

/// Every dimension request for a fixture set, plus the boundary items that
/// could not be resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionPlan {
    pub requests: Vec<DimensionRequest>,
    pub skipped: Vec<SkippedDimension>,
}

impl DimensionPlan {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Splits `fixtures` by classification key (in key order) and, per group,
/// emits row dimensions, column dimensions, optional between-cluster
/// dimensions and finally boundary dimensions.
pub fn plan_dimensions(fixtures: &[&Fixture], walls: &[Wall], config: &LayoutConfig) -> DimensionPlan {
    let mut groups: BTreeMap<ClassificationKey, Vec<&Fixture>> = BTreeMap::new();
    for &fixture in fixtures {
        let (key, _) = ClassificationKey::of(fixture, config);
        groups.entry(key).or_default().push(fixture);
    }

    let mut plan = DimensionPlan::default();
    for (key, members) in &groups {
        let before = plan.requests.len();

        // Rows (clustered on Y) are strung along X, columns along Y.
        for cluster_axis in [Axis::Y, Axis::X] {
            plan.requests
                .extend(cluster_and_pair(members, cluster_axis, config));
        }
        if config.inter_cluster_dimensions {
            for cluster_axis in [Axis::Y, Axis::X] {
                plan.requests
                    .extend(between_cluster_pairs(members, cluster_axis, config));
            }
        }

        let boundary = resolve_boundary_dimensions(members, walls, config);
        plan.requests.extend(boundary.requests);
        plan.skipped.extend(boundary.skipped);

        tracing::debug!(
            type_name = %key.type_name,
            fixtures = members.len(),
            requests = plan.requests.len() - before,
            "Planned dimensions for group"
        );
    }
    plan
}
