// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Row/column clustering of fixtures and adjacent-pair dimensioning.
//!
//! Clustering along Y groups fixtures into rows; the members of a row are
//! then strung together with X dimensions. Clustering along X yields columns
//! dimensioned along Y. Dimensions therefore always measure spacing inside a
//! row or column, never the clustering coordinate itself.

use std::collections::BTreeMap;

use fixture_layout_geometry::{Axis, Point3};

use crate::config::LayoutConfig;
use crate::dimension::{DimensionKind, DimensionRequest};
use crate::model::Fixture;

/// A fixture together with its resolved location.
pub type Placed<'a> = (&'a Fixture, Point3<f64>);

/// Fixtures sharing a clustering coordinate within tolerance.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    /// Lowest rounded clustering coordinate in the cluster, in units of
    /// `10^-decimals`.
    pub key: i64,
    /// Members ordered by their rounded coordinate on the opposite axis;
    /// ties keep input order.
    pub members: Vec<Placed<'a>>,
}

/// Rounds `coord` to `decimals` places, expressed as an integer count of
/// `10^-decimals` steps.
pub fn rounded_key(coord: f64, decimals: u32) -> i64 {
    (coord * 10f64.powi(decimals as i32)).round() as i64
}

/// Distance between two rounded keys. Keys saturate for huge coordinates, so
/// the difference is taken in a wider type.
fn key_distance(a: i64, b: i64) -> u128 {
    (i128::from(b) - i128::from(a)).unsigned_abs()
}

/// Groups located fixtures into clusters along `axis`, ordered by key.
///
/// A rounded coordinate joins the current cluster when it is at most
/// `merge_steps` above the cluster's first key, so with 3 decimals and one
/// merge step, 0.000 and 0.001 form one row. Merging does not chain: 0.002
/// starts the next row.
pub fn clusters<'a>(
    fixtures: &[&'a Fixture],
    axis: Axis,
    decimals: u32,
    merge_steps: u32,
) -> Vec<Cluster<'a>> {
    // Input positions ride along so ties can fall back to input order.
    let mut by_key: BTreeMap<i64, Vec<(usize, Placed<'a>)>> = BTreeMap::new();
    for (position, &fixture) in fixtures.iter().enumerate() {
        if let Some(location) = fixture.location {
            by_key
                .entry(rounded_key(axis.coord(&location), decimals))
                .or_default()
                .push((position, (fixture, location)));
        }
    }

    let mut grouped: Vec<(i64, Vec<(usize, Placed<'a>)>)> = Vec::new();
    for (key, members) in by_key {
        match grouped.last_mut() {
            Some((first, current)) if key_distance(*first, key) <= u128::from(merge_steps) => {
                current.extend(members)
            }
            _ => grouped.push((key, members)),
        }
    }

    let opposite = axis.opposite();
    grouped
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_by_key(|&(position, (_, p))| {
                (rounded_key(opposite.coord(&p), decimals), position)
            });
            Cluster {
                key,
                members: members.into_iter().map(|(_, placed)| placed).collect(),
            }
        })
        .collect()
}

/// Emits one dimension per adjacent pair inside each cluster along
/// `cluster_axis`. The dimensions measure along the opposite axis. Pairs on
/// different host levels are dropped.
pub fn cluster_and_pair(
    fixtures: &[&Fixture],
    cluster_axis: Axis,
    config: &LayoutConfig,
) -> Vec<DimensionRequest> {
    let measure_axis = cluster_axis.opposite();
    let mut requests = Vec::new();
    let mut cross_level = 0usize;

    for cluster in clusters(
        fixtures,
        cluster_axis,
        config.cluster_decimals,
        config.cluster_merge_steps,
    ) {
        for pair in cluster.members.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if !a.0.shares_level(b.0) {
                cross_level += 1;
                continue;
            }
            requests.push(DimensionRequest::between_fixtures(
                DimensionKind::WithinCluster,
                measure_axis,
                a,
                b,
            ));
        }
    }

    tracing::debug!(
        cluster_axis = cluster_axis.as_str(),
        requests = requests.len(),
        cross_level,
        "Paired fixtures within clusters"
    );
    requests
}

/// Dimensions the gap between consecutive clusters, measured along the
/// clustering axis from the first member of one cluster to the first member
/// of the next.
pub fn between_cluster_pairs(
    fixtures: &[&Fixture],
    cluster_axis: Axis,
    config: &LayoutConfig,
) -> Vec<DimensionRequest> {
    let groups = clusters(
        fixtures,
        cluster_axis,
        config.cluster_decimals,
        config.cluster_merge_steps,
    );

    groups
        .windows(2)
        .filter_map(|pair| {
            let a = *pair[0].members.first()?;
            let b = *pair[1].members.first()?;
            a.0.shares_level(b.0).then(|| {
                DimensionRequest::between_fixtures(DimensionKind::BetweenClusters, cluster_axis, a, b)
            })
        })
        .collect()
}
