// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Groups fixtures by classification and produces stacked annotation labels.

use std::collections::BTreeMap;

use fixture_layout_geometry::{Point3, Vector3};

use crate::classify::{ClassificationDefaulted, ClassificationKey};
use crate::config::LayoutConfig;
use crate::model::Fixture;

/// One annotation line: how many fixtures share a classification key.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationGroup {
    pub key: ClassificationKey,
    pub count: usize,
    /// Vertical offset from the region anchor along +Y.
    pub offset: f64,
}

impl AnnotationGroup {
    /// Label text: `"{count} - {type} - {power}\n{sign}{|height|} {unit}"`.
    pub fn label_text(&self, unit: &str) -> String {
        let sign = if self.key.height >= 0 { '+' } else { '-' };
        format!(
            "{} - {} - {}\n{}{} {}",
            self.count,
            self.key.type_name,
            self.key.power,
            sign,
            self.key.height.unsigned_abs(),
            unit
        )
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Groups in display order.
    pub groups: Vec<AnnotationGroup>,
    /// Fixtures whose keys used placeholder values.
    pub defaulted: Vec<ClassificationDefaulted>,
}

impl Aggregation {
    /// Number of fixtures covered by all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

/// Partitions `fixtures` by classification key and counts each group.
///
/// Groups are sorted by family, type, height and power, and offset from the
/// anchor so that they read top to bottom in that order.
pub fn aggregate(fixtures: &[&Fixture], config: &LayoutConfig) -> Aggregation {
    let mut counts: BTreeMap<ClassificationKey, usize> = BTreeMap::new();
    let mut defaulted = Vec::new();

    for fixture in fixtures {
        let (key, missing) = ClassificationKey::of(fixture, config);
        *counts.entry(key).or_default() += 1;
        defaulted.extend(missing);
    }

    let groups = counts
        .into_iter()
        .enumerate()
        .map(|(i, (key, count))| AnnotationGroup {
            key,
            count,
            offset: config.label_base_offset + config.label_spacing * i as f64,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        fixtures = fixtures.len(),
        groups = groups.len(),
        defaulted = defaulted.len(),
        "Aggregated fixture annotations"
    );

    Aggregation { groups, defaulted }
}

/// A label ready to be placed in the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLabel {
    pub text: String,
    pub position: Point3<f64>,
    /// Character length of the first line, which is rendered underlined.
    pub headline_len: usize,
}

/// Turns groups into labels positioned relative to `anchor`.
pub fn place_labels(
    groups: &[AnnotationGroup],
    anchor: Point3<f64>,
    config: &LayoutConfig,
) -> Vec<AnnotationLabel> {
    groups
        .iter()
        .map(|group| {
            let text = group.label_text(&config.units.label);
            let headline_len = text.split('\n').next().map_or(0, |line| line.chars().count());
            AnnotationLabel {
                position: anchor + Vector3::new(0.0, group.offset, 0.0),
                text,
                headline_len,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementId;
    use approx::assert_relative_eq;

    fn lamp(id: u64, family: &str, ty: &str, height_ft: f64, power: &str) -> Fixture {
        Fixture::at(ElementId(id), Point3::new(id as f64, 0.0, 2.5))
            .with_type(family, ty)
            .with_height(height_ft)
            .with_power(power)
    }

    fn sample() -> Vec<Fixture> {
        vec![
            lamp(1, "Panel", "600x600", 9.0, "36"),
            lamp(2, "Downlight", "DL-20", 9.0, "20"),
            lamp(3, "Panel", "600x600", 9.0, "36"),
            lamp(4, "Panel", "600x600", 8.0, "36"),
            lamp(5, "Downlight", "DL-20", 9.0, "18"),
        ]
    }

    #[test]
    fn groups_partition_fixtures() {
        let fixtures = sample();
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let agg = aggregate(&refs, &LayoutConfig::default());

        assert_eq!(agg.groups.len(), 4);
        assert_eq!(agg.total(), fixtures.len());
        assert!(agg.defaulted.is_empty());
    }

    #[test]
    fn groups_follow_display_order() {
        let fixtures = sample();
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let agg = aggregate(&refs, &LayoutConfig::default());

        let summary: Vec<_> = agg
            .groups
            .iter()
            .map(|g| (g.key.family_name.as_str(), g.key.height, g.key.power.as_str(), g.count))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Downlight", 2743, "18", 1),
                ("Downlight", 2743, "20", 1),
                ("Panel", 2438, "36", 1),
                ("Panel", 2743, "36", 2),
            ]
        );
    }

    #[test]
    fn input_order_does_not_change_result() {
        let fixtures = sample();
        let forward: Vec<&Fixture> = fixtures.iter().collect();
        let backward: Vec<&Fixture> = fixtures.iter().rev().collect();
        let config = LayoutConfig::default();

        assert_eq!(aggregate(&forward, &config), aggregate(&backward, &config));
    }

    #[test]
    fn offsets_stack_downwards() {
        let fixtures = sample();
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let agg = aggregate(&refs, &LayoutConfig::default());

        let offsets: Vec<f64> = agg.groups.iter().map(|g| g.offset).collect();
        assert_eq!(offsets, vec![4.0, 1.0, -2.0, -5.0]);
    }

    #[test]
    fn label_text_format() {
        let fixtures = sample();
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let config = LayoutConfig::default();
        let agg = aggregate(&refs, &config);

        assert_eq!(agg.groups[3].label_text("mm"), "2 - 600x600 - 36\n+2743 mm");

        let below = AnnotationGroup {
            key: ClassificationKey {
                family_name: "Step".into(),
                type_name: "S1".into(),
                height: -150,
                power: "3".into(),
            },
            count: 4,
            offset: 0.0,
        };
        assert_eq!(below.label_text("mm"), "4 - S1 - 3\n-150 mm");
    }

    #[test]
    fn labels_are_placed_relative_to_anchor() {
        let fixtures = sample();
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let config = LayoutConfig::default();
        let agg = aggregate(&refs, &config);

        let labels = place_labels(&agg.groups, Point3::new(10.0, 20.0, 1.5), &config);
        assert_eq!(labels.len(), 4);
        assert_relative_eq!(labels[0].position.y, 24.0);
        assert_relative_eq!(labels[1].position.y, 21.0);
        assert_relative_eq!(labels[3].position.x, 10.0);
        assert_eq!(labels[0].headline_len, "1 - DL-20 - 18".chars().count());
    }

    #[test]
    fn defaulted_fixtures_are_reported() {
        let bare = Fixture::at(ElementId(8), Point3::origin());
        let fixtures = vec![bare, lamp(1, "Panel", "600x600", 9.0, "36")];
        let refs: Vec<&Fixture> = fixtures.iter().collect();
        let agg = aggregate(&refs, &LayoutConfig::default());

        assert_eq!(agg.defaulted.len(), 1);
        assert_eq!(agg.defaulted[0].fixture, ElementId(8));
        assert_eq!(agg.groups[0].key.family_name, "Light Fixture");
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let agg = aggregate(&[], &LayoutConfig::default());
        assert!(agg.groups.is_empty());
        assert_eq!(agg.total(), 0);
    }
}
