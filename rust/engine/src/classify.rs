// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification keys used to group fixtures into annotation lines and
//! dimension sets.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::model::{ElementId, Fixture};

/// Composite grouping key. Field order is the display sort order: family,
/// then type, then height ascending, then power ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassificationKey {
    pub family_name: String,
    pub type_name: String,
    /// Mounting height rounded to whole display units.
    pub height: i64,
    pub power: String,
}

/// A classification field that was missing on a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultedField {
    FamilyName,
    TypeName,
    Height,
    Power,
}

/// Informational record: a fixture's key used placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationDefaulted {
    pub fixture: ElementId,
    pub fields: Vec<DefaultedField>,
}

impl ClassificationKey {
    /// Builds the key for `fixture`, substituting configured placeholders for
    /// missing or empty fields.
    pub fn of(fixture: &Fixture, config: &LayoutConfig) -> (Self, Option<ClassificationDefaulted>) {
        let mut fields = Vec::new();
        let defaults = &config.defaults;

        let mut text = |value: &Option<String>, fallback: &str, field| match value
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            Some(s) => s.to_string(),
            None => {
                fields.push(field);
                fallback.to_string()
            }
        };

        let family_name = text(
            &fixture.family_name,
            &defaults.family_name,
            DefaultedField::FamilyName,
        );
        let type_name = text(
            &fixture.type_name,
            &defaults.type_name,
            DefaultedField::TypeName,
        );
        let power = text(&fixture.rated_power, &defaults.power, DefaultedField::Power);

        let height = match fixture.mounting_height.filter(|h| h.is_finite()) {
            Some(h) => display_height(h, config),
            None => {
                fields.push(DefaultedField::Height);
                0
            }
        };

        let defaulted = (!fields.is_empty()).then(|| ClassificationDefaulted {
            fixture: fixture.id,
            fields,
        });

        (
            Self {
                family_name,
                type_name,
                height,
                power,
            },
            defaulted,
        )
    }
}

/// Converts an internal-unit height to whole display units.
pub fn display_height(height: f64, config: &LayoutConfig) -> i64 {
    (height * config.units.scale).round() as i64
}
