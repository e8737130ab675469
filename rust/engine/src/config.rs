// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout configuration.
//!
//! All lengths are in the internal model unit (feet for the default display
//! scale). A JSON document only needs to name the values it overrides.

use fixture_layout_geometry::ContainmentTester;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Conversion from internal units to the unit shown in labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    /// Display units per internal unit.
    pub scale: f64,
    /// Suffix printed after heights.
    pub label: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            scale: 304.8, // feet -> millimetres
            label: "mm".into(),
        }
    }
}

/// Placeholders substituted for missing classification fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationDefaults {
    pub family_name: String,
    pub type_name: String,
    pub power: String,
}

impl Default for ClassificationDefaults {
    fn default() -> Self {
        Self {
            family_name: "Light Fixture".into(),
            type_name: "No Type".into(),
            power: "0".into(),
        }
    }
}

/// Tunables for containment, clustering, labelling and dimensioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Containment rays extend past the region by its bounding-box diagonal
    /// times this factor.
    pub ray_safety_factor: f64,
    /// Fixtures this close to a region face count as inside it.
    pub boundary_tolerance: f64,
    /// Coordinates are rounded to this many decimals before clustering.
    pub cluster_decimals: u32,
    /// Rounded coordinates this many steps apart still join one cluster.
    pub cluster_merge_steps: u32,
    /// Offset of the first label from the region anchor, along +Y.
    pub label_base_offset: f64,
    /// Offset added per subsequent label (negative stacks downwards).
    pub label_spacing: f64,
    /// Length of the rays cast from extremal fixtures towards walls.
    pub wall_search_length: f64,
    /// Half length of the suggested dimension line through a request's
    /// midpoint.
    pub dimension_line_half_length: f64,
    /// Measured values closer than this are treated as equal.
    pub value_epsilon: f64,
    /// Vertex snapping distance for the closed-region check.
    pub closed_solid_tolerance: f64,
    /// Reject regions whose faces do not form a closed shell.
    pub require_closed_region: bool,
    /// Also dimension the spacing between adjacent rows and columns.
    pub inter_cluster_dimensions: bool,
    pub units: DisplayUnits,
    pub defaults: ClassificationDefaults,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ray_safety_factor: 2.0,
            boundary_tolerance: 1e-9,
            cluster_decimals: 3,
            cluster_merge_steps: 1,
            label_base_offset: 4.0,
            label_spacing: -3.0,
            wall_search_length: 100.0,
            dimension_line_half_length: 2.0,
            value_epsilon: 1e-9,
            closed_solid_tolerance: 1e-6,
            require_closed_region: true,
            inter_cluster_dimensions: false,
            units: DisplayUnits::default(),
            defaults: ClassificationDefaults::default(),
        }
    }
}

impl LayoutConfig {
    /// Parses a (possibly partial) JSON document over the defaults and
    /// validates the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        }

        if !(self.ray_safety_factor.is_finite() && self.ray_safety_factor >= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "ray_safety_factor must be at least 1, got {}",
                self.ray_safety_factor
            )));
        }
        if self.cluster_decimals > 9 {
            return Err(Error::InvalidConfig(format!(
                "cluster_decimals must be at most 9, got {}",
                self.cluster_decimals
            )));
        }
        positive("wall_search_length", self.wall_search_length)?;
        positive("dimension_line_half_length", self.dimension_line_half_length)?;
        positive("closed_solid_tolerance", self.closed_solid_tolerance)?;
        positive("units.scale", self.units.scale)?;
        if !(self.boundary_tolerance.is_finite() && self.boundary_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "boundary_tolerance must be non-negative, got {}",
                self.boundary_tolerance
            )));
        }
        if !(self.value_epsilon.is_finite() && self.value_epsilon >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "value_epsilon must be non-negative, got {}",
                self.value_epsilon
            )));
        }
        if !self.label_base_offset.is_finite() || !self.label_spacing.is_finite() {
            return Err(Error::InvalidConfig("label offsets must be finite".into()));
        }
        Ok(())
    }

    /// Containment tester using this configuration's ray length policy.
    pub fn containment(&self) -> ContainmentTester {
        ContainmentTester::new(self.ray_safety_factor)
            .with_boundary_tolerance(self.boundary_tolerance)
    }

    /// Cluster tolerance in internal units (`10^-cluster_decimals`).
    pub fn cluster_tolerance(&self) -> f64 {
        10f64.powi(-(self.cluster_decimals as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.cluster_tolerance(), 1e-3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{ "wall_search_length": 50.0, "units": { "label": "in" } }"#,
        )
        .unwrap();

        assert_eq!(config.wall_search_length, 50.0);
        assert_eq!(config.units.label, "in");
        assert_eq!(config.units.scale, 304.8);
        assert_eq!(config.cluster_decimals, 3);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = LayoutConfig::from_json_str(r#"{ "wall_search_length": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = LayoutConfig::from_json_str(r#"{ "ray_safety_factor": 0.5 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = LayoutConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
