// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Engine thresholds and switches

use super::ConfigError;
use crate::geometry::Axis;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default file looked up by [`SymmetryConfig::load`]
pub const CONFIG_FILE: &str = "meshsym.toml";

/// Thresholds for every stage of a classification pass.
///
/// The self-symmetry and cross-mesh passes use different angle tolerances
/// (20° vs 5°), and the area tolerance is relative to the first mesh of a
/// pair only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryConfig {
    /// Axis perpendicular to the mirror plane
    pub mirror_axis: Axis,
    /// Relative area tolerance, multiplied by the first mesh's area
    pub area_tolerance: f64,
    /// Absolute per-axis pivot tolerance, in world units
    pub pivot_tolerance: f64,
    /// Largest mirrored position gap along the mirror axis, in world units
    pub position_tolerance: f64,
    /// Bearing tolerance in degrees when a mesh is tested against itself
    pub self_angle_tolerance: f64,
    /// Bearing tolerance in degrees when two meshes are tested against each other
    pub cross_angle_tolerance: f64,
    /// Minimum correspondence (percent, inclusive) for a self-symmetric mesh
    pub self_confidence: f64,
    /// Correspondence (percent) a pair must exceed to be mirrored
    pub cross_confidence: f64,
    /// Pivots closer than this to the mirror plane count as centred
    pub centre_epsilon: f64,
    /// Upper bound of the "nearly centred" pivot band
    pub near_centre_limit: f64,
    /// Vertices within `extent / plane_band_divisor` of the mirror plane are ignored
    pub plane_band_divisor: f64,
    /// Let an already paired mesh pair again with later candidates
    pub allow_rematch: bool,
    /// Evaluate candidates and self checks on the rayon pool
    pub parallel: bool,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            mirror_axis: Axis::X,
            area_tolerance: 0.001,
            pivot_tolerance: 1.0,
            position_tolerance: 0.1,
            self_angle_tolerance: 20.0,
            cross_angle_tolerance: 5.0,
            self_confidence: 95.0,
            cross_confidence: 60.0,
            centre_epsilon: 0.0001,
            near_centre_limit: 0.3,
            plane_band_divisor: 100.0,
            allow_rematch: false,
            parallel: true,
        }
    }
}

impl SymmetryConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SymmetryConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `meshsym.toml` from the working directory if present, then apply
    /// `MESHSYM_*` environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(axis) = std::env::var("MESHSYM_AXIS") {
            match axis.parse() {
                Ok(axis) => config.mirror_axis = axis,
                Err(err) => warn!(error = %err, "ignoring MESHSYM_AXIS"),
            }
        }

        if let Ok(rematch) = std::env::var("MESHSYM_ALLOW_REMATCH") {
            config.allow_rematch = rematch.parse().unwrap_or(config.allow_rematch);
        }

        if let Ok(parallel) = std::env::var("MESHSYM_PARALLEL") {
            config.parallel = parallel.parse().unwrap_or(config.parallel);
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("area_tolerance", self.area_tolerance),
            ("pivot_tolerance", self.pivot_tolerance),
            ("position_tolerance", self.position_tolerance),
            ("self_angle_tolerance", self.self_angle_tolerance),
            ("cross_angle_tolerance", self.cross_angle_tolerance),
            ("centre_epsilon", self.centre_epsilon),
            ("near_centre_limit", self.near_centre_limit),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NotNonNegative { field, value });
            }
        }

        for (field, value) in [
            ("self_confidence", self.self_confidence),
            ("cross_confidence", self.cross_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::NotPercentage { field, value });
            }
        }

        if self.near_centre_limit < self.centre_epsilon {
            return Err(ConfigError::CentreBand {
                epsilon: self.centre_epsilon,
                limit: self.near_centre_limit,
            });
        }

        if !(self.plane_band_divisor.is_finite() && self.plane_band_divisor > 0.0) {
            return Err(ConfigError::PlaneBandDivisor(self.plane_band_divisor));
        }

        Ok(())
    }
}
