// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug configuration types.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Protocol settings for the plug's energy meter module.
///
/// Metering itself is handled elsewhere; the plug only carries these
/// settings so that a metering client can address the right module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmeterConfig {
    /// Name of the module that answers energy queries.
    pub module: String,
    /// Whether readings are reported with unit-suffixed field names.
    pub units: bool,
}

impl Default for EmeterConfig {
    fn default() -> Self {
        Self {
            module: "emeter".to_string(),
            units: false,
        }
    }
}

impl EmeterConfig {
    /// Sets the module name.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Sets whether readings carry unit-suffixed field names.
    #[must_use]
    pub const fn with_units(mut self, units: bool) -> Self {
        self.units = units;
        self
    }
}

/// Serializable configuration for a single plug.
///
/// # Examples
///
/// ```
/// use smartplug_lib::PlugConfig;
///
/// let config = PlugConfig::from_json(r#"{"address": "192.168.1.105"}"#).unwrap();
/// assert_eq!(config.address, "192.168.1.105");
/// assert_eq!(config.emeter.module, "emeter");
/// assert!(!config.emeter.units);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlugConfig {
    /// Network address identifying the plug.
    pub address: String,
    /// Energy meter protocol settings.
    #[serde(default)]
    pub emeter: EmeterConfig,
}

impl PlugConfig {
    /// Creates a configuration with default energy meter settings.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            emeter: EmeterConfig::default(),
        }
    }

    /// Sets the energy meter settings.
    #[must_use]
    pub fn with_emeter(mut self, emeter: EmeterConfig) -> Self {
        self.emeter = emeter;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the JSON is malformed or lacks an
    /// `address`.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|e| ParseError::InvalidValue {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }
}
