// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optional device features advertised in the system info.
//!
//! Plugs list their optional capabilities in the `feature` field as a
//! colon-separated string of short codes, e.g. `"TIM:ENE"`.

use std::fmt;

/// A single feature code.
///
/// Codes outside the known vocabulary are kept verbatim in
/// [`Other`](Self::Other) rather than being dropped.
///
/// # Examples
///
/// ```
/// use smartplug_lib::types::Feature;
///
/// assert_eq!(Feature::from_code("ENE"), Feature::EnergyMeter);
/// assert_eq!(Feature::from_code("XYZ"), Feature::Other("XYZ".to_string()));
/// assert_eq!(Feature::Timer.code(), "TIM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Energy metering (`ENE`).
    EnergyMeter,
    /// Countdown/schedule timer (`TIM`).
    Timer,
    /// A code this library does not recognise.
    Other(String),
}

impl Feature {
    /// Code for the energy meter feature.
    pub const ENERGY_METER: &'static str = "ENE";
    /// Code for the timer feature.
    pub const TIMER: &'static str = "TIM";

    /// Decodes a single feature code. Never fails.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            Self::ENERGY_METER => Self::EnergyMeter,
            Self::TIMER => Self::Timer,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the code as reported by the device.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::EnergyMeter => Self::ENERGY_METER,
            Self::Timer => Self::TIMER,
            Self::Other(code) => code,
        }
    }

    /// Returns `true` for codes in the known vocabulary.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Ordered sequence of feature codes decoded from a device.
///
/// Order and duplicates are preserved as reported.
///
/// # Examples
///
/// ```
/// use smartplug_lib::types::{Feature, FeatureSet};
///
/// let features = FeatureSet::parse("ENE:XYZ");
/// assert_eq!(features.codes(), vec!["ENE", "XYZ"]);
/// assert!(features.contains("XYZ"));
/// assert!(!features.contains("TIM"));
/// assert_eq!(features.unknown().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(Vec<Feature>);

impl FeatureSet {
    /// Decodes a colon-delimited feature string.
    ///
    /// Splitting is literal, so an empty string yields a single empty code,
    /// and `"ENE::TIM"` yields an empty code between the two known ones.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(':').map(Feature::from_code).collect())
    }

    /// Returns `true` if `code` appears in the sequence.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|feature| feature.code() == code)
    }

    /// Returns `true` if the sequence includes `feature`.
    #[must_use]
    pub fn has(&self, feature: &Feature) -> bool {
        self.0.contains(feature)
    }

    /// Returns every code as a string, in device order.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|f| f.code().to_string()).collect()
    }

    /// Iterates over codes outside the known vocabulary.
    pub fn unknown(&self) -> impl Iterator<Item = &Feature> {
        self.0.iter().filter(|f| !f.is_known())
    }

    /// Iterates over all features in device order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.0.iter()
    }

    /// Number of codes, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no codes were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for FeatureSet {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
