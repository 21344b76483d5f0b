// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state of a smart plug relay.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ValueError;

/// Represents the switch state reported by a smart plug.
///
/// Decoding from the raw `relay_state` field is total: values equal to `0`
/// and `1` map to [`Off`](Self::Off) and [`On`](Self::On), anything else maps
/// to [`Unknown`](Self::Unknown).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smartplug_lib::types::SwitchState;
///
/// assert_eq!(SwitchState::from_relay_state(&json!(1)), SwitchState::On);
/// assert_eq!(SwitchState::from_relay_state(&json!(0)), SwitchState::Off);
/// assert_eq!(SwitchState::from_relay_state(&json!(1.0)), SwitchState::On);
/// assert_eq!(SwitchState::from_relay_state(&json!(7)), SwitchState::Unknown);
///
/// assert_eq!("on".parse::<SwitchState>().unwrap(), SwitchState::On);
/// assert!("unknown".parse::<SwitchState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    /// Relay is closed.
    On,
    /// Relay is open.
    Off,
    /// The device reported a relay value outside the known set.
    Unknown,
}

impl SwitchState {
    /// Decodes a raw `relay_state` value.
    ///
    /// Values are compared numerically: any number equal to `0` or `1`
    /// (including `0.0` and `1.0`) and the booleans `false`/`true` are
    /// recognised. Strings, other numbers and containers decode to
    /// [`Unknown`](Self::Unknown).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_relay_state(raw: &Value) -> Self {
        match raw {
            Value::Bool(on) => Self::from(*on),
            Value::Number(n) => match n.as_f64() {
                Some(v) if v == 0.0 => Self::Off,
                Some(v) if v == 1.0 => Self::On,
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the `state` parameter of a relay command, if this state can be set.
    #[must_use]
    pub const fn relay_value(&self) -> Option<u8> {
        match self {
            Self::On => Some(1),
            Self::Off => Some(0),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = ValueError;

    /// Parses a state the caller wants to set. `UNKNOWN` is not settable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            _ => Err(ValueError::InvalidState(s.to_string())),
        }
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
