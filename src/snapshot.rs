// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System info snapshots.
//!
//! A [`StatusSnapshot`] is one system info mapping as returned by the device
//! session. Snapshots are never cached: [`SnapshotAccessor::current_snapshot`]
//! asks the session every time, so two snapshots may disagree.

use chrono::TimeDelta;
use serde_json::{Map, Value};

use crate::error::{Error, ParseError};
use crate::protocol::DeviceSession;

/// Name of the relay indicator field.
pub const RELAY_STATE: &str = "relay_state";
/// Name of the LED-off indicator field.
pub const LED_OFF: &str = "led_off";
/// Name of the seconds-since-switched-on field.
pub const ON_TIME: &str = "on_time";
/// Name of the feature code field.
pub const FEATURE: &str = "feature";
/// Name of the device model field.
pub const MODEL: &str = "model";
/// Name of the user-assigned device name field.
pub const ALIAS: &str = "alias";

/// Largest `on_time` in milliseconds accepted from a float, below `i64::MAX`.
const MAX_MILLIS: f64 = 9.0e18;

/// Read-only view over one system info mapping.
///
/// Field accessors only check the fields they read; the rest of the mapping
/// is taken as reported.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smartplug_lib::StatusSnapshot;
///
/// let snapshot = StatusSnapshot::try_from(json!({
///     "relay_state": 1,
///     "feature": "TIM:ENE",
///     "model": "HS110(EU)",
/// }))
/// .unwrap();
///
/// assert_eq!(snapshot.relay_state().unwrap(), &json!(1));
/// assert_eq!(snapshot.feature().unwrap(), "TIM:ENE");
/// assert_eq!(snapshot.model(), Some("HS110(EU)"));
/// assert!(snapshot.led_off().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    fields: Map<String, Value>,
}

impl StatusSnapshot {
    /// Wraps a system info mapping.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the raw value of a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the field is absent.
    pub fn require(&self, field: &str) -> Result<&Value, ParseError> {
        self.fields
            .get(field)
            .ok_or_else(|| ParseError::MissingField(field.to_string()))
    }

    /// Returns the raw relay indicator.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `relay_state` is absent.
    pub fn relay_state(&self) -> Result<&Value, ParseError> {
        self.require(RELAY_STATE)
    }

    /// Returns the raw LED-off indicator.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `led_off` is absent.
    pub fn led_off(&self) -> Result<&Value, ParseError> {
        self.require(LED_OFF)
    }

    /// Returns the time elapsed since the relay was switched on.
    ///
    /// The device reports whole or fractional seconds; fractions are kept to
    /// millisecond precision.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `on_time` is absent, not a number, or too large
    /// to represent.
    #[allow(clippy::cast_possible_truncation)]
    pub fn on_time(&self) -> Result<TimeDelta, ParseError> {
        let value = self.require(ON_TIME)?;
        let invalid = |message: String| ParseError::InvalidValue {
            field: ON_TIME.to_string(),
            message,
        };

        let elapsed = if let Some(secs) = value.as_i64() {
            TimeDelta::try_seconds(secs)
        } else if let Some(secs) = value.as_f64() {
            let millis = (secs * 1000.0).round();
            (millis.abs() < MAX_MILLIS)
                .then(|| millis as i64)
                .and_then(TimeDelta::try_milliseconds)
        } else {
            return Err(invalid(format!("expected a number of seconds, got {value}")));
        };

        elapsed.ok_or_else(|| invalid(format!("{value} seconds is out of range")))
    }

    /// Returns the colon-delimited feature string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `feature` is absent or not a string.
    pub fn feature(&self) -> Result<&str, ParseError> {
        let value = self.require(FEATURE)?;
        value.as_str().ok_or_else(|| ParseError::InvalidValue {
            field: FEATURE.to_string(),
            message: format!("expected a string, got {value}"),
        })
    }

    /// Returns the device model, if reported as a string.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.fields.get(MODEL).and_then(Value::as_str)
    }

    /// Returns the user-assigned device name, if reported as a string.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.fields.get(ALIAS).and_then(Value::as_str)
    }

    /// Returns the underlying mapping.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the snapshot and returns the underlying mapping.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for StatusSnapshot {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<Value> for StatusSnapshot {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(ParseError::InvalidValue {
                field: "system info".to_string(),
                message: format!("expected an object, got {other}"),
            }),
        }
    }
}

/// Fetches fresh snapshots from a [`DeviceSession`].
///
/// Holds no state besides the session; every call goes to the device.
#[derive(Debug, Clone)]
pub struct SnapshotAccessor<S> {
    session: S,
}

impl<S: DeviceSession> SnapshotAccessor<S> {
    /// Creates an accessor over the given session.
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Fetches the latest system info.
    ///
    /// # Errors
    ///
    /// Returns `Error::Communication` with the session's error unchanged.
    pub fn current_snapshot(&self) -> Result<StatusSnapshot, Error> {
        let fields = self.session.fetch_system_info()?;
        tracing::trace!(fields = fields.len(), "Fetched system info");
        Ok(StatusSnapshot::new(fields))
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }
}
