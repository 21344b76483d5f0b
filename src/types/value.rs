// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helpers for interpreting loosely-typed system info values.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

/// Returns whether a raw value counts as "set".
///
/// Zero, `false`, `null`, empty strings and empty containers are falsy;
/// everything else is truthy.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smartplug_lib::types::is_truthy;
///
/// assert!(is_truthy(&json!(1)));
/// assert!(is_truthy(&json!(2)));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!(null)));
/// ```
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Returns the JSON type name of a value, for error messages.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Estimates when the relay was last switched on.
///
/// `elapsed` is the on-time the device reports since it was switched on.
/// Saturates at the earliest representable instant instead of panicking on
/// absurd values.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use smartplug_lib::types::on_since_at;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// let since = on_since_at(now, TimeDelta::hours(1));
/// assert_eq!(since, Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap());
/// ```
#[must_use]
pub fn on_since_at(now: DateTime<Utc>, elapsed: TimeDelta) -> DateTime<Utc> {
    now.checked_sub_signed(elapsed).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
