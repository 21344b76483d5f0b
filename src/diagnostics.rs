// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic events for anomalous but non-fatal device data.
//!
//! A plug that reports an unexpected relay value or an unrecognised feature
//! code still produces a usable answer; the anomaly is reported through a
//! [`DiagnosticsSink`] injected at construction instead of being raised.
//!
//! The default sink, [`TracingDiagnostics`], forwards every event to
//! `tracing` at `WARN` level. [`MemoryDiagnostics`] keeps them in memory so
//! callers and tests can inspect what was reported.

use std::fmt;

use parking_lot::Mutex;
use serde_json::Value;

/// An anomaly observed while decoding system info.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// `relay_state` held a value other than `0` or `1`.
    UnknownRelayState {
        /// The value as reported by the device.
        raw: Value,
    },

    /// The feature list contained a code outside the known vocabulary.
    UnknownFeature {
        /// The unrecognised code.
        code: String,
        /// Model identifier of the reporting device.
        model: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRelayState { raw } => write!(f, "unknown relay state {raw} returned"),
            Self::UnknownFeature { code, model } => {
                write!(f, "unknown feature {code} on device {model}")
            }
        }
    }
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticsSink: Send + Sync {
    /// Reports a single anomaly.
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that emits each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownRelayState { raw } => {
                tracing::warn!(raw = %raw, "Unknown relay state returned");
            }
            Diagnostic::UnknownFeature { code, model } => {
                tracing::warn!(feature = %code, model = %model, "Unknown feature on device");
            }
        }
    }
}

/// Sink that records diagnostics in memory.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smartplug_lib::diagnostics::{Diagnostic, DiagnosticsSink, MemoryDiagnostics};
///
/// let sink = MemoryDiagnostics::new();
/// sink.report(Diagnostic::UnknownRelayState { raw: json!(2) });
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.take()[0].to_string(), "unknown relay state 2 returned");
/// assert!(sink.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded diagnostics.
    #[must_use]
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    /// Removes and returns the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "Recording diagnostic");
        self.events.lock().push(diagnostic);
    }
}
