// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart plug builder.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::error::{Error, ValueError};
use crate::plug::{EmeterConfig, PlugConfig, SmartPlug};
use crate::protocol::{CommandDispatcher, DeviceSession};

/// Builder for [`SmartPlug`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use smartplug_lib::diagnostics::MemoryDiagnostics;
/// use smartplug_lib::{EmeterConfig, SmartPlug};
///
/// let builder = SmartPlug::builder("192.168.1.105")
///     .with_emeter(EmeterConfig::default().with_units(true))
///     .with_diagnostics(Arc::new(MemoryDiagnostics::new()));
///
/// assert_eq!(builder.address(), "192.168.1.105");
/// assert!(builder.emeter().units);
/// ```
pub struct SmartPlugBuilder {
    address: String,
    emeter: EmeterConfig,
    diagnostics: Option<Arc<dyn DiagnosticsSink>>,
}

impl SmartPlugBuilder {
    /// Creates a builder for the plug at `address`.
    pub(crate) fn new(address: String) -> Self {
        Self {
            address,
            emeter: EmeterConfig::default(),
            diagnostics: None,
        }
    }

    /// Creates a builder from a serialized configuration.
    #[must_use]
    pub fn from_config(config: PlugConfig) -> Self {
        Self {
            address: config.address,
            emeter: config.emeter,
            diagnostics: None,
        }
    }

    /// Sets the energy meter protocol settings.
    #[must_use]
    pub fn with_emeter(mut self, emeter: EmeterConfig) -> Self {
        self.emeter = emeter;
        self
    }

    /// Sets the sink that receives decoding anomalies.
    ///
    /// Defaults to [`TracingDiagnostics`].
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Returns the configured address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the configured energy meter settings.
    #[must_use]
    pub fn emeter(&self) -> &EmeterConfig {
        &self.emeter
    }

    /// Builds the plug over the given collaborators.
    ///
    /// No request is sent to the device.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyAddress` if the address is blank.
    pub fn build<S, D>(self, session: S, dispatcher: D) -> Result<SmartPlug<S, D>, Error>
    where
        S: DeviceSession,
        D: CommandDispatcher,
    {
        if self.address.trim().is_empty() {
            return Err(ValueError::EmptyAddress.into());
        }

        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics));

        tracing::debug!(address = %self.address, "Creating smart plug");
        Ok(SmartPlug::new(
            self.address,
            session,
            dispatcher,
            diagnostics,
            self.emeter,
        ))
    }
}

impl fmt::Debug for SmartPlugBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartPlugBuilder")
            .field("address", &self.address)
            .field("emeter", &self.emeter)
            .field("custom_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
