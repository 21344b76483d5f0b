// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level smart plug abstraction.
//!
//! A [`SmartPlug`] turns the plug's raw system info into typed values and
//! validates caller input before any command is sent.
//!
//! # Freshness
//!
//! Every getter fetches a new snapshot. Nothing is cached between calls, and
//! setters do not update any local state: after [`SmartPlug::turn_on`] the
//! next [`SmartPlug::state`] reports whatever the device says, not what was
//! requested.
//!
//! ```
//! # use serde_json::{Map, Value, json};
//! # use smartplug_lib::error::CommunicationError;
//! # use smartplug_lib::protocol::{CommandDispatcher, CommandResponse, DeviceSession};
//! # struct Plug;
//! # impl DeviceSession for Plug {
//! #     fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
//! #         Ok(json!({"relay_state": 0, "led_off": 0, "feature": "TIM:ENE", "on_time": 0})
//! #             .as_object().cloned().unwrap_or_default())
//! #     }
//! # }
//! # impl CommandDispatcher for Plug {
//! #     fn dispatch(&self, _: &str, _: &str, _: &Map<String, Value>)
//! #         -> Result<CommandResponse, CommunicationError> {
//! #         Ok(CommandResponse::empty())
//! #     }
//! # }
//! use smartplug_lib::{SmartPlug, SwitchState};
//!
//! let plug = SmartPlug::builder("192.168.1.105").build(&Plug, &Plug)?;
//!
//! plug.set_state("on")?;
//! assert!(plug.set_state("maybe").is_err());
//!
//! if plug.state()? == SwitchState::Off && plug.has_emeter()? {
//!     plug.set_led(false)?;
//! }
//! # Ok::<(), smartplug_lib::Error>(())
//! ```

mod builder;
mod config;

pub use builder::SmartPlugBuilder;
pub use config::{EmeterConfig, PlugConfig};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::command::{LedOffCommand, RelayStateCommand};
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::{Error, ValueError};
use crate::protocol::{CommandDispatcher, DeviceSession};
use crate::snapshot::{SnapshotAccessor, StatusSnapshot};
use crate::types::{Feature, FeatureSet, SwitchState, is_truthy, json_type_name, on_since_at};

/// Model name used in diagnostics when the device does not report one.
const UNKNOWN_MODEL: &str = "unknown";

/// A remote-controllable power switch.
///
/// # Type Parameters
///
/// - `S` reads the device's system info
/// - `D` sends commands to the device
///
/// Both may be the same client shared through `&T` or [`Arc<T>`].
///
/// # Thread Safety
///
/// The plug holds no mutable state. It is `Send + Sync` whenever `S` and `D`
/// are, and concurrent calls are only as safe as those collaborators.
/// A `set_state` racing a `state` call from another thread may observe
/// either the old or the new relay value.
pub struct SmartPlug<S, D> {
    address: String,
    snapshots: SnapshotAccessor<S>,
    dispatcher: D,
    diagnostics: Arc<dyn DiagnosticsSink>,
    emeter: EmeterConfig,
}

impl SmartPlug<(), ()> {
    /// Creates a builder for the plug at `address`.
    #[must_use]
    pub fn builder(address: impl Into<String>) -> SmartPlugBuilder {
        SmartPlugBuilder::new(address.into())
    }
}

impl<S: DeviceSession, D: CommandDispatcher> SmartPlug<S, D> {
    pub(crate) fn new(
        address: String,
        session: S,
        dispatcher: D,
        diagnostics: Arc<dyn DiagnosticsSink>,
        emeter: EmeterConfig,
    ) -> Self {
        Self {
            address,
            snapshots: SnapshotAccessor::new(session),
            dispatcher,
            diagnostics,
            emeter,
        }
    }

    /// Returns the network address identifying the plug.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the energy meter protocol settings.
    #[must_use]
    pub fn emeter(&self) -> &EmeterConfig {
        &self.emeter
    }

    /// Fetches the current system info.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails.
    pub fn sys_info(&self) -> Result<StatusSnapshot, Error> {
        self.snapshots.current_snapshot()
    }

    // ========== Switch State ==========

    /// Returns the current switch state.
    ///
    /// A `relay_state` not equal to `0`, `1` or a boolean yields [`SwitchState::Unknown`]
    /// and reports a [`Diagnostic::UnknownRelayState`].
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `relay_state` is missing.
    pub fn state(&self) -> Result<SwitchState, Error> {
        let snapshot = self.sys_info()?;
        let raw = snapshot.relay_state()?;
        let state = SwitchState::from_relay_state(raw);
        if state == SwitchState::Unknown {
            self.diagnostics
                .report(Diagnostic::UnknownRelayState { raw: raw.clone() });
        }
        Ok(state)
    }

    /// Sets the switch state from a loosely-typed value.
    ///
    /// Accepts the strings `"ON"` and `"OFF"` in any letter case. The value is
    /// validated before anything is sent, so a rejected value never reaches
    /// the device.
    ///
    /// # Errors
    ///
    /// - `ValueError::NotAString` if `value` is not a string
    /// - `ValueError::InvalidState` if the string is neither `ON` nor `OFF`
    /// - `Error::Communication` if the dispatcher fails
    pub fn set_state(&self, value: impl Into<Value>) -> Result<(), Error> {
        let requested = match value.into() {
            Value::String(s) => s.parse::<SwitchState>()?,
            other => {
                return Err(ValueError::NotAString {
                    found: json_type_name(&other),
                    value: other.to_string(),
                }
                .into());
            }
        };

        // Parsing only ever yields ON or OFF.
        if requested == SwitchState::On {
            self.turn_on()
        } else {
            self.turn_off()
        }
    }

    /// Closes the relay.
    ///
    /// # Errors
    ///
    /// Returns error if the dispatcher fails.
    pub fn turn_on(&self) -> Result<(), Error> {
        self.dispatcher.send_command(&RelayStateCommand::on())?;
        Ok(())
    }

    /// Opens the relay.
    ///
    /// # Errors
    ///
    /// Returns error if the dispatcher fails.
    pub fn turn_off(&self) -> Result<(), Error> {
        self.dispatcher.send_command(&RelayStateCommand::off())?;
        Ok(())
    }

    /// Returns whether the relay indicator is set.
    ///
    /// Unlike [`state`](Self::state), any non-zero value counts as on, so a
    /// device reporting `relay_state: 2` is on here and
    /// [`Unknown`](SwitchState::Unknown) there. No diagnostic is reported.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `relay_state` is missing.
    pub fn is_on(&self) -> Result<bool, Error> {
        let snapshot = self.sys_info()?;
        Ok(is_truthy(snapshot.relay_state()?))
    }

    // ========== Features ==========

    /// Returns the features advertised by the device.
    ///
    /// Each unrecognised code is kept in the result and reported once as a
    /// [`Diagnostic::UnknownFeature`] carrying the device model.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `feature` is missing or
    /// not a string.
    pub fn features(&self) -> Result<FeatureSet, Error> {
        let snapshot = self.sys_info()?;
        let features = FeatureSet::parse(snapshot.feature()?);

        let model = snapshot.model().unwrap_or(UNKNOWN_MODEL);
        for feature in features.unknown() {
            self.diagnostics.report(Diagnostic::UnknownFeature {
                code: feature.code().to_string(),
                model: model.to_string(),
            });
        }

        Ok(features)
    }

    /// Returns whether `code` appears in the device's feature list.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `feature` is missing or
    /// not a string.
    pub fn has_feature(&self, code: &str) -> Result<bool, Error> {
        Ok(self.features()?.contains(code))
    }

    /// Returns whether the device has an energy meter.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `feature` is missing or
    /// not a string.
    pub fn has_emeter(&self) -> Result<bool, Error> {
        Ok(self.features()?.has(&Feature::EnergyMeter))
    }

    // ========== LED ==========

    /// Returns whether the status LED is lit.
    ///
    /// The device reports `led_off`; this is its negation.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `led_off` is missing.
    pub fn led(&self) -> Result<bool, Error> {
        let snapshot = self.sys_info()?;
        Ok(!is_truthy(snapshot.led_off()?))
    }

    /// Lights (`true`) or darkens (`false`) the status LED.
    ///
    /// # Errors
    ///
    /// Returns error if the dispatcher fails.
    pub fn set_led(&self, enable: bool) -> Result<(), Error> {
        self.dispatcher.send_command(&LedOffCommand::enable(enable))?;
        Ok(())
    }

    // ========== Uptime ==========

    /// Estimates when the relay was last switched on.
    ///
    /// Computed as now minus the reported `on_time`, so repeated calls drift
    /// with the local clock and the age of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails or `on_time` is missing,
    /// not a number, or out of range.
    pub fn on_since(&self) -> Result<DateTime<Utc>, Error> {
        let snapshot = self.sys_info()?;
        let elapsed = snapshot.on_time()?;
        Ok(on_since_at(Utc::now(), elapsed))
    }

    // ========== Identity ==========

    /// Returns the device model as currently reported.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails.
    pub fn model(&self) -> Result<Option<String>, Error> {
        Ok(self.sys_info()?.model().map(str::to_string))
    }

    /// Returns the user-assigned device name as currently reported.
    ///
    /// # Errors
    ///
    /// Returns error if the device session fails.
    pub fn alias(&self) -> Result<Option<String>, Error> {
        Ok(self.sys_info()?.alias().map(str::to_string))
    }

    /// Sends an arbitrary command and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns error if the dispatcher fails.
    pub fn send_raw(
        &self,
        module: &str,
        command: &str,
        parameters: &Map<String, Value>,
    ) -> Result<Value, Error> {
        tracing::debug!(module, command, "Dispatching raw command");
        let response = self.dispatcher.dispatch(module, command, parameters)?;
        Ok(response.into_body())
    }
}

impl<S, D> fmt::Debug for SmartPlug<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartPlug")
            .field("address", &self.address)
            .field("emeter", &self.emeter)
            .finish_non_exhaustive()
    }
}
