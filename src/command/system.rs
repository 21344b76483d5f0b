// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands of the `system` module.

use serde_json::{Map, Value};

use crate::command::Command;
use crate::types::SwitchState;

const SYSTEM: &str = "system";

/// Command to open or close the relay.
///
/// # Examples
///
/// ```
/// use smartplug_lib::command::{Command, RelayStateCommand};
/// use smartplug_lib::types::SwitchState;
///
/// let cmd = RelayStateCommand::on();
/// assert_eq!(cmd.state(), SwitchState::On);
/// assert_eq!(cmd.parameters()["state"], 1);
///
/// assert!(RelayStateCommand::new(SwitchState::Unknown).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStateCommand {
    state: SwitchState,
}

impl RelayStateCommand {
    /// Creates a relay command. Returns `None` for [`SwitchState::Unknown`].
    #[must_use]
    pub const fn new(state: SwitchState) -> Option<Self> {
        match state {
            SwitchState::On | SwitchState::Off => Some(Self { state }),
            SwitchState::Unknown => None,
        }
    }

    /// Creates a command to close the relay.
    #[must_use]
    pub const fn on() -> Self {
        Self {
            state: SwitchState::On,
        }
    }

    /// Creates a command to open the relay.
    #[must_use]
    pub const fn off() -> Self {
        Self {
            state: SwitchState::Off,
        }
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> SwitchState {
        self.state
    }
}

impl Command for RelayStateCommand {
    fn module(&self) -> &'static str {
        SYSTEM
    }

    fn name(&self) -> &'static str {
        "set_relay_state"
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        let value = u8::from(self.state == SwitchState::On);
        params.insert("state".to_string(), Value::from(value));
        params
    }
}

/// Command to switch the status LED ("night mode").
///
/// The device field encodes whether the LED is *off*, so `off = true`
/// darkens the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedOffCommand {
    off: bool,
}

impl LedOffCommand {
    /// Creates a command that sets `led_off` to `off`.
    #[must_use]
    pub const fn new(off: bool) -> Self {
        Self { off }
    }

    /// Creates a command that lights the LED when `enable` is `true`.
    #[must_use]
    pub const fn enable(enable: bool) -> Self {
        Self { off: !enable }
    }

    /// Returns whether the command turns the LED off.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.off
    }
}

impl Command for LedOffCommand {
    fn module(&self) -> &'static str {
        SYSTEM
    }

    fn name(&self) -> &'static str {
        "set_led_off"
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("off".to_string(), Value::from(u8::from(self.off)));
        params
    }
}
