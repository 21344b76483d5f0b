// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart plug command definitions.
//!
//! Every command is a `(module, command, parameters)` triple that the
//! [`CommandDispatcher`](crate::protocol::CommandDispatcher) sends in a single
//! request/response exchange.
//!
//! # Available Commands
//!
//! | Command Type | Triple |
//! |-------------|--------|
//! | [`RelayStateCommand`] | `system` / `set_relay_state` / `{"state": 0\|1}` |
//! | [`LedOffCommand`] | `system` / `set_led_off` / `{"off": 0\|1}` |
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use smartplug_lib::command::{Command, RelayStateCommand};
//!
//! let cmd = RelayStateCommand::on();
//! assert_eq!(cmd.module(), "system");
//! assert_eq!(cmd.name(), "set_relay_state");
//! assert_eq!(cmd.parameters(), json!({"state": 1}).as_object().unwrap().clone());
//! ```

mod system;

pub use system::{LedOffCommand, RelayStateCommand};

use serde_json::{Map, Value};

/// A command that can be sent to a smart plug.
pub trait Command {
    /// Returns the module the command belongs to, e.g. `"system"`.
    fn module(&self) -> &'static str;

    /// Returns the command name within its module.
    fn name(&self) -> &'static str;

    /// Returns the command parameters.
    fn parameters(&self) -> Map<String, Value>;

    /// Returns the nested request object `{module: {name: parameters}}`.
    ///
    /// This is the shape most transports put on the wire.
    fn to_request(&self) -> Value {
        let mut inner = Map::new();
        inner.insert(self.name().to_string(), Value::Object(self.parameters()));
        let mut outer = Map::new();
        outer.insert(self.module().to_string(), Value::Object(inner));
        Value::Object(outer)
    }
}
