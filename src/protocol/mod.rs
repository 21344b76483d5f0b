// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator interfaces for talking to a smart plug.
//!
//! This crate does not own a transport. Framing, encryption, discovery and
//! timeouts belong to whatever implements these traits; the
//! [`SmartPlug`](crate::SmartPlug) only reads system info through a
//! [`DeviceSession`] and sends commands through a [`CommandDispatcher`].
//!
//! Both traits are blocking. Implementations that are shared between threads
//! must be `Sync` themselves; nothing here adds locking on their behalf.
//!
//! Blanket implementations for `&T` and [`Arc<T>`] let a single client fill
//! both roles:
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::{Map, Value, json};
//! use smartplug_lib::SmartPlug;
//! use smartplug_lib::error::CommunicationError;
//! use smartplug_lib::protocol::{CommandDispatcher, CommandResponse, DeviceSession};
//!
//! struct Client;
//!
//! impl DeviceSession for Client {
//!     fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
//!         Ok(json!({"relay_state": 1}).as_object().cloned().unwrap_or_default())
//!     }
//! }
//!
//! impl CommandDispatcher for Client {
//!     fn dispatch(
//!         &self,
//!         _module: &str,
//!         _command: &str,
//!         _parameters: &Map<String, Value>,
//!     ) -> Result<CommandResponse, CommunicationError> {
//!         Ok(CommandResponse::new(json!({"err_code": 0})))
//!     }
//! }
//!
//! let client = Arc::new(Client);
//! let plug = SmartPlug::builder("192.168.1.105")
//!     .build(Arc::clone(&client), client)
//!     .unwrap();
//! assert!(plug.is_on().unwrap());
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::command::Command;
use crate::error::{CommunicationError, ParseError};

/// Response to a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResponse {
    body: Value,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Creates a response with an empty JSON object body.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            body: Value::Object(Map::new()),
        }
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response and returns its body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Parses the response body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be deserialized into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_value(self.body.clone()).map_err(|e| ParseError::InvalidValue {
            field: "response".to_string(),
            message: e.to_string(),
        })
    }
}

/// Source of the device's system info.
pub trait DeviceSession {
    /// Fetches the latest system info mapping from the device.
    ///
    /// # Errors
    ///
    /// Returns `CommunicationError` on transport or protocol failure.
    fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError>;
}

/// Sends commands to the device.
pub trait CommandDispatcher {
    /// Sends a single `(module, command, parameters)` request.
    ///
    /// # Errors
    ///
    /// Returns `CommunicationError` if the request fails or is rejected.
    fn dispatch(
        &self,
        module: &str,
        command: &str,
        parameters: &Map<String, Value>,
    ) -> Result<CommandResponse, CommunicationError>;

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Returns `CommunicationError` if the request fails or is rejected.
    fn send_command<C: Command>(&self, command: &C) -> Result<CommandResponse, CommunicationError>
    where
        Self: Sized,
    {
        tracing::debug!(
            module = command.module(),
            command = command.name(),
            "Dispatching command"
        );
        self.dispatch(command.module(), command.name(), &command.parameters())
    }
}

impl<T: DeviceSession + ?Sized> DeviceSession for &T {
    fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
        (**self).fetch_system_info()
    }
}

impl<T: DeviceSession + ?Sized> DeviceSession for Arc<T> {
    fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
        (**self).fetch_system_info()
    }
}

impl<T: CommandDispatcher + ?Sized> CommandDispatcher for &T {
    fn dispatch(
        &self,
        module: &str,
        command: &str,
        parameters: &Map<String, Value>,
    ) -> Result<CommandResponse, CommunicationError> {
        (**self).dispatch(module, command, parameters)
    }
}

impl<T: CommandDispatcher + ?Sized> CommandDispatcher for Arc<T> {
    fn dispatch(
        &self,
        module: &str,
        command: &str,
        parameters: &Map<String, Value>,
    ) -> Result<CommandResponse, CommunicationError> {
        (**self).dispatch(module, command, parameters)
    }
}
