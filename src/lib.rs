// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SmartPlug` Lib - A Rust library modelling remote-controllable smart plugs.
//!
//! This library turns a plug's loosely-typed system info into strict domain
//! values and validates caller input before any command is sent. Network
//! transport is not part of this crate: callers plug in their own
//! [`DeviceSession`](protocol::DeviceSession) and
//! [`CommandDispatcher`](protocol::CommandDispatcher).
//!
//! # Supported Features
//!
//! - **Switch control**: Read the relay as On/Off/Unknown, switch it with validated input
//! - **Feature list**: Decode advertised capability codes, keeping unknown ones
//! - **Status LED**: Read and set the indicator light
//! - **Uptime**: Estimate when the relay was last switched on
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::{Map, Value, json};
//! use smartplug_lib::error::CommunicationError;
//! use smartplug_lib::protocol::{CommandDispatcher, CommandResponse, DeviceSession};
//! use smartplug_lib::{SmartPlug, SwitchState};
//!
//! struct Client;
//!
//! impl DeviceSession for Client {
//!     fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
//!         let info = json!({
//!             "relay_state": 1,
//!             "led_off": 0,
//!             "on_time": 3600,
//!             "feature": "TIM:ENE",
//!             "model": "HS110(EU)",
//!         });
//!         Ok(info.as_object().cloned().unwrap_or_default())
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
//! fn main() -> smartplug_lib::Result<()> {
//!     let client = Arc::new(Client);
//!     let plug = SmartPlug::builder("192.168.1.105").build(Arc::clone(&client), client)?;
//!
//!     assert_eq!(plug.state()?, SwitchState::On);
//!     assert!(plug.has_emeter()?);
//!     assert!(plug.led()?);
//!
//!     plug.set_state("off")?;
//!     plug.set_led(false)?;
//!     println!("on since {}", plug.on_since()?);
//!     Ok(())
//! }
//! ```
//!
//! # Diagnostics
//!
//! Unexpected relay values and unknown feature codes are not errors. They
//! are reported to a [`DiagnosticsSink`](diagnostics::DiagnosticsSink),
//! which logs through `tracing` unless another sink is injected with
//! [`SmartPlugBuilder::with_diagnostics`].

pub mod command;
pub mod diagnostics;
pub mod error;
mod plug;
pub mod protocol;
pub mod snapshot;
pub mod types;

pub use command::{Command, LedOffCommand, RelayStateCommand};
pub use diagnostics::{Diagnostic, DiagnosticsSink, MemoryDiagnostics, TracingDiagnostics};
pub use error::{CommunicationError, Error, ParseError, Result, ValueError};
pub use plug::{EmeterConfig, PlugConfig, SmartPlug, SmartPlugBuilder};
pub use protocol::{CommandDispatcher, CommandResponse, DeviceSession};
pub use snapshot::{SnapshotAccessor, StatusSnapshot};
pub use types::{Feature, FeatureSet, SwitchState};
