// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the smart plug library.
//!
//! Three kinds of failure surface from a [`SmartPlug`](crate::SmartPlug):
//! caller input rejected before anything is sent ([`ValueError`]), failures
//! reported by the device session or command dispatcher
//! ([`CommunicationError`], passed through untouched), and system info fields
//! that are missing or of the wrong type ([`ParseError`]).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input failed validation. Nothing was sent to the device.
    #[error("invalid argument: {0}")]
    Value(#[from] ValueError),

    /// The device session or command dispatcher failed.
    #[error("device communication error: {0}")]
    Communication(#[from] CommunicationError),

    /// A field of the system info snapshot could not be read.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns `true` if this error was raised by local input validation.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Errors related to caller input validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A switch state string other than `ON` or `OFF` was provided.
    #[error("invalid switch state: {0}")]
    InvalidState(String),

    /// A switch state was provided as something other than a string.
    #[error("switch state must be a string, not {found} {value}")]
    NotAString {
        /// JSON type name of the rejected value.
        found: &'static str,
        /// The rejected value, rendered as JSON.
        value: String,
    },

    /// A plug was configured without a network address.
    #[error("device address must not be empty")]
    EmptyAddress,
}

/// Failures reported by the device session or command dispatcher.
///
/// These are produced by the transport layer, never by this crate, and are
/// returned to the caller exactly as received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommunicationError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with something that could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The device rejected the command.
    #[error("command rejected with code {code}: {message}")]
    Rejected {
        /// Error code reported by the device.
        code: i64,
        /// Error message reported by the device.
        message: String,
    },
}

/// Errors related to reading system info fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected field is missing from the system info.
    #[error("missing field in system info: {0}")]
    MissingField(String),

    /// A field holds a value of the wrong type.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
