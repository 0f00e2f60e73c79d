// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `evk_session` library.
//!
//! Errors fall into four families:
//!
//! - [`ValidationError`]: operator input rejected before any network call
//! - [`PreconditionError`]: an operation issued in the wrong session state
//! - [`GatewayError`]: a gateway call failed on the network or broke protocol
//! - [`Error::Superseded`]: a call whose result was discarded because a newer
//!   call of the same kind was issued
//!
//! Every type here is `Clone` so the last error can be kept in a
//! [`SessionSnapshot`](crate::session::SessionSnapshot).

use std::fmt;

use thiserror::Error;

use crate::session::CallKind;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operator input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The operation is not allowed in the current session state.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// The gateway call failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The call was superseded by a newer call of the same kind and its
    /// result was discarded.
    #[error("superseded by a newer {0} call")]
    Superseded(CallKind),
}

impl Error {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Precondition(_) => ErrorKind::Precondition,
            Self::Gateway(e) => match e.kind() {
                FailureKind::Network => ErrorKind::Network,
                FailureKind::Protocol => ErrorKind::Protocol,
            },
            Self::Superseded(_) => ErrorKind::Superseded,
        }
    }

    /// Returns `true` if re-issuing the same call may succeed.
    ///
    /// Only gateway failures qualify: validation and precondition errors
    /// need different input or a different session state first.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed operator input.
    Validation,
    /// Operation issued in the wrong state.
    Precondition,
    /// Gateway unreachable or timed out.
    Network,
    /// Gateway answered with an error status or an unreadable body.
    Protocol,
    /// Result discarded in favour of a newer call.
    Superseded,
}

/// Errors raised while validating operator input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The MAC address is not six hex octets in an accepted layout.
    #[error("malformed MAC address: {0:?}")]
    MalformedMac(String),

    /// The settings id is numeric but outside `[0, 0xFFFFFFFF]`.
    #[error("settings id {0} is out of range [0, 0xffffffff]")]
    OutOfRange(String),

    /// The settings id is not an integer.
    #[error("settings id is not numeric: {0:?}")]
    NotNumeric(String),

    /// The mode identifier does not name a known mode.
    #[error("unknown mode: {0:?}")]
    UnknownMode(String),
}

impl ValidationError {
    /// Returns the stable identifier of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedMac(_) => "malformed-mac",
            Self::OutOfRange(_) => "out-of-range",
            Self::NotNumeric(_) => "not-numeric",
            Self::UnknownMode(_) => "unknown-mode",
        }
    }
}

/// Errors raised when an operation is sequenced incorrectly.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    /// No usable device identity is available.
    #[error("session is not connected")]
    NotConnected,

    /// `execute` was called before a mode was selected.
    #[error("no mode selected")]
    NoModeSelected,
}

impl PreconditionError {
    /// Returns the stable identifier of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotConnected => "not-connected",
            Self::NoModeSelected => "no-mode-selected",
        }
    }
}

/// Which side of the gateway contract a call failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request never produced a response (unreachable, reset, timeout).
    Network,
    /// A response arrived but was an error status or could not be decoded.
    Protocol,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Protocol => f.write_str("protocol"),
        }
    }
}

/// The failure half of a [`RequestOutcome`](crate::protocol::RequestOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct GatewayError {
    kind: FailureKind,
    message: String,
}

impl GatewayError {
    /// Message used when the gateway did not answer in time.
    pub const TIMEOUT: &'static str = "timeout";

    /// Creates a network failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            message: message.into(),
        }
    }

    /// Creates a network failure for an elapsed timeout.
    #[must_use]
    pub fn timeout() -> Self {
        Self::network(Self::TIMEOUT)
    }

    /// Creates a protocol failure.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Protocol,
            message: message.into(),
        }
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this failure is an elapsed timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == FailureKind::Network && self.message == Self::TIMEOUT
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::OutOfRange("4294967296".to_string());
        assert_eq!(
            err.to_string(),
            "settings id 4294967296 is out of range [0, 0xffffffff]"
        );
    }

    #[test]
    fn validation_error_codes() {
        assert_eq!(
            ValidationError::MalformedMac(String::new()).code(),
            "malformed-mac"
        );
        assert_eq!(
            ValidationError::OutOfRange(String::new()).code(),
            "out-of-range"
        );
        assert_eq!(
            ValidationError::NotNumeric(String::new()).code(),
            "not-numeric"
        );
        assert_eq!(
            ValidationError::UnknownMode(String::new()).code(),
            "unknown-mode"
        );
    }

    #[test]
    fn precondition_error_codes() {
        assert_eq!(PreconditionError::NotConnected.code(), "not-connected");
        assert_eq!(PreconditionError::NoModeSelected.code(), "no-mode-selected");
    }

    #[test]
    fn error_from_validation_error() {
        let err: Error = ValidationError::UnknownMode("mode3".to_string()).into();
        assert!(matches!(err, Error::Validation(ValidationError::UnknownMode(_))));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn gateway_error_kinds() {
        let net: Error = GatewayError::network("connection refused").into();
        let proto: Error = GatewayError::protocol("HTTP 500").into();
        assert_eq!(net.kind(), ErrorKind::Network);
        assert_eq!(proto.kind(), ErrorKind::Protocol);
        assert!(net.is_retryable());
        assert!(proto.is_retryable());
    }

    #[test]
    fn gateway_error_display() {
        let err = GatewayError::protocol("HTTP 404 - Device 'x' not found");
        assert_eq!(
            err.to_string(),
            "protocol error: HTTP 404 - Device 'x' not found"
        );
    }

    #[test]
    fn timeout_is_network_failure() {
        let err = GatewayError::timeout();
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(err.is_timeout());
        assert!(!GatewayError::protocol("timeout").is_timeout());
    }

    #[test]
    fn superseded_display() {
        let err = Error::Superseded(CallKind::Connect);
        assert_eq!(err.to_string(), "superseded by a newer connect call");
        assert_eq!(err.kind(), ErrorKind::Superseded);
    }
}
