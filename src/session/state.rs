// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state and read-only snapshots.

use crate::error::Error;
use crate::response::{DeviceIdentity, ModeResult};
use crate::types::Mode;

/// Lifecycle state of a [`DeviceSession`](super::DeviceSession).
///
/// There is no terminal state: `Error` is always left by a new connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No connect attempt has succeeded yet, or the session was reset.
    #[default]
    Disconnected,
    /// A connect call is in flight.
    Connecting,
    /// A device identity is available and no mode call is in flight.
    Connected,
    /// A mode-execute call is in flight.
    ExecutingMode,
    /// The last mode-execute call succeeded.
    ModeResultReady,
    /// The last gateway call failed.
    Error,
}

/// Point-in-time view of a session, for rendering.
///
/// # Examples
///
/// ```
/// use evk_session::session::{SessionSnapshot, SessionState};
///
/// let snapshot = SessionSnapshot::default();
/// assert_eq!(snapshot.state, SessionState::Disconnected);
/// assert!(!snapshot.can_execute());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    /// Current lifecycle state.
    pub state: SessionState,
    /// Identity of the last successful connect, if any.
    pub device_identity: Option<DeviceIdentity>,
    /// Mode chosen by the operator, if any.
    pub current_mode: Option<Mode>,
    /// Result of the last successful execute since the last connect.
    pub last_result: Option<ModeResult>,
    /// Error raised by the last operation, if it failed.
    pub last_error: Option<Error>,
    /// `true` once a connect has succeeded and until the next connect
    /// starts or the session is reset. A failed execute leaves it set.
    pub execute_ready: bool,
}

impl SessionSnapshot {
    /// Returns `true` if a device identity is held.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.device_identity.is_some()
    }

    /// Returns `true` if `execute` would pass its preconditions.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        self.execute_ready && self.has_identity() && self.current_mode.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MacAddress, SettingsId};

    fn identity() -> DeviceIdentity {
        DeviceIdentity::new(
            "dev",
            MacAddress::from_octets([1, 2, 3, 4, 5, 6]),
            SettingsId::DEFAULT,
            serde_json::Map::new(),
        )
    }

    #[test]
    fn can_execute_requires_ready_identity_and_mode() {
        let mut snapshot = SessionSnapshot {
            state: SessionState::Connected,
            current_mode: Some(Mode::Mode1),
            ..SessionSnapshot::default()
        };
        assert!(!snapshot.can_execute());

        snapshot.device_identity = Some(identity());
        assert!(!snapshot.can_execute());

        snapshot.execute_ready = true;
        assert!(snapshot.can_execute());

        snapshot.current_mode = None;
        assert!(!snapshot.can_execute());
    }

    #[test]
    fn identity_kept_after_failed_reconnect_is_not_executable() {
        let snapshot = SessionSnapshot {
            state: SessionState::Error,
            device_identity: Some(identity()),
            current_mode: Some(Mode::Mode2),
            ..SessionSnapshot::default()
        };
        assert!(snapshot.has_identity());
        assert!(!snapshot.can_execute());
    }
}
