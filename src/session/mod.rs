// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device control session.
//!
//! A [`DeviceSession`] drives the connect → select-mode → execute workflow
//! against a [`Gateway`] and is the only thing that mutates session state.
//!
//! # State Machine
//!
//! | From | Operation / outcome | To |
//! |------|---------------------|----|
//! | any | `connect` (valid input) | `Connecting` |
//! | `Connecting` | gateway ok | `Connected` |
//! | `Connecting` | gateway error | `Error` |
//! | `Connected`, `ModeResultReady`, `ExecutingMode`, `Error` after a failed execute | `execute` | `ExecutingMode` |
//! | `ExecutingMode` | gateway ok | `ModeResultReady` |
//! | `ExecutingMode` | gateway error | `Error` |
//! | any | `reset` | `Disconnected` |
//!
//! `select_mode` never changes the state, and rejected input never does
//! either.
//!
//! # Stale Responses
//!
//! Every gateway call is tagged with a [`CallToken`]. Issuing a new call of
//! the same kind supersedes the older one: when the older call's response
//! eventually arrives it is discarded and its caller receives
//! [`Error::Superseded`]. Only the most recently issued call of each kind
//! can change session state, whatever order the responses arrive in.
//!
//! # Examples
//!
//! ```no_run
//! use evk_session::session::{ConnectInput, DeviceSession, ExecuteInput};
//! use evk_session::protocol::HttpConfig;
//!
//! # async fn example() -> evk_session::Result<()> {
//! let session = DeviceSession::http(HttpConfig::new("localhost"))?;
//!
//! let identity = session
//!     .connect(&ConnectInput::new("router1", "AA:BB:CC:DD:EE:FF"))
//!     .await?;
//! println!("board {:?}", identity.board_id());
//!
//! session.select_mode("mode1")?;
//! let result = session.execute(&ExecuteInput::new("AA:BB:CC:DD:EE:FF")).await?;
//! println!("status {:?}", result.status());
//! # Ok(())
//! # }
//! ```

mod call;
mod input;
mod state;

pub use call::{CallKind, CallToken};
pub use input::{ConnectInput, ExecuteInput};
pub use state::{SessionSnapshot, SessionState};

use parking_lot::Mutex;
use tokio::sync::watch;

use call::CallTracker;

use crate::error::{Error, PreconditionError, Result};
use crate::protocol::Gateway;
use crate::response::{DeviceIdentity, ModeResult};
use crate::types::{MacAddress, Mode, SettingsId};

/// Mutable session data, guarded by a single lock.
#[derive(Debug, Default)]
struct Inner {
    snapshot: SessionSnapshot,
    calls: CallTracker,
}

/// Everything an execute call needs once its preconditions have passed.
struct ExecutePlan {
    token: CallToken,
    mode: Mode,
    device_name: String,
    mac: MacAddress,
    settings_id: SettingsId,
}

/// A control session for one device reached through a gateway.
///
/// All operations take `&self`; state lives behind a short-lived lock that is
/// never held across a gateway call, so calls of different kinds (or a newer
/// call of the same kind) can be issued while one is outstanding.
#[derive(Debug)]
pub struct DeviceSession<G: Gateway> {
    gateway: G,
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

#[cfg(feature = "http")]
impl DeviceSession<crate::protocol::HttpGateway> {
    /// Creates a session backed by an HTTP gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn http(config: crate::protocol::HttpConfig) -> Result<Self> {
        Ok(Self::new(config.into_gateway()?))
    }
}

impl<G: Gateway> DeviceSession<G> {
    /// Creates a disconnected session using the given gateway.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            gateway,
            inner: Mutex::new(Inner::default()),
            snapshot_tx,
        }
    }

    /// Returns the gateway this session talks to.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns a snapshot of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.lock().snapshot.state
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver always holds the latest snapshot; intermediate snapshots
    /// may be skipped by slow readers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Applies a change under the lock and publishes the resulting snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock();
        let result = f(&mut *inner);
        let snapshot = &inner.snapshot;
        self.snapshot_tx.send_if_modified(|current| {
            if current == snapshot {
                false
            } else {
                current.clone_from(snapshot);
                true
            }
        });
        result
    }

    /// Records a locally rejected operation without changing the state.
    fn reject(&self, error: Error) -> Error {
        tracing::debug!(error = %error, "Operation rejected");
        self.update(|inner| inner.snapshot.last_error = Some(error.clone()));
        error
    }

    /// Connects to a device.
    ///
    /// The input is validated first; invalid input is rejected without
    /// contacting the gateway and leaves the state unchanged. Otherwise the
    /// session enters [`SessionState::Connecting`], superseding any
    /// outstanding connect or execute call.
    ///
    /// On success the identity replaces any previous one and the state
    /// becomes [`SessionState::Connected`]. On failure the state becomes
    /// [`SessionState::Error`]. The previous identity, if any, stays readable
    /// but the session is not executable until a connect succeeds.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for malformed input, `Error::Gateway` if
    /// the gateway call failed, or `Error::Superseded` if a newer connect
    /// (or a reset) was issued before this one completed.
    pub async fn connect(&self, input: &ConnectInput) -> Result<DeviceIdentity> {
        let (mac, settings_id) = input.validate().map_err(|e| self.reject(e.into()))?;

        let token = self.update(|inner| {
            let token = inner.calls.issue(CallKind::Connect);
            inner.calls.supersede(CallKind::Execute);

            let snapshot = &mut inner.snapshot;
            snapshot.state = SessionState::Connecting;
            snapshot.execute_ready = false;
            snapshot.current_mode = None;
            snapshot.last_result = None;
            snapshot.last_error = None;
            token
        });

        tracing::debug!(
            device = %input.device_name,
            mac = %mac,
            setting = %settings_id,
            generation = token.generation(),
            "Connecting to device"
        );

        let outcome = self
            .gateway
            .connect(&input.device_name, mac, settings_id)
            .await;

        self.update(|inner| {
            if !inner.calls.is_current(token) {
                tracing::debug!(
                    generation = token.generation(),
                    "Discarding stale connect response"
                );
                return Err(Error::Superseded(CallKind::Connect));
            }

            let snapshot = &mut inner.snapshot;
            match outcome {
                Ok(identity) => {
                    tracing::info!(
                        device = identity.device_name(),
                        mac = %identity.mac_address(),
                        "Connected to device"
                    );
                    snapshot.device_identity = Some(identity.clone());
                    snapshot.execute_ready = true;
                    snapshot.last_error = None;
                    snapshot.state = SessionState::Connected;
                    Ok(identity)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Connect failed");
                    let error = Error::Gateway(e);
                    snapshot.last_error = Some(error.clone());
                    snapshot.state = SessionState::Error;
                    Err(error)
                }
            }
        })
    }

    /// Selects the mode to execute, by route name.
    ///
    /// Mode selection is local state only and may be repeated in any state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the identifier names no known mode; the
    /// selected mode and the state are left unchanged.
    pub fn select_mode(&self, mode: &str) -> Result<Mode> {
        let mode = mode.parse::<Mode>().map_err(|e| self.reject(e.into()))?;
        self.set_mode(mode);
        Ok(mode)
    }

    /// Selects the mode to execute.
    pub fn set_mode(&self, mode: Mode) {
        tracing::debug!(mode = %mode, "Mode selected");
        self.update(|inner| inner.snapshot.current_mode = Some(mode));
    }

    /// Checks execute preconditions and input, then issues an execute token.
    fn plan_execute(&self, input: &ExecuteInput) -> Result<ExecutePlan> {
        self.update(|inner| {
            let checked = Self::check_execute(&inner.snapshot, input);
            match checked {
                Ok((mode, device_name, mac, settings_id)) => {
                    let token = inner.calls.issue(CallKind::Execute);
                    inner.snapshot.state = SessionState::ExecutingMode;
                    inner.snapshot.last_error = None;
                    Ok(ExecutePlan {
                        token,
                        mode,
                        device_name,
                        mac,
                        settings_id,
                    })
                }
                Err(error) => {
                    tracing::debug!(error = %error, "Execute rejected");
                    inner.snapshot.last_error = Some(error.clone());
                    Err(error)
                }
            }
        })
    }

    fn check_execute(
        snapshot: &SessionSnapshot,
        input: &ExecuteInput,
    ) -> Result<(Mode, String, MacAddress, SettingsId)> {
        let identity = snapshot
            .device_identity
            .as_ref()
            .filter(|_| snapshot.execute_ready)
            .ok_or(PreconditionError::NotConnected)?;
        let mode = snapshot
            .current_mode
            .ok_or(PreconditionError::NoModeSelected)?;
        let (mac, settings_id) = input.validate()?;
        Ok((mode, identity.device_name().to_string(), mac, settings_id))
    }

    /// Executes the selected mode on the connected device.
    ///
    /// Preconditions are checked before the input: the most recent connect
    /// must have succeeded, and a mode must be selected. A failed execute
    /// keeps the session executable; a failed connect does not.
    /// A newer execute supersedes an outstanding one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Precondition` if the session cannot execute,
    /// `Error::Validation` for malformed input, `Error::Gateway` if the
    /// gateway call failed, or `Error::Superseded` if a newer execute,
    /// connect or reset was issued before this one completed.
    pub async fn execute(&self, input: &ExecuteInput) -> Result<ModeResult> {
        let plan = self.plan_execute(input)?;

        tracing::debug!(
            mode = %plan.mode,
            device = %plan.device_name,
            mac = %plan.mac,
            setting = %plan.settings_id,
            generation = plan.token.generation(),
            "Executing mode"
        );

        let outcome = self
            .gateway
            .execute(plan.mode, &plan.device_name, plan.mac, plan.settings_id)
            .await;

        self.update(|inner| {
            if !inner.calls.is_current(plan.token) {
                tracing::debug!(
                    generation = plan.token.generation(),
                    "Discarding stale execute response"
                );
                return Err(Error::Superseded(CallKind::Execute));
            }

            let snapshot = &mut inner.snapshot;
            match outcome {
                Ok(result) => {
                    tracing::info!(mode = %plan.mode, status = ?result.status(), "Mode executed");
                    snapshot.last_result = Some(result.clone());
                    snapshot.last_error = None;
                    snapshot.state = SessionState::ModeResultReady;
                    Ok(result)
                }
                Err(e) => {
                    tracing::warn!(mode = %plan.mode, error = %e, "Execute failed");
                    let error = Error::Gateway(e);
                    snapshot.last_error = Some(error.clone());
                    snapshot.state = SessionState::Error;
                    Err(error)
                }
            }
        })
    }

    /// Returns the session to [`SessionState::Disconnected`].
    ///
    /// Drops the identity, mode, result and error, and supersedes every
    /// outstanding call.
    pub fn reset(&self) {
        tracing::debug!("Resetting session");
        self.update(|inner| {
            inner.calls.supersede(CallKind::Connect);
            inner.calls.supersede(CallKind::Execute);
            inner.snapshot = SessionSnapshot::default();
        });
    }
}
