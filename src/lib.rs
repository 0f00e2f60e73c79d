// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `evk_session` - A Rust library to drive device control sessions through a
//! network gateway.
//!
//! An operator connects to a named device, inspects the identity the device
//! reports, selects an operating mode and executes it. Each request carries
//! the device MAC address and a 32-bit settings identifier.
//!
//! # Features
//!
//! - **Input validation**: MAC addresses, settings ids and modes are checked
//!   before anything reaches the network
//! - **Session state machine**: `Disconnected → Connecting → Connected →
//!   ExecutingMode → ModeResultReady`, with a recoverable `Error` state
//! - **Stale-response rejection**: only the latest call of each kind can
//!   change state, regardless of response arrival order
//! - **Snapshots**: read-only views of the session, pollable or pushed via
//!   a watch channel
//!
//! # Quick Start
//!
//! ```no_run
//! use evk_session::protocol::HttpConfig;
//! use evk_session::session::{ConnectInput, DeviceSession, ExecuteInput};
//!
//! #[tokio::main]
//! async fn main() -> evk_session::Result<()> {
//!     let session = DeviceSession::http(HttpConfig::new("localhost").with_port(5000))?;
//!
//!     let identity = session
//!         .connect(&ConnectInput::new("router1", "AA:BB:CC:DD:EE:FF").with_settings_id("0x12345678"))
//!         .await?;
//!     println!("firmware {:?}", identity.firmware_version());
//!
//!     session.select_mode("mode2")?;
//!     let result = session.execute(&ExecuteInput::new("AA:BB:CC:DD:EE:FF")).await?;
//!     println!("{:?}", result.payload());
//!     Ok(())
//! }
//! ```
//!
//! # Watching a Session
//!
//! ```no_run
//! use evk_session::protocol::HttpConfig;
//! use evk_session::session::DeviceSession;
//!
//! # async fn example() -> evk_session::Result<()> {
//! let session = DeviceSession::http(HttpConfig::new("localhost"))?;
//! let mut updates = session.subscribe();
//!
//! tokio::spawn(async move {
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow_and_update().clone();
//!         println!("state is now {:?}", snapshot.state);
//!     }
//! });
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod protocol;
pub mod response;
pub mod session;
pub mod types;

pub use error::{
    Error, ErrorKind, FailureKind, GatewayError, PreconditionError, Result, ValidationError,
};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpGateway};
pub use protocol::{Gateway, RequestOutcome};
pub use response::{DeviceIdentity, ModeResult};
pub use session::{
    CallKind, ConnectInput, DeviceSession, ExecuteInput, SessionSnapshot, SessionState,
};
pub use types::{MacAddress, Mode, SettingsId, SettingsIdInput};
