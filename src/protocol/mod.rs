// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway protocol.
//!
//! The [`Gateway`] trait is the contract between a
//! [`DeviceSession`](crate::session::DeviceSession) and the network service
//! that forwards commands to device hardware.
//!
//! # Implementations
//!
//! - [`HttpGateway`]: JSON over HTTP (`POST /connect`, `POST /{mode}`)
//!
//! # Failure Handling
//!
//! Gateway calls never panic and never raise: every failure is returned as
//! the `Err` half of a [`RequestOutcome`], classified as network or protocol.
//! Each call is a single attempt; retries are the caller's decision.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpGateway};

use serde::Serialize;

use crate::error::GatewayError;
use crate::response::{DeviceIdentity, ModeResult};
use crate::types::{MacAddress, Mode, SettingsId};

/// Uniform result of a gateway interaction.
pub type RequestOutcome<T> = Result<T, GatewayError>;

/// Request body shared by every gateway route.
///
/// Serializes as `{"dev": ..., "mac": "aa:bb:...", "setting": "0x12345678"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayRequest<'a> {
    /// Device name as registered with the gateway.
    pub dev: &'a str,
    /// Canonical MAC address.
    pub mac: MacAddress,
    /// Encoded settings id.
    pub setting: SettingsId,
}

impl<'a> GatewayRequest<'a> {
    /// Creates a request body.
    #[must_use]
    pub fn new(dev: &'a str, mac: MacAddress, setting: SettingsId) -> Self {
        Self { dev, mac, setting }
    }
}

/// Trait for services that forward device commands.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Connects to a device and returns its identity.
    ///
    /// # Arguments
    ///
    /// * `device_name` - The name the gateway knows the device by
    /// * `mac` - The device MAC address
    /// * `settings_id` - The settings id to apply on connect
    async fn connect(
        &self,
        device_name: &str,
        mac: MacAddress,
        settings_id: SettingsId,
    ) -> RequestOutcome<DeviceIdentity>;

    /// Executes a mode on a device.
    ///
    /// # Arguments
    ///
    /// * `mode` - Selects the gateway route
    /// * `device_name` - The name the gateway knows the device by
    /// * `mac` - The device MAC address
    /// * `settings_id` - The settings id to apply before executing
    async fn execute(
        &self,
        mode: Mode,
        device_name: &str,
        mac: MacAddress,
        settings_id: SettingsId,
    ) -> RequestOutcome<ModeResult>;
}
