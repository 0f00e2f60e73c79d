// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw operator input for session operations.
//!
//! Inputs hold exactly what the operator typed. They are validated on every
//! call, so an operator may edit them freely between calls.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::types::{MacAddress, SettingsId, SettingsIdInput};

/// Input for [`DeviceSession::connect`](super::DeviceSession::connect).
///
/// # Examples
///
/// ```
/// use evk_session::session::ConnectInput;
///
/// let input = ConnectInput::new("router1", "AA:BB:CC:DD:EE:FF")
///     .with_settings_id("0x12345678");
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectInput {
    /// Device name as registered with the gateway.
    #[serde(rename = "dev")]
    pub device_name: String,
    /// MAC address text.
    pub mac: String,
    /// Settings id as text or number.
    #[serde(rename = "setting", default)]
    pub settings_id: SettingsIdInput,
}

impl ConnectInput {
    /// Creates connect input using the default settings id.
    #[must_use]
    pub fn new(device_name: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            mac: mac.into(),
            settings_id: SettingsIdInput::default(),
        }
    }

    /// Sets the settings id.
    #[must_use]
    pub fn with_settings_id(mut self, settings_id: impl Into<SettingsIdInput>) -> Self {
        self.settings_id = settings_id.into();
        self
    }

    /// Validates the MAC address and settings id.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, MAC address first.
    pub fn validate(&self) -> Result<(MacAddress, SettingsId), ValidationError> {
        validate_pair(&self.mac, &self.settings_id)
    }
}

/// Input for [`DeviceSession::execute`](super::DeviceSession::execute).
///
/// The device name is taken from the connected identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecuteInput {
    /// MAC address text.
    pub mac: String,
    /// Settings id as text or number.
    #[serde(rename = "setting", default)]
    pub settings_id: SettingsIdInput,
}

impl ExecuteInput {
    /// Creates execute input using the default settings id.
    #[must_use]
    pub fn new(mac: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            settings_id: SettingsIdInput::default(),
        }
    }

    /// Sets the settings id.
    #[must_use]
    pub fn with_settings_id(mut self, settings_id: impl Into<SettingsIdInput>) -> Self {
        self.settings_id = settings_id.into();
        self
    }

    /// Validates the MAC address and settings id.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, MAC address first.
    pub fn validate(&self) -> Result<(MacAddress, SettingsId), ValidationError> {
        validate_pair(&self.mac, &self.settings_id)
    }
}

fn validate_pair(
    mac: &str,
    settings_id: &SettingsIdInput,
) -> Result<(MacAddress, SettingsId), ValidationError> {
    let mac = MacAddress::parse(mac)?;
    let settings_id = SettingsId::parse(settings_id.clone())?;
    Ok((mac, settings_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_default_settings_id() {
        let (_, id) = ConnectInput::new("dev", "AABBCCDDEEFF").validate().unwrap();
        assert_eq!(id, SettingsId::DEFAULT);
    }

    #[test]
    fn mac_is_checked_first() {
        let err = ExecuteInput::new("bad")
            .with_settings_id("also bad")
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), "malformed-mac");
    }

    #[test]
    fn settings_id_is_checked() {
        let err = ExecuteInput::new("AABBCCDDEEFF")
            .with_settings_id(-3_i64)
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), "out-of-range");
    }

    #[test]
    fn deserializes_gateway_style_json() {
        let input: ConnectInput = serde_json::from_str(
            r#"{"dev": "router1", "mac": "aa-bb-cc-dd-ee-ff", "setting": 305419896}"#,
        )
        .unwrap();
        assert_eq!(input.device_name, "router1");
        let (mac, id) = input.validate().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(id, SettingsId::DEFAULT);

        let input: ExecuteInput = serde_json::from_str(r#"{"mac": "aabbccddeeff"}"#).unwrap();
        assert_eq!(input.validate().unwrap().1, SettingsId::DEFAULT);
    }
}
