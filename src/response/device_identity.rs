// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity reported by the gateway on connect.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::types::{MacAddress, SettingsId};

/// Identity of a connected device.
///
/// Built from the request that was sent and the JSON object the gateway
/// answered with. The gateway typically reports:
///
/// ```json
/// {
///   "VERSION": "1.4.2",
///   "BOARD_ID": 3,
///   "MODE": "MODE.IDLE"
/// }
/// ```
///
/// All reported fields are kept in [`reported_fields`](Self::reported_fields);
/// the well-known ones also have typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceIdentity {
    device_name: String,
    mac_address: MacAddress,
    settings_id: SettingsId,
    reported_fields: Map<String, Value>,
}

impl DeviceIdentity {
    /// Firmware version field.
    pub const VERSION_FIELD: &'static str = "VERSION";
    /// Board identifier field.
    pub const BOARD_ID_FIELD: &'static str = "BOARD_ID";
    /// Current firmware mode field.
    pub const MODE_FIELD: &'static str = "MODE";

    /// Creates an identity from already-decoded fields.
    #[must_use]
    pub fn new(
        device_name: impl Into<String>,
        mac_address: MacAddress,
        settings_id: SettingsId,
        reported_fields: Map<String, Value>,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            mac_address,
            settings_id,
            reported_fields,
        }
    }

    /// Decodes a connect response body.
    ///
    /// # Errors
    ///
    /// Returns a protocol `GatewayError` if the body is not a JSON object.
    pub fn from_response(
        device_name: impl Into<String>,
        mac_address: MacAddress,
        settings_id: SettingsId,
        body: &str,
    ) -> Result<Self, GatewayError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| GatewayError::protocol(format!("malformed connect response: {e}")))?;

        match value {
            Value::Object(fields) => Ok(Self::new(device_name, mac_address, settings_id, fields)),
            other => Err(GatewayError::protocol(format!(
                "connect response is not an object: {other}"
            ))),
        }
    }

    /// Returns the device name the session connected with.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Returns the device MAC address.
    #[must_use]
    pub fn mac_address(&self) -> MacAddress {
        self.mac_address
    }

    /// Returns the settings id applied on connect.
    #[must_use]
    pub fn settings_id(&self) -> SettingsId {
        self.settings_id
    }

    /// Returns every field the gateway reported.
    #[must_use]
    pub fn reported_fields(&self) -> &Map<String, Value> {
        &self.reported_fields
    }

    /// Returns a single reported field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.reported_fields.get(name)
    }

    /// Returns the firmware version, if reported.
    ///
    /// Numeric versions are rendered as text.
    #[must_use]
    pub fn firmware_version(&self) -> Option<String> {
        self.field(Self::VERSION_FIELD).and_then(value_as_text)
    }

    /// Returns the board identifier, if reported.
    #[must_use]
    pub fn board_id(&self) -> Option<String> {
        self.field(Self::BOARD_ID_FIELD).and_then(value_as_text)
    }

    /// Returns the device's current mode as reported by its firmware.
    ///
    /// This is free-form text and is not necessarily one of the
    /// [`Mode`](crate::types::Mode) values the session can execute.
    #[must_use]
    pub fn reported_mode(&self) -> Option<&str> {
        self.field(Self::MODE_FIELD).and_then(Value::as_str)
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
