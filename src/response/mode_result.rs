// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result of executing a mode on the device.

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::types::Mode;

/// Payload returned by the gateway after executing a mode.
///
/// The gateway answers `{"status": "success"}` when the command was
/// forwarded; any other JSON object is kept as-is in [`payload`](Self::payload).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeResult {
    mode: Mode,
    payload: Value,
}

impl ModeResult {
    /// Creates a mode result.
    #[must_use]
    pub fn new(mode: Mode, payload: Value) -> Self {
        Self { mode, payload }
    }

    /// Decodes a mode response body.
    ///
    /// # Errors
    ///
    /// Returns a protocol `GatewayError` if the body is not a JSON object.
    pub fn from_response(mode: Mode, body: &str) -> Result<Self, GatewayError> {
        let payload: Value = serde_json::from_str(body)
            .map_err(|e| GatewayError::protocol(format!("malformed {mode} response: {e}")))?;
        if !payload.is_object() {
            return Err(GatewayError::protocol(format!(
                "{mode} response is not an object: {payload}"
            )));
        }
        Ok(Self::new(mode, payload))
    }

    /// Returns the mode that was executed.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the `status` field, if present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }
}
