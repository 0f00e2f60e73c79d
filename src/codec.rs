// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation and wire encoding of operator input.
//!
//! These are pure functions over the [`types`](crate::types) module, kept
//! together as the single place input is checked before a gateway call.

use crate::error::ValidationError;
use crate::types::{MacAddress, Mode, SettingsId, SettingsIdInput};

/// Validates a MAC address string.
///
/// # Errors
///
/// Returns `ValidationError::MalformedMac` if the input is not six hex
/// octets separated by `:` or `-`, or twelve contiguous hex digits.
///
/// # Examples
///
/// ```
/// use evk_session::codec::validate_mac;
///
/// let mac = validate_mac("AABBCCDDEEFF").unwrap();
/// assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
/// ```
pub fn validate_mac(input: &str) -> Result<MacAddress, ValidationError> {
    MacAddress::parse(input)
}

/// Parses a settings id from text or a native number.
///
/// # Errors
///
/// Returns `ValidationError::OutOfRange` or `ValidationError::NotNumeric`.
///
/// # Examples
///
/// ```
/// use evk_session::codec::parse_settings_id;
///
/// assert_eq!(parse_settings_id("0x10").unwrap().value(), 16);
/// assert_eq!(parse_settings_id(16_u32).unwrap().value(), 16);
/// assert!(parse_settings_id(-1_i64).is_err());
/// ```
pub fn parse_settings_id(input: impl Into<SettingsIdInput>) -> Result<SettingsId, ValidationError> {
    SettingsId::parse(input)
}

/// Encodes a settings id for the wire (`0x` + 8 hex digits).
#[must_use]
pub fn encode_settings_id(id: SettingsId) -> String {
    id.encode()
}

/// Parses a mode identifier.
///
/// # Errors
///
/// Returns `ValidationError::UnknownMode` if the identifier names no mode.
pub fn parse_mode(input: &str) -> Result<Mode, ValidationError> {
    input.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_id_round_trip_sampled() {
        // Walk the full range with a stride that hits every nibble position
        let mut n: u64 = 0;
        while n <= u64::from(u32::MAX) {
            let id = SettingsId::new(u32::try_from(n).unwrap());
            assert_eq!(parse_settings_id(encode_settings_id(id)).unwrap(), id);
            n += 65_521;
        }
        let max = SettingsId::new(u32::MAX);
        assert_eq!(parse_settings_id(encode_settings_id(max)).unwrap(), max);
    }

    #[test]
    fn mac_layouts_agree() {
        let colon = validate_mac("00:1A:2b:3C:4d:5E").unwrap();
        let dash = validate_mac("00-1a-2B-3c-4D-5e").unwrap();
        let bare = validate_mac("001A2B3C4D5E").unwrap();
        assert_eq!(colon, dash);
        assert_eq!(dash, bare);
    }

    #[test]
    fn parse_mode_rejects_unknown() {
        assert_eq!(parse_mode("mode1").unwrap(), Mode::Mode1);
        assert_eq!(
            parse_mode("mode3").unwrap_err(),
            ValidationError::UnknownMode("mode3".to_string())
        );
    }
}
