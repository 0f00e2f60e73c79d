// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MAC address type.
//!
//! This module provides a validated representation of a device MAC address.
//! A [`MacAddress`] can only be built from input that has passed validation,
//! so any value handed to the gateway is well-formed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A six-octet hardware address.
///
/// Accepted input layouts (hex digits are case-insensitive):
///
/// | Layout | Example |
/// |--------|---------|
/// | Colon-separated | `AA:BB:CC:DD:EE:FF` |
/// | Dash-separated | `aa-bb-cc-dd-ee-ff` |
/// | Bare | `AABBCCDDEEFF` |
///
/// The canonical form is always lowercase and colon-separated.
///
/// # Examples
///
/// ```
/// use evk_session::types::MacAddress;
///
/// let mac: MacAddress = "AA-BB-CC-DD-EE-FF".parse().unwrap();
/// assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
///
/// assert!(MacAddress::parse("AA:BB:CC:DD:EE").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a MAC address from raw octets.
    #[must_use]
    pub const fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Parses a MAC address from operator input.
    ///
    /// Leading and trailing whitespace is ignored. Separators must be used
    /// consistently: mixing `:` and `-` is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedMac` for any other length, charset
    /// or separator layout.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let malformed = || ValidationError::MalformedMac(input.to_string());

        let digits: Vec<u8> = match trimmed.len() {
            12 => trimmed.bytes().collect(),
            17 => {
                let bytes = trimmed.as_bytes();
                let separator = bytes[2];
                if separator != b':' && separator != b'-' {
                    return Err(malformed());
                }
                let mut digits = Vec::with_capacity(12);
                for (i, &b) in bytes.iter().enumerate() {
                    if i % 3 == 2 {
                        if b != separator {
                            return Err(malformed());
                        }
                    } else {
                        digits.push(b);
                    }
                }
                digits
            }
            _ => return Err(malformed()),
        };

        let mut octets = [0u8; 6];
        for (octet, pair) in octets.iter_mut().zip(digits.chunks_exact(2)) {
            let high = hex_value(pair[0]).ok_or_else(malformed)?;
            let low = hex_value(pair[1]).ok_or_else(malformed)?;
            *octet = (high << 4) | low;
        }
        Ok(Self(octets))
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MacAddress {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
