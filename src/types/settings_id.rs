// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings identifier type.
//!
//! The settings id is an opaque 32-bit value that configures device
//! behavior. No meaning is assigned to its bits; it is only range-checked.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A 32-bit settings identifier.
///
/// # Examples
///
/// ```
/// use evk_session::types::SettingsId;
///
/// let id: SettingsId = "0x12345678".parse().unwrap();
/// assert_eq!(id, SettingsId::DEFAULT);
/// assert_eq!(id.encode(), "0x12345678");
///
/// let id = SettingsId::parse("255").unwrap();
/// assert_eq!(id.encode(), "0x000000ff");
///
/// assert!(SettingsId::parse("0x100000000").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingsId(u32);

impl SettingsId {
    /// The settings id used when the operator supplies none.
    pub const DEFAULT: Self = Self(0x1234_5678);

    /// Creates a settings id from a value already known to be in range.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parses a settings id from any supported input shape.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` for negative values or values
    /// above `0xFFFFFFFF`, and `ValidationError::NotNumeric` for anything
    /// that is not an integer.
    pub fn parse(input: impl Into<SettingsIdInput>) -> Result<Self, ValidationError> {
        match input.into() {
            SettingsIdInput::Text(text) => parse_text(&text),
            SettingsIdInput::Unsigned(n) => u32::try_from(n)
                .map(Self)
                .map_err(|_| ValidationError::OutOfRange(n.to_string())),
            SettingsIdInput::Signed(n) => u32::try_from(n)
                .map(Self)
                .map_err(|_| ValidationError::OutOfRange(n.to_string())),
            SettingsIdInput::Float(f) => parse_float(f),
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the wire form: `0x` followed by 8 lowercase hex digits.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{:#010x}", self.0)
    }
}

fn parse_text(text: &str) -> Result<SettingsId, ValidationError> {
    let trimmed = text.trim();
    let not_numeric = || ValidationError::NotNumeric(text.to_string());
    let out_of_range = || ValidationError::OutOfRange(trimmed.to_string());

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(not_numeric());
        }
        return u32::from_str_radix(hex, 16)
            .map(SettingsId)
            .map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow => out_of_range(),
                _ => not_numeric(),
            });
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_numeric());
    }
    if negative {
        // "-0" is still zero
        return if digits.bytes().all(|b| b == b'0') {
            Ok(SettingsId(0))
        } else {
            Err(out_of_range())
        };
    }
    digits.parse::<u32>().map(SettingsId).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(),
        _ => not_numeric(),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_float(f: f64) -> Result<SettingsId, ValidationError> {
    if !f.is_finite() || f.fract().abs() > 0.0 {
        return Err(ValidationError::NotNumeric(f.to_string()));
    }
    if f < 0.0 || f > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange(f.to_string()));
    }
    // Safe: f is integral and within [0, u32::MAX]
    Ok(SettingsId(f as u32))
}

impl Default for SettingsId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SettingsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl FromStr for SettingsId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_text(s)
    }
}

impl From<u32> for SettingsId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SettingsId> for u32 {
    fn from(id: SettingsId) -> Self {
        id.0
    }
}

impl Serialize for SettingsId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for SettingsId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = SettingsIdInput::deserialize(deserializer)?;
        Self::parse(input).map_err(serde::de::Error::custom)
    }
}

/// Raw, unvalidated settings id input as an operator may supply it.
///
/// Deserializes from either a JSON string or a JSON number.
///
/// # Examples
///
/// ```
/// use evk_session::types::{SettingsId, SettingsIdInput};
///
/// let inputs: [SettingsIdInput; 3] = ["305419896".into(), 0x1234_5678_u32.into(), 305_419_896.0.into()];
/// for input in inputs {
///     assert_eq!(SettingsId::parse(input).unwrap(), SettingsId::DEFAULT);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingsIdInput {
    /// Decimal or `0x`-prefixed hex text.
    Text(String),
    /// A non-negative integer.
    Unsigned(u64),
    /// A possibly negative integer.
    Signed(i64),
    /// A floating-point number; only integral values are accepted.
    Float(f64),
}

impl Default for SettingsIdInput {
    fn default() -> Self {
        Self::Unsigned(u64::from(SettingsId::DEFAULT.value()))
    }
}

impl From<&str> for SettingsIdInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingsIdInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for SettingsIdInput {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<u64> for SettingsIdInput {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<i32> for SettingsIdInput {
    fn from(value: i32) -> Self {
        Self::Signed(i64::from(value))
    }
}

impl From<i64> for SettingsIdInput {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<f64> for SettingsIdInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<SettingsId> for SettingsIdInput {
    fn from(id: SettingsId) -> Self {
        Self::Unsigned(u64::from(id.value()))
    }
}
