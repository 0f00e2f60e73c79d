// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device control input.
//!
//! Each type ensures its value is valid at construction time, so nothing
//! malformed can reach the gateway.
//!
//! # Types
//!
//! - [`MacAddress`] - Six-octet hardware address
//! - [`SettingsId`] - 32-bit settings identifier (default `0x12345678`)
//! - [`SettingsIdInput`] - Raw settings id input (text or number)
//! - [`Mode`] - Closed set of operating modes

mod mac_address;
mod mode;
mod settings_id;

pub use mac_address::MacAddress;
pub use mode::Mode;
pub use settings_id::{SettingsId, SettingsIdInput};
