// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded gateway responses.

mod device_identity;
mod mode_result;

pub use device_identity::DeviceIdentity;
pub use mode_result::ModeResult;
