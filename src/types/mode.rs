// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device operating modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An operating mode the gateway can execute on a device.
///
/// Each mode maps to its own gateway route. New modes are added as variants;
/// arbitrary strings are never accepted.
///
/// # Examples
///
/// ```
/// use evk_session::types::Mode;
///
/// let mode: Mode = "mode2".parse().unwrap();
/// assert_eq!(mode, Mode::Mode2);
/// assert_eq!(mode.route(), "mode2");
///
/// assert!("mode3".parse::<Mode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// First operating mode.
    Mode1,
    /// Second operating mode.
    Mode2,
}

impl Mode {
    /// All known modes, in display order.
    pub const ALL: [Self; 2] = [Self::Mode1, Self::Mode2];

    /// Returns the gateway route segment for this mode.
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::Mode1 => "mode1",
            Self::Mode2 => "mode2",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.route().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownMode(s.to_string()))
    }
}
