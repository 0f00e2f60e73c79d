// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Call generations for stale-response rejection.

use std::fmt;

/// The kind of gateway call a session issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// A connect call.
    Connect,
    /// A mode-execute call.
    Execute,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("connect"),
            Self::Execute => f.write_str("execute"),
        }
    }
}

/// Identity of one issued gateway call.
///
/// Generations increase monotonically per [`CallKind`]; a call's result may
/// only be applied while its token is still the latest of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallToken {
    kind: CallKind,
    generation: u64,
}

impl CallToken {
    /// Returns the call kind.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// Returns the generation number.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Issues call tokens and answers whether a token is still current.
#[derive(Debug, Default)]
pub(crate) struct CallTracker {
    connect: u64,
    execute: u64,
}

impl CallTracker {
    fn counter(&mut self, kind: CallKind) -> &mut u64 {
        match kind {
            CallKind::Connect => &mut self.connect,
            CallKind::Execute => &mut self.execute,
        }
    }

    /// Issues a new token, superseding every earlier token of the same kind.
    pub fn issue(&mut self, kind: CallKind) -> CallToken {
        let counter = self.counter(kind);
        *counter += 1;
        CallToken {
            kind,
            generation: *counter,
        }
    }

    /// Supersedes every outstanding token of a kind without issuing a new one.
    pub fn supersede(&mut self, kind: CallKind) {
        *self.counter(kind) += 1;
    }

    /// Returns `true` if no newer call of the token's kind has been issued.
    pub fn is_current(&self, token: CallToken) -> bool {
        let latest = match token.kind {
            CallKind::Connect => self.connect,
            CallKind::Execute => self.execute,
        };
        token.generation == latest
    }
}
