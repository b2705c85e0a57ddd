// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Generation counters for discarding the results of superseded async work.
//!
//! An operation captures a token when it starts. When its result arrives the
//! owner checks the token against its counter and drops the result if the
//! counter has moved on (a newer operation started, or the owner was
//! disposed).

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// A captured generation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GenerationToken(u64);

impl GenerationToken {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// A generation counter owned by single-threaded state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Creates a counter at generation zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Starts a new operation, superseding every earlier token.
    pub const fn advance(&mut self) -> GenerationToken {
        self.current += 1;
        GenerationToken(self.current)
    }

    /// Returns the token of the current generation without advancing.
    #[must_use]
    pub const fn token(&self) -> GenerationToken {
        GenerationToken(self.current)
    }

    /// Returns whether `token` still belongs to the current generation.
    #[must_use]
    pub const fn is_current(&self, token: GenerationToken) -> bool {
        self.current == token.0
    }

    /// Invalidates every outstanding token.
    pub const fn invalidate(&mut self) {
        self.current += 1;
    }
}

/// A generation counter shared between tasks.
#[derive(Debug, Default)]
pub struct SharedGeneration {
    current: AtomicU64,
}

impl SharedGeneration {
    /// Creates a counter at generation zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Returns the token of the current generation.
    #[must_use]
    pub fn token(&self) -> GenerationToken {
        GenerationToken(self.current.load(Ordering::Acquire))
    }

    /// Returns whether `token` still belongs to the current generation.
    #[must_use]
    pub fn is_current(&self, token: GenerationToken) -> bool {
        self.current.load(Ordering::Acquire) == token.0
    }

    /// Invalidates every outstanding token.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }
}
