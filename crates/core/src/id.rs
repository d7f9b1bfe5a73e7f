// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered identifiers and their generators.
//!
//! Job identity doubles as creation order: two ids compare the same way the
//! jobs they name were created. Generators in this module uphold that by
//! emitting fixed-width, zero-padded strings whose lexical order matches
//! their numeric order.

use crate::clock::Clock;
use crate::job::JobId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Define an ordered newtype ID wrapper around `SmolStr`.
///
/// Generates `new()`, `as_str()`, `short()`, `Display`, `From<String>`,
/// `From<&str>`, `PartialEq<str>`, `PartialEq<&str>`, `Borrow<str>` and
/// `AsRef<str>`. Ordering is the ordering of the underlying string, so
/// generators must emit ids whose lexical order is the order they want.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct JobId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the id truncated to at most `n` characters.
            pub fn short(&self, n: usize) -> &str {
                $crate::id::short(&self.0, n)
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Source of fresh, monotonically increasing job ids.
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> JobId;
}

/// Id generator keyed on wall-clock milliseconds.
///
/// Ids are `{millis:012x}{counter:06x}`, 18 hex characters. The counter
/// disambiguates ids minted within the same millisecond; if the clock
/// steps backwards the last timestamp is reused so ids never go down.
#[derive(Clone)]
pub struct ClockIdGen<C: Clock> {
    clock: C,
    last: Arc<Mutex<(u64, u32)>>,
}

impl<C: Clock> ClockIdGen<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: Arc::new(Mutex::new((0, 0))) }
    }
}

impl<C: Clock> IdGen for ClockIdGen<C> {
    fn next(&self) -> JobId {
        let now = self.clock.epoch_ms();
        let mut last = self.last.lock();
        let (ms, counter) = if now > last.0 { (now, 0) } else { (last.0, last.1.wrapping_add(1)) };
        *last = (ms, counter);
        JobId::new(format!("{:012x}{:06x}", ms, counter & 0x00ff_ffff))
    }
}

/// Predictable ids for tests: `{prefix}-000001`, `{prefix}-000002`, ...
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<Mutex<u64>>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), counter: Arc::new(Mutex::new(0)) }
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> JobId {
        let mut counter = self.counter.lock();
        *counter += 1;
        JobId::new(format!("{}-{:06}", self.prefix, *counter))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
