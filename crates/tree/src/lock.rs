// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reader/writer scope guarding the tree.
//!
//! Access is closure-scoped so no guard outlives the operation that took
//! it. The upgradable scope holds a shared lock that excludes other
//! upgraders and writers, so a read that decides to mutate can upgrade
//! without another writer slipping in between.

use parking_lot::{RwLock, RwLockUpgradableReadGuard, RwLockWriteGuard};
use std::ops::Deref;

#[derive(Debug, Default)]
pub struct TreeLock<T> {
    inner: RwLock<T>,
}

impl<T> TreeLock<T> {
    pub fn new(value: T) -> Self {
        Self { inner: RwLock::new(value) }
    }

    /// Shared access.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read())
    }

    /// Exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Shared access that may be promoted to exclusive.
    pub fn upgradable<R>(&self, f: impl FnOnce(Upgradable<'_, T>) -> R) -> R {
        f(Upgradable { guard: self.inner.upgradable_read() })
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

/// Shared view handed to [`TreeLock::upgradable`] closures.
pub struct Upgradable<'a, T> {
    guard: RwLockUpgradableReadGuard<'a, T>,
}

impl<'a, T> Upgradable<'a, T> {
    /// Promote to exclusive access, waiting for current readers to leave.
    pub fn upgrade(self) -> RwLockWriteGuard<'a, T> {
        RwLockUpgradableReadGuard::upgrade(self.guard)
    }
}

impl<T> Deref for Upgradable<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
