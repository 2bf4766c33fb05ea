// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-instance lock registry.
//!
//! Serialization of invariant-checking writes is scoped to one class
//! instance: two writes racing for the same `(template_id, date)` take
//! turns, writes to different instances never contend. A global ledger
//! lock would be an over-serialization.

use crate::error::LedgerError;
use classbook_domain::InstanceRef;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Key identifying one class instance in the registry.
type InstanceKey = (i64, time::Date);

/// An acquired per-instance lock, released on drop.
pub struct InstanceGuard {
    _guard: ArcMutexGuard<RawMutex, ()>,
}

/// Registry of per-instance mutexes.
///
/// Entries are created on first acquisition for an instance. Entries with
/// no outstanding guard are swept on later acquisitions, so the registry
/// tracks only instances with in-flight writes instead of growing with
/// every instance ever written.
pub struct InstanceLocks {
    locks: Mutex<HashMap<InstanceKey, Arc<Mutex<()>>>>,
    wait: Duration,
}

impl InstanceLocks {
    /// Creates a registry whose acquisitions wait at most `wait`.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            wait,
        }
    }

    /// Acquires the lock for one class instance, waiting at most the
    /// registry's bounded wait.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Busy` if the lock is still held when the wait
    /// expires; callers are expected to retry with backoff.
    pub fn acquire(&self, instance: &InstanceRef) -> Result<InstanceGuard, LedgerError> {
        let key: InstanceKey = (instance.template_id.value(), instance.date);

        let lock: Arc<Mutex<()>> = {
            let mut registry = self.locks.lock();
            // An entry whose only reference is the registry's own has no
            // guard or waiter attached (clones are only taken under this
            // registry lock), so dropping it and recreating a fresh mutex
            // later is indistinguishable from keeping it.
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(registry.entry(key).or_default())
        };

        lock.try_lock_arc_for(self.wait).map_or_else(
            || {
                Err(LedgerError::Busy {
                    message: instance.to_string(),
                })
            },
            |guard| Ok(InstanceGuard { _guard: guard }),
        )
    }

    /// Number of instances currently tracked by the registry.
    #[cfg(test)]
    pub(crate) fn tracked_instances(&self) -> usize {
        self.locks.lock().len()
    }
}
