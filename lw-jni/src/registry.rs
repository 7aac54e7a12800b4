// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Bookkeeping for callbacks handed to the platform. Kept free of JNI so the ordering around
//! platform failures can be exercised on the host.

#![cfg_attr(not(target_os = "android"), allow(dead_code))]

#[cfg(test)]
#[path = "./registry_test.rs"]
mod tests;

use lw_connectivity::{NetworkCallback, RegistrationId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

//
// CallbackTable
//

/// Rust callbacks reachable from platform events, keyed by registration id.
pub(crate) struct CallbackTable {
  callbacks: Mutex<HashMap<RegistrationId, Arc<dyn NetworkCallback>>>,
  next_id: AtomicU64,
}

impl Default for CallbackTable {
  fn default() -> Self {
    Self {
      callbacks: Mutex::default(),
      next_id: AtomicU64::new(1),
    }
  }
}

impl CallbackTable {
  pub(crate) fn insert(&self, callback: Arc<dyn NetworkCallback>) -> RegistrationId {
    let id = RegistrationId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.callbacks.lock().insert(id, callback);
    id
  }

  pub(crate) fn remove(&self, id: RegistrationId) {
    self.callbacks.lock().remove(&id);
  }

  // Clone out of the map so the callback runs without holding the lock.
  pub(crate) fn lookup(&self, id: RegistrationId) -> Option<Arc<dyn NetworkCallback>> {
    let callback = self.callbacks.lock().get(&id).cloned();
    if callback.is_none() {
      log::debug!("dropping event for unknown {id}");
    }
    callback
  }
}

//
// Registrations
//

/// Pairs each live registration with the platform side handle `H` it was subscribed with.
pub(crate) struct Registrations<H> {
  callbacks: &'static CallbackTable,
  handles: Mutex<HashMap<RegistrationId, H>>,
}

impl<H> Registrations<H> {
  pub(crate) fn new(callbacks: &'static CallbackTable) -> Self {
    Self {
      callbacks,
      handles: Mutex::default(),
    }
  }

  /// Creates the platform handle for a new registration and subscribes it. Subscribing is the
  /// last fallible step, so a registration the platform accepted is always tracked and can be
  /// unregistered later. On any failure the callback is forgotten and the error returned.
  pub(crate) fn register(
    &self,
    callback: Arc<dyn NetworkCallback>,
    create: impl FnOnce(RegistrationId) -> anyhow::Result<H>,
    subscribe: impl FnOnce(&H) -> anyhow::Result<()>,
  ) -> anyhow::Result<RegistrationId> {
    // Events can arrive as soon as the platform accepts the subscription.
    let id = self.callbacks.insert(callback);

    let result = create(id).and_then(|handle| {
      subscribe(&handle)?;
      Ok(handle)
    });

    match result {
      Ok(handle) => {
        self.handles.lock().insert(id, handle);
        Ok(id)
      },
      Err(e) => {
        self.callbacks.remove(id);
        Err(e)
      },
    }
  }

  /// Stops event delivery for the registration and unsubscribes it from the platform. If the
  /// platform refuses, the handle is kept so that a later attempt still reaches the platform.
  pub(crate) fn unregister(
    &self,
    id: RegistrationId,
    unsubscribe: impl FnOnce(&H) -> anyhow::Result<()>,
  ) -> anyhow::Result<()> {
    let Some(handle) = self.handles.lock().remove(&id) else {
      anyhow::bail!("{id} was not registered");
    };
    self.callbacks.remove(id);

    if let Err(e) = unsubscribe(&handle) {
      log::warn!("failed to unregister {id}: {e}");
      self.handles.lock().insert(id, handle);
      return Err(e);
    }

    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn is_registered(&self, id: RegistrationId) -> bool {
    self.handles.lock().contains_key(&id)
  }
}
