// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use lw_connectivity::NetworkId;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, AtomicUsize};

#[derive(Default)]
struct CountingCallback {
  available: AtomicUsize,
}

impl NetworkCallback for CountingCallback {
  fn on_available(&self, _network: NetworkId) {
    self.available.fetch_add(1, Ordering::Relaxed);
  }

  fn on_lost(&self, _network: NetworkId) {}
}

fn registrations() -> Registrations<&'static str> {
  Registrations::new(Box::leak(Box::<CallbackTable>::default()))
}

#[test]
fn subscribed_registration_is_tracked() {
  let registrations = registrations();
  let callback = Arc::new(CountingCallback::default());

  let id = registrations
    .register(callback.clone(), |_| Ok("java-callback"), |_| Ok(()))
    .unwrap();
  assert!(registrations.is_registered(id));

  registrations
    .callbacks
    .lookup(id)
    .unwrap()
    .on_available(NetworkId(1));
  assert_eq!(callback.available.load(Ordering::Relaxed), 1);

  registrations
    .unregister(id, |handle| {
      assert_eq!(*handle, "java-callback");
      Ok(())
    })
    .unwrap();
  assert!(!registrations.is_registered(id));
  assert!(registrations.callbacks.lookup(id).is_none());
}

#[test]
fn failed_handle_creation_never_subscribes() {
  let registrations = registrations();
  let subscribed = AtomicBool::new(false);
  let mut assigned = None;

  let result = registrations.register(
    Arc::new(CountingCallback::default()),
    |id| {
      assigned = Some(id);
      anyhow::bail!("out of references")
    },
    |_| {
      subscribed.store(true, Ordering::Relaxed);
      Ok(())
    },
  );

  assert_eq!(result.unwrap_err().to_string(), "out of references");
  assert!(!subscribed.load(Ordering::Relaxed));
  let id = assigned.unwrap();
  assert!(!registrations.is_registered(id));
  assert!(registrations.callbacks.lookup(id).is_none());
}

#[test]
fn failed_subscription_forgets_callback() {
  let registrations = registrations();
  let mut assigned = None;

  let result = registrations.register(
    Arc::new(CountingCallback::default()),
    |id| {
      assigned = Some(id);
      Ok("java-callback")
    },
    |_| anyhow::bail!("too many requests"),
  );

  assert_eq!(result.unwrap_err().to_string(), "too many requests");
  let id = assigned.unwrap();
  assert!(!registrations.is_registered(id));
  assert!(registrations.callbacks.lookup(id).is_none());
}

#[test]
fn failed_unregister_can_be_retried() {
  let registrations = registrations();
  let callback = Arc::new(CountingCallback::default());
  let id = registrations
    .register(callback, |_| Ok("java-callback"), |_| Ok(()))
    .unwrap();

  let result = registrations.unregister(id, |_| anyhow::bail!("callback still in use"));
  assert_eq!(result.unwrap_err().to_string(), "callback still in use");

  // Delivery stops right away, but the platform handle is kept for another attempt.
  assert!(registrations.callbacks.lookup(id).is_none());
  assert!(registrations.is_registered(id));

  let mut released = None;
  registrations
    .unregister(id, |handle| {
      released = Some(*handle);
      Ok(())
    })
    .unwrap();
  assert_eq!(released, Some("java-callback"));
  assert!(!registrations.is_registered(id));
}

#[test]
fn unknown_registration_is_rejected() {
  let registrations = registrations();
  let reached_platform = AtomicBool::new(false);

  let result = registrations.unregister(RegistrationId(99), |_| {
    reached_platform.store(true, Ordering::Relaxed);
    Ok(())
  });

  assert_eq!(
    result.unwrap_err().to_string(),
    "registration#99 was not registered"
  );
  assert!(!reached_platform.load(Ordering::Relaxed));
}
