// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

// Test code only.
#![allow(clippy::panic, clippy::unwrap_used)]

use crate::capabilities::NetworkCapabilities;
use crate::legacy::LegacyNetworkInfo;
use crate::platform::{
  ConnectivityManager,
  NetworkCallback,
  NetworkId,
  NetworkRequest,
  RegistrationId,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

//
// RegistrationKind
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationKind {
  DefaultNetwork,
  Request(NetworkRequest),
}

#[derive(Default)]
struct State {
  capabilities: Option<NetworkCapabilities>,
  info: Option<LegacyNetworkInfo>,
  registrations: BTreeMap<RegistrationId, (RegistrationKind, Arc<dyn NetworkCallback>)>,
}

//
// TestConnectivityManager
//

/// An in-memory connectivity service. The default network snapshot is set directly by the test,
/// and network events are delivered to registered callbacks from a separate thread to mimic the
/// platform's dispatch context.
#[derive(Default)]
pub struct TestConnectivityManager {
  state: Mutex<State>,
  next_id: AtomicU64,
  pub fail_queries: AtomicBool,
}

impl TestConnectivityManager {
  #[must_use]
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn set_capabilities(&self, capabilities: NetworkCapabilities) {
    self.state.lock().capabilities = Some(capabilities);
  }

  pub fn set_network_info(&self, info: LegacyNetworkInfo) {
    self.state.lock().info = Some(info);
  }

  /// Removes the default network entirely.
  pub fn clear_default_network(&self) {
    let mut state = self.state.lock();
    state.capabilities = None;
    state.info = None;
  }

  /// The kinds of all live registrations, in registration order.
  pub fn registrations(&self) -> Vec<RegistrationKind> {
    self
      .state
      .lock()
      .registrations
      .values()
      .map(|(kind, _)| kind.clone())
      .collect()
  }

  pub fn simulate_available(&self, network: NetworkId) {
    self.dispatch(move |callback| callback.on_available(network));
  }

  pub fn simulate_lost(&self, network: NetworkId) {
    self.dispatch(move |callback| callback.on_lost(network));
  }

  // Snapshot the callbacks under the lock and invoke them on another thread, waiting for delivery
  // to finish so that tests can assert immediately afterwards. The event concerns the network
  // described by the current capability snapshot, so request scoped registrations only hear about
  // it when that snapshot satisfies their request.
  fn dispatch(&self, event: impl Fn(&dyn NetworkCallback) + Send + 'static) {
    let state = self.state.lock();
    let capabilities = state.capabilities.unwrap_or_default();
    let callbacks: Vec<_> = state
      .registrations
      .values()
      .filter(|(kind, _)| match kind {
        RegistrationKind::DefaultNetwork => true,
        RegistrationKind::Request(request) => request.is_satisfied_by(&capabilities),
      })
      .map(|(_, callback)| callback.clone())
      .collect();
    drop(state);

    std::thread::spawn(move || {
      for callback in callbacks {
        event(callback.as_ref());
      }
    })
    .join()
    .unwrap();
  }

  fn register(
    &self,
    kind: RegistrationKind,
    callback: Arc<dyn NetworkCallback>,
  ) -> RegistrationId {
    let id = RegistrationId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self
      .state
      .lock()
      .registrations
      .insert(id, (kind, callback));
    id
  }

  fn check_queries(&self) -> anyhow::Result<()> {
    if self.fail_queries.load(Ordering::Relaxed) {
      anyhow::bail!("connectivity query failed");
    }
    Ok(())
  }
}

impl ConnectivityManager for TestConnectivityManager {
  fn active_network_capabilities(&self) -> anyhow::Result<Option<NetworkCapabilities>> {
    self.check_queries()?;
    Ok(self.state.lock().capabilities)
  }

  fn active_network_info(&self) -> anyhow::Result<Option<LegacyNetworkInfo>> {
    self.check_queries()?;
    Ok(self.state.lock().info)
  }

  fn register_default_network_callback(
    &self,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId> {
    Ok(self.register(RegistrationKind::DefaultNetwork, callback))
  }

  fn register_network_callback(
    &self,
    request: &NetworkRequest,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId> {
    Ok(self.register(RegistrationKind::Request(request.clone()), callback))
  }

  fn unregister_network_callback(&self, id: RegistrationId) -> anyhow::Result<()> {
    if self.state.lock().registrations.remove(&id).is_none() {
      anyhow::bail!("{id} was not registered");
    }
    Ok(())
  }
}
