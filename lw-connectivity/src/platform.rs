// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::capabilities::{Capability, NetworkCapabilities};
use crate::legacy::LegacyNetworkInfo;
use std::fmt::Display;
use std::sync::Arc;

//
// PlatformVersion
//

/// The platform API level the process is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformVersion(pub u32);

impl PlatformVersion {
  pub const LOLLIPOP: Self = Self(21);
  pub const MARSHMALLOW: Self = Self(23);
  pub const NOUGAT: Self = Self(24);

  /// Whether per-network capabilities can be queried for the active network.
  #[must_use]
  pub const fn supports_capabilities(self) -> bool {
    self.0 >= Self::MARSHMALLOW.0
  }

  /// Whether network callbacks can be registered at all.
  #[must_use]
  pub const fn supports_network_callbacks(self) -> bool {
    self.0 >= Self::LOLLIPOP.0
  }

  /// Whether the platform offers a subscription that tracks the default network directly.
  #[must_use]
  pub const fn supports_default_network_callback(self) -> bool {
    self.0 >= Self::NOUGAT.0
  }
}

impl Display for PlatformVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

//
// NetworkId
//

/// Platform identity of a network, as passed to network callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(pub i64);

impl Display for NetworkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "network#{}", self.0)
  }
}

//
// RegistrationId
//

/// Token identifying a callback registered with a [`ConnectivityManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationId(pub u64);

impl Display for RegistrationId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "registration#{}", self.0)
  }
}

//
// NetworkRequest
//

/// Describes which networks a request scoped callback is interested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRequest {
  capabilities: Vec<Capability>,
}

impl NetworkRequest {
  /// A request matching any internet capable network.
  #[must_use]
  pub fn internet() -> Self {
    Self::default().with_capability(Capability::Internet)
  }

  #[must_use]
  pub fn with_capability(mut self, capability: Capability) -> Self {
    if !self.capabilities.contains(&capability) {
      self.capabilities.push(capability);
    }
    self
  }

  #[must_use]
  pub fn capabilities(&self) -> &[Capability] {
    &self.capabilities
  }

  #[must_use]
  pub fn is_satisfied_by(&self, capabilities: &NetworkCapabilities) -> bool {
    self
      .capabilities
      .iter()
      .all(|capability| capabilities.has_capability(*capability))
  }
}

//
// NetworkCallback
//

/// Receives network transitions from the platform. Invoked on a platform owned thread.
pub trait NetworkCallback: Send + Sync {
  fn on_available(&self, network: NetworkId);

  fn on_lost(&self, network: NetworkId);
}

//
// ConnectivityManager
//

/// The platform connectivity service. Implementations wrap whatever the host platform provides;
/// the inspector and notifier only ever talk to the platform through this trait.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityManager: Send + Sync {
  /// Capabilities of the current default network, or `None` if there is no default network.
  fn active_network_capabilities(&self) -> anyhow::Result<Option<NetworkCapabilities>>;

  /// Legacy info record for the current default network, or `None` if there is none.
  fn active_network_info(&self) -> anyhow::Result<Option<LegacyNetworkInfo>>;

  /// Subscribes the callback to changes of the platform's default network.
  fn register_default_network_callback(
    &self,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId>;

  /// Subscribes the callback to networks satisfying the request.
  fn register_network_callback(
    &self,
    request: &NetworkRequest,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId>;

  /// Removes a previously registered callback. Unknown or already removed registrations are
  /// reported however the platform reports them.
  fn unregister_network_callback(&self, id: RegistrationId) -> anyhow::Result<()>;
}
