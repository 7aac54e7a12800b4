// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./source_test.rs"]
mod tests;

use crate::error::{Error, Result};
use crate::platform::{
  ConnectivityManager,
  NetworkCallback,
  NetworkRequest,
  PlatformVersion,
  RegistrationId,
};
use crate::NetworkType;
use std::fmt::Display;
use std::sync::Arc;

//
// SourceKind
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  Capabilities,
  Legacy,
  Unavailable,
}

impl Display for SourceKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Capabilities => "capabilities",
      Self::Legacy => "legacy",
      Self::Unavailable => "unavailable",
    })
  }
}

//
// ConnectivitySource
//

/// A way of reading connectivity from the platform. One implementation is selected per process
/// based on the platform version, see [`select_source`].
pub trait ConnectivitySource: Send + Sync {
  fn kind(&self) -> SourceKind;

  /// Whether the default network currently provides internet access.
  fn is_connected(&self) -> anyhow::Result<bool>;

  /// The transport classification of the default network.
  fn network_type(&self) -> anyhow::Result<NetworkType>;

  /// Subscribes the callback to default network transitions.
  fn subscribe(&self, callback: Arc<dyn NetworkCallback>) -> Result<RegistrationId>;

  /// Cancels a subscription made through [`ConnectivitySource::subscribe`].
  fn unsubscribe(&self, id: RegistrationId) -> Result<()>;
}

/// Picks the source for the running platform. A missing manager yields a source that reports no
/// connectivity and refuses subscriptions.
#[must_use]
pub fn select_source(
  version: PlatformVersion,
  manager: Option<Arc<dyn ConnectivityManager>>,
) -> Arc<dyn ConnectivitySource> {
  let Some(manager) = manager else {
    return Arc::new(UnavailableSource);
  };

  let scope = SubscriptionScope::for_version(version);
  if version.supports_capabilities() {
    Arc::new(CapabilitySource::new(manager, scope))
  } else {
    Arc::new(LegacySource::new(manager, scope))
  }
}

//
// SubscriptionScope
//

/// How change subscriptions are expressed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionScope {
  /// Follow the platform's default network directly.
  DefaultNetwork,
  /// Follow networks matching a request. Used where a default network subscription is missing.
  Request(NetworkRequest),
  /// The platform has no callback API.
  Unsupported(PlatformVersion),
}

impl SubscriptionScope {
  #[must_use]
  pub fn for_version(version: PlatformVersion) -> Self {
    if version.supports_default_network_callback() {
      Self::DefaultNetwork
    } else if version.supports_network_callbacks() {
      Self::Request(NetworkRequest::internet())
    } else {
      Self::Unsupported(version)
    }
  }

  fn register(
    &self,
    manager: &dyn ConnectivityManager,
    callback: Arc<dyn NetworkCallback>,
  ) -> Result<RegistrationId> {
    match self {
      Self::DefaultNetwork => Ok(manager.register_default_network_callback(callback)?),
      Self::Request(request) => Ok(manager.register_network_callback(request, callback)?),
      Self::Unsupported(running) => Err(Error::Unsupported {
        required: PlatformVersion::LOLLIPOP,
        running: *running,
      }),
    }
  }
}

//
// CapabilitySource
//

/// Reads the capabilities of the active network. Used on platforms that support per-network
/// capability queries.
pub struct CapabilitySource {
  manager: Arc<dyn ConnectivityManager>,
  scope: SubscriptionScope,
}

impl CapabilitySource {
  #[must_use]
  pub fn new(manager: Arc<dyn ConnectivityManager>, scope: SubscriptionScope) -> Self {
    Self { manager, scope }
  }
}

impl ConnectivitySource for CapabilitySource {
  fn kind(&self) -> SourceKind {
    SourceKind::Capabilities
  }

  fn is_connected(&self) -> anyhow::Result<bool> {
    Ok(
      self
        .manager
        .active_network_capabilities()?
        .is_some_and(|capabilities| capabilities.has_validated_internet()),
    )
  }

  fn network_type(&self) -> anyhow::Result<NetworkType> {
    Ok(
      self
        .manager
        .active_network_capabilities()?
        .map_or(NetworkType::None, |capabilities| capabilities.network_type()),
    )
  }

  fn subscribe(&self, callback: Arc<dyn NetworkCallback>) -> Result<RegistrationId> {
    self.scope.register(self.manager.as_ref(), callback)
  }

  fn unsubscribe(&self, id: RegistrationId) -> Result<()> {
    Ok(self.manager.unregister_network_callback(id)?)
  }
}

//
// LegacySource
//

/// Reads the legacy active network info record. Used on platforms without capability queries.
pub struct LegacySource {
  manager: Arc<dyn ConnectivityManager>,
  scope: SubscriptionScope,
}

impl LegacySource {
  #[must_use]
  pub fn new(manager: Arc<dyn ConnectivityManager>, scope: SubscriptionScope) -> Self {
    Self { manager, scope }
  }
}

impl ConnectivitySource for LegacySource {
  fn kind(&self) -> SourceKind {
    SourceKind::Legacy
  }

  fn is_connected(&self) -> anyhow::Result<bool> {
    Ok(
      self
        .manager
        .active_network_info()?
        .is_some_and(|info| info.is_connected_or_connecting()),
    )
  }

  fn network_type(&self) -> anyhow::Result<NetworkType> {
    let Some(info) = self.manager.active_network_info()? else {
      return Ok(NetworkType::None);
    };

    let network_type = info.network_type();
    if network_type == NetworkType::None {
      log::debug!("unmapped legacy network type {}", info.raw_type);
    }

    Ok(network_type)
  }

  fn subscribe(&self, callback: Arc<dyn NetworkCallback>) -> Result<RegistrationId> {
    self.scope.register(self.manager.as_ref(), callback)
  }

  fn unsubscribe(&self, id: RegistrationId) -> Result<()> {
    Ok(self.manager.unregister_network_callback(id)?)
  }
}

//
// UnavailableSource
//

/// Stands in when the connectivity service could not be obtained.
pub struct UnavailableSource;

impl ConnectivitySource for UnavailableSource {
  fn kind(&self) -> SourceKind {
    SourceKind::Unavailable
  }

  fn is_connected(&self) -> anyhow::Result<bool> {
    Ok(false)
  }

  fn network_type(&self) -> anyhow::Result<NetworkType> {
    Ok(NetworkType::None)
  }

  fn subscribe(&self, _callback: Arc<dyn NetworkCallback>) -> Result<RegistrationId> {
    Err(Error::ServiceUnavailable)
  }

  fn unsubscribe(&self, _id: RegistrationId) -> Result<()> {
    Err(Error::ServiceUnavailable)
  }
}
