// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]

pub mod capabilities;
pub mod error;
pub mod inspector;
pub mod legacy;
pub mod notifier;
pub mod platform;
pub mod source;
pub mod test;


pub use capabilities::{Capability, NetworkCapabilities, Transport};
pub use error::{Error, Result};
pub use inspector::ConnectivityInspector;
pub use legacy::{LegacyNetworkInfo, LegacyNetworkType, NetworkState};
pub use notifier::{ChangeNotifier, Subscription};
pub use platform::{
  ConnectivityManager,
  NetworkCallback,
  NetworkId,
  NetworkRequest,
  PlatformVersion,
  RegistrationId,
};
pub use source::{ConnectivitySource, SourceKind, select_source};
use std::fmt::Display;
use std::sync::Arc;

#[cfg(test)]
#[ctor::ctor]
fn global_init() {
  lw_test_helpers::test_global_init();
}

//
// NetworkType
//

/// Coarse classification of the transport carrying the default network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
  Wifi,
  Cellular,
  Ethernet,
  Bluetooth,
  Vpn,
  None,
}

impl NetworkType {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Wifi => "wifi",
      Self::Cellular => "cellular",
      Self::Ethernet => "ethernet",
      Self::Bluetooth => "bluetooth",
      Self::Vpn => "vpn",
      Self::None => "none",
    }
  }
}

impl Display for NetworkType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

//
// Connectivity
//

/// Entry point that selects a connectivity source once for the running platform and shares it
/// between the inspector and the change notifier.
pub struct Connectivity {
  inspector: ConnectivityInspector,
  notifier: ChangeNotifier,
}

impl Connectivity {
  /// Builds the inspector and notifier for the given platform version. Passing `None` for the
  /// manager models a platform where the connectivity service could not be obtained.
  #[must_use]
  pub fn new(version: PlatformVersion, manager: Option<Arc<dyn ConnectivityManager>>) -> Self {
    let source = select_source(version, manager);
    log::debug!(
      "selected {} connectivity source for platform version {version}",
      source.kind()
    );

    Self {
      inspector: ConnectivityInspector::new(source.clone()),
      notifier: ChangeNotifier::new(source),
    }
  }

  #[must_use]
  pub const fn inspector(&self) -> &ConnectivityInspector {
    &self.inspector
  }

  #[must_use]
  pub const fn notifier(&self) -> &ChangeNotifier {
    &self.notifier
  }

  /// Whether the default network currently provides validated internet access.
  #[must_use]
  pub fn is_connected(&self) -> bool {
    self.inspector.is_connected()
  }

  /// The transport classification of the current default network.
  #[must_use]
  pub fn network_type(&self) -> NetworkType {
    self.inspector.network_type()
  }

  /// Registers callbacks for default network transitions. See [`ChangeNotifier::register`].
  pub fn register<A, L>(&self, on_available: A, on_lost: L) -> Result<Box<dyn Subscription>>
  where
    A: Fn() + Send + Sync + 'static,
    L: Fn() + Send + Sync + 'static,
  {
    self.notifier.register(on_available, on_lost)
  }
}
