// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./capabilities_test.rs"]
mod tests;

use crate::NetworkType;

// Transports in the order they are consulted when classifying a network. A network that exposes
// more than one of these reports the first match.
const CLASSIFICATION_ORDER: [(Transport, NetworkType); 5] = [
  (Transport::Wifi, NetworkType::Wifi),
  (Transport::Cellular, NetworkType::Cellular),
  (Transport::Ethernet, NetworkType::Ethernet),
  (Transport::Vpn, NetworkType::Vpn),
  (Transport::Bluetooth, NetworkType::Bluetooth),
];

//
// Transport
//

/// A network transport as identified by the platform. Discriminants match the platform's
/// `TRANSPORT_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Transport {
  Cellular  = 0,
  Wifi      = 1,
  Bluetooth = 2,
  Ethernet  = 3,
  Vpn       = 4,
  WifiAware = 5,
  LowPan    = 6,
  Usb       = 8,
  Thread    = 9,
  Satellite = 10,
}

impl Transport {
  pub const ALL: [Self; 10] = [
    Self::Cellular,
    Self::Wifi,
    Self::Bluetooth,
    Self::Ethernet,
    Self::Vpn,
    Self::WifiAware,
    Self::LowPan,
    Self::Usb,
    Self::Thread,
    Self::Satellite,
  ];

  #[must_use]
  pub const fn id(self) -> i32 {
    self as i32
  }

  const fn bit(self) -> u64 {
    1 << self.id()
  }
}

//
// Capability
//

/// The subset of platform network capabilities that the inspector and notifier care about.
/// Discriminants match the platform's `NET_CAPABILITY_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Capability {
  NotMetered    = 11,
  Internet      = 12,
  NotVpn        = 15,
  Validated     = 16,
  CaptivePortal = 17,
}

impl Capability {
  pub const ALL: [Self; 5] = [
    Self::NotMetered,
    Self::Internet,
    Self::NotVpn,
    Self::Validated,
    Self::CaptivePortal,
  ];

  #[must_use]
  pub const fn id(self) -> i32 {
    self as i32
  }

  const fn bit(self) -> u64 {
    1 << self.id()
  }
}

//
// NetworkCapabilities
//

/// A point in time snapshot of the transports and capabilities the platform reports for a
/// network. Both sets are stored as bitmasks indexed by the platform constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCapabilities {
  transports: u64,
  capabilities: u64,
}

impl NetworkCapabilities {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      transports: 0,
      capabilities: 0,
    }
  }

  #[must_use]
  pub const fn with_transport(mut self, transport: Transport) -> Self {
    self.transports |= transport.bit();
    self
  }

  #[must_use]
  pub const fn with_capability(mut self, capability: Capability) -> Self {
    self.capabilities |= capability.bit();
    self
  }

  #[must_use]
  pub const fn has_transport(&self, transport: Transport) -> bool {
    self.transports & transport.bit() != 0
  }

  #[must_use]
  pub const fn has_capability(&self, capability: Capability) -> bool {
    self.capabilities & capability.bit() != 0
  }

  /// True when the network carries internet, the platform has validated reachability, and it runs
  /// over one of the recognized transports.
  #[must_use]
  pub fn has_validated_internet(&self) -> bool {
    self.has_capability(Capability::Internet)
      && self.has_capability(Capability::Validated)
      && self.network_type() != NetworkType::None
  }

  /// Classifies the network by transport alone. Capabilities are not consulted.
  #[must_use]
  pub fn network_type(&self) -> NetworkType {
    CLASSIFICATION_ORDER
      .into_iter()
      .find(|(transport, _)| self.has_transport(*transport))
      .map_or(NetworkType::None, |(_, network_type)| network_type)
  }
}
