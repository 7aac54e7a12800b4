// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Types for platforms that predate per-network capability queries and only expose a single
//! "active network info" record with a type constant and a coarse state.

#[cfg(test)]
#[path = "./legacy_test.rs"]
mod tests;

use crate::NetworkType;

//
// LegacyNetworkType
//

/// Legacy `TYPE_*` network type constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LegacyNetworkType {
  Mobile    = 0,
  Wifi      = 1,
  Wimax     = 6,
  Bluetooth = 7,
  Ethernet  = 9,
  Vpn       = 17,
}

impl LegacyNetworkType {
  #[must_use]
  pub const fn from_raw(raw: i32) -> Option<Self> {
    match raw {
      0 => Some(Self::Mobile),
      1 => Some(Self::Wifi),
      6 => Some(Self::Wimax),
      7 => Some(Self::Bluetooth),
      9 => Some(Self::Ethernet),
      17 => Some(Self::Vpn),
      _ => None,
    }
  }

  #[must_use]
  pub const fn raw(self) -> i32 {
    self as i32
  }

  #[must_use]
  pub const fn network_type(self) -> NetworkType {
    match self {
      Self::Mobile => NetworkType::Cellular,
      Self::Wifi => NetworkType::Wifi,
      Self::Bluetooth => NetworkType::Bluetooth,
      Self::Ethernet => NetworkType::Ethernet,
      Self::Vpn => NetworkType::Vpn,
      Self::Wimax => NetworkType::None,
    }
  }
}

//
// NetworkState
//

/// Coarse connection state reported by legacy platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkState {
  Connecting,
  Connected,
  Suspended,
  Disconnecting,
  Disconnected,
  Unknown,
}

impl NetworkState {
  /// Maps the platform's state enum constant name. Anything unrecognized is `Unknown`.
  #[must_use]
  pub fn from_name(name: &str) -> Self {
    match name {
      "CONNECTING" => Self::Connecting,
      "CONNECTED" => Self::Connected,
      "SUSPENDED" => Self::Suspended,
      "DISCONNECTING" => Self::Disconnecting,
      "DISCONNECTED" => Self::Disconnected,
      _ => Self::Unknown,
    }
  }
}

//
// LegacyNetworkInfo
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyNetworkInfo {
  /// The raw type constant. Kept unparsed so unknown values can still be logged.
  pub raw_type: i32,
  pub state: NetworkState,
}

impl LegacyNetworkInfo {
  #[must_use]
  pub const fn new(network_type: LegacyNetworkType, state: NetworkState) -> Self {
    Self {
      raw_type: network_type.raw(),
      state,
    }
  }

  #[must_use]
  pub const fn is_connected_or_connecting(&self) -> bool {
    matches!(
      self.state,
      NetworkState::Connected | NetworkState::Connecting
    )
  }

  #[must_use]
  pub const fn network_type(&self) -> NetworkType {
    match LegacyNetworkType::from_raw(self.raw_type) {
      Some(network_type) => network_type.network_type(),
      None => NetworkType::None,
    }
  }
}
