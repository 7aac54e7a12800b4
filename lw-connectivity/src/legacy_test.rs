// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0, NetworkType::Cellular)]
#[case(1, NetworkType::Wifi)]
#[case(7, NetworkType::Bluetooth)]
#[case(9, NetworkType::Ethernet)]
#[case(17, NetworkType::Vpn)]
#[case(6, NetworkType::None)]
#[case(4, NetworkType::None)]
#[case(-1, NetworkType::None)]
fn maps_legacy_type_constants(#[case] raw_type: i32, #[case] expected: NetworkType) {
  let info = LegacyNetworkInfo {
    raw_type,
    state: NetworkState::Connected,
  };
  assert_eq!(info.network_type(), expected);
}

#[rstest]
#[case(NetworkState::Connected, true)]
#[case(NetworkState::Connecting, true)]
#[case(NetworkState::Suspended, false)]
#[case(NetworkState::Disconnecting, false)]
#[case(NetworkState::Disconnected, false)]
#[case(NetworkState::Unknown, false)]
fn connected_or_connecting(#[case] state: NetworkState, #[case] expected: bool) {
  let info = LegacyNetworkInfo::new(LegacyNetworkType::Wifi, state);
  assert_eq!(info.is_connected_or_connecting(), expected);
}

#[test]
fn parses_state_names() {
  assert_eq!(NetworkState::from_name("CONNECTED"), NetworkState::Connected);
  assert_eq!(
    NetworkState::from_name("DISCONNECTING"),
    NetworkState::Disconnecting
  );
  assert_eq!(NetworkState::from_name("connected"), NetworkState::Unknown);
  assert_eq!(NetworkState::from_name(""), NetworkState::Unknown);
}

#[test]
fn legacy_type_raw_values() {
  assert_eq!(LegacyNetworkType::Mobile.raw(), 0);
  assert_eq!(LegacyNetworkType::Vpn.raw(), 17);
  assert_eq!(
    LegacyNetworkType::from_raw(9),
    Some(LegacyNetworkType::Ethernet)
  );
  assert_eq!(LegacyNetworkType::from_raw(2), None);
}
