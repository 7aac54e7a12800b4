// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::SwapLogger;

#[test]
fn swap_before_initialize_fails() {
  let err = SwapLogger::swap("debug").unwrap_err();
  assert_eq!(err.to_string(), "logger has not been initialized");
}
