// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./inspector_test.rs"]
mod tests;

use crate::NetworkType;
use crate::platform::{ConnectivityManager, PlatformVersion};
use crate::source::{ConnectivitySource, select_source};
use std::sync::Arc;

//
// ConnectivityInspector
//

/// Answers point in time questions about the default network. Answers are advisory: any failure
/// to read platform state degrades to "not connected" and [`NetworkType::None`].
pub struct ConnectivityInspector {
  source: Arc<dyn ConnectivitySource>,
}

impl ConnectivityInspector {
  #[must_use]
  pub fn new(source: Arc<dyn ConnectivitySource>) -> Self {
    Self { source }
  }

  #[must_use]
  pub fn for_platform(
    version: PlatformVersion,
    manager: Option<Arc<dyn ConnectivityManager>>,
  ) -> Self {
    Self::new(select_source(version, manager))
  }

  #[must_use]
  pub fn is_connected(&self) -> bool {
    self.source.is_connected().unwrap_or_else(|e| {
      log::debug!(
        "failed to read connectivity from {} source: {e}",
        self.source.kind()
      );
      false
    })
  }

  #[must_use]
  pub fn network_type(&self) -> NetworkType {
    self.source.network_type().unwrap_or_else(|e| {
      log::debug!(
        "failed to read network type from {} source: {e}",
        self.source.kind()
      );
      NetworkType::None
    })
  }
}
