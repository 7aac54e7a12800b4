// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn test_global_init() {
  lw_log::SwapLogger::initialize();
}

//
// CallCounter
//

/// Counts invocations of the callbacks it hands out. Safe to use from callbacks that run on
/// another thread.
#[derive(Clone, Default)]
pub struct CallCounter {
  calls: Arc<AtomicUsize>,
}

impl CallCounter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a callback that bumps this counter each time it is invoked.
  #[must_use]
  pub fn callback(&self) -> impl Fn() + Send + Sync + 'static {
    let calls = self.calls.clone();
    move || {
      calls.fetch_add(1, Ordering::SeqCst);
    }
  }

  #[must_use]
  pub fn count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}
