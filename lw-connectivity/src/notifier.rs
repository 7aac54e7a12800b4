// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./notifier_test.rs"]
mod tests;

use crate::error::Result;
use crate::platform::{
  ConnectivityManager,
  NetworkCallback,
  NetworkId,
  PlatformVersion,
  RegistrationId,
};
use crate::source::{ConnectivitySource, select_source};
use std::sync::Arc;

//
// Subscription
//

/// Handle for an active change subscription. Dropping the handle does not cancel the
/// subscription; it must be cancelled explicitly.
pub trait Subscription: Send + Sync {
  fn cancel(self: Box<Self>) -> Result<()>;
}

//
// CallbackAdapter
//

struct CallbackAdapter {
  on_available: Box<dyn Fn() + Send + Sync>,
  on_lost: Box<dyn Fn() + Send + Sync>,
}

impl NetworkCallback for CallbackAdapter {
  fn on_available(&self, network: NetworkId) {
    log::debug!("{network} available");
    (self.on_available)();
  }

  fn on_lost(&self, network: NetworkId) {
    log::debug!("{network} lost");
    (self.on_lost)();
  }
}

//
// SourceSubscription
//

struct SourceSubscription {
  source: Arc<dyn ConnectivitySource>,
  id: RegistrationId,
}

impl Subscription for SourceSubscription {
  fn cancel(self: Box<Self>) -> Result<()> {
    log::debug!("cancelling {}", self.id);
    self.source.unsubscribe(self.id)
  }
}

//
// ChangeNotifier
//

/// Relays default network transitions to caller supplied callbacks.
pub struct ChangeNotifier {
  source: Arc<dyn ConnectivitySource>,
}

impl ChangeNotifier {
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

  /// Registers `on_available` and `on_lost` for transitions of the default network. The
  /// callbacks run on the platform's dispatch thread, concurrently with the caller; any state
  /// they share with the caller needs its own synchronization. Events are forwarded as the
  /// platform delivers them, without reordering or coalescing.
  pub fn register<A, L>(&self, on_available: A, on_lost: L) -> Result<Box<dyn Subscription>>
  where
    A: Fn() + Send + Sync + 'static,
    L: Fn() + Send + Sync + 'static,
  {
    let callback = Arc::new(CallbackAdapter {
      on_available: Box::new(on_available),
      on_lost: Box::new(on_lost),
    });

    let id = self.source.subscribe(callback).inspect_err(|e| {
      log::warn!("failed to register network callback: {e}");
    })?;
    log::debug!("registered network callback as {id}");

    Ok(Box::new(SourceSubscription {
      source: self.source.clone(),
      id,
    }))
  }
}
