// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::registry::CallbackTable;
use jni::JNIEnv;
use jni::objects::JClass;
use jni::sys::jlong;
use lw_connectivity::{NetworkCallback, NetworkId, RegistrationId};
use std::sync::{Arc, LazyLock};

// Callbacks reachable from the Java shim, keyed by the registration id the shim was constructed
// with.
pub(crate) static CALLBACKS: LazyLock<CallbackTable> = LazyLock::new(CallbackTable::default);

#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn to_jlong(id: RegistrationId) -> jlong {
  id.0 as jlong
}

fn lookup(registration: jlong) -> Option<Arc<dyn NetworkCallback>> {
  CALLBACKS.lookup(RegistrationId(u64::try_from(registration).ok()?))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_io_linkwatch_NativeNetworkCallback_nativeOnAvailable(
  _env: JNIEnv<'_>,
  _class: JClass<'_>,
  registration: jlong,
  network: jlong,
) {
  if let Some(callback) = lookup(registration) {
    callback.on_available(NetworkId(network));
  }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_io_linkwatch_NativeNetworkCallback_nativeOnLost(
  _env: JNIEnv<'_>,
  _class: JClass<'_>,
  registration: jlong,
  network: jlong,
) {
  if let Some(callback) = lookup(registration) {
    callback.on_lost(NetworkId(network));
  }
}
