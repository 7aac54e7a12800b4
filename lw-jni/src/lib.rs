// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Android implementation of [`lw_connectivity::ConnectivityManager`] on top of the platform's
//! `android.net.ConnectivityManager`, reached through JNI.
//!
//! Network callbacks need a Java object to hand to the platform. The bridge instantiates
//! `io.linkwatch.NativeNetworkCallback` (see `java/`), which forwards `onAvailable` / `onLost` back
//! into Rust tagged with the registration id it was constructed with.

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]

#[cfg(target_os = "android")]
mod callbacks;
#[cfg(target_os = "android")]
mod manager;
mod registry;

#[cfg(target_os = "android")]
pub use manager::AndroidConnectivityManager;

#[cfg(target_os = "android")]
use jni::JNIEnv;
#[cfg(target_os = "android")]
use jni::objects::JObject;
#[cfg(target_os = "android")]
use lw_connectivity::{Connectivity, ConnectivityManager, PlatformVersion};
#[cfg(target_os = "android")]
use std::sync::Arc;

#[cfg(test)]
#[ctor::ctor]
fn global_init() {
  lw_test_helpers::test_global_init();
}

//
// Error
//

#[cfg(target_os = "android")]
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("jni: {0}")]
  Jni(#[from] jni::errors::Error),
  #[error("java exception thrown by {0}")]
  JavaException(&'static str),
}

#[cfg(target_os = "android")]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_os = "android")]
/// Reads `android.os.Build.VERSION.SDK_INT`.
pub fn platform_version(env: &mut JNIEnv<'_>) -> Result<PlatformVersion> {
  let sdk_int = env
    .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
    .i()?;

  Ok(PlatformVersion(u32::try_from(sdk_int).unwrap_or_default()))
}

#[cfg(target_os = "android")]
/// Builds the connectivity inspector and notifier for the running device. Must be called from a
/// thread that can see the application's classes, e.g. the main thread or from a JNI entry point,
/// since the callback shim class is resolved here.
pub fn connectivity(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<Connectivity> {
  lw_log::SwapLogger::initialize();

  let version = platform_version(env)?;
  let manager = AndroidConnectivityManager::new(env, context, version)?
    .map(|manager| Arc::new(manager) as Arc<dyn ConnectivityManager>);

  if manager.is_none() {
    log::warn!("connectivity service unavailable on platform version {version}");
  }

  Ok(Connectivity::new(version, manager))
}
