// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[cfg(not(target_os = "android"))]
#[path = "./lib_test.rs"]
mod lib_test;

#[cfg(not(target_os = "android"))]
use std::sync::Mutex;
#[cfg(not(target_os = "android"))]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(not(target_os = "android"))]
use tracing_subscriber::reload::Handle as ReloadHandle;
#[cfg(not(target_os = "android"))]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(not(target_os = "android"))]
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_FILTER_RULES: &str = "info";

#[cfg(target_os = "android")]
const ANDROID_LOG_TAG: &str = "linkwatch";

//
// SwapLogger
//

// Process wide logger whose filter can be swapped after initialization. On Android log records go
// to logcat; elsewhere they go through tracing to stderr.
#[derive(Default)]
pub struct SwapLogger {
  #[cfg(not(target_os = "android"))]
  handle: Mutex<Option<ReloadHandle<EnvFilter, Registry>>>,
}

impl SwapLogger {
  #[cfg(not(target_os = "android"))]
  const fn new() -> Self {
    Self {
      handle: Mutex::new(None),
    }
  }

  #[cfg(not(target_os = "android"))]
  fn get() -> &'static Self {
    static LOGGER: SwapLogger = SwapLogger::new();

    &LOGGER
  }

  // Initialize the logger to the default. This can only be called once and should be called as
  // early as possible in the program.
  #[cfg(not(target_os = "android"))]
  pub fn initialize() {
    // ANSI output is opt in via LW_LOG_ANSI so that captured output stays plain.
    let stderr = tracing_subscriber::fmt::layer()
      .with_writer(std::io::stderr)
      .with_ansi(std::env::var("LW_LOG_ANSI").is_ok())
      .with_line_number(true)
      .with_thread_ids(true)
      .compact();

    let filter = EnvFilter::new(
      std::env::var("RUST_LOG")
        .as_deref()
        .unwrap_or(DEFAULT_FILTER_RULES),
    );

    let (filter, reload_handle) = tracing_subscriber::reload::Layer::new(filter);
    if let Ok(mut handle) = Self::get().handle.lock() {
      *handle = Some(reload_handle);
    }

    Registry::default().with(filter).with(stderr).init();
  }

  #[cfg(target_os = "android")]
  pub fn initialize() {
    let rules =
      std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER_RULES.to_string());
    let level = rules.trim().parse().unwrap_or(log::LevelFilter::Info);

    android_logger::init_once(
      android_logger::Config::default()
        .with_max_level(level)
        .with_tag(ANDROID_LOG_TAG),
    );
  }

  // Swap in a new filter with the provided RUST_LOG string.
  #[cfg(not(target_os = "android"))]
  pub fn swap(new_rust_log: &str) -> anyhow::Result<()> {
    let mut handle = Self::get()
      .handle
      .lock()
      .map_err(|_| anyhow::anyhow!("logger handle poisoned"))?;
    let Some(handle) = handle.as_mut() else {
      anyhow::bail!("logger has not been initialized");
    };
    handle.reload(new_rust_log)?;

    // The log crate's max level is only derived at init, so it has to follow the new filter by
    // hand.
    log::set_max_level(tracing_log::AsLog::as_log(
      &tracing_subscriber::filter::LevelFilter::current(),
    ));

    Ok(())
  }

  // logcat only supports a single level, so the rules must be a plain level name.
  #[cfg(target_os = "android")]
  pub fn swap(new_rust_log: &str) -> anyhow::Result<()> {
    let level: log::LevelFilter = new_rust_log
      .trim()
      .parse()
      .map_err(|_| anyhow::anyhow!("invalid log level: {new_rust_log}"))?;
    log::set_max_level(level);
    Ok(())
  }
}
