// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::platform::PlatformVersion;

//
// Error
//

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("connectivity service unavailable")]
  ServiceUnavailable,
  #[error("network callbacks require platform version {required}, running {running}")]
  Unsupported {
    required: PlatformVersion,
    running: PlatformVersion,
  },
  #[error(transparent)]
  Platform(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
