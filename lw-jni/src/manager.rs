// linkwatch - network connectivity helpers for Android
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::callbacks::{self, CALLBACKS};
use crate::registry::Registrations;
use crate::{Error, Result};
use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use lw_connectivity::{
  Capability,
  ConnectivityManager,
  LegacyNetworkInfo,
  NetworkCallback,
  NetworkCapabilities,
  NetworkRequest,
  NetworkState,
  PlatformVersion,
  RegistrationId,
  Transport,
};
use std::sync::Arc;

const CALLBACK_CLASS: &str = "io/linkwatch/NativeNetworkCallback";
const NETWORK_CALLBACK_SIG: &str = "Landroid/net/ConnectivityManager$NetworkCallback;";

// Enough for the handful of local references a single query creates.
const LOCAL_FRAME_CAPACITY: i32 = 16;

// Runs a JNI call, clearing any pending Java exception so that the thread stays usable.
fn checked<'local, T>(
  env: &mut JNIEnv<'local>,
  method: &'static str,
  f: impl FnOnce(&mut JNIEnv<'local>) -> jni::errors::Result<T>,
) -> Result<T> {
  match f(env) {
    Err(jni::errors::Error::JavaException) => {
      let _ignored = env.exception_describe();
      let _ignored = env.exception_clear();
      Err(Error::JavaException(method))
    },
    result => Ok(result?),
  }
}

fn probe(
  env: &mut JNIEnv<'_>,
  capabilities: &JObject<'_>,
  method: &'static str,
  id: i32,
) -> Result<bool> {
  Ok(
    checked(env, method, |env| {
      env.call_method(capabilities, method, "(I)Z", &[JValue::Int(id)])
    })?
    .z()?,
  )
}

fn build_request<'local>(
  env: &mut JNIEnv<'local>,
  request: &NetworkRequest,
) -> Result<JObject<'local>> {
  let mut builder = checked(env, "NetworkRequest.Builder.<init>", |env| {
    env.new_object("android/net/NetworkRequest$Builder", "()V", &[])
  })?;

  for capability in request.capabilities() {
    builder = checked(env, "NetworkRequest.Builder.addCapability", |env| {
      env.call_method(
        &builder,
        "addCapability",
        "(I)Landroid/net/NetworkRequest$Builder;",
        &[JValue::Int(capability.id())],
      )
    })?
    .l()?;
  }

  Ok(
    checked(env, "NetworkRequest.Builder.build", |env| {
      env.call_method(&builder, "build", "()Landroid/net/NetworkRequest;", &[])
    })?
    .l()?,
  )
}

//
// AndroidConnectivityManager
//

pub struct AndroidConnectivityManager {
  vm: JavaVM,
  manager: GlobalRef,
  callback_class: GlobalRef,
  version: PlatformVersion,
  registrations: Registrations<GlobalRef>,
}

impl AndroidConnectivityManager {
  /// Resolves the connectivity service from the given context. Returns `None` if the platform
  /// does not provide one.
  pub fn new(
    env: &mut JNIEnv<'_>,
    context: &JObject<'_>,
    version: PlatformVersion,
  ) -> Result<Option<Self>> {
    let service_name = env
      .get_static_field(
        "android/content/Context",
        "CONNECTIVITY_SERVICE",
        "Ljava/lang/String;",
      )?
      .l()?;

    let service = checked(env, "Context.getSystemService", |env| {
      env.call_method(
        context,
        "getSystemService",
        "(Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(&service_name)],
      )
    })?
    .l()?;
    if service.is_null() {
      return Ok(None);
    }

    // Application classes are only visible to the class loader of threads that came from Java,
    // so the shim class is resolved once here rather than on the callback registration path.
    let callback_class = checked(env, "FindClass", |env| env.find_class(CALLBACK_CLASS))?;

    Ok(Some(Self {
      vm: env.get_java_vm()?,
      manager: env.new_global_ref(&service)?,
      callback_class: env.new_global_ref(&callback_class)?,
      version,
      registrations: Registrations::new(&CALLBACKS),
    }))
  }

  fn with_env<T>(&self, f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>) -> Result<T> {
    let mut env = self.vm.attach_current_thread()?;
    env.with_local_frame(LOCAL_FRAME_CAPACITY, f)
  }

  // The global reference is taken before the platform sees the callback, so that nothing can fail
  // between a successful platform registration and recording it.
  fn register(
    &self,
    request: Option<&NetworkRequest>,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId> {
    self.registrations.register(
      callback,
      |id| {
        Ok(self.with_env(|env| {
          let class = JClass::from(env.new_local_ref(self.callback_class.as_obj())?);
          let java_callback = checked(env, "NativeNetworkCallback.<init>", |env| {
            env.new_object(&class, "(J)V", &[JValue::Long(callbacks::to_jlong(id))])
          })?;
          Ok(env.new_global_ref(&java_callback)?)
        })?)
      },
      |java_callback| {
        Ok(self.with_env(|env| {
          match request {
            None => {
              checked(env, "registerDefaultNetworkCallback", |env| {
                env.call_method(
                  self.manager.as_obj(),
                  "registerDefaultNetworkCallback",
                  format!("({NETWORK_CALLBACK_SIG})V"),
                  &[JValue::Object(java_callback.as_obj())],
                )
              })?;
            },
            Some(request) => {
              let request = build_request(env, request)?;
              checked(env, "registerNetworkCallback", |env| {
                env.call_method(
                  self.manager.as_obj(),
                  "registerNetworkCallback",
                  format!("(Landroid/net/NetworkRequest;{NETWORK_CALLBACK_SIG})V"),
                  &[JValue::Object(&request), JValue::Object(java_callback.as_obj())],
                )
              })?;
            },
          }
          Ok(())
        })?)
      },
    )
  }
}

impl ConnectivityManager for AndroidConnectivityManager {
  fn active_network_capabilities(&self) -> anyhow::Result<Option<NetworkCapabilities>> {
    if !self.version.supports_capabilities() {
      anyhow::bail!(
        "capability queries require platform version {}",
        PlatformVersion::MARSHMALLOW
      );
    }

    Ok(self.with_env(|env| {
      let network = checked(env, "getActiveNetwork", |env| {
        env.call_method(
          self.manager.as_obj(),
          "getActiveNetwork",
          "()Landroid/net/Network;",
          &[],
        )
      })?
      .l()?;
      if network.is_null() {
        return Ok(None);
      }

      let capabilities = checked(env, "getNetworkCapabilities", |env| {
        env.call_method(
          self.manager.as_obj(),
          "getNetworkCapabilities",
          "(Landroid/net/Network;)Landroid/net/NetworkCapabilities;",
          &[JValue::Object(&network)],
        )
      })?
      .l()?;
      if capabilities.is_null() {
        return Ok(None);
      }

      let mut snapshot = NetworkCapabilities::new();
      for transport in Transport::ALL {
        if probe(env, &capabilities, "hasTransport", transport.id())? {
          snapshot = snapshot.with_transport(transport);
        }
      }
      for capability in Capability::ALL {
        if probe(env, &capabilities, "hasCapability", capability.id())? {
          snapshot = snapshot.with_capability(capability);
        }
      }

      Ok(Some(snapshot))
    })?)
  }

  fn active_network_info(&self) -> anyhow::Result<Option<LegacyNetworkInfo>> {
    Ok(self.with_env(|env| {
      let info = checked(env, "getActiveNetworkInfo", |env| {
        env.call_method(
          self.manager.as_obj(),
          "getActiveNetworkInfo",
          "()Landroid/net/NetworkInfo;",
          &[],
        )
      })?
      .l()?;
      if info.is_null() {
        return Ok(None);
      }

      let raw_type = checked(env, "NetworkInfo.getType", |env| {
        env.call_method(&info, "getType", "()I", &[])
      })?
      .i()?;

      let state = checked(env, "NetworkInfo.getState", |env| {
        env.call_method(&info, "getState", "()Landroid/net/NetworkInfo$State;", &[])
      })?
      .l()?;
      let state = if state.is_null() {
        NetworkState::Unknown
      } else {
        let name = checked(env, "NetworkInfo.State.name", |env| {
          env.call_method(&state, "name", "()Ljava/lang/String;", &[])
        })?
        .l()?;
        let name: String = env.get_string(&JString::from(name))?.into();
        NetworkState::from_name(&name)
      };

      Ok(Some(LegacyNetworkInfo { raw_type, state }))
    })?)
  }

  fn register_default_network_callback(
    &self,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId> {
    self.register(None, callback)
  }

  fn register_network_callback(
    &self,
    request: &NetworkRequest,
    callback: Arc<dyn NetworkCallback>,
  ) -> anyhow::Result<RegistrationId> {
    self.register(Some(request), callback)
  }

  // The platform rejects callbacks it does not know about; a handle we never handed out or already
  // released is reported the same way.
  fn unregister_network_callback(&self, id: RegistrationId) -> anyhow::Result<()> {
    self.registrations.unregister(id, |java_callback| {
      Ok(self.with_env(|env| {
        checked(env, "unregisterNetworkCallback", |env| {
          env.call_method(
            self.manager.as_obj(),
            "unregisterNetworkCallback",
            format!("({NETWORK_CALLBACK_SIG})V"),
            &[JValue::Object(java_callback.as_obj())],
          )
        })?;
        Ok(())
      })?)
    })
  }
}
