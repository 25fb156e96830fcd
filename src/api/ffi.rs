//! C-compatible API consumed by the HTTP layer.
//!
//! Ownership: every `*const c_char` returned here is a NUL-terminated JSON
//! string allocated by Rust and must be released with `oncoscore_free_str`.
//! Panics are caught at this boundary and reported as the internal-error body.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::OnceLock;

use log::{error, info};

use crate::common::config::AppCfg;
use crate::common::log as logging;
use crate::inference::PredictionService;

use super::handlers;
use super::response::{self, ApiResponse};

static SERVICE: OnceLock<PredictionService> = OnceLock::new();

/// ABI version to coordinate with the HTTP layer.
#[no_mangle]
pub extern "C" fn oncoscore_api_version() -> u32 {
    1
}

/// Start the service once. A null `model_path` reads configuration from the
/// environment; an explicit path is used alone, without the fallback.
/// Returns 1 when a model is loaded, 0 otherwise. Later calls report the
/// existing state without reloading.
#[no_mangle]
pub extern "C" fn oncoscore_init(model_path: *const c_char) -> u32 {
    let path = (!model_path.is_null())
        .then(|| unsafe { CStr::from_ptr(model_path) }.to_string_lossy().to_string());
    let cfg = startup_cfg(path, AppCfg::load());

    let loaded = panic::catch_unwind(|| service_with(&cfg).model_loaded()).unwrap_or(false);
    loaded as u32
}

/// Score a JSON request body. Writes the HTTP status to `status_out` when it
/// is non-null.
#[no_mangle]
pub extern "C" fn oncoscore_predict(body: *const c_char, status_out: *mut u16) -> *const c_char {
    let raw = if body.is_null() {
        Cow::Borrowed("")
    } else {
        unsafe { CStr::from_ptr(body) }.to_string_lossy()
    };
    let resp = guarded(|| handlers::predict(service(), &raw));

    if !status_out.is_null() {
        unsafe { *status_out = resp.status };
    }
    string_to_raw(resp.to_json())
}

/// Service metadata as JSON.
#[no_mangle]
pub extern "C" fn oncoscore_info() -> *const c_char {
    string_to_raw(guarded(|| handlers::info(service())).to_json())
}

/// Body for unknown routes.
#[no_mangle]
pub extern "C" fn oncoscore_not_found() -> *const c_char {
    string_to_raw(response::not_found().to_json())
}

/// Free strings allocated by Rust.
#[no_mangle]
pub extern "C" fn oncoscore_free_str(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(ptr as *mut c_char);
    }
}

fn startup_cfg(model_path: Option<String>, env: AppCfg) -> AppCfg {
    match model_path {
        Some(path) => AppCfg {
            model_path: PathBuf::from(path),
            fallback_model_path: None,
            ..env
        },
        None => env,
    }
}

fn service() -> &'static PredictionService {
    service_with(&AppCfg::load())
}

fn service_with(cfg: &AppCfg) -> &'static PredictionService {
    SERVICE.get_or_init(|| {
        logging::init(cfg);
        let service = PredictionService::start(cfg);
        info!(
            "service started, model status: {}",
            if service.model_loaded() { "loaded" } else { "NOT LOADED" }
        );
        service
    })
}

fn guarded<F>(op: F) -> ApiResponse
where
    F: FnOnce() -> ApiResponse,
{
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|_| {
        error!("panic while handling request");
        response::internal_error()
    })
}

fn string_to_raw(s: String) -> *const c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => fallback_json_raw(),
    }
}

fn fallback_json_raw() -> *const c_char {
    c"{\"error\":\"Internal server error\"}".to_owned().into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(ptr: *const c_char) -> String {
        assert!(!ptr.is_null());
        let s = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().to_string();
        oncoscore_free_str(ptr);
        s
    }

    #[test]
    fn static_surfaces_answer_without_a_model() {
        assert_eq!(oncoscore_api_version(), 1);
        assert_eq!(take(oncoscore_not_found()), r#"{"error":"Resource not found"}"#);
    }

    #[test]
    fn null_body_is_a_bad_request() {
        let mut status = 0u16;
        let out = take(oncoscore_predict(std::ptr::null(), &mut status));
        assert_eq!(status, 400);
        assert!(out.contains("\"error\""));
        assert!(!out.contains("diagnosis"));
    }

    #[test]
    fn interior_nul_falls_back_to_internal_error() {
        let out = take(string_to_raw("a\0b".to_string()));
        assert_eq!(out, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn explicit_path_disables_fallback() {
        let env = AppCfg::default();
        assert!(env.fallback_model_path.is_some());

        let cfg = startup_cfg(Some("/srv/rf.json".to_string()), env.clone());
        assert_eq!(cfg.model_path, PathBuf::from("/srv/rf.json"));
        assert_eq!(cfg.fallback_model_path, None);
        assert_eq!(cfg.log_filter, env.log_filter);

        assert_eq!(startup_cfg(None, env.clone()), env);
    }

    #[test]
    fn freeing_null_is_a_no_op() {
        oncoscore_free_str(std::ptr::null());
    }
}
