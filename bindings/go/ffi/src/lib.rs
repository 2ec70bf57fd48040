//! C-FFI layer for Aster — used by Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `aster-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `aster_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use aster_core::{Canonicalizer, DocumentPack, LocalePack, DEFAULT_LOCALE};

/// Result from an Aster FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `aster_free_string()`.
#[repr(C)]
pub struct AsterResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl AsterResult {
    fn ok(value: String) -> Self {
        AsterResult {
            result: into_c_string(value),
            error: std::ptr::null_mut(),
        }
    }

    fn err(msg: String) -> Self {
        AsterResult {
            result: std::ptr::null_mut(),
            error: into_c_string(msg),
        }
    }
}

/// Interior NULs cannot cross the boundary; they are dropped.
fn into_c_string(value: String) -> *mut c_char {
    let c = CString::new(value).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Null locale selects the default one.
unsafe fn canonicalizer_for(locale: *const c_char) -> Result<Canonicalizer, String> {
    let locale = if locale.is_null() {
        DEFAULT_LOCALE
    } else {
        cstr_to_str(locale).ok_or_else(|| "invalid UTF-8 locale".to_string())?
    };
    Canonicalizer::for_locale(locale).map_err(|e| e.to_string())
}

/// Canonicalize Aster source text.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string. `locale` must be
/// one too, or null for the default locale.
/// The caller must free the returned strings with `aster_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn aster_canonicalize(
    text: *const c_char,
    locale: *const c_char,
) -> AsterResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return AsterResult::err("null or invalid UTF-8 input".into()),
    };

    match canonicalizer_for(locale) {
        Ok(canonicalizer) => AsterResult::ok(canonicalizer.canonicalize(text)),
        Err(e) => AsterResult::err(e),
    }
}

/// Canonicalize and return JSON: { "text", "locale", "fingerprint" }
///
/// # Safety
/// Same as [`aster_canonicalize`].
#[no_mangle]
pub unsafe extern "C" fn aster_fingerprint(
    text: *const c_char,
    locale: *const c_char,
) -> AsterResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return AsterResult::err("null or invalid UTF-8 input".into()),
    };

    let canonicalizer = match canonicalizer_for(locale) {
        Ok(c) => c,
        Err(e) => return AsterResult::err(e),
    };

    let result = canonicalizer.canonicalize_with_fingerprint(text);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => AsterResult::ok(json),
        Err(e) => AsterResult::err(format!("Serialization error: {}", e)),
    }
}

/// Validate a locale-pack JSON document.
/// Returns JSON: { "valid": bool, "locale": id|null, "error": message|null }
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `aster_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn aster_validate_pack(json: *const c_char) -> AsterResult {
    let json = match cstr_to_str(json) {
        Some(s) => s,
        None => return AsterResult::err("null or invalid UTF-8 input".into()),
    };

    let output = match DocumentPack::new(json).lexicon() {
        Ok(lexicon) => serde_json::json!({
            "valid": true,
            "locale": lexicon.id(),
            "error": null,
        }),
        Err(e) => serde_json::json!({
            "valid": false,
            "locale": null,
            "error": e.to_string(),
        }),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => AsterResult::ok(json),
        Err(e) => AsterResult::err(format!("Serialization error: {}", e)),
    }
}

/// Free a string previously returned by an Aster FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by an Aster FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn aster_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
