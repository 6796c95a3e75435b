//! FFI bindings for Mindful Signals
//!
//! This module provides C-compatible functions for calling the engine from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `mindful_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::AnalyticsConfig;
use crate::entries;
use crate::error::AnalyticsError;
use crate::pipeline::{hrv_from_text, mood_trend, score_mood, AnalyticsProcessor};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Hand a JSON result to C, or record the error and return NULL
fn json_result_to_cstr(result: Result<String, AnalyticsError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Compute HRV from comma-separated RR interval text.
///
/// Returns a JSON object `{"rmssd": <ms>, "stress_level": "<level>"}`.
///
/// # Safety
/// - `intervals` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindful_free_string`.
/// - Returns NULL on error; call `mindful_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindful_hrv_from_text(intervals: *const c_char) -> *mut c_char {
    clear_last_error();

    let raw = match cstr_to_string(intervals) {
        Some(s) => s,
        None => {
            set_last_error("Invalid intervals string pointer");
            return ptr::null_mut();
        }
    };

    json_result_to_cstr(
        hrv_from_text(&raw)
            .map_err(AnalyticsError::from)
            .and_then(|result| serde_json::to_string(&result).map_err(AnalyticsError::from)),
    )
}

/// Build a mood trend from a JSON array of `{"date", "mood"}` rows.
///
/// Rows must be sorted ascending by date. Returns a JSON array of
/// `{"date", "mood", "score"}` objects in input order.
///
/// # Safety
/// - `entries_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindful_free_string`.
/// - Returns NULL on error; call `mindful_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindful_mood_trend(entries_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json = match cstr_to_string(entries_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entries string pointer");
            return ptr::null_mut();
        }
    };

    json_result_to_cstr(entries::parse_array(&json).and_then(|entries| {
        serde_json::to_string(&mood_trend(&entries)).map_err(AnalyticsError::from)
    }))
}

/// Score a single mood symbol (1-5).
///
/// # Safety
/// - `symbol` must be a valid null-terminated UTF-8 C string.
/// - Returns -1 if the pointer is NULL or not UTF-8.
#[no_mangle]
pub unsafe extern "C" fn mindful_score_mood(symbol: *const c_char) -> i32 {
    clear_last_error();

    match cstr_to_string(symbol) {
        Some(s) => i32::from(score_mood(&s)),
        None => {
            set_last_error("Invalid symbol string pointer");
            -1
        }
    }
}

// ============================================================================
// Configured Processor API
// ============================================================================

/// Opaque handle to an AnalyticsProcessor
pub struct MindfulProcessorHandle {
    processor: AnalyticsProcessor,
}

/// Create a new processor.
///
/// `strict` non-zero selects the strict interval policy.
///
/// # Safety
/// - Returns a pointer to a newly allocated processor.
/// - Must be freed with `mindful_processor_free`.
#[no_mangle]
pub unsafe extern "C" fn mindful_processor_new(strict: i32) -> *mut MindfulProcessorHandle {
    clear_last_error();

    let config = if strict != 0 {
        AnalyticsConfig::strict()
    } else {
        AnalyticsConfig::default()
    };

    let handle = Box::new(MindfulProcessorHandle {
        processor: AnalyticsProcessor::with_config(config),
    });
    Box::into_raw(handle)
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `mindful_processor_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn mindful_processor_free(processor: *mut MindfulProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Compute an HRV report with a configured processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `mindful_processor_new`.
/// - `intervals` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindful_free_string`.
/// - Returns NULL on error; call `mindful_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindful_processor_hrv_report(
    processor: *const MindfulProcessorHandle,
    intervals: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;

    let raw = match cstr_to_string(intervals) {
        Some(s) => s,
        None => {
            set_last_error("Invalid intervals string pointer");
            return ptr::null_mut();
        }
    };

    json_result_to_cstr(handle.processor.hrv_report_json(&raw))
}

/// Build a mood trend report with a configured processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `mindful_processor_new`.
/// - `entries_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindful_free_string`.
/// - Returns NULL on error; call `mindful_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindful_processor_trend_report(
    processor: *const MindfulProcessorHandle,
    entries_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;

    let json = match cstr_to_string(entries_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entries string pointer");
            return ptr::null_mut();
        }
    };

    json_result_to_cstr(
        entries::parse_array(&json).and_then(|entries| handle.processor.trend_report_json(&entries)),
    )
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Mindful functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Mindful function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn mindful_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Mindful function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn mindful_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn mindful_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
