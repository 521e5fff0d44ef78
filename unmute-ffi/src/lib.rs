//! FFI bindings for the Unmute add-on.
//!
//! This crate provides the C ABI a screen reader host uses to load the
//! add-on. The host hands over a table of callbacks for its synthesizer,
//! tone generator, configuration store, settings dialog and translations;
//! everything else runs inside the library.
//!
//! All functions use panic::catch_unwind to prevent Rust panics from
//! unwinding across the FFI boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, c_void, CStr, CString};
use std::panic;
use std::ptr;
use std::sync::{Arc, Once};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use unmute_rs::config::ConfigSchema;
use unmute_rs::host::{
    ConfigStore, HostError, PanelInfo, SettingsRegistry, SynthHost, TonePlayer, TranslationSource,
};
use unmute_rs::{SettingsPanel, SystemEndpoints, UiState, UnmutePlugin};

// ============================================================================
// Error Handling
// ============================================================================

/// Error codes returned by FFI functions.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    InvalidHandle = -1,
    InvalidArgument = -2,
    HostError = -3,
    JsonError = -4,
    Panic = -99,
}

impl From<&HostError> for ErrorCode {
    fn from(err: &HostError) -> Self {
        match err {
            HostError::PanelNotRegistered { .. }
            | HostError::TranslationsUnavailable(_)
            | HostError::ConfigWrite { .. }
            | HostError::Callback(_) => ErrorCode::HostError,
        }
    }
}

// Thread-local storage for the last error.
thread_local! {
    static LAST_ERROR: RefCell<Option<(ErrorCode, String)>> = const { RefCell::new(None) };
}

fn set_last_error(code: ErrorCode, message: impl Into<String>) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some((code, message.into()));
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

// ============================================================================
// Host Callback Table
// ============================================================================

/// Callbacks supplied by the host.
///
/// Every callback receives `user_data` as its first argument. Strings are
/// UTF-8 and NUL-terminated. Strings returned by the host are borrowed and
/// only need to stay valid until the callback is invoked again.
///
/// The function pointers and `user_data` must stay valid for the life of the
/// process, not just until `unmute_plugin_unload`. Startup tasks keep calling
/// into the host after unload while they run, and with unlimited retries the
/// synthesizer task runs until a synthesizer becomes active.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostCallbacks {
    pub user_data: *mut c_void,

    /// Non-zero when a synthesizer is active.
    pub has_active_synth: extern "C" fn(user_data: *mut c_void) -> i32,

    /// Initialize the synthesizer subsystem.
    pub initialize_synth: extern "C" fn(user_data: *mut c_void),

    /// Select a synthesizer driver by name. Non-zero on success.
    pub set_synth: extern "C" fn(user_data: *mut c_void, driver: *const c_char) -> i32,

    /// Configured synthesizer driver name.
    pub configured_synth: extern "C" fn(user_data: *mut c_void) -> *const c_char,

    /// Play a tone, blocking for its duration.
    pub play_tone: extern "C" fn(user_data: *mut c_void, frequency_hz: u32, duration_ms: u32),

    /// Declare a configuration section schema (JSON object of spec strings).
    pub register_schema:
        extern "C" fn(user_data: *mut c_void, namespace: *const c_char, schema_json: *const c_char),

    /// Stored configuration section as a JSON object, or null.
    pub read_section:
        extern "C" fn(user_data: *mut c_void, namespace: *const c_char) -> *const c_char,

    /// Replace a configuration section. Zero on success, one when the store
    /// rejected the section. Any other value is a host failure.
    pub write_section: extern "C" fn(
        user_data: *mut c_void,
        namespace: *const c_char,
        section_json: *const c_char,
    ) -> i32,

    /// Add a panel to the settings dialog.
    pub register_panel:
        extern "C" fn(user_data: *mut c_void, panel_id: *const c_char, title: *const c_char),

    /// Remove a panel from the settings dialog. Zero on success, one when
    /// the panel was not registered. Any other value is a host failure.
    pub deregister_panel: extern "C" fn(user_data: *mut c_void, panel_id: *const c_char) -> i32,

    /// Message catalog as a JSON object of msgid to translation. May be
    /// null (the pointer or the returned string) when no catalog exists.
    pub load_translations: Option<extern "C" fn(user_data: *mut c_void) -> *const c_char>,
}

/// Adapter from the callback table to the add-on host traits.
#[derive(Clone, Copy)]
struct FfiHost {
    callbacks: HostCallbacks,
}

// The host guarantees its callbacks may be invoked from any thread.
unsafe impl Send for FfiHost {}
unsafe impl Sync for FfiHost {}

impl FfiHost {
    fn user_data(&self) -> *mut c_void {
        self.callbacks.user_data
    }
}

impl SynthHost for FfiHost {
    fn has_active_synth(&self) -> bool {
        (self.callbacks.has_active_synth)(self.user_data()) != 0
    }

    fn initialize_subsystem(&self) {
        (self.callbacks.initialize_synth)(self.user_data())
    }

    fn set_synth(&self, driver: &str) -> bool {
        let driver = to_c_string(driver);
        (self.callbacks.set_synth)(self.user_data(), driver.as_ptr()) != 0
    }

    fn configured_synth(&self) -> String {
        let name = (self.callbacks.configured_synth)(self.user_data());
        unsafe { parse_c_str(name) }.unwrap_or_default().to_string()
    }
}

impl TonePlayer for FfiHost {
    fn play_tone(&self, frequency_hz: u32, duration_ms: u32) {
        (self.callbacks.play_tone)(self.user_data(), frequency_hz, duration_ms)
    }
}

impl ConfigStore for FfiHost {
    fn register_schema(&self, namespace: &str, schema: &ConfigSchema) {
        let namespace = to_c_string(namespace);
        let schema = to_c_string(&schema.to_json().to_string());
        (self.callbacks.register_schema)(self.user_data(), namespace.as_ptr(), schema.as_ptr())
    }

    fn read_section(&self, namespace: &str) -> Option<Value> {
        let namespace_c = to_c_string(namespace);
        let raw = (self.callbacks.read_section)(self.user_data(), namespace_c.as_ptr());
        let json = unsafe { parse_c_str(raw) }?;
        match serde_json::from_str(json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(namespace, error = %e, "Host returned malformed configuration section");
                None
            }
        }
    }

    fn write_section(&self, namespace: &str, section: Value) -> Result<(), HostError> {
        let namespace_c = to_c_string(namespace);
        let section = to_c_string(&section.to_string());
        let write = self.callbacks.write_section;
        let status = write(self.user_data(), namespace_c.as_ptr(), section.as_ptr());
        match status {
            0 => Ok(()),
            1 => Err(HostError::ConfigWrite {
                namespace: namespace.to_string(),
            }),
            other => Err(HostError::Callback(format!("write_section returned {other}"))),
        }
    }
}

impl SettingsRegistry for FfiHost {
    fn register_panel(&self, panel: &PanelInfo) {
        let id = to_c_string(&panel.id);
        let title = to_c_string(&panel.title);
        (self.callbacks.register_panel)(self.user_data(), id.as_ptr(), title.as_ptr())
    }

    fn deregister_panel(&self, panel_id: &str) -> Result<(), HostError> {
        let id = to_c_string(panel_id);
        match (self.callbacks.deregister_panel)(self.user_data(), id.as_ptr()) {
            0 => Ok(()),
            1 => Err(HostError::PanelNotRegistered {
                panel_id: panel_id.to_string(),
            }),
            other => Err(HostError::Callback(format!("deregister_panel returned {other}"))),
        }
    }
}

impl TranslationSource for FfiHost {
    fn load_catalog(&self) -> Result<HashMap<String, String>, HostError> {
        let load = self.callbacks.load_translations.ok_or_else(|| {
            HostError::TranslationsUnavailable("host provides no translation loader".to_string())
        })?;

        let raw = load(self.user_data());
        let json = unsafe { parse_c_str(raw) }.ok_or_else(|| {
            HostError::TranslationsUnavailable("no catalog for the current language".to_string())
        })?;

        serde_json::from_str(json).map_err(|e| HostError::TranslationsUnavailable(e.to_string()))
    }
}

// ============================================================================
// Data Types for JSON Serialization
// ============================================================================

/// Options passed on plugin load.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PluginOptions {
    /// `tracing` filter directive, `info` when absent
    #[serde(default)]
    pub log_level: Option<String>,
}

// ============================================================================
// Plugin Handle Type
// ============================================================================

/// Opaque handle to a loaded add-on. Actually points to a PluginInstance struct.
pub type PluginHandle = *mut c_void;

struct PluginInstance {
    plugin: UnmutePlugin<FfiHost>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Allocate a C string from a Rust string. Caller must free with unmute_free_string.
fn alloc_c_string(s: &str) -> *mut c_char {
    to_c_string(s).into_raw()
}

fn to_c_string(s: &str) -> CString {
    // Interior NUL bytes cannot cross the boundary; drop them
    CString::new(s).unwrap_or_else(|_| {
        CString::new(s.replace('\0', "")).unwrap_or_default()
    })
}

/// Parse a C string to a Rust string slice.
unsafe fn parse_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Install the global tracing subscriber once per process.
fn init_logging(level: Option<&str>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(level.unwrap_or("info"))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_names(true)
            .try_init();
    });
}

/// Borrow the plugin behind a handle.
unsafe fn instance<'a>(handle: PluginHandle) -> Option<&'a PluginInstance> {
    (handle as *const PluginInstance).as_ref()
}

// ============================================================================
// FFI Functions - Lifecycle
// ============================================================================

/// Load the add-on.
///
/// Registers the configuration schema and settings panel, then starts the
/// volume restore and synthesizer reinitialization in the background.
///
/// # Arguments
/// * `callbacks` - Host callback table (copied, may be freed after the call)
/// * `options_json` - JSON options string (can be null for defaults)
///
/// # Returns
/// Handle to the add-on, or null on failure. Check unmute_last_error_code() on failure.
///
/// # Safety
/// The returned handle must be released with unmute_plugin_unload().
#[no_mangle]
pub extern "C" fn unmute_plugin_load(
    callbacks: *const HostCallbacks,
    options_json: *const c_char,
) -> PluginHandle {
    clear_last_error();

    let result = panic::catch_unwind(|| {
        let callbacks = match unsafe { callbacks.as_ref() } {
            Some(cb) => *cb,
            None => {
                set_last_error(ErrorCode::InvalidArgument, "Host callbacks are null");
                return ptr::null_mut();
            }
        };

        let options_str = unsafe { parse_c_str(options_json) };
        let options = options_str
            .map(serde_json::from_str::<PluginOptions>)
            .transpose();
        let (options, options_error) = match options {
            Ok(options) => (options.unwrap_or_default(), None),
            Err(e) => (PluginOptions::default(), Some(e)),
        };

        init_logging(options.log_level.as_deref());
        if let Some(e) = options_error {
            warn!(error = %e, "Ignoring malformed plugin options");
        }

        let host = Arc::new(FfiHost { callbacks });
        let plugin = UnmutePlugin::on_load(host, Arc::new(SystemEndpoints::new()));

        let instance = Box::new(PluginInstance { plugin });
        Box::into_raw(instance) as PluginHandle
    });

    match result {
        Ok(handle) => handle,
        Err(_) => {
            set_last_error(ErrorCode::Panic, "Panic during plugin load");
            ptr::null_mut()
        }
    }
}

/// Unload the add-on and release its handle.
///
/// Background startup tasks that are still running are left to finish on
/// their own.
///
/// # Safety
/// The handle must have been created by unmute_plugin_load() and must not be used after this call.
#[no_mangle]
pub extern "C" fn unmute_plugin_unload(handle: PluginHandle) {
    if handle.is_null() {
        return;
    }

    let _ = panic::catch_unwind(|| {
        let mut instance = unsafe { Box::from_raw(handle as *mut PluginInstance) };
        instance.plugin.on_unload();
    });
}

// ============================================================================
// FFI Functions - Settings Panel
// ============================================================================

/// Get the settings panel state, with the initial focus target.
///
/// # Returns
/// JSON string of the panel state. Caller must free with unmute_free_string().
/// Returns null on failure.
#[no_mangle]
pub extern "C" fn unmute_settings_load(handle: PluginHandle) -> *mut c_char {
    clear_last_error();

    let result = panic::catch_unwind(|| {
        let instance = match unsafe { instance(handle) } {
            Some(instance) => instance,
            None => {
                set_last_error(ErrorCode::InvalidHandle, "Invalid plugin handle");
                return ptr::null_mut();
            }
        };

        let state = instance.plugin.settings_panel().state();
        match serde_json::to_string(&state) {
            Ok(json) => alloc_c_string(&json),
            Err(e) => {
                set_last_error(ErrorCode::JsonError, e.to_string());
                ptr::null_mut()
            }
        }
    });

    match result {
        Ok(json) => json,
        Err(_) => {
            set_last_error(ErrorCode::Panic, "Panic during settings load");
            ptr::null_mut()
        }
    }
}

/// Save the settings panel state.
///
/// # Arguments
/// * `handle` - Plugin handle
/// * `state_json` - JSON object with `max_volume` and `custom_volume`
///
/// # Returns
/// 0 on success, negative error code on failure.
#[no_mangle]
pub extern "C" fn unmute_settings_save(handle: PluginHandle, state_json: *const c_char) -> i32 {
    clear_last_error();

    let result = panic::catch_unwind(|| {
        let instance = match unsafe { instance(handle) } {
            Some(instance) => instance,
            None => {
                set_last_error(ErrorCode::InvalidHandle, "Invalid plugin handle");
                return ErrorCode::InvalidHandle as i32;
            }
        };

        let json = match unsafe { parse_c_str(state_json) } {
            Some(s) => s,
            None => {
                set_last_error(ErrorCode::InvalidArgument, "Invalid settings state");
                return ErrorCode::InvalidArgument as i32;
            }
        };

        let state: UiState = match serde_json::from_str(json) {
            Ok(state) => state,
            Err(e) => {
                set_last_error(ErrorCode::JsonError, e.to_string());
                return ErrorCode::JsonError as i32;
            }
        };

        match instance.plugin.save_settings(&SettingsPanel::from_state(&state)) {
            Ok(()) => ErrorCode::Success as i32,
            Err(e) => {
                let code = ErrorCode::from(&e);
                set_last_error(code, e.to_string());
                code as i32
            }
        }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error(ErrorCode::Panic, "Panic during settings save");
            ErrorCode::Panic as i32
        }
    }
}

// ============================================================================
// FFI Functions - Memory Management
// ============================================================================

/// Free a string allocated by this library.
///
/// # Safety
/// The pointer must have been returned by one of the unmute_* functions.
/// Do not call this on strings from other sources.
#[no_mangle]
pub extern "C" fn unmute_free_string(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }

    let _ = panic::catch_unwind(|| {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    });
}

// ============================================================================
// FFI Functions - Error Handling
// ============================================================================

/// Get the last error code.
///
/// # Returns
/// The error code from the last failed operation, or 0 if no error.
#[no_mangle]
pub extern "C" fn unmute_last_error_code() -> i32 {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|(code, _)| *code as i32)
            .unwrap_or(0)
    })
}

/// Get the last error message.
///
/// # Returns
/// Error message string. Caller must free with unmute_free_string().
/// Returns null if no error.
#[no_mangle]
pub extern "C" fn unmute_last_error_message() -> *mut c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|(_, msg)| alloc_c_string(msg))
            .unwrap_or(ptr::null_mut())
    })
}

// ============================================================================
// FFI Functions - Utility
// ============================================================================

/// Get the library version.
///
/// # Returns
/// Version string. Caller must free with unmute_free_string().
#[no_mangle]
pub extern "C" fn unmute_version() -> *mut c_char {
    alloc_c_string(env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    /// In-memory host behind the callback table.
    #[derive(Default)]
    struct TestHost {
        sections: Mutex<HashMap<String, String>>,
        schemas: Mutex<HashMap<String, String>>,
        panels: Mutex<Vec<(String, String)>>,
        read_buffer: Mutex<Option<CString>>,
        synth_buffer: Mutex<Option<CString>>,
        write_status: AtomicI32,
        deregister_status: AtomicI32,
    }

    fn test_host<'a>(user_data: *mut c_void) -> &'a TestHost {
        unsafe { &*(user_data as *const TestHost) }
    }

    fn read_str(ptr: *const c_char) -> String {
        unsafe { parse_c_str(ptr) }.unwrap_or_default().to_string()
    }

    extern "C" fn has_active_synth(_: *mut c_void) -> i32 {
        1
    }

    extern "C" fn initialize_synth(_: *mut c_void) {}

    extern "C" fn set_synth(_: *mut c_void, _: *const c_char) -> i32 {
        1
    }

    extern "C" fn configured_synth(user_data: *mut c_void) -> *const c_char {
        let mut buffer = test_host(user_data).synth_buffer.lock().unwrap();
        let name = buffer.insert(CString::new("espeak").unwrap());
        name.as_ptr()
    }

    extern "C" fn play_tone(_: *mut c_void, _: u32, _: u32) {}

    extern "C" fn register_schema(
        user_data: *mut c_void,
        ns: *const c_char,
        schema: *const c_char,
    ) {
        test_host(user_data)
            .schemas
            .lock()
            .unwrap()
            .insert(read_str(ns), read_str(schema));
    }

    extern "C" fn read_section(user_data: *mut c_void, ns: *const c_char) -> *const c_char {
        let host = test_host(user_data);
        let section = host.sections.lock().unwrap().get(&read_str(ns)).cloned();
        let mut buffer = host.read_buffer.lock().unwrap();
        match section {
            Some(json) => buffer.insert(CString::new(json).unwrap()).as_ptr(),
            None => ptr::null(),
        }
    }

    extern "C" fn write_section(
        user_data: *mut c_void,
        ns: *const c_char,
        json: *const c_char,
    ) -> i32 {
        let host = test_host(user_data);
        let status = host.write_status.load(Ordering::SeqCst);
        if status == 0 {
            host.sections
                .lock()
                .unwrap()
                .insert(read_str(ns), read_str(json));
        }
        status
    }

    extern "C" fn register_panel(user_data: *mut c_void, id: *const c_char, title: *const c_char) {
        test_host(user_data)
            .panels
            .lock()
            .unwrap()
            .push((read_str(id), read_str(title)));
    }

    extern "C" fn deregister_panel(user_data: *mut c_void, id: *const c_char) -> i32 {
        let host = test_host(user_data);
        let status = host.deregister_status.load(Ordering::SeqCst);
        if status != 0 {
            return status;
        }
        let mut panels = host.panels.lock().unwrap();
        let id = read_str(id);
        match panels.iter().position(|(panel, _)| *panel == id) {
            Some(index) => {
                panels.remove(index);
                0
            }
            None => 1,
        }
    }

    fn callbacks(host: &'static TestHost) -> HostCallbacks {
        HostCallbacks {
            user_data: host as *const TestHost as *mut c_void,
            has_active_synth,
            initialize_synth,
            set_synth,
            configured_synth,
            play_tone,
            register_schema,
            read_section,
            write_section,
            register_panel,
            deregister_panel,
            load_translations: None,
        }
    }

    fn leak_host() -> &'static TestHost {
        Box::leak(Box::new(TestHost::default()))
    }

    #[test]
    fn test_error_code_conversion() {
        assert_eq!(
            ErrorCode::from(&HostError::PanelNotRegistered {
                panel_id: "unmute".to_string()
            }),
            ErrorCode::HostError
        );
        assert_eq!(
            ErrorCode::from(&HostError::Callback("write_section returned 7".to_string())),
            ErrorCode::HostError
        );
    }

    #[test]
    fn test_host_status_codes() {
        let host = leak_host();
        let ffi = FfiHost {
            callbacks: callbacks(host),
        };

        host.write_status.store(1, Ordering::SeqCst);
        assert!(matches!(
            ffi.write_section("unmute", serde_json::json!({})),
            Err(HostError::ConfigWrite { .. })
        ));

        host.write_status.store(-5, Ordering::SeqCst);
        match ffi.write_section("unmute", serde_json::json!({})) {
            Err(HostError::Callback(message)) => assert!(message.contains("-5")),
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(matches!(
            ffi.deregister_panel("missing"),
            Err(HostError::PanelNotRegistered { .. })
        ));

        host.deregister_status.store(3, Ordering::SeqCst);
        assert!(matches!(
            ffi.deregister_panel("unmute"),
            Err(HostError::Callback(_))
        ));
    }

    #[test]
    fn test_settings_save_reports_host_failure() {
        let host = leak_host();
        let cb = callbacks(host);
        let handle = unmute_plugin_load(&cb, ptr::null());
        assert!(!handle.is_null());

        host.write_status.store(-2, Ordering::SeqCst);
        let state = CString::new(r#"{"max_volume": true, "custom_volume": 90}"#).unwrap();
        assert_eq!(
            unmute_settings_save(handle, state.as_ptr()),
            ErrorCode::HostError as i32
        );

        let message = unmute_last_error_message();
        assert!(read_str(message).contains("write_section returned -2"));
        unmute_free_string(message);

        host.write_status.store(0, Ordering::SeqCst);
        unmute_plugin_unload(handle);
    }

    #[test]
    fn test_load_with_null_callbacks() {
        let handle = unmute_plugin_load(ptr::null(), ptr::null());
        assert!(handle.is_null());
        assert_eq!(unmute_last_error_code(), ErrorCode::InvalidArgument as i32);
    }

    #[test]
    fn test_plugin_lifecycle() {
        let host = leak_host();
        let cb = callbacks(host);

        let handle = unmute_plugin_load(&cb, ptr::null());
        assert!(!handle.is_null());
        assert_eq!(host.panels.lock().unwrap().len(), 1);
        assert!(host.schemas.lock().unwrap().contains_key("unmute"));

        unmute_plugin_unload(handle);
        assert!(host.panels.lock().unwrap().is_empty());
    }

    #[test]
    fn test_settings_roundtrip() {
        let host = leak_host();
        let cb = callbacks(host);
        let options = CString::new(r#"{"log_level": "debug"}"#).unwrap();

        let handle = unmute_plugin_load(&cb, options.as_ptr());
        assert!(!handle.is_null());

        let state = CString::new(r#"{"max_volume": false, "custom_volume": 55}"#).unwrap();
        assert_eq!(unmute_settings_save(handle, state.as_ptr()), 0);

        let json = unmute_settings_load(handle);
        assert!(!json.is_null());
        let loaded: UiState = serde_json::from_str(&read_str(json)).unwrap();
        unmute_free_string(json);

        assert!(!loaded.max_volume);
        assert_eq!(loaded.custom_volume, 55);
        assert!(loaded.slider_visible);

        unmute_plugin_unload(handle);
    }

    #[test]
    fn test_settings_save_rejects_bad_json() {
        let host = leak_host();
        let cb = callbacks(host);
        let handle = unmute_plugin_load(&cb, ptr::null());

        let state = CString::new("not json").unwrap();
        assert_eq!(
            unmute_settings_save(handle, state.as_ptr()),
            ErrorCode::JsonError as i32
        );

        unmute_plugin_unload(handle);
    }

    #[test]
    fn test_invalid_handle() {
        assert!(unmute_settings_load(ptr::null_mut()).is_null());
        assert_eq!(unmute_last_error_code(), ErrorCode::InvalidHandle as i32);

        let message = unmute_last_error_message();
        assert!(!message.is_null());
        unmute_free_string(message);
    }

    #[test]
    fn test_version() {
        let version = unmute_version();
        assert!(!version.is_null());
        unsafe {
            let s = CStr::from_ptr(version).to_str().unwrap();
            assert!(!s.is_empty());
        }
        unmute_free_string(version);
    }
}
