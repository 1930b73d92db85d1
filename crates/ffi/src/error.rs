use forest_fire_core::SimulationError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ForestFireError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ForestFireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ForestFireError` for the errors this API can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultForestFireError {
    code: ForestFireErrorCode,
    msg: String,
}

impl DefaultForestFireError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"RwLock"`, `"Mutex"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: ForestFireErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a coordinate outside the grid.
    pub fn out_of_bounds(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self {
            code: ForestFireErrorCode::OutOfBounds,
            msg: format!("Cell ({x}, {y}) is outside the {width}x{height} grid"),
        }
    }
}

impl ForestFireError for DefaultForestFireError {
    fn code(&self) -> ForestFireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<SimulationError> for DefaultForestFireError {
    fn from(error: SimulationError) -> Self {
        let code = match error {
            SimulationError::OutOfBounds { .. } => ForestFireErrorCode::OutOfBounds,
            SimulationError::InvalidDimensions { .. } | SimulationError::InvalidParameter { .. } => {
                ForestFireErrorCode::InvalidParameter
            }
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by forest fire functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter: configuration or dimensions rejected by validation,
    /// or an output buffer too small for the requested data.
    InvalidParameter = 3,

    /// Cell coordinate outside the grid.
    OutOfBounds = 4,
}

impl From<DefaultForestFireError> for ForestFireErrorCode {
    fn from(error: DefaultForestFireError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, ForestFireErrorCode)> = const { RefCell::new((None, ForestFireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Thread Safety
/// Error messages are stored per-thread, so each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that sets or
/// clears the error.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// ForestFireInstance* sim = nullptr;
/// ForestFireErrorCode err = forest_fire_new(&config, &sim);
/// if (err != ForestFireErrorCode::Ok) {
///     const char* error = forest_fire_get_last_error();
///     if (error) {
///         printf("Forest fire creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `ForestFireErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error_code() -> ForestFireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
