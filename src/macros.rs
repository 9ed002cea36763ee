// Global macros for internal usage.

//---------------------------------------------------------------------------------------------------- Logging
// Logs with `log` but only if the log feature is enabled.
//
// Everything is emitted under the driver's name as the
// target so hosts can filter the driver's output.
//
// Without `log` the arguments still go through `format_args!`,
// so variables only read by a log line aren't unused.

macro_rules! error2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::driver::NAME, $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = ::std::format_args!($($arg)+);
    }};
}
pub(crate) use error2;

macro_rules! warn2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::driver::NAME, $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = ::std::format_args!($($arg)+);
    }};
}
pub(crate) use warn2;

macro_rules! info2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::info!(target: $crate::driver::NAME, $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = ::std::format_args!($($arg)+);
    }};
}
pub(crate) use info2;

macro_rules! debug2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::driver::NAME, $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = ::std::format_args!($($arg)+);
    }};
}
pub(crate) use debug2;

macro_rules! trace2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::driver::NAME, $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = ::std::format_args!($($arg)+);
    }};
}
pub(crate) use trace2;

//---------------------------------------------------------------------------------------------------- Native failures
// Log a failed native call and turn it into a `DriverError`.
//
// `native_err!` is for failures that end the current operation,
// `native_warn!` for ones that are tolerated (the error is still returned
// so the caller can decide what "tolerated" means).

macro_rules! native_err {
    ($op:literal, $error:expr) => {{
        let error: $crate::error::EngineError = $error;
        $crate::macros::error2!("{} failed with error 0x{:08X}", $op, error.code());
        $crate::error::DriverError::Native { op: $op, source: error }
    }};
}
pub(crate) use native_err;

macro_rules! native_warn {
    ($op:literal, $error:expr) => {{
        let error: $crate::error::EngineError = $error;
        $crate::macros::warn2!("{} failed with error 0x{:08X}", $op, error.code());
        $crate::error::DriverError::Native { op: $op, source: error }
    }};
}
pub(crate) use native_warn;
