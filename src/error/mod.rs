//! Errors that can occur.
//!
//! [`EngineError`] is what the native audio engine reports,
//! [`DriverError`] is what the driver reports to its caller.

mod engine;
pub use engine::EngineError;

mod driver;
pub use driver::DriverError;
