//! The driver.
//!
//! [`AudioDriver`] is the contract a driver registry dispatches through,
//! [`Wasapi`] implements it on top of any [`crate::engine::Enumerator`].

mod audio_driver;
pub use audio_driver::AudioDriver;

mod wasapi;
pub use wasapi::Wasapi;

mod write;
mod teardown;

//---------------------------------------------------------------------------------------------------- Constants
/// The driver's name.
///
/// Also the `log` target of everything this crate logs.
pub const NAME: &str = "wasapi";
