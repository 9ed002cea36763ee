//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::config::DEFAULT_TEARDOWN_WAIT;

#[allow(unused_imports)] // docs
use crate::Wasapi;

//---------------------------------------------------------------------------------------------------- Config
/// Driver configuration.
///
/// This is passed once to [`Wasapi::open`].
///
/// `exclusive_mode` and `float_format` are _preferences_, negotiation will
/// fall back to the other mode/format if the engine rejects them, so always
/// check [`Wasapi::mode`] and [`Wasapi::uses_float`] after opening.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	/// Try exclusive mode first.
	pub exclusive_mode: bool,

	/// Try 32-bit float samples first (16-bit integer PCM otherwise).
	pub float_format: bool,

	/// Should `write()` block until all data is accepted?
	///
	/// This is the initial state, it can be changed at any time
	/// with [`Wasapi::set_nonblock`].
	pub blocking: bool,

	/// How long closing waits for the write event to
	/// become signaled before leaking it instead.
	pub teardown_wait: Duration,
}

impl Config {
	/// A reasonable default [`Config`].
	///
	/// ```rust
	/// # use wasapi_out::config::*;
	/// assert_eq!(Config::DEFAULT, Config {
	///     exclusive_mode: false,
	///     float_format:   false,
	///     blocking:       false,
	///     teardown_wait:  std::time::Duration::from_millis(20),
	/// });
	/// ```
	pub const DEFAULT: Self = Self {
		exclusive_mode: false,
		float_format:   false,
		blocking:       false,
		teardown_wait:  DEFAULT_TEARDOWN_WAIT,
	};
}

impl Default for Config {
	fn default() -> Self {
		Self::DEFAULT
	}
}
