//! Configuration consumed from the application.

mod config;
pub use config::Config;

mod constants;
pub use constants::{
	PREFERRED_RATES,
	REFTIMES_PER_MILLISEC,
	REFTIMES_PER_SEC,
	DEFAULT_TEARDOWN_WAIT,
};
pub(crate) use constants::{
	EXCLUSIVE_BUFFER_FACTOR,
	EXCLUSIVE_LATENCY_FACTOR,
};
