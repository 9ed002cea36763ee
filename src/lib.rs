//! Event-paced low-latency audio output driver.
//!
//! This crate moves already-formatted, interleaved stereo PCM frames
//! to an audio output device as fast as the device accepts them.
//!
//! It negotiates a session with a native audio engine, reconciling the
//! requested format/rate/latency against what the engine supports, and then
//! streams through either the engine's own ring buffer (shared mode) or
//! a caller-side staging buffer (exclusive mode), pacing writes with an
//! auto-reset [`engine::Event`] instead of busy-polling.
//!
//! The native engine is reached through the traits in [`engine`], with
//! implementations in [`backend`].
//!
//! ```rust
//! use wasapi_out::{
//! 	AudioDriver, Wasapi,
//! 	backend::dummy::{DummyEndpoint, DummyEnumerator},
//! 	config::Config,
//! };
//!
//! let endpoint   = DummyEndpoint::new("{0.0.0.00000000}.{speakers}", "Speakers");
//! let enumerator = DummyEnumerator::new().with_default(endpoint);
//!
//! let mut driver = Wasapi::<DummyEnumerator>::open(&enumerator, None, 48_000, 64, &Config::DEFAULT).unwrap();
//! assert_eq!(driver.rate(), 48_000);
//! assert!(driver.start());
//! assert!(driver.alive());
//! driver.close();
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
)]

#![warn(
	missing_docs,
)]

#![forbid(
    unused_mut,
    unused_unsafe,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    for_loops_over_fallibles,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
)]

//---------------------------------------------------------------------------------------------------- Public API
pub mod backend;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod format;
pub mod session;

mod driver;
pub use driver::{AudioDriver,Wasapi,NAME};

//---------------------------------------------------------------------------------------------------- Private Usage
mod transport;
mod macros;

#[cfg(test)]
mod tests;

//----------------------------------------------------------------------------------------------------
