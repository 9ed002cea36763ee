//! The registry contract.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::Config,
	engine::Enumerator,
	error::DriverError,
};

//---------------------------------------------------------------------------------------------------- AudioDriver
/// An audio output driver, as seen by a driver registry.
///
/// A registry holds one open driver per stream and calls
/// these from a single thread, nothing here is re-entrant.
///
/// Stream states:
/// ```text
/// open() ──► Open ──start()──► Running ──stop()──► Stopped ──start()──► Running ...
///                                                                  │
///                                           close() (from any state) ──► Closed
/// ```
pub trait AudioDriver: Sized {
	/// The driver's name.
	const NAME: &'static str;

	/// Where endpoints come from.
	type Enumerator: Enumerator;

	/// Open a stream.
	///
	/// `device_id` selects an endpoint by its exact id, `None` (or no match)
	/// means the default endpoint. `rate` and `latency_ms` are requests, read
	/// the negotiated values back from the driver.
	///
	/// The stream is opened stopped, with its buffer full of silence.
	///
	/// # Errors
	/// No stream could be opened, the caller should treat this as "no audio".
	fn open(
		enumerator: &Self::Enumerator,
		device_id: Option<&str>,
		rate: u32,
		latency_ms: u32,
		config: &Config,
	) -> Result<Self, DriverError>;

	/// Write interleaved frames, returns how many bytes were accepted.
	///
	/// Non-blocking writes accept what currently fits, possibly `0`.
	/// Blocking writes return `data.len()` or an error, never less.
	///
	/// # Errors
	/// This call failed, bytes accepted before the failure stay accepted.
	fn write(&mut self, data: &[u8]) -> Result<usize, DriverError>;

	/// Stop the stream clock.
	///
	/// Returns `true` on success, on failure it returns
	/// whether the stream was already stopped.
	fn stop(&mut self) -> bool;

	/// Start the stream clock.
	///
	/// Returns `true` on success, on failure it returns
	/// whether the stream was already running.
	fn start(&mut self) -> bool;

	/// Is the stream running?
	fn alive(&self) -> bool;

	/// Switch between non-blocking (`true`) and blocking (`false`) writes.
	fn set_nonblock(&mut self, nonblock: bool);

	/// Stop the stream and release everything it holds.
	fn close(self) {
		drop(self);
	}

	/// Does the stream use 32-bit float samples (16-bit integer PCM otherwise)?
	fn uses_float(&self) -> bool;

	/// Ids of every active output endpoint.
	///
	/// # Errors
	/// Enumeration failed.
	fn device_list(enumerator: &Self::Enumerator) -> Result<Vec<String>, DriverError>;

	/// Bytes a non-blocking write could accept right now.
	fn write_avail(&self) -> usize;

	/// Size of the stream buffer in bytes.
	fn buffer_size(&self) -> usize;
}
