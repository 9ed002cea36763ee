//! Session negotiation.
//!
//! [`negotiate`] turns a [`Device`] into an initialized [`Session`],
//! reconciling the caller's preferences against what the engine accepts:
//!
//! - the preferred [`ShareMode`] is attempted first, then the other one
//! - within a mode, [`crate::format::candidates`] are tried in order
//!   until the engine accepts one
//!
//! The negotiated mode, format and rate may all differ from what was asked for.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Client,Device,RefTime,StreamFlags},
	error::{DriverError,EngineError},
	format::{ShareMode,WaveFormat},
	macros::{debug2,error2,info2,native_err},
};

mod shared;
mod exclusive;

//---------------------------------------------------------------------------------------------------- Session
/// An initialized stream on one device.
///
/// The format and mode are fixed for the lifetime of the session,
/// changing them means negotiating a new one.
#[derive(Debug)]
pub struct Session<C> {
	client: C,
	format: WaveFormat,
	mode: ShareMode,
	latency_ms: f64,
}

impl<C: Client> Session<C> {
	fn new(client: C, format: WaveFormat, mode: ShareMode) -> Self {
		let latency_ms = match mode {
			ShareMode::Shared    => shared::latency_ms(&client),
			ShareMode::Exclusive => exclusive::latency_ms(&client),
		};

		Self { client, format, mode, latency_ms }
	}

	#[must_use]
	/// The negotiated format.
	pub const fn format(&self) -> WaveFormat {
		self.format
	}

	#[must_use]
	/// The negotiated share mode.
	pub const fn mode(&self) -> ShareMode {
		self.mode
	}

	#[must_use]
	/// Reported stream latency in milliseconds, `0.0` if the engine couldn't tell.
	pub const fn latency_ms(&self) -> f64 {
		self.latency_ms
	}

	#[must_use]
	/// Bytes per frame.
	pub const fn frame_size(&self) -> usize {
		self.format.block_align()
	}

	/// The initialized client.
	pub fn client(&mut self) -> &mut C {
		&mut self.client
	}

	#[must_use]
	/// Take the initialized client.
	pub fn into_client(self) -> C {
		self.client
	}
}

//---------------------------------------------------------------------------------------------------- Negotiate
/// Negotiate a session on `device`.
///
/// `latency_ms` only matters in exclusive mode, where it sizes the engine buffer.
///
/// # Errors
/// [`DriverError::NegotiationFailed`] if both modes were exhausted.
///
/// ```rust
/// # use wasapi_out::{backend::dummy::*, format::*, session::negotiate};
/// // Only shared 16-bit PCM at 44.1kHz, no exclusive mode.
/// let device = DummyEndpoint::new("id", "name")
/// 	.shared_formats([WaveFormat::new(SampleFormat::Int16, 44_100)])
/// 	.exclusive_access(ExclusiveAccess::Disabled);
///
/// let session = negotiate(&device, true, true, 48_000, 64).unwrap();
/// assert_eq!(session.mode(), ShareMode::Shared);
/// assert_eq!(session.format(), WaveFormat::new(SampleFormat::Int16, 44_100));
/// ```
pub fn negotiate<D: Device>(
	device: &D,
	exclusive: bool,
	float: bool,
	rate: u32,
	latency_ms: u32,
) -> Result<Session<D::Client>, DriverError> {
	let preferred = ShareMode::from_exclusive(exclusive);

	for mode in [preferred, preferred.opposite()] {
		let attempt = match mode {
			ShareMode::Shared    => shared::init(device, float, rate),
			ShareMode::Exclusive => exclusive::init(device, float, rate, latency_ms),
		};

		match attempt {
			Ok(session) => {
				info2!(
					"Client initialized ({}, {}, {}Hz, {:.1}ms).",
					session.mode,
					session.format.sample_format,
					session.format.rate,
					session.latency_ms,
				);
				return Ok(session);
			},
			Err(e) => debug2!("{mode} mode failed: {e}"),
		}
	}

	error2!("Failed to initialize client");
	Err(DriverError::NegotiationFailed)
}

//---------------------------------------------------------------------------------------------------- Helpers
/// Acquire a fresh client from `device`.
fn activate<D: Device>(device: &D) -> Result<D::Client, DriverError> {
	device.activate().map_err(|e| native_err!("IMMDevice::Activate", e))
}

/// Event driven, engine picks the buffer size.
fn initialize_shared<C: Client>(client: &mut C, format: &WaveFormat) -> Result<(), EngineError> {
	client.initialize(
		ShareMode::Shared,
		StreamFlags::EVENT_CALLBACK_NO_PERSIST,
		RefTime::ZERO,
		RefTime::ZERO,
		format,
	)
}
