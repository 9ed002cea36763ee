//! Native engine interfaces.
//!
//! Each trait mirrors one native object. Dropping an implementor
//! releases the native object, so the driver gets release-on-every-path
//! for free and only has to care about the _order_ things are dropped in.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::EngineError,
	engine::{Event,RefTime,StreamFlags,BufferFlags},
	format::{ShareMode,WaveFormat},
};

//---------------------------------------------------------------------------------------------------- Enumerator
/// Finds output endpoints.
pub trait Enumerator {
	/// The endpoint type this enumerator hands out.
	type Device: Device;

	/// All active render endpoints.
	///
	/// The outer `Err` means enumeration itself failed.
	/// An inner `Err` means only that one candidate could not be obtained.
	fn active_endpoints(&self) -> Result<Vec<Result<Self::Device, EngineError>>, EngineError>;

	/// The platform's default render endpoint.
	fn default_endpoint(&self) -> Result<Self::Device, EngineError>;
}

//---------------------------------------------------------------------------------------------------- Device
/// A physical/virtual output endpoint.
pub trait Device {
	/// The session type this endpoint activates.
	type Client: Client;

	/// Stable endpoint identifier.
	fn id(&self) -> Result<String, EngineError>;

	/// Human readable endpoint name.
	fn friendly_name(&self) -> Result<String, EngineError>;

	/// Acquire a fresh, un-initialized session handle.
	fn activate(&self) -> Result<Self::Client, EngineError>;
}

//---------------------------------------------------------------------------------------------------- Client
/// A streaming session handle.
///
/// # Invariants
/// - `initialize()` succeeds at most once per handle, afterwards it
///   returns [`EngineError::AlreadyInitialized`]
/// - a failed `initialize()` may leave the handle unusable, in which
///   case the next `initialize()` also reports `AlreadyInitialized`
/// - after `initialize()` fails with [`EngineError::BufferSizeNotAligned`],
///   `buffer_size()` reports the nearest aligned frame count
pub trait Client {
	/// The render interface type of this session.
	type Renderer: Renderer;

	/// Initialize the stream.
	///
	/// `buffer_duration` of [`RefTime::ZERO`] lets the engine pick.
	fn initialize(
		&mut self,
		mode: ShareMode,
		flags: StreamFlags,
		buffer_duration: RefTime,
		periodicity: RefTime,
		format: &WaveFormat,
	) -> Result<(), EngineError>;

	/// `(default, minimum)` device period.
	fn device_period(&self) -> Result<(RefTime, RefTime), EngineError>;

	/// Engine buffer size in frames.
	fn buffer_size(&self) -> Result<u32, EngineError>;

	/// Maximum latency of the initialized stream.
	fn stream_latency(&self) -> Result<RefTime, EngineError>;

	/// Frames queued in the engine buffer, not yet played.
	fn current_padding(&self) -> Result<u32, EngineError>;

	/// Bind the event the engine signals when buffer space frees up.
	fn set_event_handle(&mut self, event: &Event) -> Result<(), EngineError>;

	/// Acquire the render interface.
	fn render_client(&mut self) -> Result<Self::Renderer, EngineError>;

	/// Start the stream clock.
	fn start(&mut self) -> Result<(), EngineError>;

	/// Stop the stream clock.
	fn stop(&mut self) -> Result<(), EngineError>;
}

//---------------------------------------------------------------------------------------------------- Renderer
/// Write access to the engine buffer.
///
/// Writing is a two step get/commit protocol:
/// ```rust,ignore
/// let dest = renderer.get_buffer(frames)?;
/// dest.copy_from_slice(data);
/// renderer.release_buffer(frames, BufferFlags::None)?;
/// ```
pub trait Renderer {
	/// Borrow a region of exactly `frames` frames.
	///
	/// Fails with [`EngineError::BufferTooLarge`] if that many frames are not free.
	fn get_buffer(&mut self, frames: u32) -> Result<&mut [u8], EngineError>;

	/// Commit `frames` frames of the region returned by the last `get_buffer()`.
	fn release_buffer(&mut self, frames: u32, flags: BufferFlags) -> Result<(), EngineError>;
}
