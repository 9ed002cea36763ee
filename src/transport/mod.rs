//! Moving bytes into the engine.
//!
//! Shared mode writes straight into the engine's buffer, exclusive mode
//! collects writes in a [`Staging`] buffer and hands it to the engine
//! one whole buffer at a time.
//!
//! Every size here is in bytes, and always a whole number of frames.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Client,Renderer,BufferFlags},
	error::DriverError,
	format::ShareMode,
	macros::native_err,
};

mod staging;
pub(crate) use staging::Staging;

//---------------------------------------------------------------------------------------------------- Transport
/// Mode dependent transport state.
#[derive(Debug)]
pub(crate) enum Transport {
	/// Nothing caller-side, the engine owns the buffer.
	Shared,
	/// Caller-side staging buffer, the size of the engine buffer.
	Exclusive(Staging),
}

impl Transport {
	/// Transport for `mode` with an engine buffer of `buffer_size` bytes.
	pub(crate) fn new(mode: ShareMode, buffer_size: usize) -> Result<Self, DriverError> {
		Ok(match mode {
			ShareMode::Shared => Self::Shared,
			ShareMode::Exclusive => Self::Exclusive(Staging::new(buffer_size)?),
		})
	}
}

//---------------------------------------------------------------------------------------------------- Functions
/// Commit all of `data` to the engine in one get/release pair.
///
/// `data` must be a whole number of frames that currently fits,
/// either everything is committed or nothing is.
pub(crate) fn flush<R: Renderer>(
	renderer: &mut R,
	frame_size: usize,
	data: &[u8],
) -> Result<usize, DriverError> {
	let frames = data.len() / frame_size;
	let bytes = frames * frame_size;
	let frames = u32::try_from(frames).unwrap_or(u32::MAX);

	let dest = renderer
		.get_buffer(frames)
		.map_err(|e| native_err!("IAudioRenderClient::GetBuffer", e))?;
	let n = bytes.min(dest.len());
	dest[..n].copy_from_slice(&data[..n]);

	renderer
		.release_buffer(frames, BufferFlags::None)
		.map_err(|e| native_err!("IAudioRenderClient::ReleaseBuffer", e))?;

	Ok(bytes)
}

/// Fill the whole engine buffer with silence.
pub(crate) fn prime<R: Renderer>(renderer: &mut R, frames: u32) -> Result<(), DriverError> {
	renderer
		.get_buffer(frames)
		.map_err(|e| native_err!("IAudioRenderClient::GetBuffer", e))?;

	renderer
		.release_buffer(frames, BufferFlags::Silent)
		.map_err(|e| native_err!("IAudioRenderClient::ReleaseBuffer", e))
}

/// Free bytes in the shared-mode engine buffer.
///
/// Queried fresh every call, the engine drains it concurrently.
pub(crate) fn available<C: Client>(
	client: &C,
	buffer_size: usize,
	frame_size: usize,
) -> Result<usize, DriverError> {
	let padding = client
		.current_padding()
		.map_err(|e| native_err!("IAudioClient::GetCurrentPadding", e))?;

	Ok(buffer_size.saturating_sub(padding as usize * frame_size))
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		backend::dummy::{DummyEndpoint,Fault},
		engine::RefTime,
		tests::{client,pcm},
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn flush_commits() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Shared, RefTime::ZERO);
		let mut renderer = client.render_client().unwrap();

		let data = pcm(100);
		assert_eq!(flush(&mut renderer, 4, &data).unwrap(), 400);
		assert_eq!(endpoint.committed(), data);
		assert_eq!(endpoint.padding(), Some(100));
	}

	#[test]
	fn flush_all_or_nothing() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Shared, RefTime::ZERO);
		let mut renderer = client.render_client().unwrap();

		// 960 frame buffer.
		assert!(flush(&mut renderer, 4, &pcm(961)).is_err());
		assert!(endpoint.committed().is_empty());

		endpoint.set_fault(Fault::ReleaseBuffer, true);
		let err = flush(&mut renderer, 4, &pcm(1)).unwrap_err();
		assert!(matches!(err, DriverError::Native { op: "IAudioRenderClient::ReleaseBuffer", .. }));
		assert_eq!(endpoint.padding(), Some(0));
	}

	#[test]
	fn prime_is_silent() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Shared, RefTime::ZERO);
		let mut renderer = client.render_client().unwrap();

		prime(&mut renderer, 960).unwrap();
		assert_eq!(endpoint.silent_frames(), 960);
		assert!(endpoint.committed().is_empty());
		assert_eq!(available(&client, 960 * 4, 4).unwrap(), 0);
	}

	#[test]
	fn shared_available() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Shared, RefTime::ZERO);
		let mut renderer = client.render_client().unwrap();

		assert_eq!(available(&client, 3840, 4).unwrap(), 3840);
		flush(&mut renderer, 4, &pcm(600)).unwrap();
		assert_eq!(available(&client, 3840, 4).unwrap(), 1440);

		// One period (480 frames) played.
		endpoint.tick();
		assert_eq!(available(&client, 3840, 4).unwrap(), 3360);

		endpoint.set_fault(Fault::Padding, true);
		assert!(available(&client, 3840, 4).is_err());
	}

	#[test]
	fn transport_per_mode() {
		assert!(matches!(Transport::new(ShareMode::Shared, 64), Ok(Transport::Shared)));
		match Transport::new(ShareMode::Exclusive, 64).unwrap() {
			Transport::Exclusive(s) => assert_eq!(s.available(), 64),
			Transport::Shared => panic!("expected staging"),
		}
	}
}
