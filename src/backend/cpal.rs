//! `cpal` engine.
//!
//! This file implements the [`crate::engine`] traits on top
//! of the default `cpal` host.
//!
//! `cpal` owns its own audio thread and pulls samples with a callback,
//! so the "engine buffer" here is a lock-free byte queue sized like a
//! shared-mode engine buffer. The callback drains it and signals the
//! write event, which gives the driver the same pacing it would get
//! from a native engine.
//!
//! There is no exclusive mode, it is always reported as not allowed.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::EngineError,
	engine::{
		Enumerator,Device,Client,Renderer,
		Event,RefTime,StreamFlags,BufferFlags,
	},
	format::{SampleFormat,ShareMode,WaveFormat},
	macros::{trace2,debug2,warn2},
	backend::frames::pull,
};
use crossbeam::queue::ArrayQueue;
use cpal::traits::{DeviceTrait,StreamTrait,HostTrait};
use std::sync::Arc;

//----------------------------------------------------------------------------------------------- Constants
const E_FAIL: EngineError = EngineError::Other(0x8000_4005);

/// `cpal` doesn't expose the host's period, assume a typical 10ms/3ms.
const DEFAULT_PERIOD: RefTime = RefTime(100_000);
const MIN_PERIOD: RefTime = RefTime(30_000);

//----------------------------------------------------------------------------------------------- CpalEnumerator
/// Enumerates the output devices of the default `cpal` host.
pub struct CpalEnumerator {
	host: cpal::Host,
}

impl CpalEnumerator {
	#[must_use]
	/// Use [`cpal::default_host`].
	pub fn new() -> Self {
		Self { host: cpal::default_host() }
	}
}

impl Default for CpalEnumerator {
	fn default() -> Self {
		Self::new()
	}
}

impl Enumerator for CpalEnumerator {
	type Device = CpalEndpoint;

	fn active_endpoints(&self) -> Result<Vec<Result<CpalEndpoint, EngineError>>, EngineError> {
		Ok(self.host
			.output_devices()?
			.map(|device| Ok(CpalEndpoint { device }))
			.collect())
	}

	fn default_endpoint(&self) -> Result<CpalEndpoint, EngineError> {
		self.host
			.default_output_device()
			.map(|device| CpalEndpoint { device })
			.ok_or(EngineError::NotFound)
	}
}

//----------------------------------------------------------------------------------------------- CpalEndpoint
/// A `cpal` output device.
///
/// `cpal` has no stable device identifier, the name doubles as the id.
#[derive(Clone)]
pub struct CpalEndpoint {
	device: cpal::Device,
}

impl Device for CpalEndpoint {
	type Client = CpalClient;

	fn id(&self) -> Result<String, EngineError> {
		Ok(self.device.name()?)
	}

	fn friendly_name(&self) -> Result<String, EngineError> {
		Ok(self.device.name()?)
	}

	fn activate(&self) -> Result<CpalClient, EngineError> {
		Ok(CpalClient {
			device: self.device.clone(),
			session: None,
			event: None,
			stream: None,
		})
	}
}

//----------------------------------------------------------------------------------------------- CpalClient
/// What `initialize()` settled on.
struct Session {
	format: WaveFormat,
	buffer_frames: u32,
	queue: Arc<ArrayQueue<u8>>,
}

/// Session handle of a [`CpalEndpoint`].
pub struct CpalClient {
	device: cpal::Device,
	session: Option<Session>,
	event: Option<Event>,
	stream: Option<cpal::Stream>,
}

impl CpalClient {
	fn session(&self) -> Result<&Session, EngineError> {
		self.session.as_ref().ok_or(EngineError::NotInitialized)
	}

	fn supports(&self, format: &WaveFormat) -> Result<bool, EngineError> {
		let wanted = match format.sample_format {
			SampleFormat::Float32 => cpal::SampleFormat::F32,
			SampleFormat::Int16   => cpal::SampleFormat::I16,
		};

		Ok(self.device.supported_output_configs()?.any(|c| {
			c.channels() == format.channels()
				&& c.sample_format() == wanted
				&& c.min_sample_rate().0 <= format.rate
				&& c.max_sample_rate().0 >= format.rate
		}))
	}
}

impl Client for CpalClient {
	type Renderer = CpalRenderer;

	fn initialize(
		&mut self,
		mode: ShareMode,
		_flags: StreamFlags,
		buffer_duration: RefTime,
		_periodicity: RefTime,
		format: &WaveFormat,
	) -> Result<(), EngineError> {
		if self.session.is_some() {
			return Err(EngineError::AlreadyInitialized);
		}
		if mode.is_exclusive() {
			return Err(EngineError::ExclusiveModeNotAllowed);
		}
		if !self.supports(format)? {
			return Err(EngineError::UnsupportedFormat);
		}

		let duration = buffer_duration.max(RefTime(DEFAULT_PERIOD.0 * 2));
		let buffer_frames = duration.to_frames(format.rate).max(1);
		debug2!("CpalClient - initialize(): {format}, {buffer_frames} frames");

		self.session = Some(Session {
			format: *format,
			buffer_frames,
			queue: Arc::new(ArrayQueue::new(buffer_frames as usize * format.block_align())),
		});

		Ok(())
	}

	fn device_period(&self) -> Result<(RefTime, RefTime), EngineError> {
		Ok((DEFAULT_PERIOD, MIN_PERIOD))
	}

	fn buffer_size(&self) -> Result<u32, EngineError> {
		Ok(self.session()?.buffer_frames)
	}

	fn stream_latency(&self) -> Result<RefTime, EngineError> {
		let session = self.session()?;
		Ok(RefTime::from_frames(session.buffer_frames, session.format.rate))
	}

	fn current_padding(&self) -> Result<u32, EngineError> {
		let session = self.session()?;
		Ok((session.queue.len() / session.format.block_align()) as u32)
	}

	fn set_event_handle(&mut self, event: &Event) -> Result<(), EngineError> {
		self.session()?;
		self.event = Some(event.clone());
		Ok(())
	}

	fn render_client(&mut self) -> Result<CpalRenderer, EngineError> {
		let session = self.session()?;
		let format = session.format;
		let queue = Arc::clone(&session.queue);

		if self.stream.is_none() {
			let event = self.event.clone().unwrap_or_default();
			let stream = build_stream(&self.device, &format, Arc::clone(&queue), event)?;
			// Some hosts start streams immediately.
			drop(stream.pause());
			self.stream = Some(stream);
		}

		Ok(CpalRenderer {
			queue,
			frame_size: format.block_align(),
			scratch: Vec::new(),
			pending: None,
		})
	}

	fn start(&mut self) -> Result<(), EngineError> {
		match self.stream.as_ref() {
			Some(stream) => Ok(stream.play()?),
			None => Err(EngineError::NotInitialized),
		}
	}

	fn stop(&mut self) -> Result<(), EngineError> {
		match self.stream.as_ref() {
			Some(stream) => Ok(stream.pause()?),
			None => Err(EngineError::NotInitialized),
		}
	}
}

//----------------------------------------------------------------------------------------------- Stream
fn build_stream(
	device: &cpal::Device,
	format: &WaveFormat,
	queue: Arc<ArrayQueue<u8>>,
	event: Event,
) -> Result<cpal::Stream, EngineError> {
	let config = cpal::StreamConfig {
		channels: format.channels(),
		sample_rate: cpal::SampleRate(format.rate),
		buffer_size: cpal::BufferSize::Default,
	};

	let channels = usize::from(format.channels());

	let error_callback = |error: cpal::StreamError| {
		warn2!("CpalClient - stream error: {error}");
	};

	let stream = match format.sample_format {
		SampleFormat::Float32 => device.build_output_stream(
			&config,
			move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
				trace2!("CpalClient - data callback, output.len(): {}", output.len());
				pull::<f32, 4>(&queue, output, channels, 0.0, f32::from_le_bytes);
				event.signal();
			},
			error_callback,
			None,
		),
		SampleFormat::Int16 => device.build_output_stream(
			&config,
			move |output: &mut [i16], _: &cpal::OutputCallbackInfo| {
				trace2!("CpalClient - data callback, output.len(): {}", output.len());
				pull::<i16, 2>(&queue, output, channels, 0, i16::from_le_bytes);
				event.signal();
			},
			error_callback,
			None,
		),
	}?;

	Ok(stream)
}

//----------------------------------------------------------------------------------------------- CpalRenderer
/// Render interface of a [`CpalClient`].
pub struct CpalRenderer {
	queue: Arc<ArrayQueue<u8>>,
	frame_size: usize,
	scratch: Vec<u8>,
	pending: Option<u32>,
}

impl Renderer for CpalRenderer {
	fn get_buffer(&mut self, frames: u32) -> Result<&mut [u8], EngineError> {
		if self.pending.is_some() {
			return Err(EngineError::OutOfOrder);
		}

		let bytes = frames as usize * self.frame_size;
		if self.queue.len() + bytes > self.queue.capacity() {
			return Err(EngineError::BufferTooLarge);
		}

		self.scratch.clear();
		self.scratch.resize(bytes, 0);
		self.pending = Some(frames);
		Ok(self.scratch.as_mut_slice())
	}

	fn release_buffer(&mut self, frames: u32, flags: BufferFlags) -> Result<(), EngineError> {
		match self.pending.take() {
			None => return Err(EngineError::OutOfOrder),
			Some(p) if frames > p => return Err(EngineError::InvalidSize),
			Some(_) => (),
		}

		let bytes = frames as usize * self.frame_size;
		if flags == BufferFlags::Silent {
			self.scratch[..bytes].fill(0);
		}

		for b in &self.scratch[..bytes] {
			// Space was checked in `get_buffer()`,
			// and the callback only ever frees more.
			let _ = self.queue.push(*b);
		}

		Ok(())
	}
}

//----------------------------------------------------------------------------------------------- Error re-map
impl From<cpal::DevicesError> for EngineError {
	fn from(error: cpal::DevicesError) -> Self {
		warn2!("CpalEnumerator - {error}");
		E_FAIL
	}
}

impl From<cpal::DeviceNameError> for EngineError {
	fn from(error: cpal::DeviceNameError) -> Self {
		warn2!("CpalEndpoint - {error}");
		E_FAIL
	}
}

impl From<cpal::SupportedStreamConfigsError> for EngineError {
	fn from(error: cpal::SupportedStreamConfigsError) -> Self {
		use cpal::SupportedStreamConfigsError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceInvalidated,
			error => {
				warn2!("CpalClient - {error}");
				E_FAIL
			},
		}
	}
}

impl From<cpal::BuildStreamError> for EngineError {
	fn from(error: cpal::BuildStreamError) -> Self {
		use cpal::BuildStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceInvalidated,
			E::StreamConfigNotSupported => Self::UnsupportedFormat,
			error => {
				warn2!("CpalClient - {error}");
				E_FAIL
			},
		}
	}
}

impl From<cpal::PlayStreamError> for EngineError {
	fn from(error: cpal::PlayStreamError) -> Self {
		use cpal::PlayStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceInvalidated,
			error => {
				warn2!("CpalClient - {error}");
				E_FAIL
			},
		}
	}
}

impl From<cpal::PauseStreamError> for EngineError {
	fn from(error: cpal::PauseStreamError) -> Self {
		use cpal::PauseStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceInvalidated,
			error => {
				warn2!("CpalClient - {error}");
				E_FAIL
			},
		}
	}
}
