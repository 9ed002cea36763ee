//! Dummy audio engine.
//!
//! This file implements the [`crate::engine`] traits with a fake,
//! in-process engine that doesn't actually connect to anything.
//!
//! Functionally, it should behave the same as a real engine:
//! formats are accepted or rejected per mode, the engine buffer fills
//! up as frames are committed, and (once started) a clock thread drains
//! one device period at a time and signals the write event.
//!
//! Everything about the "hardware" is configurable and observable
//! through [`DummyEndpoint`], which is used for testing purposes.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::EngineError,
	engine::{
		Enumerator,Device,Client,Renderer,
		Event,RefTime,StreamFlags,BufferFlags,
	},
	format::{SampleFormat,ShareMode,WaveFormat},
	macros::{trace2,warn2},
};
use parking_lot::Mutex;
use std::{
	thread::{JoinHandle,sleep},
	time::Duration,
	sync::{
		Arc,
		atomic::{AtomicBool,Ordering},
	},
};

//----------------------------------------------------------------------------------------------- Constants
/// Generic native failure code used for injected faults.
const E_FAIL: EngineError = EngineError::Other(0x8000_4005);

/// Native code for an exclusive-mode period below the device minimum.
const E_INVALID_DEVICE_PERIOD: EngineError = EngineError::Other(0x8889_0020);

//----------------------------------------------------------------------------------------------- ExclusiveAccess
/// Whether the simulated device grants exclusive mode.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub enum ExclusiveAccess {
	#[default]
	/// Exclusive mode works.
	Available,
	/// Another client owns the device.
	InUse,
	/// Exclusive mode is disabled for the device.
	Disabled,
}

//----------------------------------------------------------------------------------------------- Fault
/// A native call that can be made to fail.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum Fault {
	/// [`Device::activate`]
	Activate,
	/// [`Client::device_period`]
	DevicePeriod,
	/// [`Client::buffer_size`]
	BufferSize,
	/// [`Client::stream_latency`]
	StreamLatency,
	/// [`Client::current_padding`]
	Padding,
	/// [`Client::set_event_handle`]
	SetEventHandle,
	/// [`Client::render_client`]
	RenderClient,
	/// [`Client::start`]
	Start,
	/// [`Client::stop`]
	Stop,
	/// [`Renderer::get_buffer`]
	GetBuffer,
	/// [`Renderer::release_buffer`]
	ReleaseBuffer,
}

//----------------------------------------------------------------------------------------------- Inner
#[derive(Debug)]
struct Inner {
	id:   String,
	name: String,
	broken_id: bool,

	shared:    Vec<WaveFormat>,
	exclusive: Vec<WaveFormat>,
	exclusive_access: ExclusiveAccess,

	default_period: RefTime,
	min_period:     RefTime,
	alignment:      Option<u32>,
	stream_latency: Option<RefTime>,

	// How many upcoming `activate()` calls hand out an already used handle.
	stale_activations: u32,
	faults: Vec<Fault>,

	activations: usize,
	attempts: Vec<(ShareMode, WaveFormat)>,
	stream: Option<Stream>,
}

/// The single stream an endpoint plays.
#[derive(Debug)]
struct Stream {
	mode:          ShareMode,
	format:        WaveFormat,
	buffer_frames: u32,
	period_frames: u32,
	padding:       u32,
	event:         Option<Event>,
	running:       bool,
	committed:     Vec<u8>,
	silent_frames: u64,
}

impl Inner {
	fn fault(&self, fault: Fault) -> Result<(), EngineError> {
		if self.faults.contains(&fault) {
			trace2!("DummyEngine - injected fault: {fault:?}");
			Err(E_FAIL)
		} else {
			Ok(())
		}
	}

	fn stream(&mut self) -> Result<&mut Stream, EngineError> {
		self.stream.as_mut().ok_or(EngineError::NotInitialized)
	}
}

//----------------------------------------------------------------------------------------------- DummyEndpoint
/// A simulated output endpoint.
///
/// Clones share the same endpoint, so a test keeps one clone
/// around to configure, drive and inspect what the driver does.
///
/// By default it accepts `float`/`pcm` at 48kHz in shared mode,
/// `float`/`pcm` at 44.1/48/96kHz in exclusive mode, has a 10ms
/// default and 3ms minimum period, and reports 10ms of stream latency.
///
/// ```rust
/// # use wasapi_out::{backend::dummy::*, engine::*, format::*};
/// let endpoint = DummyEndpoint::new("id", "Speakers")
/// 	.shared_formats([WaveFormat::new(SampleFormat::Int16, 44_100)])
/// 	.exclusive_access(ExclusiveAccess::Disabled);
///
/// assert_eq!(endpoint.id().unwrap(), "id");
/// assert_eq!(endpoint.friendly_name().unwrap(), "Speakers");
/// ```
#[derive(Clone,Debug)]
pub struct DummyEndpoint(Arc<Mutex<Inner>>);

impl DummyEndpoint {
	#[must_use]
	/// Create an endpoint with the default "hardware".
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		let shared = [SampleFormat::Float32, SampleFormat::Int16]
			.into_iter()
			.map(|f| WaveFormat::new(f, 48_000))
			.collect();

		let exclusive = [SampleFormat::Float32, SampleFormat::Int16]
			.into_iter()
			.flat_map(|f| [44_100, 48_000, 96_000].map(|r| WaveFormat::new(f, r)))
			.collect();

		Self(Arc::new(Mutex::new(Inner {
			id: id.into(),
			name: name.into(),
			broken_id: false,
			shared,
			exclusive,
			exclusive_access: ExclusiveAccess::Available,
			default_period: RefTime(100_000),
			min_period: RefTime(30_000),
			alignment: None,
			stream_latency: Some(RefTime(100_000)),
			stale_activations: 0,
			faults: Vec::new(),
			activations: 0,
			attempts: Vec::new(),
			stream: None,
		})))
	}

	//------------------------------------------ Builder
	#[must_use]
	/// Formats accepted in shared mode (empty = shared mode unsupported).
	pub fn shared_formats(self, formats: impl IntoIterator<Item = WaveFormat>) -> Self {
		self.0.lock().shared = formats.into_iter().collect();
		self
	}

	#[must_use]
	/// Formats accepted in exclusive mode (empty = exclusive mode unsupported).
	pub fn exclusive_formats(self, formats: impl IntoIterator<Item = WaveFormat>) -> Self {
		self.0.lock().exclusive = formats.into_iter().collect();
		self
	}

	#[must_use]
	/// Set whether exclusive mode is granted.
	pub fn exclusive_access(self, access: ExclusiveAccess) -> Self {
		self.0.lock().exclusive_access = access;
		self
	}

	#[must_use]
	/// Set the `(default, minimum)` device period.
	pub fn periods(self, default: RefTime, minimum: RefTime) -> Self {
		let mut inner = self.0.lock();
		inner.default_period = default;
		inner.min_period = minimum;
		drop(inner);
		self
	}

	#[must_use]
	/// Require exclusive-mode buffers to be a multiple of `frames`.
	pub fn alignment(self, frames: u32) -> Self {
		self.0.lock().alignment = Some(frames).filter(|f| *f != 0);
		self
	}

	#[must_use]
	/// Stream latency to report, `None` makes the query fail.
	pub fn stream_latency(self, latency: Option<RefTime>) -> Self {
		self.0.lock().stream_latency = latency;
		self
	}

	#[must_use]
	/// Make [`Device::id`] fail.
	pub fn broken_id(self) -> Self {
		self.0.lock().broken_id = true;
		self
	}

	#[must_use]
	/// The next `n` activations hand out a handle that was already initialized.
	pub fn stale_activations(self, n: u32) -> Self {
		self.0.lock().stale_activations = n;
		self
	}

	//------------------------------------------ Runtime control
	/// Make a native call fail (`true`) or work again (`false`).
	pub fn set_fault(&self, fault: Fault, enabled: bool) {
		let mut inner = self.0.lock();
		inner.faults.retain(|f| *f != fault);
		if enabled {
			inner.faults.push(fault);
		}
	}

	/// Play one device period.
	///
	/// Shared mode drains one period of frames, exclusive mode drains
	/// the whole buffer. Either way, the write event is signaled.
	pub fn tick(&self) {
		let mut inner = self.0.lock();
		let Some(stream) = inner.stream.as_mut() else {
			return;
		};

		stream.padding = match stream.mode {
			ShareMode::Shared => stream.padding.saturating_sub(stream.period_frames),
			ShareMode::Exclusive => 0,
		};

		if let Some(event) = stream.event.as_ref() {
			event.signal();
		}
	}

	//------------------------------------------ Inspection
	#[must_use]
	/// Every `initialize()` call made on any handle of this endpoint, in order.
	pub fn attempts(&self) -> Vec<(ShareMode, WaveFormat)> {
		self.0.lock().attempts.clone()
	}

	#[must_use]
	/// How many handles were activated.
	pub fn activations(&self) -> usize {
		self.0.lock().activations
	}

	#[must_use]
	/// Mode of the initialized stream.
	pub fn stream_mode(&self) -> Option<ShareMode> {
		self.0.lock().stream.as_ref().map(|s| s.mode)
	}

	#[must_use]
	/// Format of the initialized stream.
	pub fn stream_format(&self) -> Option<WaveFormat> {
		self.0.lock().stream.as_ref().map(|s| s.format)
	}

	#[must_use]
	/// Engine buffer size of the initialized stream, in frames.
	pub fn buffer_frames(&self) -> Option<u32> {
		self.0.lock().stream.as_ref().map(|s| s.buffer_frames)
	}

	#[must_use]
	/// Frames currently queued.
	pub fn padding(&self) -> Option<u32> {
		self.0.lock().stream.as_ref().map(|s| s.padding)
	}

	#[must_use]
	/// Every non-silent byte committed so far, in commit order.
	pub fn committed(&self) -> Vec<u8> {
		self.0.lock().stream.as_ref().map(|s| s.committed.clone()).unwrap_or_default()
	}

	#[must_use]
	/// Frames committed as silence.
	pub fn silent_frames(&self) -> u64 {
		self.0.lock().stream.as_ref().map_or(0, |s| s.silent_frames)
	}

	#[must_use]
	/// Is the stream clock running?
	pub fn is_running(&self) -> bool {
		self.0.lock().stream.as_ref().map_or(false, |s| s.running)
	}

	#[must_use]
	/// Is a write event bound to the stream?
	pub fn has_event(&self) -> bool {
		self.0.lock().stream.as_ref().map_or(false, |s| s.event.is_some())
	}
}

impl Device for DummyEndpoint {
	type Client = DummyClient;

	fn id(&self) -> Result<String, EngineError> {
		let inner = self.0.lock();
		if inner.broken_id {
			Err(E_FAIL)
		} else {
			Ok(inner.id.clone())
		}
	}

	fn friendly_name(&self) -> Result<String, EngineError> {
		Ok(self.0.lock().name.clone())
	}

	fn activate(&self) -> Result<DummyClient, EngineError> {
		let mut inner = self.0.lock();
		inner.fault(Fault::Activate)?;
		inner.activations += 1;

		let state = if inner.stale_activations > 0 {
			inner.stale_activations -= 1;
			ClientState::Unusable
		} else {
			ClientState::Fresh
		};

		Ok(DummyClient {
			endpoint: self.clone(),
			state,
			aligned_frames: None,
			clock: None,
		})
	}
}

//----------------------------------------------------------------------------------------------- DummyEnumerator
/// A simulated endpoint enumerator.
///
/// ```rust
/// # use wasapi_out::{backend::dummy::*, engine::*};
/// let enumerator = DummyEnumerator::new()
/// 	.with_endpoint(DummyEndpoint::new("a", "A"))
/// 	.with_broken_endpoint()
/// 	.with_default(DummyEndpoint::new("b", "B"));
///
/// let endpoints = enumerator.active_endpoints().unwrap();
/// assert_eq!(endpoints.len(), 3);
/// assert!(endpoints[1].is_err());
/// assert_eq!(enumerator.default_endpoint().unwrap().id().unwrap(), "b");
/// ```
#[derive(Clone,Debug,Default)]
pub struct DummyEnumerator {
	// `None` is a candidate that fails to be retrieved.
	endpoints: Vec<Option<DummyEndpoint>>,
	default: Option<DummyEndpoint>,
	failing: bool,
}

impl DummyEnumerator {
	#[must_use]
	/// No endpoints at all.
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	/// Add an active endpoint.
	pub fn with_endpoint(mut self, endpoint: DummyEndpoint) -> Self {
		self.endpoints.push(Some(endpoint));
		self
	}

	#[must_use]
	/// Add an active endpoint and make it the default.
	pub fn with_default(mut self, endpoint: DummyEndpoint) -> Self {
		self.endpoints.push(Some(endpoint.clone()));
		self.default = Some(endpoint);
		self
	}

	#[must_use]
	/// Add a candidate that cannot be retrieved.
	pub fn with_broken_endpoint(mut self) -> Self {
		self.endpoints.push(None);
		self
	}

	#[must_use]
	/// Make enumeration itself fail.
	pub fn failing(mut self) -> Self {
		self.failing = true;
		self
	}
}

impl Enumerator for DummyEnumerator {
	type Device = DummyEndpoint;

	fn active_endpoints(&self) -> Result<Vec<Result<DummyEndpoint, EngineError>>, EngineError> {
		if self.failing {
			return Err(E_FAIL);
		}

		Ok(self.endpoints
			.iter()
			.map(|e| e.clone().ok_or(EngineError::DeviceInvalidated))
			.collect())
	}

	fn default_endpoint(&self) -> Result<DummyEndpoint, EngineError> {
		if self.failing {
			return Err(E_FAIL);
		}

		self.default.clone().ok_or(EngineError::NotFound)
	}
}

//----------------------------------------------------------------------------------------------- DummyClient
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
enum ClientState {
	Fresh,
	// Already initialized elsewhere, or poisoned by a failed initialization.
	Unusable,
	Initialized,
}

/// Session handle of a [`DummyEndpoint`].
#[derive(Debug)]
pub struct DummyClient {
	endpoint: DummyEndpoint,
	state: ClientState,
	aligned_frames: Option<u32>,
	clock: Option<Clock>,
}

impl DummyClient {
	fn initialized(&self) -> Result<(), EngineError> {
		if self.state == ClientState::Initialized {
			Ok(())
		} else {
			Err(EngineError::NotInitialized)
		}
	}
}

impl Client for DummyClient {
	type Renderer = DummyRenderer;

	fn initialize(
		&mut self,
		mode: ShareMode,
		_flags: StreamFlags,
		buffer_duration: RefTime,
		_periodicity: RefTime,
		format: &WaveFormat,
	) -> Result<(), EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.attempts.push((mode, *format));

		if self.state != ClientState::Fresh {
			return Err(EngineError::AlreadyInitialized);
		}

		let (buffer_frames, period_frames) = match mode {
			ShareMode::Shared => {
				if !inner.shared.contains(format) {
					return Err(EngineError::UnsupportedFormat);
				}

				let period = inner.default_period;
				let duration = buffer_duration.max(RefTime(period.0 * 2));
				(duration.to_frames(format.rate), period.to_frames(format.rate))
			},

			ShareMode::Exclusive => {
				match inner.exclusive_access {
					ExclusiveAccess::Available => (),
					ExclusiveAccess::InUse => return Err(EngineError::DeviceInUse),
					ExclusiveAccess::Disabled => return Err(EngineError::ExclusiveModeNotAllowed),
				}

				if !inner.exclusive.contains(format) {
					return Err(EngineError::UnsupportedFormat);
				}

				if buffer_duration < inner.min_period {
					return Err(E_INVALID_DEVICE_PERIOD);
				}

				let frames = buffer_duration.to_frames(format.rate);
				if let Some(alignment) = inner.alignment {
					if frames % alignment != 0 {
						self.aligned_frames = Some(((frames + alignment - 1) / alignment) * alignment);
						self.state = ClientState::Unusable;
						return Err(EngineError::BufferSizeNotAligned);
					}
				}

				(frames, frames)
			},
		};

		inner.stream = Some(Stream {
			mode,
			format: *format,
			buffer_frames,
			period_frames,
			padding: 0,
			event: None,
			running: false,
			committed: Vec::new(),
			silent_frames: 0,
		});
		self.state = ClientState::Initialized;

		Ok(())
	}

	fn device_period(&self) -> Result<(RefTime, RefTime), EngineError> {
		let inner = self.endpoint.0.lock();
		inner.fault(Fault::DevicePeriod)?;
		Ok((inner.default_period, inner.min_period))
	}

	fn buffer_size(&self) -> Result<u32, EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::BufferSize)?;

		if let Some(aligned) = self.aligned_frames {
			return Ok(aligned);
		}

		self.initialized()?;
		Ok(inner.stream()?.buffer_frames)
	}

	fn stream_latency(&self) -> Result<RefTime, EngineError> {
		let inner = self.endpoint.0.lock();
		inner.fault(Fault::StreamLatency)?;
		self.initialized()?;
		inner.stream_latency.ok_or(E_FAIL)
	}

	fn current_padding(&self) -> Result<u32, EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::Padding)?;
		self.initialized()?;
		Ok(inner.stream()?.padding)
	}

	fn set_event_handle(&mut self, event: &Event) -> Result<(), EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::SetEventHandle)?;
		self.initialized()?;
		inner.stream()?.event = Some(event.clone());
		Ok(())
	}

	fn render_client(&mut self) -> Result<DummyRenderer, EngineError> {
		let inner = self.endpoint.0.lock();
		inner.fault(Fault::RenderClient)?;
		self.initialized()?;

		Ok(DummyRenderer {
			endpoint: self.endpoint.clone(),
			scratch: Vec::new(),
			pending: None,
		})
	}

	fn start(&mut self) -> Result<(), EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::Start)?;
		self.initialized()?;

		let stream = inner.stream()?;
		if stream.running {
			return Err(EngineError::NotStopped);
		}
		stream.running = true;

		let period = RefTime::from_frames(stream.period_frames, stream.format.rate).as_duration();
		drop(inner);

		self.clock = Some(Clock::spawn(self.endpoint.clone(), period));
		Ok(())
	}

	fn stop(&mut self) -> Result<(), EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::Stop)?;
		self.initialized()?;
		inner.stream()?.running = false;
		drop(inner);

		// Not under the lock, the clock thread needs it to finish its tick.
		self.clock = None;
		Ok(())
	}
}

impl Drop for DummyClient {
	fn drop(&mut self) {
		self.clock = None;

		if self.state == ClientState::Initialized {
			if let Some(stream) = self.endpoint.0.lock().stream.as_mut() {
				stream.running = false;
				stream.event = None;
			}
		}
	}
}

//----------------------------------------------------------------------------------------------- DummyRenderer
/// Render interface of a [`DummyClient`].
#[derive(Debug)]
pub struct DummyRenderer {
	endpoint: DummyEndpoint,
	scratch: Vec<u8>,
	pending: Option<u32>,
}

impl Renderer for DummyRenderer {
	fn get_buffer(&mut self, frames: u32) -> Result<&mut [u8], EngineError> {
		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::GetBuffer)?;

		if self.pending.is_some() {
			return Err(EngineError::OutOfOrder);
		}

		let stream = inner.stream()?;
		if u64::from(stream.padding) + u64::from(frames) > u64::from(stream.buffer_frames) {
			return Err(EngineError::BufferTooLarge);
		}
		let frame_size = stream.format.block_align();
		drop(inner);

		self.scratch.clear();
		self.scratch.resize(frames as usize * frame_size, 0);
		self.pending = Some(frames);

		Ok(self.scratch.as_mut_slice())
	}

	fn release_buffer(&mut self, frames: u32, flags: BufferFlags) -> Result<(), EngineError> {
		let pending = self.pending.take();

		let mut inner = self.endpoint.0.lock();
		inner.fault(Fault::ReleaseBuffer)?;

		match pending {
			None => return Err(EngineError::OutOfOrder),
			Some(p) if frames > p => return Err(EngineError::InvalidSize),
			Some(_) => (),
		}

		let stream = inner.stream()?;
		let bytes = frames as usize * stream.format.block_align();
		stream.padding += frames;

		match flags {
			BufferFlags::Silent => stream.silent_frames += u64::from(frames),
			BufferFlags::None => stream.committed.extend_from_slice(&self.scratch[..bytes]),
		}

		Ok(())
	}
}

//----------------------------------------------------------------------------------------------- Clock
/// The dummy "audio thread", plays one period, sleeps, repeat.
#[derive(Debug)]
struct Clock {
	running: Arc<AtomicBool>,
	handle: Option<JoinHandle<()>>,
}

impl Clock {
	fn spawn(endpoint: DummyEndpoint, period: Duration) -> Self {
		let running = Arc::new(AtomicBool::new(true));
		let running_clone = Arc::clone(&running);

		let spawned = std::thread::Builder::new()
			.name("DummyClock".into())
			.spawn(move || {
				trace2!("DummyClock - period: {period:?}");
				while running_clone.load(Ordering::Acquire) {
					// Simulate 1 period of playback time.
					sleep(period);
					if running_clone.load(Ordering::Acquire) {
						endpoint.tick();
					}
				}
			});

		let handle = match spawned {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn2!("DummyClock - failed to spawn: {e}");
				None
			},
		};

		Self { running, handle }
	}
}

impl Drop for Clock {
	fn drop(&mut self) {
		self.running.store(false, Ordering::Release);
		if let Some(handle) = self.handle.take() {
			drop(handle.join());
		}
	}
}

//----------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	const PCM_48: WaveFormat = WaveFormat::new(SampleFormat::Int16, 48_000);

	fn shared_client(endpoint: &DummyEndpoint) -> DummyClient {
		let mut client = endpoint.activate().unwrap();
		client.initialize(ShareMode::Shared, StreamFlags::EVENT_CALLBACK_NO_PERSIST, RefTime::ZERO, RefTime::ZERO, &PCM_48).unwrap();
		client
	}

	#[test]
	fn initialize_once() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = shared_client(&endpoint);
		assert_eq!(
			client.initialize(ShareMode::Shared, StreamFlags::default(), RefTime::ZERO, RefTime::ZERO, &PCM_48),
			Err(EngineError::AlreadyInitialized),
		);
	}

	#[test]
	fn shared_buffer_is_two_periods() {
		let endpoint = DummyEndpoint::new("id", "name");
		let client = shared_client(&endpoint);
		assert_eq!(client.buffer_size(), Ok(960));
		assert_eq!(endpoint.buffer_frames(), Some(960));
	}

	#[test]
	fn get_release_tick() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = shared_client(&endpoint);
		let event = Event::new();
		client.set_event_handle(&event).unwrap();
		let mut renderer = client.render_client().unwrap();

		let dest = renderer.get_buffer(2).unwrap();
		assert_eq!(dest.len(), 8);
		dest.copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
		renderer.release_buffer(2, BufferFlags::None).unwrap();

		assert_eq!(client.current_padding(), Ok(2));
		assert_eq!(endpoint.committed(), [1, 2, 3, 4, 5, 6, 7, 8]);

		endpoint.tick();
		assert_eq!(client.current_padding(), Ok(0));
		assert!(event.is_signaled());
	}

	#[test]
	fn buffer_too_large() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = shared_client(&endpoint);
		let mut renderer = client.render_client().unwrap();

		assert_eq!(renderer.get_buffer(961).err(), Some(EngineError::BufferTooLarge));
		renderer.get_buffer(960).unwrap();
		renderer.release_buffer(960, BufferFlags::Silent).unwrap();
		assert_eq!(renderer.get_buffer(1).err(), Some(EngineError::BufferTooLarge));
		assert_eq!(endpoint.silent_frames(), 960);
		assert!(endpoint.committed().is_empty());
	}

	#[test]
	fn out_of_order() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = shared_client(&endpoint);
		let mut renderer = client.render_client().unwrap();

		assert_eq!(renderer.release_buffer(1, BufferFlags::None), Err(EngineError::OutOfOrder));
		renderer.get_buffer(1).unwrap();
		assert_eq!(renderer.get_buffer(1).err(), Some(EngineError::OutOfOrder));
	}

	#[test]
	fn unaligned_exclusive() {
		let endpoint = DummyEndpoint::new("id", "name").alignment(64);
		let mut client = endpoint.activate().unwrap();

		// 10ms @ 48kHz = 480 frames, not a multiple of 64.
		let duration = RefTime(100_000);
		assert_eq!(
			client.initialize(ShareMode::Exclusive, StreamFlags::default(), duration, duration, &PCM_48),
			Err(EngineError::BufferSizeNotAligned),
		);
		assert_eq!(client.buffer_size(), Ok(512));
	}

	#[test]
	fn stale_activation() {
		let endpoint = DummyEndpoint::new("id", "name").stale_activations(1);
		let mut stale = endpoint.activate().unwrap();
		assert_eq!(
			stale.initialize(ShareMode::Shared, StreamFlags::default(), RefTime::ZERO, RefTime::ZERO, &PCM_48),
			Err(EngineError::AlreadyInitialized),
		);
		drop(shared_client(&endpoint));
		assert_eq!(endpoint.activations(), 2);
	}

	#[test]
	fn clock_drains_and_signals() {
		let endpoint = DummyEndpoint::new("id", "name").periods(RefTime(10_000), RefTime(10_000));
		let mut client = shared_client(&endpoint);
		let event = Event::new();
		client.set_event_handle(&event).unwrap();

		client.start().unwrap();
		assert_eq!(client.start(), Err(EngineError::NotStopped));
		assert!(endpoint.is_running());
		assert_eq!(event.wait_timeout(Duration::from_secs(5)), crate::engine::WaitResult::Signaled);

		client.stop().unwrap();
		client.stop().unwrap();
		assert!(!endpoint.is_running());
	}

	#[test]
	fn faults() {
		let endpoint = DummyEndpoint::new("id", "name");
		endpoint.set_fault(Fault::Activate, true);
		assert!(endpoint.activate().is_err());
		endpoint.set_fault(Fault::Activate, false);
		assert!(endpoint.activate().is_ok());
	}
}
