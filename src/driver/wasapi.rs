//! The `Wasapi` driver.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::Config,
	device,
	driver::{
		AudioDriver,NAME,
		teardown::EventGuard,
		write,
	},
	engine::{Enumerator,Device,Client,Event},
	error::DriverError,
	format::{ShareMode,WaveFormat},
	macros::{debug2,error2,info2,native_err,native_warn},
	session,
	transport::{self,Transport},
};

//---------------------------------------------------------------------------------------------------- Types
type ClientOf<E> = <<E as Enumerator>::Device as Device>::Client;
type RendererOf<E> = <ClientOf<E> as Client>::Renderer;

//---------------------------------------------------------------------------------------------------- Wasapi
/// An open output stream.
///
/// Created by [`AudioDriver::open`], closed by [`AudioDriver::close`] or by dropping it.
///
/// Closing stops the stream if it is running, then releases the
/// staging buffer, the render interface, the client, the device,
/// and lastly the write event, in that order.
pub struct Wasapi<E: Enumerator> {
	// Field order is release order.
	transport: Transport,
	renderer: RendererOf<E>,
	client: ClientOf<E>,
	#[allow(dead_code)] // held for the lifetime of the stream
	device: E::Device,
	event: EventGuard,

	format: WaveFormat,
	mode: ShareMode,
	latency_ms: f64,
	/// Engine buffer size in bytes.
	buffer_size: usize,
	frame_size: usize,

	running: bool,
	blocking: bool,
}

impl<E: Enumerator> Wasapi<E> {
	#[must_use]
	/// The negotiated sample rate.
	pub const fn rate(&self) -> u32 {
		self.format.rate
	}

	#[must_use]
	/// The negotiated share mode.
	///
	/// This can differ from [`Config::exclusive_mode`] if negotiation fell back.
	pub const fn mode(&self) -> ShareMode {
		self.mode
	}

	#[must_use]
	/// The negotiated format.
	pub const fn format(&self) -> WaveFormat {
		self.format
	}

	#[must_use]
	/// The stream latency reported at open, `0.0` if the engine couldn't tell.
	pub const fn latency_ms(&self) -> f64 {
		self.latency_ms
	}

	#[must_use]
	/// Bytes per frame, `8` for float, `4` for 16-bit PCM.
	pub const fn frame_size(&self) -> usize {
		self.frame_size
	}

	#[must_use]
	/// Are writes blocking?
	pub const fn blocking(&self) -> bool {
		self.blocking
	}

	/// One write step, see [`write`].
	fn write_once(&mut self, data: &[u8]) -> Result<usize, DriverError> {
		match &mut self.transport {
			Transport::Shared => write::shared(
				&self.client,
				&mut self.renderer,
				self.event.event(),
				self.blocking,
				self.buffer_size,
				self.frame_size,
				data,
			),
			Transport::Exclusive(staging) => write::exclusive(
				staging,
				&mut self.renderer,
				self.event.event(),
				self.blocking,
				self.frame_size,
				data,
			),
		}
	}
}

//---------------------------------------------------------------------------------------------------- AudioDriver
impl<E: Enumerator> AudioDriver for Wasapi<E> {
	const NAME: &'static str = NAME;
	type Enumerator = E;

	fn open(
		enumerator: &E,
		device_id: Option<&str>,
		rate: u32,
		latency_ms: u32,
		config: &Config,
	) -> Result<Self, DriverError> {
		// Declared first so it is also dropped last if any step fails.
		let event = Event::new();

		let device = device::resolve(enumerator, device_id)?;

		let session = session::negotiate(
			&device,
			config.exclusive_mode,
			config.float_format,
			rate,
			latency_ms,
		)?;

		let format     = session.format();
		let mode       = session.mode();
		let latency_ms = session.latency_ms();
		let frame_size = session.frame_size();
		let mut client = session.into_client();

		let frame_count = client
			.buffer_size()
			.map_err(|e| native_err!("IAudioClient::GetBufferSize", e))?;
		let buffer_size = frame_count as usize * frame_size;

		let transport = Transport::new(mode, buffer_size)?;

		client
			.set_event_handle(&event)
			.map_err(|e| native_err!("IAudioClient::SetEventHandle", e))?;

		let mut renderer = client
			.render_client()
			.map_err(|e| native_err!("IAudioClient::GetService", e))?;

		transport::prime(&mut renderer, frame_count)?;

		debug2!("Opened: {mode}, {format}, buffer: {frame_count} frames ({buffer_size} bytes)");

		Ok(Self {
			transport,
			renderer,
			client,
			device,
			event: EventGuard::new(event, config.teardown_wait),
			format,
			mode,
			latency_ms,
			buffer_size,
			frame_size,
			running: false,
			blocking: config.blocking,
		})
	}

	fn write(&mut self, data: &[u8]) -> Result<usize, DriverError> {
		if data.len() % self.frame_size != 0 {
			error2!("write of {} bytes is not frame aligned", data.len());
			return Err(DriverError::UnalignedWrite {
				size: data.len(),
				frame_size: self.frame_size,
			});
		}

		if data.is_empty() {
			return Ok(0);
		}

		if !self.blocking {
			return self.write_once(data);
		}

		// Each step either waits on the event or stops at the engine's
		// free space, so a `0` step here is backpressure, not a spin.
		let mut written = 0;
		while written < data.len() {
			written += self.write_once(&data[written..])?;
		}

		Ok(written)
	}

	fn stop(&mut self) -> bool {
		if let Err(e) = self.client.stop() {
			drop(native_err!("IAudioClient::Stop", e));
			return !self.running;
		}

		self.running = false;
		true
	}

	fn start(&mut self) -> bool {
		if let Err(e) = self.client.start() {
			drop(native_err!("IAudioClient::Start", e));
			return self.running;
		}

		self.running = true;
		true
	}

	fn alive(&self) -> bool {
		self.running
	}

	fn set_nonblock(&mut self, nonblock: bool) {
		info2!("Sync {}.", if nonblock { "off" } else { "on" });
		self.blocking = !nonblock;
	}

	fn uses_float(&self) -> bool {
		self.format.is_float()
	}

	fn device_list(enumerator: &E) -> Result<Vec<String>, DriverError> {
		device::device_list(enumerator)
	}

	fn write_avail(&self) -> usize {
		match &self.transport {
			Transport::Exclusive(staging) => staging.available(),
			Transport::Shared => {
				transport::available(&self.client, self.buffer_size, self.frame_size).unwrap_or(0)
			},
		}
	}

	fn buffer_size(&self) -> usize {
		self.buffer_size
	}
}

impl<E: Enumerator> Drop for Wasapi<E> {
	fn drop(&mut self) {
		if self.running {
			if let Err(e) = self.client.stop() {
				drop(native_warn!("IAudioClient::Stop", e));
			}
			self.running = false;
		}
		debug2!("Closing");
		// Fields now drop in declaration order, the event last.
	}
}

impl<E: Enumerator> std::fmt::Debug for Wasapi<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Wasapi")
			.field("format", &self.format)
			.field("mode", &self.mode)
			.field("latency_ms", &self.latency_ms)
			.field("buffer_size", &self.buffer_size)
			.field("frame_size", &self.frame_size)
			.field("running", &self.running)
			.field("blocking", &self.blocking)
			.finish_non_exhaustive()
	}
}
