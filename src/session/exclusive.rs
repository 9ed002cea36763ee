//! Exclusive-mode attempt.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::{EXCLUSIVE_BUFFER_FACTOR,EXCLUSIVE_LATENCY_FACTOR},
	engine::{Client,Device,RefTime,StreamFlags},
	error::{DriverError,EngineError},
	format::{candidates,SampleFormat,ShareMode,WaveFormat},
	macros::{info2,warn2,native_err,native_warn},
	session::{Session,activate,initialize_shared},
};

//---------------------------------------------------------------------------------------------------- Init
/// Initialize an exclusive-mode session with the first format the engine accepts.
///
/// The buffer duration is 2/3 of `latency_ms`, at least the device's minimum period.
///
/// Per format:
/// - "not aligned": re-acquire the handle and retry once with the aligned duration
/// - "already initialized": re-acquire the handle and initialize it in _shared_ mode
/// - "device in use"/"exclusive mode disabled": give up on exclusive mode entirely
pub(super) fn init<D: Device>(
	device: &D,
	float: bool,
	rate: u32,
	latency_ms: u32,
) -> Result<Session<D::Client>, DriverError> {
	let mut client = activate(device)?;

	let (_, minimum_period) = client
		.device_period()
		.map_err(|e| native_err!("IAudioClient::GetDevicePeriod", e))?;

	let requested = RefTime::from_millis_f64(f64::from(latency_ms) * EXCLUSIVE_BUFFER_FACTOR);
	let buffer_duration = requested.max(minimum_period);

	for format in candidates(SampleFormat::from_float(float), rate) {
		info2!(
			"Initializing client (exclusive, {}, {}Hz, {:.1}ms) ...",
			format.sample_format,
			format.rate,
			f64::from(latency_ms),
		);

		let mut mode = ShareMode::Exclusive;
		let mut result = initialize_exclusive(&mut client, &format, buffer_duration);

		if result == Err(EngineError::BufferSizeNotAligned) {
			let frames = client
				.buffer_size()
				.map_err(|e| native_err!("IAudioClient::GetBufferSize", e))?;

			drop(client);
			client = activate(device)?;

			let aligned = RefTime::from_frames(frames, format.rate);
			result = initialize_exclusive(&mut client, &format, aligned);
		}

		if result == Err(EngineError::AlreadyInitialized) {
			drop(client);
			client = activate(device)?;

			mode = ShareMode::Shared;
			result = initialize_shared(&mut client, &format);
		}

		match result {
			Ok(()) => return Ok(Session::new(client, format, mode)),
			Err(EngineError::UnsupportedFormat) => warn2!("Unsupported format"),
			Err(e @ EngineError::DeviceInUse) => {
				warn2!("Device already in use");
				return Err(native_warn!("IAudioClient::Initialize", e));
			},
			Err(e @ EngineError::ExclusiveModeNotAllowed) => {
				warn2!("Exclusive mode disabled");
				return Err(native_warn!("IAudioClient::Initialize", e));
			},
			Err(e) => return Err(native_err!("IAudioClient::Initialize", e)),
		}
	}

	Err(native_err!("IAudioClient::Initialize", EngineError::UnsupportedFormat))
}

/// Event driven, buffer and period are both `duration`.
fn initialize_exclusive<C: Client>(
	client: &mut C,
	format: &WaveFormat,
	duration: RefTime,
) -> Result<(), EngineError> {
	client.initialize(
		ShareMode::Exclusive,
		StreamFlags::EVENT_CALLBACK_NO_PERSIST,
		duration,
		duration,
		format,
	)
}

//---------------------------------------------------------------------------------------------------- Latency
/// `stream latency * 1.5`, or `0.0` if the query fails.
pub(super) fn latency_ms<C: Client>(client: &C) -> f64 {
	match client.stream_latency() {
		Ok(stream) => stream.as_millis_f64() * EXCLUSIVE_LATENCY_FACTOR,
		Err(e) => {
			drop(native_warn!("IAudioClient::GetStreamLatency", e));
			0.0
		},
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::dummy::{DummyEndpoint,ExclusiveAccess,Fault};
	use pretty_assertions::assert_eq;

	const PCM_48: WaveFormat = WaveFormat::new(SampleFormat::Int16, 48_000);

	#[test]
	fn buffer_is_two_thirds_of_latency() {
		// 60ms requested -> 40ms buffer -> 1920 frames @ 48kHz.
		let device = DummyEndpoint::new("id", "name");
		let session = init(&device, false, 48_000, 60).unwrap();
		assert_eq!(session.mode(), ShareMode::Exclusive);
		assert_eq!(device.buffer_frames(), Some(1920));
	}

	#[test]
	fn clamped_to_minimum_period() {
		// 1ms requested -> 0.66ms, below the 3ms minimum -> 144 frames @ 48kHz.
		let device = DummyEndpoint::new("id", "name");
		init(&device, false, 48_000, 1).unwrap();
		assert_eq!(device.buffer_frames(), Some(144));
	}

	#[test]
	fn unaligned_retry() {
		// 15ms requested -> 10ms -> 480 frames, aligned up to 512.
		let device = DummyEndpoint::new("id", "name").alignment(128);
		let session = init(&device, false, 48_000, 15).unwrap();
		assert_eq!(session.mode(), ShareMode::Exclusive);
		assert_eq!(session.format(), PCM_48);
		assert_eq!(device.buffer_frames(), Some(512));
		assert_eq!(device.activations(), 2);
	}

	#[test]
	fn already_initialized_goes_shared() {
		let device = DummyEndpoint::new("id", "name").stale_activations(1);
		let session = init(&device, false, 48_000, 64).unwrap();
		assert_eq!(session.mode(), ShareMode::Shared);
		assert_eq!(session.format(), PCM_48);
		assert_eq!(device.attempts(), [
			(ShareMode::Exclusive, PCM_48),
			(ShareMode::Shared, PCM_48),
		]);
		// Shared latency formula: 10ms + 10ms.
		assert_eq!(session.latency_ms(), 20.0);
	}

	#[test]
	fn mode_fatal() {
		for access in [ExclusiveAccess::InUse, ExclusiveAccess::Disabled] {
			let device = DummyEndpoint::new("id", "name").exclusive_access(access);
			let err = init(&device, false, 48_000, 64).unwrap_err();
			assert!(matches!(err, DriverError::Native { source, .. } if source.is_mode_fatal()));
			assert_eq!(device.attempts().len(), 1);
		}
	}

	#[test]
	fn format_fallback() {
		let want = WaveFormat::new(SampleFormat::Float32, 96_000);
		let device = DummyEndpoint::new("id", "name").exclusive_formats([want]);
		let session = init(&device, false, 44_100, 64).unwrap();
		assert_eq!(session.format(), want);
		assert_eq!(device.attempts().len(), 7);
	}

	#[test]
	fn device_period_is_fatal() {
		let device = DummyEndpoint::new("id", "name");
		device.set_fault(Fault::DevicePeriod, true);
		assert!(init(&device, false, 48_000, 64).is_err());
		assert!(device.attempts().is_empty());
	}

	#[test]
	fn latency() {
		// 10ms stream latency * 1.5
		let device = DummyEndpoint::new("id", "name");
		assert_eq!(init(&device, false, 48_000, 64).unwrap().latency_ms(), 15.0);

		let device = DummyEndpoint::new("id", "name").stream_latency(None);
		assert_eq!(init(&device, false, 48_000, 64).unwrap().latency_ms(), 0.0);
	}
}
