//! Shared-mode attempt.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Client,Device},
	error::{DriverError,EngineError},
	format::{candidates,SampleFormat,ShareMode},
	macros::{info2,warn2,native_err,native_warn},
	session::{Session,activate,initialize_shared},
};

//---------------------------------------------------------------------------------------------------- Init
/// Initialize a shared-mode session with the first format the engine accepts.
///
/// A handle that reports "already initialized" is
/// swapped for a fresh one and the same format is retried.
pub(super) fn init<D: Device>(
	device: &D,
	float: bool,
	rate: u32,
) -> Result<Session<D::Client>, DriverError> {
	let mut client = activate(device)?;

	for format in candidates(SampleFormat::from_float(float), rate) {
		info2!("Initializing client (shared, {}, {}Hz) ...", format.sample_format, format.rate);

		let mut result = initialize_shared(&mut client, &format);
		if result == Err(EngineError::AlreadyInitialized) {
			drop(client);
			client = activate(device)?;
			result = initialize_shared(&mut client, &format);
		}

		match result {
			Ok(()) => return Ok(Session::new(client, format, ShareMode::Shared)),
			Err(EngineError::UnsupportedFormat) => warn2!("Unsupported format"),
			Err(e) => return Err(native_err!("IAudioClient::Initialize", e)),
		}
	}

	Err(native_err!("IAudioClient::Initialize", EngineError::UnsupportedFormat))
}

//---------------------------------------------------------------------------------------------------- Latency
/// `stream latency + default period`, or `0.0` if either query fails.
pub(super) fn latency_ms<C: Client>(client: &C) -> f64 {
	let stream = match client.stream_latency() {
		Ok(l) => l,
		Err(e) => {
			drop(native_warn!("IAudioClient::GetStreamLatency", e));
			return 0.0;
		},
	};

	match client.device_period() {
		Ok((default_period, _)) => stream.as_millis_f64() + default_period.as_millis_f64(),
		Err(e) => {
			drop(native_warn!("IAudioClient::GetDevicePeriod", e));
			0.0
		},
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		backend::dummy::{DummyEndpoint,Fault},
		engine::RefTime,
		format::WaveFormat,
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn requested_format_first() {
		let device = DummyEndpoint::new("id", "name");
		let session = init(&device, false, 48_000).unwrap();
		assert_eq!(session.format(), WaveFormat::new(SampleFormat::Int16, 48_000));
		assert_eq!(device.attempts().len(), 1);
	}

	#[test]
	fn rate_then_format_order() {
		let want = WaveFormat::new(SampleFormat::Float32, 192_000);
		let device = DummyEndpoint::new("id", "name").shared_formats([want]);

		let session = init(&device, false, 44_100).unwrap();
		assert_eq!(session.format(), want);

		let tried: Vec<(SampleFormat, u32)> = device
			.attempts()
			.into_iter()
			.map(|(_, f)| (f.sample_format, f.rate))
			.collect();

		use SampleFormat::*;
		assert_eq!(tried, [
			(Int16, 44_100), (Int16, 48_000), (Int16, 96_000), (Int16, 192_000),
			(Float32, 44_100), (Float32, 48_000), (Float32, 96_000), (Float32, 192_000),
		]);
	}

	#[test]
	fn stale_handle_is_reacquired() {
		let device = DummyEndpoint::new("id", "name").stale_activations(1);
		let session = init(&device, true, 48_000).unwrap();
		assert_eq!(session.format(), WaveFormat::new(SampleFormat::Float32, 48_000));
		assert_eq!(device.activations(), 2);
		// Same format retried on the fresh handle.
		assert_eq!(device.attempts()[0], device.attempts()[1]);
	}

	#[test]
	fn latency() {
		// 10ms stream latency + 10ms default period.
		let device = DummyEndpoint::new("id", "name");
		assert_eq!(init(&device, true, 48_000).unwrap().latency_ms(), 20.0);

		let device = DummyEndpoint::new("id", "name").stream_latency(Some(RefTime(55_000)));
		assert_eq!(init(&device, true, 48_000).unwrap().latency_ms(), 15.5);
	}

	#[test]
	fn latency_failure_is_not_fatal() {
		let device = DummyEndpoint::new("id", "name").stream_latency(None);
		assert_eq!(init(&device, true, 48_000).unwrap().latency_ms(), 0.0);

		let device = DummyEndpoint::new("id", "name");
		device.set_fault(Fault::DevicePeriod, true);
		assert_eq!(init(&device, true, 48_000).unwrap().latency_ms(), 0.0);
	}

	#[test]
	fn nothing_supported() {
		let device = DummyEndpoint::new("id", "name").shared_formats([]);
		let err = init(&device, true, 48_000).unwrap_err();
		assert_eq!(err.native_code(), Some(EngineError::UnsupportedFormat.code()));
	}
}
