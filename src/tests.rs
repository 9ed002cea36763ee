//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	backend::dummy::{DummyClient,DummyEndpoint,DummyEnumerator},
	config::Config,
	engine::{Client,Device,RefTime,StreamFlags},
	format::{SampleFormat,ShareMode,WaveFormat},
	AudioDriver,Wasapi,
};

//---------------------------------------------------------------------------------------------------- Test Init Helpers
/// 16-bit stereo @ 48kHz, 4 byte frames.
pub(crate) const PCM_48: WaveFormat = WaveFormat::new(SampleFormat::Int16, 48_000);

/// A 1ms period endpoint, so clock driven tests finish quickly.
pub(crate) fn fast_endpoint() -> DummyEndpoint {
	DummyEndpoint::new("fast", "Fast").periods(RefTime(10_000), RefTime(10_000))
}

/// An initialized client, shared mode gets a 2 period buffer,
/// exclusive mode gets `duration`.
pub(crate) fn client(endpoint: &DummyEndpoint, mode: ShareMode, duration: RefTime) -> DummyClient {
	let mut client = endpoint.activate().unwrap();
	client.initialize(mode, StreamFlags::EVENT_CALLBACK_NO_PERSIST, duration, duration, &PCM_48).unwrap();
	client
}

/// Open `endpoint` as the default device.
pub(crate) fn open(endpoint: &DummyEndpoint, latency_ms: u32, config: &Config) -> Wasapi<DummyEnumerator> {
	let enumerator = DummyEnumerator::new().with_default(endpoint.clone());
	Wasapi::<DummyEnumerator>::open(&enumerator, None, 48_000, latency_ms, config).unwrap()
}

/// `frames` 16-bit stereo frames of a recognizable byte pattern.
pub(crate) fn pcm(frames: usize) -> Vec<u8> {
	(0..frames * 4).map(|i| (i % 251) as u8).collect()
}
