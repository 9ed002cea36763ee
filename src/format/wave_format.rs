//---------------------------------------------------------------------------------------------------- use
use crate::format::SampleFormat;

//---------------------------------------------------------------------------------------------------- Constants
/// Every stream is interleaved stereo.
pub const CHANNELS: u16 = 2;

//---------------------------------------------------------------------------------------------------- WaveFormat
/// A stream format as handed to the engine.
///
/// The channel count is not a field, it is always [`CHANNELS`].
///
/// ```rust
/// # use wasapi_out::format::*;
/// let f = WaveFormat::new(SampleFormat::Float32, 48_000);
/// assert_eq!(f.channels(), 2);
/// assert_eq!(f.block_align(), 8);
/// assert_eq!(f.avg_bytes_per_sec(), 48_000 * 8);
/// assert_eq!(f.bits_per_sample(), 32);
///
/// let f = WaveFormat::new(SampleFormat::Int16, 44_100);
/// assert_eq!(f.block_align(), 4);
/// assert_eq!(f.bits_per_sample(), 16);
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveFormat {
	/// Sample representation.
	pub sample_format: SampleFormat,
	/// Frames per second.
	pub rate: u32,
}

impl WaveFormat {
	#[must_use]
	/// Create a stereo [`WaveFormat`].
	pub const fn new(sample_format: SampleFormat, rate: u32) -> Self {
		Self { sample_format, rate }
	}

	#[must_use]
	/// Always `2`.
	pub const fn channels(&self) -> u16 {
		CHANNELS
	}

	#[must_use]
	/// Bytes per frame, `4` for 16-bit, `8` for float.
	pub const fn block_align(&self) -> usize {
		self.sample_format.sample_size() * CHANNELS as usize
	}

	#[must_use]
	/// Bits per sample.
	pub const fn bits_per_sample(&self) -> u16 {
		(self.sample_format.sample_size() * 8) as u16
	}

	#[must_use]
	/// Bytes per second.
	pub const fn avg_bytes_per_sec(&self) -> usize {
		self.rate as usize * self.block_align()
	}

	#[must_use]
	/// Returns `true` for float samples.
	pub const fn is_float(&self) -> bool {
		self.sample_format.is_float()
	}
}

impl std::fmt::Display for WaveFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, {}Hz", self.sample_format, self.rate)
	}
}
