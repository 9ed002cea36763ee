//! The ordered (format, rate) sequence tried within one share mode.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::PREFERRED_RATES,
	format::{SampleFormat,WaveFormat},
};

//---------------------------------------------------------------------------------------------------- candidates
#[must_use]
/// Every format one mode attempt tries, in order.
///
/// 1. requested sample format, requested rate
/// 2. requested sample format, each of [`PREFERRED_RATES`] not already tried
/// 3. opposite sample format, requested rate
/// 4. opposite sample format, each of [`PREFERRED_RATES`] not already tried
///
/// A requested rate of `0` is skipped, only the preferred rates are tried.
///
/// ```rust
/// # use wasapi_out::format::*;
/// let c = candidates(SampleFormat::Int16, 44_100);
/// assert_eq!(c.len(), 8);
/// assert_eq!(c[0], WaveFormat::new(SampleFormat::Int16, 44_100));
/// assert_eq!(c[1], WaveFormat::new(SampleFormat::Int16, 48_000));
/// assert_eq!(c[4], WaveFormat::new(SampleFormat::Float32, 44_100));
/// ```
pub fn candidates(preferred: SampleFormat, rate: u32) -> Vec<WaveFormat> {
	let mut vec = Vec::with_capacity(2 * (PREFERRED_RATES.len() + 1));

	for sample_format in [preferred, preferred.opposite()] {
		let requested = (rate != 0).then_some(rate);
		let preferred = PREFERRED_RATES.iter().copied().filter(|r| *r != rate);

		vec.extend(
			requested
				.into_iter()
				.chain(preferred)
				.map(|rate| WaveFormat::new(sample_format, rate))
		);
	}

	vec
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn rates(c: &[WaveFormat]) -> Vec<u32> {
		c.iter().map(|f| f.rate).collect()
	}

	#[test]
	fn requested_rate_in_preferred_list() {
		let c = candidates(SampleFormat::Float32, 48_000);
		assert_eq!(rates(&c), [48_000, 44_100, 96_000, 192_000, 48_000, 44_100, 96_000, 192_000]);
		assert!(c[..4].iter().all(|f| f.is_float()));
		assert!(c[4..].iter().all(|f| !f.is_float()));
	}

	#[test]
	fn requested_rate_not_in_preferred_list() {
		let c = candidates(SampleFormat::Int16, 32_000);
		assert_eq!(c.len(), 10);
		assert_eq!(rates(&c), [32_000, 48_000, 44_100, 96_000, 192_000, 32_000, 48_000, 44_100, 96_000, 192_000]);
	}

	#[test]
	fn second_preferred_rate() {
		// The skip has to work for any position, not just the first.
		let c = candidates(SampleFormat::Int16, 96_000);
		assert_eq!(rates(&c[..4]), [96_000, 48_000, 44_100, 192_000]);
	}

	#[test]
	fn zero_rate() {
		let c = candidates(SampleFormat::Int16, 0);
		assert_eq!(rates(&c), [48_000, 44_100, 96_000, 192_000, 48_000, 44_100, 96_000, 192_000]);
	}

	#[test]
	fn always_stereo() {
		for f in candidates(SampleFormat::Float32, 22_050) {
			assert_eq!(f.channels(), 2);
		}
	}
}
