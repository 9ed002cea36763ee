//! The engine's duration unit.

//---------------------------------------------------------------------------------------------------- use
use crate::config::{REFTIMES_PER_MILLISEC,REFTIMES_PER_SEC};

//---------------------------------------------------------------------------------------------------- RefTime
/// A duration in 100 nanosecond ticks.
///
/// ```rust
/// # use wasapi_out::engine::RefTime;
/// assert_eq!(RefTime::from_millis_f64(10.0), RefTime(100_000));
/// assert_eq!(RefTime(30_000).as_millis_f64(), 3.0);
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct RefTime(pub i64);

impl RefTime {
	/// Zero ticks.
	pub const ZERO: Self = Self(0);

	#[must_use]
	/// Convert from (fractional) milliseconds, truncating.
	pub fn from_millis_f64(millis: f64) -> Self {
		Self((millis * REFTIMES_PER_MILLISEC as f64) as i64)
	}

	#[must_use]
	/// Convert to (fractional) milliseconds.
	pub fn as_millis_f64(self) -> f64 {
		self.0 as f64 / REFTIMES_PER_MILLISEC as f64
	}

	#[must_use]
	/// Exact duration of `frames` frames at `rate`, rounded to the nearest tick.
	///
	/// ```rust
	/// # use wasapi_out::engine::RefTime;
	/// assert_eq!(RefTime::from_frames(441, 44_100), RefTime(100_000));
	/// assert_eq!(RefTime::from_frames(448, 44_100), RefTime(101_587));
	/// ```
	pub fn from_frames(frames: u32, rate: u32) -> Self {
		if rate == 0 {
			return Self::ZERO;
		}
		Self((REFTIMES_PER_SEC as f64 / f64::from(rate) * f64::from(frames) + 0.5) as i64)
	}

	#[must_use]
	/// How many frames at `rate` fit in this duration, rounded to the nearest frame.
	///
	/// ```rust
	/// # use wasapi_out::engine::RefTime;
	/// assert_eq!(RefTime(101_587).to_frames(44_100), 448);
	/// assert_eq!(RefTime::from_millis_f64(10.0).to_frames(48_000), 480);
	/// ```
	pub fn to_frames(self, rate: u32) -> u32 {
		if self.0 <= 0 {
			return 0;
		}
		(self.0 as f64 * f64::from(rate) / REFTIMES_PER_SEC as f64 + 0.5) as u32
	}

	#[must_use]
	/// As a [`std::time::Duration`] (negative durations become zero).
	pub fn as_duration(self) -> std::time::Duration {
		std::time::Duration::from_nanos(u64::try_from(self.0).unwrap_or(0) * 100)
	}
}

impl std::fmt::Display for RefTime {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:.1}ms", self.as_millis_f64())
	}
}
