//! Negotiation and timing constants.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Constants
/// Rates tried, in order, after the requested rate is rejected.
pub const PREFERRED_RATES: [u32; 4] = [48_000, 44_100, 96_000, 192_000];

/// Engine time units (100ns ticks) per millisecond.
pub const REFTIMES_PER_MILLISEC: i64 = 10_000;

/// Engine time units (100ns ticks) per second.
pub const REFTIMES_PER_SEC: i64 = REFTIMES_PER_MILLISEC * 1000;

/// How long `close()` waits on the write event before giving up on it.
pub const DEFAULT_TEARDOWN_WAIT: Duration = Duration::from_millis(20);

/// Exclusive-mode buffer duration as a fraction of the requested latency.
pub(crate) const EXCLUSIVE_BUFFER_FACTOR: f64 = 2.0 / 3.0;

/// Exclusive-mode reported latency multiplier over the engine's stream latency.
pub(crate) const EXCLUSIVE_LATENCY_FACTOR: f64 = 1.5;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reftimes() {
		assert_eq!(REFTIMES_PER_SEC, 10_000_000);
	}

	#[test]
	fn preferred_rates_are_unique() {
		for (i, r) in PREFERRED_RATES.iter().enumerate() {
			assert!(!PREFERRED_RATES[i + 1..].contains(r));
		}
	}
}
