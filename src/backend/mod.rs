//! Native engine implementations.
//!
//! [`dummy`] is always available, it simulates an engine in-process.
//!
//! `cpal` (behind the `cpal` feature) drives real hardware through the
//! platform's default audio host, in shared mode only.

pub mod dummy;

#[cfg(any(feature = "cpal", test))]
mod frames;

// Use `cpal` if it is enabled, else the dummy.
cfg_if::cfg_if! {
	if #[cfg(feature = "cpal")] {
		pub mod cpal;
		/// The enumerator used by [`default_enumerator`].
		pub type DefaultEnumerator = self::cpal::CpalEnumerator;
		/// The engine backend used.
		pub const BACKEND: &str = "cpal";

		#[must_use]
		/// An enumerator for the platform's audio host.
		pub fn default_enumerator() -> DefaultEnumerator {
			self::cpal::CpalEnumerator::new()
		}
	} else {
		/// The enumerator used by [`default_enumerator`].
		pub type DefaultEnumerator = dummy::DummyEnumerator;
		/// The engine backend used.
		pub const BACKEND: &str = "dummy";

		#[must_use]
		/// An enumerator with a single default dummy endpoint.
		pub fn default_enumerator() -> DefaultEnumerator {
			dummy::DummyEnumerator::new()
				.with_default(dummy::DummyEndpoint::new("dummy", "Dummy Output"))
		}
	}
}
