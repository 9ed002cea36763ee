//! Releasing the write event.
//!
//! An engine thread may still be about to signal the event when the
//! stream is closed, so the event is only closed after it was observed
//! signaled within a short wait. Otherwise it is leaked.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Event,WaitResult},
	macros::{error2,trace2},
};
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Release
/// What happened to the event.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(super) enum Release {
	/// Observed signaled, closed.
	Closed,
	/// Not observed signaled, leaked.
	Leaked,
}

/// Wait up to `wait` for `event`, then close or leak it.
pub(super) fn release_event(event: Event, wait: Duration) -> Release {
	match event.wait_timeout(wait) {
		WaitResult::Signaled => {
			trace2!("write event closed");
			drop(event);
			Release::Closed
		},
		result => {
			if result == WaitResult::Failed {
				error2!("WaitForSingleObject failed");
			}
			error2!("Memory leak in close");
			std::mem::forget(event);
			Release::Leaked
		},
	}
}

//---------------------------------------------------------------------------------------------------- EventGuard
/// Owns the write event, releases it with [`release_event`] on drop.
///
/// This is the last field of `Wasapi`, so it is
/// released after everything else.
#[derive(Debug)]
pub(super) struct EventGuard {
	event: Event,
	wait: Duration,
}

impl EventGuard {
	pub(super) const fn new(event: Event, wait: Duration) -> Self {
		Self { event, wait }
	}

	pub(super) const fn event(&self) -> &Event {
		&self.event
	}
}

impl Drop for EventGuard {
	fn drop(&mut self) {
		let event = std::mem::take(&mut self.event);
		release_event(event, self.wait);
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn signaled_is_closed() {
		let event = Event::new();
		event.signal();
		assert_eq!(release_event(event, Duration::from_millis(20)), Release::Closed);
	}

	#[test]
	fn unsignaled_is_leaked() {
		let event = Event::new();
		let engine = event.clone();
		assert_eq!(release_event(event, Duration::from_millis(1)), Release::Leaked);
		// The engine's handle is still valid.
		engine.signal();
		assert!(engine.is_signaled());
	}

	#[test]
	fn late_signal_within_wait() {
		let event = Event::new();
		let engine = event.clone();
		let handle = std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(5));
			engine.signal();
		});
		assert_eq!(release_event(event, Duration::from_secs(5)), Release::Closed);
		handle.join().unwrap();
	}
}
