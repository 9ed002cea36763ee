//! The write event.
//!
//! An auto-reset event: `signal()` sets it (once, signaling an already
//! signaled event does nothing), and a successful wait resets it.
//!
//! This is a bounded channel of capacity 1, so a waiting
//! thread sleeps in `recv()` instead of spinning.

//---------------------------------------------------------------------------------------------------- use
use crossbeam::channel::{Sender,Receiver,RecvTimeoutError,TryRecvError,bounded};
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- WaitResult
/// Outcome of waiting on an [`Event`].
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum WaitResult {
	/// The event was signaled (and is now reset).
	Signaled,
	/// The timeout elapsed first.
	TimedOut,
	/// The wait itself failed.
	Failed,
}

//---------------------------------------------------------------------------------------------------- Event
/// Auto-resetting event shared between the driver and the engine.
///
/// Cloning shares the same event.
///
/// ```rust
/// # use wasapi_out::engine::*;
/// let event = Event::new();
/// assert_eq!(event.try_wait(), WaitResult::TimedOut);
///
/// let engine_side = event.clone();
/// engine_side.signal();
/// engine_side.signal(); // no-op, already signaled
///
/// assert_eq!(event.try_wait(), WaitResult::Signaled);
/// assert_eq!(event.try_wait(), WaitResult::TimedOut);
/// ```
#[derive(Clone,Debug)]
pub struct Event {
	signal: Sender<()>,
	wait: Receiver<()>,
}

impl Event {
	#[must_use]
	/// Create a new, un-signaled event.
	pub fn new() -> Self {
		let (signal, wait) = bounded(1);
		Self { signal, wait }
	}

	/// Set the event.
	pub fn signal(&self) {
		// Full means already signaled.
		let _ = self.signal.try_send(());
	}

	#[must_use]
	/// Returns `true` if the event is currently set, without resetting it.
	pub fn is_signaled(&self) -> bool {
		!self.wait.is_empty()
	}

	/// Wait forever.
	pub fn wait(&self) -> WaitResult {
		match self.wait.recv() {
			Ok(()) => WaitResult::Signaled,
			Err(_) => WaitResult::Failed,
		}
	}

	/// Poll without waiting.
	pub fn try_wait(&self) -> WaitResult {
		match self.wait.try_recv() {
			Ok(()) => WaitResult::Signaled,
			Err(TryRecvError::Empty) => WaitResult::TimedOut,
			Err(TryRecvError::Disconnected) => WaitResult::Failed,
		}
	}

	/// Wait for at most `timeout`.
	pub fn wait_timeout(&self, timeout: Duration) -> WaitResult {
		match self.wait.recv_timeout(timeout) {
			Ok(()) => WaitResult::Signaled,
			Err(RecvTimeoutError::Timeout) => WaitResult::TimedOut,
			Err(RecvTimeoutError::Disconnected) => WaitResult::Failed,
		}
	}
}

impl Default for Event {
	fn default() -> Self {
		Self::new()
	}
}
