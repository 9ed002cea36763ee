//! The write scheduler.
//!
//! One call of these functions is one "step" of a write, `Wasapi::write`
//! calls them once (non-blocking) or in a loop until everything is
//! accepted (blocking).
//!
//! The only suspension point is waiting on the write event.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::{Client,Renderer,Event,WaitResult},
	error::DriverError,
	macros::{error2,trace2},
	transport::{self,Staging},
};

//---------------------------------------------------------------------------------------------------- Shared
/// Flush as much of `data` as the engine buffer has room for.
///
/// Blocking: wait for the engine to free a period first.
pub(super) fn shared<C: Client, R: Renderer>(
	client: &C,
	renderer: &mut R,
	event: &Event,
	blocking: bool,
	buffer_size: usize,
	frame_size: usize,
	data: &[u8],
) -> Result<usize, DriverError> {
	if blocking {
		wait(event)?;
	}

	let available = transport::available(client, buffer_size, frame_size)?;
	if available == 0 {
		return Ok(0);
	}

	let n = data.len().min(available);
	trace2!("write (shared): {n}/{} bytes, {available} available", data.len());
	transport::flush(renderer, frame_size, &data[..n])
}

//---------------------------------------------------------------------------------------------------- Exclusive
/// Stage as much of `data` as fits.
///
/// If staging is already full it must be flushed first, which needs
/// the engine to signal that its buffer was played. Non-blocking
/// checks that once and returns `0` if it hasn't happened yet.
pub(super) fn exclusive<R: Renderer>(
	staging: &mut Staging,
	renderer: &mut R,
	event: &Event,
	blocking: bool,
	frame_size: usize,
	data: &[u8],
) -> Result<usize, DriverError> {
	if staging.is_full() {
		if blocking {
			wait(event)?;
		} else if event.try_wait() != WaitResult::Signaled {
			return Ok(0);
		}

		staging.drain_into(renderer, frame_size)?;
	}

	let n = staging.fill(data);
	trace2!("write (exclusive): {n}/{} bytes, {} staged", data.len(), staging.usage());
	Ok(n)
}

//---------------------------------------------------------------------------------------------------- Wait
fn wait(event: &Event) -> Result<(), DriverError> {
	match event.wait() {
		WaitResult::Signaled => Ok(()),
		WaitResult::TimedOut | WaitResult::Failed => {
			error2!("WaitForSingleObject failed");
			Err(DriverError::Wait { op: "WaitForSingleObject" })
		},
	}
}
