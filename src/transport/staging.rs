//! Exclusive-mode staging buffer.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	engine::Renderer,
	error::DriverError,
	macros::error2,
	transport::flush,
};

//---------------------------------------------------------------------------------------------------- Staging
/// A buffer the size of the engine buffer, filled by writes
/// and flushed to the engine only when completely full.
///
/// `usage` is always within `0..=capacity`.
#[derive(Debug)]
pub(crate) struct Staging {
	buf: Vec<u8>,
	usage: usize,
}

impl Staging {
	/// Allocate `size` bytes, failing instead of aborting if that's not possible.
	pub(crate) fn new(size: usize) -> Result<Self, DriverError> {
		let mut buf = Vec::new();
		if buf.try_reserve_exact(size).is_err() {
			error2!("Out of memory allocating {size} byte staging buffer");
			return Err(DriverError::OutOfMemory { bytes: size });
		}
		buf.resize(size, 0);

		Ok(Self { buf, usage: 0 })
	}

	/// Bytes currently staged.
	pub(crate) const fn usage(&self) -> usize {
		self.usage
	}

	/// Free bytes.
	pub(crate) fn available(&self) -> usize {
		self.buf.len() - self.usage
	}

	pub(crate) fn is_full(&self) -> bool {
		self.usage == self.buf.len()
	}

	/// Copy as much of `data` as fits, returns how much that was.
	pub(crate) fn fill(&mut self, data: &[u8]) -> usize {
		let n = data.len().min(self.available());
		self.buf[self.usage..self.usage + n].copy_from_slice(&data[..n]);
		self.usage += n;
		n
	}

	/// Flush everything staged to the engine and start over.
	///
	/// On failure nothing was committed and the staged bytes are kept.
	pub(crate) fn drain_into<R: Renderer>(
		&mut self,
		renderer: &mut R,
		frame_size: usize,
	) -> Result<(), DriverError> {
		flush(renderer, frame_size, &self.buf[..self.usage])?;
		self.usage = 0;
		Ok(())
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		backend::dummy::{DummyEndpoint,Fault},
		engine::{Client,RefTime},
		format::ShareMode,
		tests::{client,pcm},
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn fill_caps_at_capacity() {
		let mut staging = Staging::new(16).unwrap();
		assert_eq!(staging.fill(&pcm(3)), 12);
		assert_eq!(staging.usage(), 12);
		assert_eq!(staging.fill(&pcm(3)), 4);
		assert!(staging.is_full());
		assert_eq!(staging.fill(&pcm(1)), 0);
		assert_eq!(staging.usage(), 16);
	}

	#[test]
	fn out_of_memory() {
		let err = Staging::new(usize::MAX).unwrap_err();
		assert!(matches!(err, DriverError::OutOfMemory { bytes: usize::MAX }));
	}

	#[test]
	fn drain_resets_usage() {
		// 3ms @ 48kHz = 144 frames = 576 bytes.
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Exclusive, RefTime(30_000));
		let mut renderer = client.render_client().unwrap();

		let data = pcm(144);
		let mut staging = Staging::new(576).unwrap();
		assert_eq!(staging.fill(&data), 576);
		staging.drain_into(&mut renderer, 4).unwrap();

		assert_eq!(staging.usage(), 0);
		assert_eq!(endpoint.committed(), data);
	}

	#[test]
	fn failed_drain_keeps_data() {
		let endpoint = DummyEndpoint::new("id", "name");
		let mut client = client(&endpoint, ShareMode::Exclusive, RefTime(30_000));
		let mut renderer = client.render_client().unwrap();

		let mut staging = Staging::new(576).unwrap();
		staging.fill(&pcm(144));

		endpoint.set_fault(Fault::GetBuffer, true);
		assert!(staging.drain_into(&mut renderer, 4).is_err());
		assert!(staging.is_full());
	}
}
