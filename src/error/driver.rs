//! Driver errors.

//---------------------------------------------------------------------------------------------------- use
use crate::error::EngineError;

//---------------------------------------------------------------------------------------------------- DriverError
/// Error returned by the driver to its caller.
///
/// `open()` failing with any of these means "no audio", `write()`
/// failing means that one call failed and the stream is still usable.
///
/// Data already accepted by the engine before a failure is not undone.
#[derive(thiserror::Error, Debug)]
pub enum DriverError {
	#[error("audio hardware/server is unavailable")]
	/// Neither the requested endpoint nor a default endpoint could be obtained.
	DeviceUnavailable,

	#[error("failed to initialize client in both shared and exclusive mode")]
	/// Every mode/format/rate combination was rejected.
	NegotiationFailed,

	#[error("out of memory allocating {bytes} bytes")]
	/// The staging buffer could not be allocated.
	OutOfMemory {
		/// Size of the failed allocation.
		bytes: usize,
	},

	#[error("{op} failed with error 0x{:08X}", .source.code())]
	/// A native engine call failed.
	Native {
		/// Name of the failing operation.
		op: &'static str,
		/// What the engine reported.
		source: EngineError,
	},

	#[error("{op} failed waiting on the write event")]
	/// Waiting on the write event failed.
	Wait {
		/// Name of the failing operation.
		op: &'static str,
	},

	#[error("write of {size} bytes is not a whole number of {frame_size} byte frames")]
	/// A write was not frame-aligned.
	UnalignedWrite {
		/// Bytes passed to `write()`.
		size: usize,
		/// Negotiated frame size.
		frame_size: usize,
	},
}

impl DriverError {
	#[must_use]
	/// The native error code, if this came from the engine.
	pub const fn native_code(&self) -> Option<u32> {
		match self {
			Self::Native { source, .. } => Some(source.code()),
			_ => None,
		}
	}
}
