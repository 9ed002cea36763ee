//! Native engine errors.

//---------------------------------------------------------------------------------------------------- Constants
// Native codes are `AUDCLNT_E_*` style HRESULTs:
// severity bit set, facility `0x889`, low word is the error number.
const fn audclnt(n: u32) -> u32 {
	0x8889_0000 | n
}

//---------------------------------------------------------------------------------------------------- EngineError
/// Failure reported by a native engine call.
///
/// Every variant maps to a stable 32-bit native error code, see [`EngineError::code`],
/// which is what gets logged when a native call fails.
///
/// Some of these drive negotiation decisions (e.g. [`EngineError::UnsupportedFormat`]
/// moves on to the next format candidate), the rest are plain failures.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineError {
	#[error("client has not been initialized")]
	/// The client was used before `initialize()` succeeded.
	NotInitialized,

	#[error("client is already initialized")]
	/// `initialize()` was called on a client that was already initialized
	/// (a client may be initialized at most once).
	AlreadyInitialized,

	#[error("audio device was invalidated")]
	/// The endpoint was removed or reconfigured.
	DeviceInvalidated,

	#[error("stream is not stopped")]
	/// `start()` on a running stream.
	NotStopped,

	#[error("requested buffer is larger than the available space")]
	/// `get_buffer()` asked for more frames than are free.
	BufferTooLarge,

	#[error("buffer calls out of order")]
	/// `get_buffer()` called twice without `release_buffer()`.
	OutOfOrder,

	#[error("audio format is not supported")]
	/// The engine rejected the requested format/rate.
	UnsupportedFormat,

	#[error("invalid buffer size")]
	/// `release_buffer()` with a frame count that does not match `get_buffer()`.
	InvalidSize,

	#[error("device is in use by another exclusive-mode client")]
	/// Exclusive mode was requested but another client owns the device.
	DeviceInUse,

	#[error("exclusive mode is not allowed on this device")]
	/// Exclusive mode was disabled by the user/administrator.
	ExclusiveModeNotAllowed,

	#[error("buffer size is not aligned")]
	/// The requested exclusive-mode buffer duration does not map to an aligned
	/// frame count. `Client::buffer_size()` reports the aligned count afterwards.
	BufferSizeNotAligned,

	#[error("element not found")]
	/// No such endpoint.
	NotFound,

	#[error("not implemented")]
	/// The engine does not implement the call.
	NotImplemented,

	#[error("native error 0x{0:08X}")]
	/// Any other native failure, with its raw code.
	Other(u32),
}

impl EngineError {
	#[must_use]
	/// The native 32-bit error code.
	///
	/// ```rust
	/// # use wasapi_out::error::EngineError;
	/// assert_eq!(EngineError::UnsupportedFormat.code(), 0x8889_0008);
	/// assert_eq!(EngineError::Other(0x8000_4005).code(), 0x8000_4005);
	/// ```
	pub const fn code(&self) -> u32 {
		match self {
			Self::NotInitialized          => audclnt(0x001),
			Self::AlreadyInitialized      => audclnt(0x002),
			Self::DeviceInvalidated       => audclnt(0x004),
			Self::NotStopped              => audclnt(0x005),
			Self::BufferTooLarge          => audclnt(0x006),
			Self::OutOfOrder              => audclnt(0x007),
			Self::UnsupportedFormat       => audclnt(0x008),
			Self::InvalidSize             => audclnt(0x009),
			Self::DeviceInUse             => audclnt(0x00A),
			Self::ExclusiveModeNotAllowed => audclnt(0x00E),
			Self::BufferSizeNotAligned    => audclnt(0x019),
			Self::NotFound                => 0x8007_0490,
			Self::NotImplemented          => 0x8000_4001,
			Self::Other(code)             => *code,
		}
	}

	#[must_use]
	/// Returns `true` if this error ends an exclusive-mode attempt
	/// regardless of the format that was being tried.
	pub const fn is_mode_fatal(&self) -> bool {
		matches!(self, Self::DeviceInUse | Self::ExclusiveModeNotAllowed)
	}
}
