//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- SampleFormat
/// Sample representation of a negotiated stream.
///
/// ```rust
/// # use wasapi_out::format::*;
/// assert_eq!(SampleFormat::Float32.to_string(), "float");
/// assert_eq!(SampleFormat::Int16.to_string(),   "pcm");
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleFormat {
	/// 32-bit IEEE float.
	#[strum(serialize = "float")]
	Float32,
	/// 16-bit signed integer PCM.
	#[strum(serialize = "pcm")]
	Int16,
}

impl SampleFormat {
	#[must_use]
	/// Pick from a "use float?" flag.
	pub const fn from_float(float: bool) -> Self {
		if float { Self::Float32 } else { Self::Int16 }
	}

	#[must_use]
	/// Returns `true` for [`SampleFormat::Float32`].
	pub const fn is_float(self) -> bool {
		matches!(self, Self::Float32)
	}

	#[must_use]
	/// The other one.
	pub const fn opposite(self) -> Self {
		match self {
			Self::Float32 => Self::Int16,
			Self::Int16 => Self::Float32,
		}
	}

	#[must_use]
	/// Bytes per sample.
	pub const fn sample_size(self) -> usize {
		match self {
			Self::Float32 => 4,
			Self::Int16 => 2,
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn opposite() {
		for f in SampleFormat::iter() {
			assert_ne!(f, f.opposite());
			assert_eq!(f, f.opposite().opposite());
		}
	}

	#[test]
	fn from_float() {
		assert!(SampleFormat::from_float(true).is_float());
		assert!(!SampleFormat::from_float(false).is_float());
	}
}
