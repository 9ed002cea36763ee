//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- ShareMode
/// How the stream shares the output device.
///
/// ```rust
/// # use wasapi_out::format::*;
/// assert_eq!(ShareMode::Shared.to_string(),    "shared");
/// assert_eq!(ShareMode::Exclusive.to_string(), "exclusive");
/// assert_eq!(ShareMode::from_exclusive(true),  ShareMode::Exclusive);
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
#[derive(AsRefStr,Display,IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShareMode {
	/// The engine mixes this stream with other clients through its own buffer.
	#[default]
	Shared,
	/// This stream owns the hardware buffer.
	Exclusive,
}

impl ShareMode {
	#[must_use]
	/// Pick from an "exclusive?" flag.
	pub const fn from_exclusive(exclusive: bool) -> Self {
		if exclusive { Self::Exclusive } else { Self::Shared }
	}

	#[must_use]
	/// Returns `true` for [`ShareMode::Exclusive`].
	pub const fn is_exclusive(self) -> bool {
		matches!(self, Self::Exclusive)
	}

	#[must_use]
	/// The other one.
	pub const fn opposite(self) -> Self {
		match self {
			Self::Shared => Self::Exclusive,
			Self::Exclusive => Self::Shared,
		}
	}
}
