//---------------------------------------------------------------------------------------------------- StreamFlags
/// Stream initialization flags.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct StreamFlags {
	/// The engine signals an event (instead of being polled) when buffer space frees up.
	pub event_callback: bool,
	/// Volume/mute changes are not persisted across sessions.
	pub no_persist: bool,
}

impl StreamFlags {
	/// What the driver always initializes with.
	pub const EVENT_CALLBACK_NO_PERSIST: Self = Self {
		event_callback: true,
		no_persist: true,
	};
}

//---------------------------------------------------------------------------------------------------- BufferFlags
/// Flags for [`crate::engine::Renderer::release_buffer`].
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub enum BufferFlags {
	#[default]
	/// Play the data as written.
	None,
	/// Treat the region as silence regardless of its contents.
	Silent,
}
