//! The native audio engine, as seen by the driver.
//!
//! The driver never talks to an audio API directly, it goes through these traits:
//!
//! ```text
//! Enumerator ──► Device ──activate()──► Client ──render_client()──► Renderer
//!                                         ▲
//!                                         │ set_event_handle()
//!                                       Event
//! ```
//!
//! Implementations live in [`crate::backend`].

mod traits;
pub use traits::{Enumerator,Device,Client,Renderer};

mod event;
pub use event::{Event,WaitResult};

mod reftime;
pub use reftime::RefTime;

mod flags;
pub use flags::{StreamFlags,BufferFlags};
