//! Stream formats and the order they are negotiated in.

mod sample_format;
pub use sample_format::SampleFormat;

mod share_mode;
pub use share_mode::ShareMode;

mod wave_format;
pub use wave_format::{WaveFormat,CHANNELS};

mod candidates;
pub use candidates::candidates;
