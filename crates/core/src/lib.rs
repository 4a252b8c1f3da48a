//! Face detection, recognition and selective blurring for videos.
//!
//! Every detected face is blurred, except faces that match a set of
//! reference ("target") images, which are outlined instead.

pub mod detection;
pub mod pipeline;
pub mod recognition;
pub mod rendering;
pub mod shared;
pub mod video;
