use std::path::PathBuf;

/// Stream properties of an opened video source, reused to configure the
/// destination writer.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Average frame rate; `0.0` when the container does not report one.
    pub fps: f64,
    /// Frame count reported by the container; `0` when unknown.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
