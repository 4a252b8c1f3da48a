pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

/// Minimum detection score (logit of the detector confidence).
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.0;

/// Maximum embedding distance for a face to count as a target.
pub const DEFAULT_RECOGNITION_THRESHOLD: f32 = 0.58;

/// Length of a stored embedding. Two unit ArcFace vectors at cosine
/// similarity 0.4 sit `sqrt(1.2)` apart; scaling puts them exactly at
/// `DEFAULT_RECOGNITION_THRESHOLD`.
pub const EMBEDDING_SCALE: f32 = DEFAULT_RECOGNITION_THRESHOLD / 1.095_445_1;

pub const BLUR_KERNEL_SIZE: usize = 59;

pub const OUTLINE_THICKNESS: u32 = 3;
pub const OUTLINE_COLOR: [u8; 3] = [255, 0, 0];
pub const LABEL_COLOR: [u8; 3] = [0, 255, 255];

/// Frames between two progress lines.
pub const PROGRESS_INTERVAL: usize = 30;

pub const OUTPUT_CODEC_TAG: [u8; 4] = *b"mp4v";

/// Suffix appended to the input stem when no output path is given.
pub const OUTPUT_SUFFIX: &str = "-res";
