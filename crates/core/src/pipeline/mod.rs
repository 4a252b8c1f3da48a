pub mod assignment_renderer;
pub mod build_reference_set_use_case;
pub mod frame_classifier;
pub mod pipeline_error;
pub mod pipeline_logger;
pub mod redact_video_use_case;
