pub mod constants;
pub mod face_box;
pub mod frame;
pub mod model_resolver;
pub mod redaction_settings;
pub mod video_metadata;
