pub mod detected_face;
pub mod face_embedding;
pub mod recognition_mode;
pub mod reference_set;
pub mod target_assignment;
