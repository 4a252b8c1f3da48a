pub mod face_detector;
pub mod face_embedder;
pub mod face_landmarks;
pub mod face_models;
pub mod landmark_locator;
