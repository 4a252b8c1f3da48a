pub mod keypoint_landmark_locator;
pub mod math;
pub mod onnx_arcface_embedder;
pub mod onnx_session;
pub mod onnx_yolo_detector;
