use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use face_redact_core::detection::domain::face_models::FaceModels;
use face_redact_core::detection::infrastructure::keypoint_landmark_locator::KeypointLandmarkLocator;
use face_redact_core::detection::infrastructure::onnx_arcface_embedder::OnnxArcFaceEmbedder;
use face_redact_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use face_redact_core::pipeline::assignment_renderer::AssignmentRenderer;
use face_redact_core::pipeline::build_reference_set_use_case::BuildReferenceSetUseCase;
use face_redact_core::pipeline::frame_classifier::FrameClassifier;
use face_redact_core::pipeline::pipeline_error::PipelineError;
use face_redact_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_redact_core::pipeline::redact_video_use_case::RedactVideoUseCase;
use face_redact_core::recognition::domain::recognition_mode::RecognitionMode;
use face_redact_core::rendering::infrastructure::cpu_annotator::CpuAnnotator;
use face_redact_core::rendering::infrastructure::cpu_rectangular_blurrer::CpuRectangularBlurrer;
use face_redact_core::shared::constants::{
    DEFAULT_DETECTION_THRESHOLD, DEFAULT_RECOGNITION_THRESHOLD, EMBEDDING_MODEL_NAME,
    EMBEDDING_MODEL_URL, OUTPUT_SUFFIX, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use face_redact_core::shared::model_resolver;
use face_redact_core::shared::redaction_settings::RedactionSettings;
use face_redact_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use face_redact_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use face_redact_core::video::infrastructure::image_file_reader::ImageFileReader;

/// Blur every face in a video, or every face except the people shown in
/// the target images.
#[derive(Parser, Debug)]
#[command(name = "face-redact")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output video file [default: <input-stem>-res.<input-ext>].
    #[arg(short)]
    output: Option<PathBuf>,

    /// Minimum face detection score; negative values are more permissive.
    #[arg(short, long, default_value_t = DEFAULT_DETECTION_THRESHOLD, allow_negative_numbers = true)]
    detection_threshold: f64,

    /// Maximum embedding distance for a face to match a target.
    #[arg(short, long, default_value_t = DEFAULT_RECOGNITION_THRESHOLD)]
    recognition_threshold: f32,

    /// Reference images of people to keep unblurred.
    #[arg(short, long = "target", num_args = 0..)]
    targets: Vec<PathBuf>,

    /// Print each face's distance next to it in the output.
    #[arg(long)]
    show: bool,

    /// Extra directory to look for model files in.
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> RedactionSettings {
        RedactionSettings {
            detection_threshold: self.detection_threshold,
            recognition_threshold: self.recognition_threshold,
            show_distances: self.show,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        if is_source_failure(e.as_ref()) {
            println!("Error: {e}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// The input video could not be opened or yielded no frame.
fn is_source_failure(e: &(dyn std::error::Error + 'static)) -> bool {
    matches!(
        e.downcast_ref::<PipelineError>(),
        Some(PipelineError::SourceOpen { .. } | PipelineError::NoFrames { .. })
    )
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = cli.settings();
    settings.validate()?;
    let output = cli.output_path();

    let models = Arc::new(build_models(cli.models_dir.as_deref())?);

    let references = BuildReferenceSetUseCase::new(models.clone(), Box::new(ImageFileReader::new()))
        .execute(&cli.targets)?;
    let mode = RecognitionMode::from_references(references);
    match &mode {
        RecognitionMode::BlurExceptTargets(set) => {
            log::info!("Face recognition mode ON ({} reference embeddings)", set.len())
        }
        RecognitionMode::BlurAll => log::info!("Face recognition mode OFF"),
    }

    let use_case = RedactVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(FfmpegWriter::new()),
        FrameClassifier::new(models, mode, settings),
        AssignmentRenderer::new(
            Box::new(CpuRectangularBlurrer::default()),
            Box::new(CpuAnnotator::default()),
            settings.show_distances,
        ),
        Box::new(StdoutPipelineLogger::default()),
    );
    use_case.execute(&cli.input, &output)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn build_models(models_dir: Option<&Path>) -> Result<FaceModels, Box<dyn std::error::Error>> {
    let detector_path = resolve_model(YOLO_MODEL_NAME, YOLO_MODEL_URL, models_dir)?;
    let embedder_path = resolve_model(EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, models_dir)?;

    Ok(FaceModels::new(
        Box::new(OnnxYoloDetector::new(&detector_path)?),
        Box::new(KeypointLandmarkLocator::new()),
        Box::new(OnnxArcFaceEmbedder::new(&embedder_path)?),
    ))
}

fn resolve_model(
    name: &'static str,
    url: &str,
    models_dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {name}");
    let progress = move |downloaded: u64, total: u64| download_progress(name, downloaded, total);
    let path = model_resolver::resolve(name, url, models_dir, Some(Box::new(progress)))?;
    log::debug!("Using {}", path.display());
    Ok(path)
}

fn download_progress(name: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {name}... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {name}... {downloaded} bytes");
    }
}

/// `dir/clip.mp4` -> `dir/clip-res.mp4`; without an extension the suffix
/// is simply appended.
fn default_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or(input.as_os_str()));
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
