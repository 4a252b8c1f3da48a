use std::path::Path;
use std::time::Instant;

use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

use super::assignment_renderer::AssignmentRenderer;
use super::frame_classifier::FrameClassifier;
use super::pipeline_error::{AdapterError, PipelineError};
use super::pipeline_logger::PipelineLogger;

/// Counts for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedactionSummary {
    pub frames: usize,
    pub faces: usize,
    pub targets: usize,
    pub blurred: usize,
}

/// Redacts a video frame by frame: decode, classify, render, write.
///
/// Single-use: `execute` consumes the use case and releases both video
/// handles on every exit path.
pub struct RedactVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    classifier: FrameClassifier,
    renderer: AssignmentRenderer,
    logger: Box<dyn PipelineLogger>,
}

impl RedactVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        classifier: FrameClassifier,
        renderer: AssignmentRenderer,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            classifier,
            renderer,
            logger,
        }
    }

    pub fn execute(self, input: &Path, output: &Path) -> Result<RedactionSummary, PipelineError> {
        let Self {
            reader,
            writer,
            classifier,
            renderer,
            mut logger,
        } = self;

        let mut reading = ReaderSession { reader };
        let metadata = reading
            .reader
            .open(input)
            .map_err(|source| PipelineError::SourceOpen {
                path: input.to_path_buf(),
                source,
            })?;
        logger.info(&format!(
            "Input: {}x{} @ {:.2} fps, {} frames ({})",
            metadata.width, metadata.height, metadata.fps, metadata.total_frames, metadata.codec
        ));

        let mut frames = reading.reader.frames();
        let first = match frames.next() {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                return Err(PipelineError::NoFrames {
                    path: input.to_path_buf(),
                    reason: e.to_string(),
                })
            }
            None => {
                return Err(PipelineError::NoFrames {
                    path: input.to_path_buf(),
                    reason: "stream ended before the first frame".to_string(),
                })
            }
        };

        let mut writing = WriterSession {
            writer,
            finished: false,
        };
        writing
            .writer
            .open(output, &metadata)
            .map_err(|source| PipelineError::DestinationOpen {
                path: output.to_path_buf(),
                source,
            })?;

        let total = metadata.total_frames;
        let mut summary = RedactionSummary::default();
        let mut decode_start = Instant::now();

        for (index, decoded) in std::iter::once(Ok(first)).chain(frames).enumerate() {
            let mut frame = decoded.map_err(|source| PipelineError::Decode { index, source })?;
            logger.timing("decode", elapsed_ms(decode_start));

            let t = Instant::now();
            let assignments = classifier
                .classify(&frame)
                .map_err(|source| PipelineError::Classify { index, source })?;
            logger.timing("classify", elapsed_ms(t));

            let targets = assignments.iter().filter(|a| a.is_target).count();
            logger.metric("faces", assignments.len() as f64);
            logger.metric("targets", targets as f64);

            let t = Instant::now();
            renderer
                .render(&mut frame, &assignments)
                .map_err(|source| PipelineError::Render { index, source })?;
            logger.timing("render", elapsed_ms(t));

            let t = Instant::now();
            writing
                .writer
                .write(&frame)
                .map_err(|source| PipelineError::Write { index, source })?;
            logger.timing("write", elapsed_ms(t));

            summary.frames += 1;
            summary.faces += assignments.len();
            summary.targets += targets;
            summary.blurred += assignments.len() - targets;
            logger.progress(summary.frames, total);

            decode_start = Instant::now();
        }

        drop(reading);
        writing
            .finish()
            .map_err(|source| PipelineError::Finalize {
                path: output.to_path_buf(),
                source,
            })?;

        logger.info(&format!(
            "Done: {} frames, {} faces ({} kept, {} blurred)",
            summary.frames, summary.faces, summary.targets, summary.blurred
        ));
        logger.summary();
        Ok(summary)
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Closes the reader when dropped.
struct ReaderSession {
    reader: Box<dyn VideoReader>,
}

impl Drop for ReaderSession {
    fn drop(&mut self) {
        self.reader.close();
    }
}

/// Closes (and so finalises) the writer when dropped, unless `finish`
/// already did.
struct WriterSession {
    writer: Box<dyn VideoWriter>,
    finished: bool,
}

impl WriterSession {
    fn finish(mut self) -> Result<(), AdapterError> {
        self.finished = true;
        self.writer.close()
    }
}

impl Drop for WriterSession {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.writer.close() {
                log::warn!("Failed to finalise output after error: {e}");
            }
        }
    }
}
