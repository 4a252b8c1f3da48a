use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

/// Adapter error as returned by the domain traits.
pub type AdapterError = Box<dyn Error>;

/// Failures that abort a redaction run.
///
/// Frame indices are zero-based positions in decode order.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot open source video {path}: {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: AdapterError,
    },
    #[error("cannot open destination video {path}: {source}")]
    DestinationOpen {
        path: PathBuf,
        #[source]
        source: AdapterError,
    },
    #[error("source video {path} has no readable frames: {reason}")]
    NoFrames { path: PathBuf, reason: String },
    #[error("failed to decode frame {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: AdapterError,
    },
    #[error("face analysis failed on frame {index}: {source}")]
    Classify {
        index: usize,
        #[source]
        source: AdapterError,
    },
    #[error("failed to render frame {index}: {source}")]
    Render {
        index: usize,
        #[source]
        source: AdapterError,
    },
    #[error("failed to write frame {index}: {source}")]
    Write {
        index: usize,
        #[source]
        source: AdapterError,
    },
    #[error("failed to finalise {path}: {source}")]
    Finalize {
        path: PathBuf,
        #[source]
        source: AdapterError,
    },
    #[error("cannot read target image {path}: {source}")]
    TargetImage {
        path: PathBuf,
        #[source]
        source: AdapterError,
    },
    #[error("cannot compute face embedding for target image {path}: {source}")]
    ReferenceEmbedding {
        path: PathBuf,
        #[source]
        source: AdapterError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure_site() {
        let err = PipelineError::Decode {
            index: 41,
            source: "corrupt slice".into(),
        };
        assert_eq!(err.to_string(), "failed to decode frame 41: corrupt slice");

        let err = PipelineError::NoFrames {
            path: PathBuf::from("clip.mp4"),
            reason: "stream is empty".into(),
        };
        assert!(err.to_string().contains("clip.mp4"));
    }

    #[test]
    fn test_source_is_exposed() {
        let err = PipelineError::TargetImage {
            path: PathBuf::from("alice.jpg"),
            source: "unsupported format".into(),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("unsupported format"));
    }
}
