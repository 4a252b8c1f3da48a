use std::collections::HashMap;
use std::time::Instant;

use crate::shared::constants::PROGRESS_INTERVAL;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples use cases from specific output mechanisms so each caller can
/// observe pipeline behavior without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Report frame-level progress. `total` is 0 when the frame count is
    /// unknown up front.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that tracks per-stage timing, metrics, and
/// provides a summary report at pipeline completion.
///
/// Progress output is throttled to every `throttle_frames` frames
/// to avoid excessive I/O on large videos.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
            messages: Vec::new(),
        }
    }

    /// Progress line for frame `current`, or `None` when throttled.
    pub fn progress_line(&self, current: usize, total: usize) -> Option<String> {
        let on_interval = current > 0 && current % self.throttle_frames == 0;
        let is_last = total > 0 && current == total;
        if !(on_interval || is_last) {
            return None;
        }
        Some(if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            format!("Processing: {current}/{total} frames ({pct:.1}%)")
        } else {
            format!("Processing: {current} frames")
        })
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = Vec::new();

        lines.push(format!(
            "Pipeline summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let sum: f64 = values.iter().sum();
            lines.push(format!("  {name}: avg {:.1}, total {sum:.0}", mean(values)));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Returns the metric data for a given name.
    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(PROGRESS_INTERVAL)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen = self.frames_seen.max(current);
        if let Some(line) = self.progress_line(current, total) {
            log::info!("{line}");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // --- NullPipelineLogger tests ---

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("classify", 5.0);
        logger.metric("faces", 3.0);
        logger.info("hello");
        logger.summary();
    }

    // --- StdoutPipelineLogger tests ---

    #[rstest]
    #[case::first_frame(1, 100, false)]
    #[case::interval(30, 100, true)]
    #[case::off_interval(31, 100, false)]
    #[case::second_interval(60, 100, true)]
    #[case::last_frame(100, 100, true)]
    #[case::unknown_total_interval(90, 0, true)]
    #[case::unknown_total_other(91, 0, false)]
    fn test_progress_throttle(#[case] current: usize, #[case] total: usize, #[case] shown: bool) {
        let logger = StdoutPipelineLogger::default();
        assert_eq!(logger.progress_line(current, total).is_some(), shown);
    }

    #[test]
    fn test_progress_line_formats() {
        let logger = StdoutPipelineLogger::new(30);
        assert_eq!(
            logger.progress_line(30, 120).unwrap(),
            "Processing: 30/120 frames (25.0%)"
        );
        assert_eq!(logger.progress_line(30, 0).unwrap(), "Processing: 30 frames");
    }

    #[test]
    fn test_progress_tracks_frames_seen() {
        let mut logger = StdoutPipelineLogger::new(10);
        for i in 1..=20 {
            logger.progress(i, 0);
        }
        assert_eq!(logger.frames_seen, 20);
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("classify", 20.0);
        logger.timing("classify", 30.0);
        logger.timing("render", 5.0);

        let classify = logger.timings_for("classify").unwrap();
        assert_eq!(classify.len(), 2);
        assert!((classify[0] - 20.0).abs() < f64::EPSILON);
        assert!((classify[1] - 30.0).abs() < f64::EPSILON);

        let render = logger.timings_for("render").unwrap();
        assert_eq!(render.len(), 1);
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("faces", 3.0);
        logger.metric("faces", 4.0);

        let values = logger.metrics_for("faces").unwrap();
        assert_eq!(values.len(), 2);
        assert!((mean(values) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_includes_timing_and_metrics() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.frames_seen = 10;
        logger.timing("decode", 20.0);
        logger.timing("classify", 5.0);
        logger.metric("targets", 1.0);
        logger.metric("targets", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Pipeline summary (10 frames"));
        assert!(summary.contains("decode"));
        assert!(summary.contains("classify"));
        assert!(summary.contains("targets: avg 1.5, total 3"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.info("hello world");
        assert_eq!(logger.messages, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_default_throttle() {
        let logger = StdoutPipelineLogger::default();
        assert_eq!(logger.throttle_frames, PROGRESS_INTERVAL);
    }
}
