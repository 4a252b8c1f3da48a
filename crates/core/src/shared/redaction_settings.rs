use super::constants::{DEFAULT_DETECTION_THRESHOLD, DEFAULT_RECOGNITION_THRESHOLD};

/// Per-run tuning knobs, filled from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RedactionSettings {
    /// Minimum detection score for a region to count as a face.
    pub detection_threshold: f64,
    /// Maximum embedding distance for a face to match a reference.
    pub recognition_threshold: f32,
    /// Draw each face's distance next to it.
    pub show_distances: bool,
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            detection_threshold: DEFAULT_DETECTION_THRESHOLD,
            recognition_threshold: DEFAULT_RECOGNITION_THRESHOLD,
            show_distances: false,
        }
    }
}

impl RedactionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !self.detection_threshold.is_finite() {
            return Err(format!(
                "Detection threshold must be a finite number, got {}",
                self.detection_threshold
            ));
        }
        if !self.recognition_threshold.is_finite() || self.recognition_threshold <= 0.0 {
            return Err(format!(
                "Recognition threshold must be a positive number, got {}",
                self.recognition_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let settings = RedactionSettings::default();
        assert_relative_eq!(settings.detection_threshold, 0.0);
        assert_relative_eq!(settings.recognition_threshold, 0.58);
        assert!(!settings.show_distances);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_negative_detection_threshold_is_valid() {
        let settings = RedactionSettings {
            detection_threshold: -1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_non_finite_detection_threshold_rejected() {
        let settings = RedactionSettings {
            detection_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_positive_recognition_threshold_rejected() {
        for value in [0.0, -0.3, f32::INFINITY] {
            let settings = RedactionSettings {
                recognition_threshold: value,
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "{value} should be rejected");
        }
    }
}
