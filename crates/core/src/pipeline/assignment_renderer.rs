use std::error::Error;

use crate::recognition::domain::target_assignment::Assignment;
use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::rendering::domain::frame_blurrer::FrameBlurrer;
use crate::shared::frame::Frame;

/// Applies a frame's assignments in place: targets are outlined, every
/// other face is blurred.
///
/// With `show_distances` each face that has a distance also gets it
/// printed next to the box. The overlay never changes which regions are
/// outlined or blurred.
pub struct AssignmentRenderer {
    blurrer: Box<dyn FrameBlurrer>,
    annotator: Box<dyn FrameAnnotator>,
    show_distances: bool,
}

impl AssignmentRenderer {
    pub fn new(
        blurrer: Box<dyn FrameBlurrer>,
        annotator: Box<dyn FrameAnnotator>,
        show_distances: bool,
    ) -> Self {
        Self {
            blurrer,
            annotator,
            show_distances,
        }
    }

    /// Renders in assignment order. No assignments means no pixel changes.
    pub fn render(&self, frame: &mut Frame, assignments: &[Assignment]) -> Result<(), Box<dyn Error>> {
        for assignment in assignments {
            if assignment.is_target {
                self.annotator.outline(frame, &assignment.face_box);
            } else {
                self.blurrer
                    .blur(frame, std::slice::from_ref(&assignment.face_box))?;
            }

            if self.show_distances {
                if let Some(distance) = assignment.distance {
                    self.annotator
                        .label(frame, &assignment.face_box, &format_distance(distance));
                }
            }
        }
        Ok(())
    }
}

fn format_distance(distance: f32) -> String {
    format!("{distance:.4}")
}
