use std::cell::RefCell;

use crate::rendering::domain::frame_blurrer::FrameBlurrer;
use crate::shared::constants::BLUR_KERNEL_SIZE;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

use super::gaussian::{self, RoiRect};

/// CPU rectangular blurrer using separable Gaussian blur.
///
/// Each box is blurred in isolation: the kernel only ever sees pixels
/// inside the box, edges are reflected.
pub struct CpuRectangularBlurrer {
    kernel: Vec<f32>,
    roi_buf: RefCell<Vec<u8>>,
    blur_temp: RefCell<Vec<f32>>,
}

impl CpuRectangularBlurrer {
    pub fn new(kernel_size: usize) -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(kernel_size | 1),
            roi_buf: RefCell::new(Vec::new()),
            blur_temp: RefCell::new(Vec::new()),
        }
    }
}

impl Default for CpuRectangularBlurrer {
    fn default() -> Self {
        Self::new(BLUR_KERNEL_SIZE)
    }
}

impl FrameBlurrer for CpuRectangularBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        boxes: &[FaceBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (fw, fh) = (frame.width(), frame.height());
        let channels = frame.channels() as usize;
        let data = frame.data_mut();

        let mut roi = self.roi_buf.borrow_mut();
        let mut temp = self.blur_temp.borrow_mut();

        for b in boxes {
            let b = b.clamped(fw, fh);
            if b.is_empty() {
                continue;
            }
            let rect = RoiRect {
                x: b.left as usize,
                y: b.top as usize,
                w: b.width() as usize,
                h: b.height() as usize,
            };

            gaussian::extract_roi(data, fw as usize, channels, rect, &mut roi);
            gaussian::separable_gaussian_blur_with_kernel(
                &mut roi,
                rect.w,
                rect.h,
                channels,
                &self.kernel,
                &mut temp,
            );
            gaussian::write_roi_back(data, &roi, fw as usize, channels, rect);
        }

        Ok(())
    }
}
