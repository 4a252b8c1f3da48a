use std::path::Path;

use ffmpeg_next::Rational;

use crate::shared::constants::OUTPUT_CODEC_TAG;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// Frame rate used when the source does not report one.
const DEFAULT_FPS: i32 = 30;

/// MPEG-4 Part 2 requires time base terms below 2^16.
const MAX_TIME_BASE_TERM: i32 = 65_535;

/// Containers that accept the `mp4v` sample entry.
const ISO_BMFF_FORMATS: [&str; 5] = ["mp4", "mov", "ipod", "3gp", "3g2"];

/// Encodes video frames via ffmpeg-next as MPEG-4 Part 2, video only.
pub struct FfmpegWriter {
    octx: Option<ffmpeg_next::format::context::Output>,
    encoder: Option<ffmpeg_next::codec::encoder::video::Encoder>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    width: u32,
    height: u32,
    time_base: Rational,
    frame_count: usize,
    video_stream_index: usize,
}

// Safety: FfmpegWriter is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegWriter {}

impl FfmpegWriter {
    pub fn new() -> Self {
        Self {
            octx: None,
            encoder: None,
            scaler: None,
            width: 0,
            height: 0,
            time_base: Rational(1, DEFAULT_FPS),
            frame_count: 0,
            video_stream_index: 0,
        }
    }

    /// Moves every packet the encoder has ready into the container.
    fn drain_packets(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (Some(encoder), Some(octx)) = (self.encoder.as_mut(), self.octx.as_mut()) else {
            return Err("FfmpegWriter: not opened".into());
        };
        let ost_time_base = octx
            .stream(self.video_stream_index)
            .ok_or("Output stream missing")?
            .time_base();

        let mut encoded = ffmpeg_next::Packet::empty();
        while encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(self.video_stream_index);
            encoded.rescale_ts(self.time_base, ost_time_base);
            encoded.write_interleaved(octx)?;
        }
        Ok(())
    }

    /// Flushes the encoder and writes the container trailer.
    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Ok(());
        };
        encoder.send_eof()?;
        self.drain_packets()?;
        if let Some(octx) = self.octx.as_mut() {
            octx.write_trailer()?;
        }
        Ok(())
    }
}

impl Default for FfmpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoWriter for FfmpegWriter {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut octx = ffmpeg_next::format::output(path)?;

        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);
        let tag_supported = octx
            .format()
            .name()
            .split(',')
            .any(|name| ISO_BMFF_FORMATS.contains(&name));

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4)
            .ok_or("MPEG4 encoder not found")?;

        let mut ost = octx.add_stream(Some(codec))?;

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()?;

        let frame_rate = output_frame_rate(metadata.fps);
        let time_base = frame_rate.invert();

        encoder_ctx.set_width(metadata.width);
        encoder_ctx.set_height(metadata.height);
        encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
        encoder_ctx.set_time_base(time_base);
        encoder_ctx.set_frame_rate(Some(frame_rate));

        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder_ctx.open_with(ffmpeg_next::Dictionary::new())?;
        ost.set_parameters(&encoder);
        ost.set_time_base(time_base);
        if tag_supported {
            // Safety: the stream's codec parameters are owned by `octx`,
            // which outlives this write, and nothing else aliases them yet.
            unsafe {
                (*ost.parameters().as_mut_ptr()).codec_tag = u32::from_le_bytes(OUTPUT_CODEC_TAG);
            }
        }
        self.video_stream_index = ost.index();

        octx.write_header()?;

        // RGB -> YUV
        let scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            metadata.width,
            metadata.height,
            ffmpeg_next::format::Pixel::YUV420P,
            metadata.width,
            metadata.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        log::debug!(
            "Writing {} as MPEG-4 {}x{} @ {}/{} fps",
            path.display(),
            metadata.width,
            metadata.height,
            frame_rate.numerator(),
            frame_rate.denominator()
        );

        self.width = metadata.width;
        self.height = metadata.height;
        self.time_base = time_base;
        self.octx = Some(octx);
        self.encoder = Some(encoder);
        self.scaler = Some(scaler);
        self.frame_count = 0;

        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let (Some(encoder), Some(scaler)) = (self.encoder.as_mut(), self.scaler.as_mut()) else {
            return Err("FfmpegWriter: not opened".into());
        };
        if frame.width() != self.width || frame.height() != self.height {
            return Err(format!(
                "Frame is {}x{}, writer expects {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )
            .into());
        }

        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            self.width,
            self.height,
        );

        let stride = rgb_frame.stride(0);
        let data = rgb_frame.data_mut(0);
        let src = frame.data();
        let row_bytes = self.width as usize * 3;

        // Copy pixel data, respecting stride
        for row in 0..self.height as usize {
            let src_start = row * row_bytes;
            let dst_start = row * stride;
            data[dst_start..dst_start + row_bytes]
                .copy_from_slice(&src[src_start..src_start + row_bytes]);
        }

        let mut yuv_frame = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&rgb_frame, &mut yuv_frame)?;
        yuv_frame.set_pts(Some(self.frame_count as i64));

        encoder.send_frame(&yuv_frame)?;
        self.drain_packets()?;

        self.frame_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let result = self.finish();

        self.octx = None;
        self.encoder = None;
        self.scaler = None;

        result
    }
}

/// Converts a floating-point frame rate into an exact rational the encoder
/// accepts, recognising the NTSC `N * 1000 / 1001` family.
fn output_frame_rate(fps: f64) -> Rational {
    if !fps.is_finite() || fps <= 0.0 {
        return Rational(DEFAULT_FPS, 1);
    }
    for den in [1, 1001, 1000, 100] {
        let num = fps * den as f64;
        let rounded = num.round();
        if (num - rounded).abs() < 1e-3 && (1.0..=MAX_TIME_BASE_TERM as f64).contains(&rounded) {
            return reduce(rounded as i32, den);
        }
    }
    Rational((fps.round() as i32).clamp(1, MAX_TIME_BASE_TERM), 1)
}

fn reduce(num: i32, den: i32) -> Rational {
    let (mut a, mut b) = (num, den);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Rational(num / a, den / a)
}
