//! Tiny 3x5 bitmap font for numeric overlays.

use crate::shared::frame::Frame;

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
/// Blank columns between glyphs, before scaling.
const GLYPH_SPACING: usize = 1;

/// Rows top to bottom, 3 bits each; bit 2 is the leftmost column.
fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c.to_ascii_lowercase() {
        '0' => [0x7, 0x5, 0x5, 0x5, 0x7],
        '1' => [0x2, 0x6, 0x2, 0x2, 0x7],
        '2' => [0x7, 0x1, 0x7, 0x4, 0x7],
        '3' => [0x7, 0x1, 0x7, 0x1, 0x7],
        '4' => [0x5, 0x5, 0x7, 0x1, 0x1],
        '5' => [0x7, 0x4, 0x7, 0x1, 0x7],
        '6' => [0x7, 0x4, 0x7, 0x5, 0x7],
        '7' => [0x7, 0x1, 0x2, 0x4, 0x4],
        '8' => [0x7, 0x5, 0x7, 0x5, 0x7],
        '9' => [0x7, 0x5, 0x7, 0x1, 0x7],
        '.' => [0x0, 0x0, 0x0, 0x0, 0x2],
        '-' => [0x0, 0x0, 0x7, 0x0, 0x0],
        '+' => [0x0, 0x2, 0x7, 0x2, 0x0],
        ' ' => [0x0, 0x0, 0x0, 0x0, 0x0],
        // enough letters for "inf" and "NaN"
        'a' => [0x2, 0x5, 0x7, 0x5, 0x5],
        'f' => [0x7, 0x4, 0x6, 0x4, 0x4],
        'i' => [0x7, 0x2, 0x2, 0x2, 0x7],
        'n' => [0x6, 0x5, 0x5, 0x5, 0x5],
        _ => [0x7, 0x7, 0x7, 0x7, 0x7],
    }
}

/// Pixel size of `text` rendered at `scale`.
pub fn measure(text: &str, scale: usize) -> (usize, usize) {
    let n = text.chars().count();
    let width = if n == 0 {
        0
    } else {
        (n * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
    };
    (width, GLYPH_HEIGHT * scale)
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels falling
/// outside the frame are dropped.
pub fn draw_text(frame: &mut Frame, x: i64, y: i64, text: &str, color: [u8; 3], scale: usize) {
    let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
    for (i, c) in text.chars().enumerate() {
        draw_glyph(frame, x + i as i64 * advance, y, glyph(c), color, scale);
    }
}

fn draw_glyph(
    frame: &mut Frame,
    x: i64,
    y: i64,
    rows: [u8; GLYPH_HEIGHT],
    color: [u8; 3],
    scale: usize,
) {
    let s = scale as i64;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                continue;
            }
            let px = x + col as i64 * s;
            let py = y + row as i64 * s;
            for dy in 0..s {
                for dx in 0..s {
                    frame.put_pixel(px + dx, py + dy, color);
                }
            }
        }
    }
}
