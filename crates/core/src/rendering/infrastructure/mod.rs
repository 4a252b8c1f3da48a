mod bitmap_font;
pub mod cpu_annotator;
pub mod cpu_rectangular_blurrer;
mod gaussian;
