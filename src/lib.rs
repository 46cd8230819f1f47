//! A scalar baseline JPEG decoder with a pull-style scanline interface,
//! for embedded graphical systems that want to stream a decoded image
//! straight into a framebuffer instead of holding the whole bitmap in
//! memory.
//!
//! Only baseline (SOF0), 8-bit, non-subsampled (1x1 every component),
//! Huffman-coded JPEG is supported; progressive, arithmetic-coded,
//! hierarchical, and CMYK/YIQ frames are rejected outright. Output is
//! always RGB565, one scanline at a time, via [`JpegDecoder::get_scan_line`].
//!
//! ```no_run
//! use baseline_jpeg::JpegDecoder;
//!
//! # fn run(data: &[u8]) {
//! let mut decoder = JpegDecoder::new(data);
//! decoder.decode_headers().expect("malformed JPEG");
//!
//! let width = decoder.width() as usize;
//! let mut row = vec![0u16; width];
//! for y in 0..decoder.height()
//! {
//!     decoder.get_scan_line(0, y, &mut row);
//!     // ... blit `row` to a framebuffer ...
//! }
//! # }
//! ```

mod bitstream;
mod color_convert;
mod components;
mod decoder;
mod entropy;
mod errors;
mod file;
mod header;
mod headers;
mod huffman;
mod idct;
mod marker;
mod mcu;
mod misc;
mod options;
mod quant;
mod scanline;

pub use decoder::{ImageInfo, JpegDecoder};
pub use errors::DecodeErrors;
pub use file::JpegFile;
pub use options::DecoderOptions;
