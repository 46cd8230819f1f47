//! File-based convenience layer over the in-memory decoder core.
//!
//! The core ([`crate::decoder::JpegDecoder`]) only ever touches byte
//! slices, matching spec's "the hard part never performs I/O". This module
//! supplies the file-based entry point spec.md §6 describes (`open(path)`),
//! reading the whole file once up front, exactly as
//! `original_source/mxgui/jpeg_image.cpp`'s `Image::open` does.

use std::fs;
use std::path::{Path, PathBuf};

use crate::decoder::JpegDecoder;
use crate::errors::DecodeErrors;
use crate::options::DecoderOptions;

/// An owned JPEG file buffer. [`JpegDecoder`] borrows its input, so this
/// type exists to own that input for as long as the caller needs a
/// decoder backed by a path rather than an in-memory slice.
pub struct JpegFile
{
    path: PathBuf,
    data: Vec<u8>
}

impl JpegFile
{
    /// Reads `path` fully into memory. No file handle is kept afterward.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeErrors>
    {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).map_err(DecodeErrors::Io)?;
        Ok(JpegFile { path, data })
    }

    /// Builds a decoder borrowing this file's buffer, with default options.
    #[must_use]
    pub fn decoder(&self) -> JpegDecoder<'_>
    {
        JpegDecoder::new(&self.data)
    }

    /// Builds a decoder borrowing this file's buffer, with explicit options.
    #[must_use]
    pub fn decoder_with_options(&self, options: DecoderOptions) -> JpegDecoder<'_>
    {
        JpegDecoder::new_with_options(&self.data, options)
    }

    /// The path this buffer was read from.
    #[must_use]
    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// Re-reads the same path into a fresh, independent buffer. This is the
    /// file-based equivalent of "copying" a decoder: the source re-opens
    /// the file rather than sharing a buffer or any scanline state, and a
    /// file that changed (or disappeared) on disk between the two opens is
    /// reflected (or surfaced as an error) rather than silently ignored.
    /// `JpegFile` intentionally does not implement `std::clone::Clone`,
    /// since `Clone::clone` cannot report the I/O failure this can.
    pub fn reopen(&self) -> Result<Self, DecodeErrors>
    {
        Self::open(&self.path)
    }
}
