//! The public facade (spec §6): `JpegDecoder` and `ImageInfo`.
//!
//! Grounded on `zune-jpeg`'s `decoder.rs` (`JpegDecoder`/`ImageInfo` split,
//! the one-shot header decode before any scanline is pulled) and on
//! `original_source/mxgui/jpeg_image.h`'s `Image` class for the overall
//! lifecycle (`open`/`isOpen`/`getScanLine`). Validity is driven from the
//! single `valid` field here — Open Question 4 (`SPEC_FULL.md` §9).

use log::warn;

use crate::errors::DecodeErrors;
use crate::header::Header;
use crate::headers;
use crate::options::DecoderOptions;
use crate::scanline::ScanlineView;

/// Read-only image metadata, available once [`JpegDecoder::decode_headers`]
/// has succeeded. Lets a caller size a framebuffer before pulling any
/// scanlines.
#[derive(Debug, Copy, Clone)]
pub struct ImageInfo
{
    pub width: u16,
    pub height: u16,
    pub num_components: u8,
    pub restart_interval: u16
}

/// A baseline JPEG decoder borrowing its input buffer. Construct with
/// [`JpegDecoder::new`], call [`JpegDecoder::decode_headers`] once, then
/// pull rows with [`JpegDecoder::get_scan_line`].
pub struct JpegDecoder<'a>
{
    data: &'a [u8],
    options: DecoderOptions,
    header: Option<Header>,
    info: Option<ImageInfo>,
    view: Option<ScanlineView>,
    valid: bool
}

impl<'a> JpegDecoder<'a>
{
    /// Wraps `data` with the default [`DecoderOptions`]. Nothing is parsed
    /// until [`Self::decode_headers`] is called.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self
    {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Wraps `data` with explicit `options`.
    #[must_use]
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> Self
    {
        JpegDecoder { data, options, header: None, info: None, view: None, valid: false }
    }

    /// Parses the container (spec §4.2) and, on success, readies the
    /// scanline cache. On failure the decoder is left invalid — `info()`
    /// returns `None` and `get_scan_line` always returns `false` — and the
    /// error is both returned and logged.
    pub fn decode_headers(&mut self) -> Result<&ImageInfo, DecodeErrors>
    {
        match headers::parse(self.data, &self.options)
        {
            Ok(header) =>
            {
                let info = ImageInfo {
                    width: header.width,
                    height: header.height,
                    num_components: header.num_components,
                    restart_interval: header.restart_interval
                };
                self.view = Some(ScanlineView::new(&header));
                self.header = Some(header);
                self.info = Some(info);
                self.valid = true;
                Ok(self.info.as_ref().expect("just assigned"))
            }
            Err(err) =>
            {
                warn!("Failed to decode JPEG headers: {err}");
                self.valid = false;
                Err(err)
            }
        }
    }

    /// Image metadata, or `None` before a successful [`Self::decode_headers`].
    #[must_use]
    pub fn info(&self) -> Option<&ImageInfo>
    {
        self.info.as_ref()
    }

    /// Whether the decoder can currently serve scanlines (spec's `isOpen`).
    #[must_use]
    pub const fn is_valid(&self) -> bool
    {
        self.valid
    }

    /// Image width in pixels, or `0` if the decoder is not valid.
    #[must_use]
    pub fn width(&self) -> u16
    {
        self.info.as_ref().map_or(0, |info| info.width)
    }

    /// Image height in pixels, or `0` if the decoder is not valid.
    #[must_use]
    pub fn height(&self) -> u16
    {
        self.info.as_ref().map_or(0, |info| info.height)
    }

    /// Fills `out` with `out.len()` RGB565 samples from row `y`, starting
    /// at column `x0` (spec §4.8's `getScanLine`; `out.len()` must be
    /// `<= width - x0`). Returns `false` if the decoder is invalid, or
    /// becomes invalid partway through this call because an MCU failed to
    /// decode (spec §7: bitstream-invalid conditions fail this MCU and
    /// everything after it).
    pub fn get_scan_line(&mut self, x0: u16, y: u16, out: &mut [u16]) -> bool
    {
        if !self.valid
        {
            return false;
        }

        let (Some(header), Some(view)) = (self.header.as_ref(), self.view.as_mut()) else
        {
            return false;
        };

        if !view.get_scan_line(header, x0, y, out)
        {
            warn!("MCU decode failed at row {y}, column {x0}; marking decoder invalid");
            self.valid = false;
            return false;
        }

        true
    }

    /// Rewinds per-scan state (DC predictors, MCU-row cache, bit cursor) so
    /// the next [`Self::get_scan_line`] call reads from the top of the
    /// image, without re-parsing the container.
    pub fn reset(&mut self)
    {
        if let Some(view) = self.view.as_mut()
        {
            view.reset();
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn minimal_8x8_grayscale_jpeg() -> Vec<u8>
    {
        // SOI, DQT (id 0, all-ones, 8-bit), SOF0 (8x8, 1 component),
        // DHT (DC table id 0: one length-1 code for category 0),
        // DHT (AC table id 0: one length-1 code for EOB),
        // SOS (component 0, DC/AC table 0), one entropy byte, EOI.
        let mut data = vec![0xFF, 0xD8];

        data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
        data.extend(std::iter::repeat(1u8).take(64));

        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x08, 0x00, 0x08, 0x01, 0x00, 0x11, 0x00]);

        data.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x14, 0x00]);
        data.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        data.push(0x00);

        data.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x14, 0x10]);
        data.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        data.push(0x00);

        data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, 0x3F, 0x00]);

        data.push(0b0000_0000);
        data.extend_from_slice(&[0xFF, 0xD9]);

        data
    }

    #[test]
    fn decode_headers_then_pull_every_row()
    {
        let data = minimal_8x8_grayscale_jpeg();
        let mut decoder = JpegDecoder::new(&data);

        assert!(!decoder.is_valid());
        let info = *decoder.decode_headers().unwrap();
        assert!(decoder.is_valid());
        assert_eq!(info.width, 8);
        assert_eq!(info.height, 8);
        assert_eq!(decoder.width(), 8);
        assert_eq!(decoder.height(), 8);

        for y in 0..8
        {
            let mut out = [0u16; 8];
            assert!(decoder.get_scan_line(0, y, &mut out));
            assert!(out.iter().all(|&v| v == 0x8410));
        }
    }

    #[test]
    fn invalid_data_leaves_decoder_invalid_and_unreadable()
    {
        let mut decoder = JpegDecoder::new(&[0x00, 0x01]);
        assert!(decoder.decode_headers().is_err());
        assert!(!decoder.is_valid());

        let mut out = [0u16; 8];
        assert!(!decoder.get_scan_line(0, 0, &mut out));
    }

    #[test]
    fn reset_allows_rereading_from_the_top()
    {
        let data = minimal_8x8_grayscale_jpeg();
        let mut decoder = JpegDecoder::new(&data);
        decoder.decode_headers().unwrap();

        for y in 0..8
        {
            let mut out = [0u16; 8];
            decoder.get_scan_line(0, y, &mut out);
        }

        decoder.reset();
        let mut out = [0u16; 8];
        assert!(decoder.get_scan_line(0, 0, &mut out));
        assert!(out.iter().all(|&v| v == 0x8410));
    }
}
