//! The row-pull facade (C8 ScanlineView).
//!
//! Grounded on `original_source/mxgui/jpeg_image.cpp`'s `getScanLine`: an
//! MCU-row working cache so a caller can pull RGB565 rows one at a time
//! without ever materializing the whole decoded image. The entropy stream
//! is read forward-only, so this struct tracks the bit cursor as a plain
//! `(byte, bit)` position (see `BitReader::position`/`set_position`)
//! instead of holding a `BitReader` borrowing the owning `Header` — that
//! would make `JpegDecoder` self-referential.

use crate::bitstream::BitReader;
use crate::color_convert::pack_rgb565;
use crate::header::Header;
use crate::mcu::{decode_mcu, Mcu};
use crate::misc::blocks_for_dimension;

/// Per-scan state: MCU-row cache, DC predictors, bit cursor, and the
/// "rows emitted" counter that drives the auto-reset at end of image
/// (spec §4.8, §3 "after the last row ... the decoder auto-resets").
pub struct ScanlineView
{
    mcu_width: u16,
    cache: Vec<Mcu>,
    loaded: Vec<bool>,
    last_mcu_row: Option<u16>,
    previous_dc: [i32; 3],
    position: (usize, u8),
    rows_emitted: u16
}

impl ScanlineView
{
    /// Builds a fresh view sized for `header`'s width, with nothing cached
    /// and the bit cursor at the top of the entropy payload.
    #[must_use]
    pub fn new(header: &Header) -> Self
    {
        let mcu_width = blocks_for_dimension(header.width);
        ScanlineView {
            mcu_width,
            cache: vec![[[0i32; 64]; 3]; mcu_width as usize],
            loaded: vec![false; mcu_width as usize],
            last_mcu_row: None,
            previous_dc: [0; 3],
            position: (0, 0),
            rows_emitted: 0
        }
    }

    /// Rewinds all per-scan state so a subsequent pull reads from the top
    /// of the image again (spec §3's "reset" requirement; also called
    /// automatically once every row has been emitted).
    pub fn reset(&mut self)
    {
        self.loaded.iter_mut().for_each(|slot| *slot = false);
        self.last_mcu_row = None;
        self.previous_dc = [0; 3];
        self.position = (0, 0);
        self.rows_emitted = 0;
    }

    /// Fills `out` with `out.len()` RGB565 samples for row `y`, starting at
    /// column `x0` (spec §4.8's `getScanLine`). Returns `false` (without
    /// writing to `out`) if an MCU on the way fails to decode; the caller
    /// treats this as the decoder going invalid for the rest of the image.
    pub fn get_scan_line(&mut self, header: &Header, x0: u16, y: u16, out: &mut [u16]) -> bool
    {
        let mcu_row = y / 8;
        let pixel_row = y % 8;

        if self.last_mcu_row != Some(mcu_row)
        {
            self.loaded.iter_mut().for_each(|slot| *slot = false);
            self.last_mcu_row = Some(mcu_row);
        }

        let mut reader = BitReader::new(&header.huffman_data);
        reader.set_position(self.position);

        for (i, slot) in out.iter_mut().enumerate()
        {
            let x = x0 + i as u16;
            let col = (x / 8) as usize;
            let pix = usize::from(pixel_row) * 8 + usize::from(x % 8);

            if !self.loaded[col]
            {
                let mcu_index = u32::from(mcu_row) * u32::from(self.mcu_width) + col as u32;
                let Some(mcu) = decode_mcu(header, &mut reader, &mut self.previous_dc, mcu_index) else {
                    self.position = reader.position();
                    return false;
                };
                self.cache[col] = mcu;
                self.loaded[col] = true;
            }

            let mcu = &self.cache[col];
            *slot = pack_rgb565(mcu[0][pix], mcu[1][pix], mcu[2][pix]);
        }

        self.position = reader.position();

        self.rows_emitted += 1;
        if self.rows_emitted >= header.height
        {
            self.reset();
        }

        true
    }
}
