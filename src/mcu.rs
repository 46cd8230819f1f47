//! MCU-level orchestration: entropy decode, dequantize, IDCT, color convert.
//!
//! Ties `crate::entropy`, `crate::quant`, `crate::idct`, and
//! `crate::color_convert` into the single per-MCU pipeline that
//! `crate::scanline::ScanlineView` runs once per cache miss (component
//! order C4 -> C5 -> C6 -> C7). Grounded on `original_source/mxgui/jpeg_image.cpp`'s
//! `decodeMCU`; the "plain 3x64 buffer renamed semantically by phase" shape
//! for the Y/Cb/Cr-then-R/G/B storage follows the Re-architecture item in
//! `SPEC_FULL.md` §9, rather than the teacher's union.

use crate::bitstream::BitReader;
use crate::color_convert::ycbcr_to_rgb;
use crate::entropy::decode_block;
use crate::header::Header;
use crate::idct::inverse_dct;

/// One decoded-and-converted MCU: three 64-sample planes. Before conversion
/// these hold (Y, Cb, Cr); after, (R, G, B) — the same storage, reused in
/// place per spec §4.7. A one-component (grayscale) frame still produces
/// three identical planes, since Cb = Cr = 0 collapses the conversion to
/// `R = G = B = Y + 128`.
pub type Mcu = [[i32; 64]; 3];

/// Decodes and converts the MCU at `mcu_index` (spec §4.4 through §4.7).
///
/// `previous_dc` holds the DC predictors for up to three components and is
/// updated in place; only the first `header.num_components` entries are
/// meaningful. Returns `None` on any entropy-decode failure; `previous_dc`
/// may be partially updated in that case, and the caller treats the whole
/// image as invalid from this MCU on (spec §4.4, "the image is flagged
/// invalid").
pub fn decode_mcu(
    header: &Header, reader: &mut BitReader<'_>, previous_dc: &mut [i32; 3], mcu_index: u32
) -> Option<Mcu>
{
    if header.restart_interval > 0 && mcu_index % u32::from(header.restart_interval) == 0
    {
        *previous_dc = [0; 3];
        reader.align();
    }

    let num_components = header.num_components as usize;
    let mut planes: Mcu = [[0i32; 64]; 3];

    for (component_index, component) in header.components[..num_components].iter().enumerate()
    {
        let dc_table = &header.dc_huffman_tables[component.dc_huffman_table_id as usize];
        let ac_table = &header.ac_huffman_tables[component.ac_huffman_table_id as usize];

        let mut block = decode_block(reader, dc_table, ac_table, &mut previous_dc[component_index])?;

        let quant_table = &header.quantization_tables[component.quantization_table_id as usize];
        quant_table.dequantize(&mut block);
        inverse_dct(&mut block);

        planes[component_index] = block;
    }

    if num_components == 1
    {
        let mut zero_cb = [0i32; 64];
        let mut zero_cr = [0i32; 64];
        ycbcr_to_rgb(&mut planes[0], &mut zero_cb, &mut zero_cr);
        planes[1] = planes[0];
        planes[2] = planes[0];
    }
    else
    {
        let (y_and_cb, cr) = planes.split_at_mut(2);
        let (y, cb) = y_and_cb.split_at_mut(1);
        ycbcr_to_rgb(&mut y[0], &mut cb[0], &mut cr[0]);
    }

    Some(planes)
}
