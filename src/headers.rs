//! Segment-level container parsing (C2 SegmentParser).
//!
//! Walks the marker stream once, at `open`/`decode_headers` time, and
//! populates a [`Header`]. Grounded on `original_source/mxgui/jpeg_image.cpp`'s
//! `readJPG`/`readStartOfFrame`/`readQuantizationTable`/`readHuffmanTable`/
//! `readStartOfScan`/`readRestartInterval`, with the five Open Questions from
//! spec.md §9 resolved as documented in `DESIGN.md`, and idiom (the
//! `Result`-returning parse functions, `log` diagnostics) grounded on
//! `zune-jpeg`'s `headers.rs`.

use log::warn;

use crate::components::ColorComponent;
use crate::errors::DecodeErrors;
use crate::header::Header;
use crate::huffman::{HuffmanTable, MAX_SYMBOLS};
use crate::marker::Marker;
use crate::options::DecoderOptions;

fn read_u16_be(data: &[u8], pos: usize) -> Result<u16, DecodeErrors>
{
    data.get(pos..pos + 2)
        .map(|s| u16::from_be_bytes([s[0], s[1]]))
        .ok_or_else(|| DecodeErrors::FormatStatic("Unexpected end of file"))
}

fn read_u8(data: &[u8], pos: usize) -> Result<u8, DecodeErrors>
{
    data.get(pos).copied().ok_or_else(|| DecodeErrors::FormatStatic("Unexpected end of file"))
}

/// Consumes one marker: expects `data[*pos] == 0xFF`, tolerates any number
/// of extra `0xFF` fill bytes, and returns the marker code byte.
fn next_marker(data: &[u8], pos: &mut usize) -> Result<u8, DecodeErrors>
{
    let first = read_u8(data, *pos)?;
    if first != 0xFF
    {
        return Err(DecodeErrors::Format(format!(
            "Expected a marker at offset {}, found 0x{:02X}",
            *pos, first
        )));
    }
    *pos += 1;

    loop
    {
        let byte = read_u8(data, *pos)?;
        *pos += 1;
        if byte != 0xFF
        {
            return Ok(byte);
        }
        // run of fill bytes, keep scanning
    }
}

fn parse_sof(data: &[u8], pos: &mut usize, header: &mut Header, options: &DecoderOptions) -> Result<(), DecodeErrors>
{
    if header.num_components != 0
    {
        return Err(DecodeErrors::SofError("Duplicate start-of-frame segment".to_string()));
    }

    let seg_start = *pos;
    let length = read_u16_be(data, *pos)?;
    *pos += 2;
    let seg_end = seg_start + length as usize;

    let precision = read_u8(data, *pos)?;
    *pos += 1;
    if precision != 8
    {
        return Err(DecodeErrors::Unsupported("Only 8-bit sample precision is supported"));
    }

    let height = read_u16_be(data, *pos)?;
    *pos += 2;
    let width = read_u16_be(data, *pos)?;
    *pos += 2;

    if height == 0 || width == 0
    {
        return Err(DecodeErrors::SofError("Width and height must be non-zero".to_string()));
    }
    if width > options.max_width() || height > options.max_height()
    {
        return Err(DecodeErrors::SofError(format!(
            "Image dimensions {width}x{height} exceed the configured maximum"
        )));
    }

    let num_components = read_u8(data, *pos)?;
    *pos += 1;

    if num_components == 4
    {
        return Err(DecodeErrors::Unsupported("CMYK (4-component) frames are not supported"));
    }
    if num_components != 1 && num_components != 3
    {
        return Err(DecodeErrors::SofError(format!(
            "Expected 1 or 3 components, found {num_components}"
        )));
    }

    header.num_components = num_components;
    header.width = width;
    header.height = height;

    for i in 0..num_components as usize
    {
        let raw_id = read_u8(data, *pos)?;
        *pos += 1;

        if i == 0 && raw_id == 0
        {
            header.zero_based = true;
        }
        let id = if header.zero_based { raw_id + 1 } else { raw_id };

        if id == 0 || id > 3
        {
            return Err(DecodeErrors::SofError(format!("Invalid component id {id}")));
        }
        if header.components[..i].iter().any(|c| c.id == id)
        {
            return Err(DecodeErrors::SofError(format!("Duplicate component id {id}")));
        }

        let sampling = read_u8(data, *pos)?;
        *pos += 1;
        let horizontal = sampling >> 4;
        let vertical = sampling & 0x0F;
        if horizontal != 1 || vertical != 1
        {
            return Err(DecodeErrors::Unsupported(
                "Chroma subsampling is not supported; every component must have sampling factor 1x1"
            ));
        }

        let quantization_table_id = read_u8(data, *pos)?;
        *pos += 1;
        if quantization_table_id > 3
        {
            return Err(DecodeErrors::SofError(format!(
                "Invalid quantization table id {quantization_table_id}"
            )));
        }

        let mut component = ColorComponent::new(id);
        component.horizontal_sampling_factor = horizontal;
        component.vertical_sampling_factor = vertical;
        component.quantization_table_id = quantization_table_id;
        header.components[i] = component;
    }

    if *pos != seg_end
    {
        return Err(DecodeErrors::SofError(format!(
            "Length of start of frame differs from expected {}, value is {}",
            *pos - seg_start,
            length
        )));
    }

    Ok(())
}

fn parse_dqt(data: &[u8], pos: &mut usize, header: &mut Header) -> Result<(), DecodeErrors>
{
    let seg_start = *pos;
    let length = read_u16_be(data, *pos)?;
    *pos += 2;
    let seg_end = seg_start + length as usize;

    while *pos < seg_end
    {
        let table_info = read_u8(data, *pos)?;
        *pos += 1;

        let id = table_info & 0x0F;
        if id > 3
        {
            return Err(DecodeErrors::DqtError(format!("Invalid quantization table id {id}")));
        }
        let is_16_bit = (table_info >> 4) != 0;

        for i in 0..64
        {
            let value = if is_16_bit
            {
                let v = read_u16_be(data, *pos)?;
                *pos += 2;
                v
            }
            else
            {
                let v = read_u8(data, *pos)?;
                *pos += 1;
                u16::from(v)
            };
            header.quantization_tables[id as usize].set_zig_zag(i, value);
        }
    }

    if *pos != seg_end
    {
        return Err(DecodeErrors::DqtError("Quantization table length does not match its contents".to_string()));
    }

    Ok(())
}

fn parse_huffman(data: &[u8], pos: &mut usize, header: &mut Header) -> Result<(), DecodeErrors>
{
    let seg_start = *pos;
    let length = read_u16_be(data, *pos)?;
    *pos += 2;
    let seg_end = seg_start + length as usize;

    while *pos < seg_end
    {
        let table_info = read_u8(data, *pos)?;
        *pos += 1;

        let id = table_info & 0x0F;
        if id > 3
        {
            return Err(DecodeErrors::HuffmanDecode(format!("Invalid Huffman table id {id}")));
        }
        let is_ac = (table_info >> 4) != 0;

        let mut offset = [0u16; 17];
        for length_index in 1..=16
        {
            let count = u16::from(read_u8(data, *pos)?);
            *pos += 1;
            offset[length_index] = offset[length_index - 1] + count;
        }

        let total_symbols = offset[16] as usize;
        if total_symbols > MAX_SYMBOLS
        {
            return Err(DecodeErrors::FormatStatic("Invalid Huffman length in image"));
        }

        let mut symbols = [0u8; MAX_SYMBOLS];
        for slot in symbols.iter_mut().take(total_symbols)
        {
            *slot = read_u8(data, *pos)?;
            *pos += 1;
        }

        let table = HuffmanTable::from_offsets_and_symbols(offset, symbols);
        if is_ac
        {
            header.ac_huffman_tables[id as usize] = table;
        }
        else
        {
            header.dc_huffman_tables[id as usize] = table;
        }
    }

    if *pos != seg_end
    {
        return Err(DecodeErrors::HuffmanDecode("Huffman table length does not match its contents".to_string()));
    }

    Ok(())
}

fn parse_dri(data: &[u8], pos: &mut usize, header: &mut Header, options: &DecoderOptions) -> Result<(), DecodeErrors>
{
    let length = read_u16_be(data, *pos)?;
    *pos += 2;
    if length != 4
    {
        if options.strict_mode()
        {
            return Err(DecodeErrors::Format(format!("Bad DRI length {length}, expected 4")));
        }
        warn!("DRI segment length {length} is not the expected 4, tolerating in lenient mode");
    }
    header.restart_interval = read_u16_be(data, *pos)?;
    *pos += 2;
    Ok(())
}

fn parse_sos(data: &[u8], pos: &mut usize, header: &mut Header) -> Result<(), DecodeErrors>
{
    if header.num_components == 0
    {
        return Err(DecodeErrors::SosError("Start of scan encountered before start of frame".to_string()));
    }

    let seg_start = *pos;
    let length = read_u16_be(data, *pos)?;
    *pos += 2;
    let seg_end = seg_start + length as usize;

    let num_scan_components = read_u8(data, *pos)?;
    *pos += 1;
    if num_scan_components == 0
    {
        return Err(DecodeErrors::SosError("Bad SOS length, corrupt jpeg".to_string()));
    }

    for component in header.components[..header.num_components as usize].iter_mut()
    {
        component.used = false;
    }

    for _ in 0..num_scan_components
    {
        let raw_id = read_u8(data, *pos)?;
        *pos += 1;
        let id = if header.zero_based { raw_id + 1 } else { raw_id };

        let component = header
            .component_by_id_mut(id)
            .ok_or_else(|| DecodeErrors::SosError(format!("Component id {id} not present in frame")))?;

        if component.used
        {
            return Err(DecodeErrors::SosError(format!("Component id {id} referenced twice in scan")));
        }
        component.used = true;

        let table_ids = read_u8(data, *pos)?;
        *pos += 1;
        let dc_id = table_ids >> 4;
        let ac_id = table_ids & 0x0F;

        if dc_id > 3
        {
            return Err(DecodeErrors::SosError(format!("Invalid DC Huffman table id {dc_id}")));
        }
        if ac_id > 3
        {
            return Err(DecodeErrors::SosError(format!("Invalid AC Huffman table id {ac_id}")));
        }

        component.dc_huffman_table_id = dc_id;
        component.ac_huffman_table_id = ac_id;
    }

    header.start_of_selection = read_u8(data, *pos)?;
    *pos += 1;
    header.end_of_selection = read_u8(data, *pos)?;
    *pos += 1;
    let approximation = read_u8(data, *pos)?;
    *pos += 1;
    header.successive_approximation_low = approximation & 0x0F;

    if *pos != seg_end
    {
        return Err(DecodeErrors::SosError(format!("Bad SOS length {length},corrupt jpeg")));
    }

    Ok(())
}

fn skip_segment(data: &[u8], pos: &mut usize) -> Result<(), DecodeErrors>
{
    let length = read_u16_be(data, *pos)?;
    if length < 2
    {
        return Err(DecodeErrors::Format(format!("Found a marker with invalid length : {}", length)));
    }
    *pos += length as usize;
    if *pos > data.len()
    {
        return Err(DecodeErrors::FormatStatic("Unexpected end of file"));
    }
    Ok(())
}

/// Entropy-payload extraction (spec §4.2): reads bytes after SOS until EOI,
/// removing byte-stuffing (`0xFF 0x00` -> `0xFF`) and dropping restart
/// markers, which the scanline decoder instead tracks via its own MCU
/// index.
fn extract_entropy_coded_data(data: &[u8], pos: &mut usize) -> Result<Vec<u8>, DecodeErrors>
{
    let mut payload = Vec::new();

    loop
    {
        let byte = read_u8(data, *pos)?;
        *pos += 1;

        if byte != 0xFF
        {
            payload.push(byte);
            continue;
        }

        let marker = read_u8(data, *pos)?;
        match marker
        {
            0x00 =>
            {
                payload.push(0xFF);
                *pos += 1;
            }
            0xD0..=0xD7 =>
            {
                *pos += 1;
            }
            0xFF =>
            {
                // fill byte run: leave it for the next loop iteration
            }
            0xD9 =>
            {
                *pos += 1;
                return Ok(payload);
            }
            other =>
            {
                return Err(DecodeErrors::Format(format!(
                    "Unexpected marker 0x{other:02X} inside entropy-coded data"
                )));
            }
        }
    }
}

fn validate_referenced_tables(header: &Header) -> Result<(), DecodeErrors>
{
    if header.num_components != 1 && header.num_components != 3
    {
        return Err(DecodeErrors::SofError(format!(
            "Expected 1 or 3 components, found {}",
            header.num_components
        )));
    }

    for component in &header.components[..header.num_components as usize]
    {
        if !header.quantization_tables[component.quantization_table_id as usize].is_set()
        {
            return Err(DecodeErrors::DqtError(format!(
                "Component {} references an unpopulated quantization table",
                component.id
            )));
        }
        if !header.dc_huffman_tables[component.dc_huffman_table_id as usize].is_set()
        {
            return Err(DecodeErrors::HuffmanDecode(format!(
                "Component {} references an unpopulated DC Huffman table",
                component.id
            )));
        }
        if !header.ac_huffman_tables[component.ac_huffman_table_id as usize].is_set()
        {
            return Err(DecodeErrors::HuffmanDecode(format!(
                "Component {} references an unpopulated AC Huffman table",
                component.id
            )));
        }
    }

    Ok(())
}

/// Walks the full marker stream and returns a populated [`Header`], or the
/// first error encountered. The caller ([`crate::decoder::JpegDecoder`])
/// turns a `Err` into the "invalid" state rather than propagating it
/// further, per spec's error policy (container-invalid conditions do not
/// abort the process, only this decoder's readiness to serve scanlines).
pub fn parse(data: &[u8], options: &DecoderOptions) -> Result<Header, DecodeErrors>
{
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8
    {
        return Err(DecodeErrors::FormatStatic("Image does not start with a SOI marker"));
    }

    let mut header = Header::default();
    let mut pos = 2usize;

    loop
    {
        let marker_byte = next_marker(data, &mut pos)?;

        match Marker::from_u8(marker_byte)
        {
            Marker::SOF0 => parse_sof(data, &mut pos, &mut header, options)?,
            Marker::SOFUnsupported(byte) =>
            {
                return Err(DecodeErrors::Unsupported(sof_unsupported_message(byte)));
            }
            Marker::DAC => return Err(DecodeErrors::Unsupported("Arithmetic coding is not supported")),
            Marker::DQT => parse_dqt(data, &mut pos, &mut header)?,
            Marker::DHT => parse_huffman(data, &mut pos, &mut header)?,
            Marker::DRI => parse_dri(data, &mut pos, &mut header, options)?,
            Marker::APP(_) | Marker::COM | Marker::JPG(_) | Marker::DNL | Marker::DHP | Marker::EXP =>
            {
                skip_segment(data, &mut pos)?;
            }
            Marker::SOS =>
            {
                if header.num_components == 0
                {
                    return Err(DecodeErrors::SosError("Start of scan before start of frame".to_string()));
                }
                parse_sos(data, &mut pos, &mut header)?;
                break;
            }
            Marker::RST(_) => return Err(DecodeErrors::Format("Restart marker found before start of scan".to_string())),
            Marker::EOI => return Err(DecodeErrors::Format("End of image found before start of scan".to_string())),
            Marker::SOI => return Err(DecodeErrors::Format("Embedded images are not supported".to_string())),
            Marker::TEM => {} // standalone, no payload
            Marker::Fill => {} // next_marker already absorbed any run of these
            Marker::Unknown(byte) =>
            {
                if options.strict_mode()
                {
                    return Err(DecodeErrors::Format(format!("Unknown marker 0x{byte:02X}")));
                }
                warn!("Unknown marker 0x{byte:02X} encountered, skipping its segment in lenient mode");
                skip_segment(data, &mut pos)?;
            }
        }
    }

    header.huffman_data = extract_entropy_coded_data(data, &mut pos)?;
    validate_referenced_tables(&header)?;

    Ok(header)
}

fn sof_unsupported_message(byte: u8) -> &'static str
{
    match byte
    {
        0xC2 => "Progressive DCT (SOF2) is not supported",
        0xC3 => "Lossless (sequential) frames are not supported",
        0xC5..=0xC7 => "Differential frames are not supported",
        0xC9..=0xCB => "Arithmetic-coded frames are not supported",
        0xCD..=0xCF => "Differential arithmetic-coded frames are not supported",
        _ => "Unsupported start-of-frame marker"
    }
}
