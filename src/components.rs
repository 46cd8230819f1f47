//! Per-component descriptors parsed out of the SOF and SOS segments.

/// One color component (Y, Cb, or Cr) as described by the frame header.
#[derive(Debug, Copy, Clone, Default)]
pub struct ColorComponent
{
    /// Component ID as it appears in the file (after `zero_based`
    /// correction, if any).
    pub id: u8,
    /// Horizontal sampling factor. This decoder only supports `1`
    /// (subsampling is out of scope); anything else is rejected while
    /// parsing SOF0.
    pub horizontal_sampling_factor: u8,
    /// Vertical sampling factor; see `horizontal_sampling_factor`.
    pub vertical_sampling_factor: u8,
    /// Index (0-3) into `Header::quantization_tables`.
    pub quantization_table_id: u8,
    /// Index (0-3) into `Header::dc_huffman_tables`, set while parsing SOS.
    pub dc_huffman_table_id: u8,
    /// Index (0-3) into `Header::ac_huffman_tables`, set while parsing SOS.
    pub ac_huffman_table_id: u8,
    /// Whether SOS has referenced this component. Guards against a
    /// duplicate component ID inside one scan.
    pub used: bool
}

impl ColorComponent
{
    /// A component with sampling factors defaulted to `1` (the only value
    /// this decoder accepts), everything else zeroed.
    #[must_use]
    pub fn new(id: u8) -> Self
    {
        ColorComponent {
            id,
            horizontal_sampling_factor: 1,
            vertical_sampling_factor: 1,
            quantization_table_id: 0,
            dc_huffman_table_id: 0,
            ac_huffman_table_id: 0,
            used: false
        }
    }
}
