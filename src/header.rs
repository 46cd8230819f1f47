//! The `Header` data model (spec §3): tables, frame/scan metadata, and the
//! extracted entropy payload. Produced once by [`crate::headers`] at open
//! time and owned by the decoder for its whole lifetime.

use crate::components::ColorComponent;
use crate::huffman::HuffmanTable;
use crate::quant::QuantizationTable;

/// Parsed container metadata plus the buffered entropy-coded payload.
#[derive(Debug, Default)]
pub struct Header
{
    pub quantization_tables: [QuantizationTable; 4],
    pub dc_huffman_tables: [HuffmanTable; 4],
    pub ac_huffman_tables: [HuffmanTable; 4],

    pub width: u16,
    pub height: u16,
    pub num_components: u8,
    /// Set once the first SOF component ID is observed to be `0`; every
    /// subsequent component (and every SOS reference) is offset by one.
    pub zero_based: bool,

    pub start_of_selection: u8,
    pub end_of_selection: u8,
    pub successive_approximation_low: u8,

    pub restart_interval: u16,

    pub components: [ColorComponent; 3],

    /// Entropy-coded payload with byte-stuffing and restart markers already
    /// removed (spec §4.2's extraction algorithm). `BitReader` holds a
    /// non-owning view into this buffer.
    pub huffman_data: Vec<u8>
}

impl Header
{
    /// Looks up a color component by its on-file ID (already zero-based
    /// corrected) for mutation, or `None` if no SOF component has that ID.
    #[must_use]
    pub fn component_by_id_mut(&mut self, id: u8) -> Option<&mut ColorComponent>
    {
        self.components[..self.num_components as usize]
            .iter_mut()
            .find(|c| c.id == id)
    }
}
