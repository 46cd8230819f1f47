//! JPEG marker byte constants and the `Marker` enum used by the segment
//! parser to dispatch on the byte following a `0xFF` in the container.

/// A parsed JPEG marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Marker
{
    /// Start of image, `0xFFD8`.
    SOI,
    /// End of image, `0xFFD9`.
    EOI,
    /// Start of scan, `0xFFDA`.
    SOS,
    /// Baseline DCT start of frame, `0xFFC0`.
    SOF0,
    /// Any other start-of-frame marker (`SOF1..SOF15`, excluding `SOF0`);
    /// carries the raw marker byte for diagnostics. Every one of these
    /// describes a frame type this decoder does not support (progressive,
    /// extended sequential, lossless, arithmetic-coded, ...).
    SOFUnsupported(u8),
    /// Define Huffman table(s), `0xFFC4`.
    DHT,
    /// Define arithmetic-coding conditioning table(s), `0xFFCC`. Always
    /// rejected: arithmetic coding is out of scope.
    DAC,
    /// Define quantization table(s), `0xFFDB`.
    DQT,
    /// Define restart interval, `0xFFDD`.
    DRI,
    /// Restart marker `RST0..RST7`, `0xFFD0..0xFFD7`. Carries its low 3 bits.
    RST(u8),
    /// Application-specific segment `APP0..APP15`, `0xFFE0..0xFFEF`.
    APP(u8),
    /// Comment segment, `0xFFFE`.
    COM,
    /// Reserved JPG extension markers `JPG0..JPG13`, `0xFFF0..0xFFFD`.
    JPG(u8),
    /// Define number of lines, `0xFFDC`.
    DNL,
    /// Define hierarchical progression, `0xFFDE`.
    DHP,
    /// Expand reference component(s), `0xFFDF`.
    EXP,
    /// Temporary marker, `0xFF01`. Has no length field.
    TEM,
    /// A fill byte (`0xFF`) that is not followed by a recognized marker
    /// code; the parser keeps scanning for the next real marker.
    Fill,
    /// A marker byte this parser does not recognize at all.
    Unknown(u8)
}

impl Marker
{
    /// Classifies a marker byte (the byte that follows `0xFF`).
    #[must_use]
    pub fn from_u8(byte: u8) -> Marker
    {
        match byte
        {
            0xD8 => Marker::SOI,
            0xD9 => Marker::EOI,
            0xDA => Marker::SOS,
            0xC0 => Marker::SOF0,
            0xC1..=0xCF if byte != 0xC4 && byte != 0xC8 && byte != 0xCC => {
                Marker::SOFUnsupported(byte)
            }
            0xC4 => Marker::DHT,
            0xCC => Marker::DAC,
            0xDB => Marker::DQT,
            0xDD => Marker::DRI,
            0xD0..=0xD7 => Marker::RST(byte & 0x07),
            0xE0..=0xEF => Marker::APP(byte - 0xE0),
            0xFE => Marker::COM,
            0xF0..=0xFD => Marker::JPG(byte - 0xF0),
            0xDC => Marker::DNL,
            0xDE => Marker::DHP,
            0xDF => Marker::EXP,
            0x01 => Marker::TEM,
            0xFF => Marker::Fill,
            _ => Marker::Unknown(byte)
        }
    }

    /// True for any start-of-frame marker this decoder can actually decode.
    #[must_use]
    pub const fn is_baseline(&self) -> bool
    {
        matches!(self, Marker::SOF0)
    }
}
