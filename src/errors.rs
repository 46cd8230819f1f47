//! Error types returned by the header parser.
//!
//! The entropy-decoding hot path (see [`crate::mcu`] and
//! [`crate::scanline`]) never returns a `Result`: a malformed MCU marks the
//! decoder invalid and the caller finds out via [`crate::JpegDecoder::is_valid`]
//! or a `false` return from [`crate::JpegDecoder::get_scan_line`]. `DecodeErrors`
//! exists for the one-shot, run-once header parse in [`crate::headers`], where
//! a `Result` is the natural shape and a panic would be inexcusable.

use core::fmt::{Debug, Display, Formatter};

/// Errors that can occur when parsing a JPEG container.
pub enum DecodeErrors
{
    /// A generic container error with dynamic detail.
    Format(String),
    /// A generic container error with a static message, avoiding an
    /// allocation for the common cases.
    FormatStatic(&'static str),
    /// Start-of-frame (SOF) segment is malformed or describes an
    /// unsupported frame.
    SofError(String),
    /// Start-of-scan (SOS) segment is malformed.
    SosError(String),
    /// Quantization table (DQT) segment is malformed.
    DqtError(String),
    /// Huffman table (DHT) segment is malformed, or a symbol could not be
    /// decoded from the entropy stream.
    HuffmanDecode(String),
    /// The file describes a feature this decoder intentionally does not
    /// implement (progressive/arithmetic/hierarchical JPEG, subsampling,
    /// CMYK/YIQ, ...).
    Unsupported(&'static str),
    /// Could not read the backing file.
    Io(std::io::Error)
}

impl Debug for DecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            Self::Format(ref val) => writeln!(f, "{val}"),
            Self::FormatStatic(val) => writeln!(f, "{val}"),
            Self::SofError(ref val) => writeln!(f, "Error parsing SOF header: {val}"),
            Self::SosError(ref val) => writeln!(f, "Error parsing SOS header: {val}"),
            Self::DqtError(ref val) => writeln!(f, "Error parsing DQT header: {val}"),
            Self::HuffmanDecode(ref val) => writeln!(f, "Error decoding huffman data: {val}"),
            Self::Unsupported(val) => writeln!(f, "Unsupported feature: {val}"),
            Self::Io(ref val) => writeln!(f, "I/O error: {val}")
        }
    }
}

impl Display for DecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for DecodeErrors {}
