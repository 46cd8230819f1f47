//! Decoder configuration, in the fluent builder style of `zune-jpeg`'s
//! `ZuneJpegOptions`: private fields, a `Default` impl, and `#[must_use]`
//! setters that consume and return `Self`.

/// Tunables for [`crate::JpegDecoder`].
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    strict_mode: bool,
    max_width: u16,
    max_height: u16
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        DecoderOptions { strict_mode: false, max_width: u16::MAX, max_height: u16::MAX }
    }
}

impl DecoderOptions
{
    /// Starts from the default configuration.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// When `true`, conditions that the lenient path would merely flag and
    /// continue past (an unrecognized marker segment, a restart-interval
    /// segment whose declared length isn't the expected 4 bytes) are
    /// instead treated as hard parse failures.
    #[must_use]
    pub fn set_strict_mode(mut self, strict: bool) -> Self
    {
        self.strict_mode = strict;
        self
    }

    /// Whether strict mode is enabled.
    #[must_use]
    pub const fn strict_mode(&self) -> bool
    {
        self.strict_mode
    }

    /// Caps the width this decoder will accept, checked against the SOF
    /// header before any buffer is sized from it.
    #[must_use]
    pub fn set_max_width(mut self, max_width: u16) -> Self
    {
        self.max_width = max_width;
        self
    }

    /// The configured width cap.
    #[must_use]
    pub const fn max_width(&self) -> u16
    {
        self.max_width
    }

    /// Caps the height this decoder will accept, checked against the SOF
    /// header before any buffer is sized from it.
    #[must_use]
    pub fn set_max_height(mut self, max_height: u16) -> Self
    {
        self.max_height = max_height;
        self
    }

    /// The configured height cap.
    #[must_use]
    pub const fn max_height(&self) -> u16
    {
        self.max_height
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_is_lenient_and_unbounded()
    {
        let options = DecoderOptions::default();
        assert!(!options.strict_mode());
        assert_eq!(options.max_width(), u16::MAX);
        assert_eq!(options.max_height(), u16::MAX);
    }

    #[test]
    fn setters_are_fluent()
    {
        let options = DecoderOptions::new().set_strict_mode(true).set_max_width(1024).set_max_height(768);
        assert!(options.strict_mode());
        assert_eq!(options.max_width(), 1024);
        assert_eq!(options.max_height(), 768);
    }
}
