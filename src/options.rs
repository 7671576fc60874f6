/// How bytes that carry no information (padding) are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    /// Padding is skipped without being inspected.
    #[default]
    Lenient,
    /// Padding must be present and zero, integers must be canonically extended.
    Strict,
}

/// Knobs that change how permissive decoding is.
///
/// Booleans are checked strictly regardless of [`Padding`]: only a word holding
/// exactly `0` or `1` is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub padding: Padding,
}

impl DecodeOptions {
    pub const fn new() -> Self {
        Self {
            padding: Padding::Lenient,
        }
    }

    pub const fn strict() -> Self {
        Self {
            padding: Padding::Strict,
        }
    }

    pub const fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub const fn is_strict(&self) -> bool {
        matches!(self.padding, Padding::Strict)
    }
}
