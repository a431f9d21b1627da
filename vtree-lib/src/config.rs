//! Engine configuration

/// Pixel geometry used to translate between screen space and rows.
///
/// # Example
///
/// ```
/// use vtree_lib::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_row_height(24)
///     .with_indent_width(16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Height of every row in pixels.
    ///
    /// Default: 32
    pub row_height: u32,

    /// Horizontal indentation per nesting level in pixels.
    ///
    /// Default: 20
    pub indent_width: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_height: 32,
            indent_width: 20,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row height. Zero is clamped to one pixel.
    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height.max(1);
        self
    }

    /// Sets the indentation per level.
    pub fn with_indent_width(mut self, indent_width: u32) -> Self {
        self.indent_width = indent_width;
        self
    }
}
