//! Configuration for prompt rendering

/// Token substituted for references without a usable value
pub const DEFAULT_SENTINEL: &str = "<please_select>";

/// Configuration options for prompt output
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Text emitted for a missing or blank value
    pub sentinel: String,

    /// Whether runs of blank lines shrink to a single blank line
    pub collapse_blank_lines: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            collapse_blank_lines: true,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentinel token
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Set whether blank-line runs are collapsed
    pub fn with_collapse_blank_lines(mut self, collapse: bool) -> Self {
        self.collapse_blank_lines = collapse;
        self
    }
}
