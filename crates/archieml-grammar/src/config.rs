/// Configuration for the recognizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Maximum number of characters on a single line, excluding the line
    /// terminator. `None` means unlimited.
    pub max_line_len: Option<usize>,
}

impl RecognizerConfig {
    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            max_line_len: Some(max_line_len),
        }
    }
}
