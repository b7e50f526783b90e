//! Rendering options and configuration.

/// Options for serializing a grid.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Field delimiter
    pub delimiter: Delimiter,

    /// Record terminator
    pub line_ending: LineEnding,

    /// Pad every non-empty row with empty fields to the widest row
    pub pad_rows: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use tab-separated output.
    pub fn tsv(self) -> Self {
        self.with_delimiter(Delimiter::Tab)
    }

    /// Set the line ending.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Enable or disable row padding.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad_rows = pad;
        self
    }

    /// File extension matching the delimiter.
    pub fn extension(&self) -> &'static str {
        match self.delimiter {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
        }
    }

    /// MIME type matching the delimiter.
    pub fn mime_type(&self) -> &'static str {
        match self.delimiter {
            Delimiter::Comma => "text/csv",
            Delimiter::Tab => "text/tab-separated-values",
        }
    }
}

/// Field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Comma-separated values
    #[default]
    Comma,
    /// Tab-separated values
    Tab,
}

impl Delimiter {
    /// The delimiter character.
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Record terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, as RFC 4180 asks
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.delimiter.as_char(), ',');
        assert_eq!(options.line_ending.as_str(), "\r\n");
        assert!(!options.pad_rows);
        assert_eq!(options.extension(), "csv");
        assert_eq!(options.mime_type(), "text/csv");
    }

    #[test]
    fn test_tsv() {
        let options = RenderOptions::new().tsv().with_line_ending(LineEnding::Lf);
        assert_eq!(options.delimiter.as_char(), '\t');
        assert_eq!(options.extension(), "tsv");
        assert_eq!(options.line_ending, LineEnding::Lf);
    }
}
