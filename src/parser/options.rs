//! Parsing and extraction options.

/// Options controlling table discovery, row merging, title resolution and
/// cell text cleaning.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for malformed row pairs
    pub error_mode: ErrorMode,

    /// Class a `<table>` must carry to be extracted
    pub table_class: String,

    /// Class marking a primary record row
    pub primary_row_class: String,

    /// Class marking an expansion row attached to the preceding primary row
    pub expansion_row_class: String,

    /// Heading levels that can title a table
    pub heading_levels: Vec<u8>,

    /// Class of a wrapper element around a heading (e.g. `<div class="mw-heading">`)
    pub heading_wrapper_class: Option<String>,

    /// Classes of decorative elements stripped from headings (edit links)
    pub decorative_classes: Vec<String>,

    /// Classes of elements whose text never reaches a cell value
    pub ignored_classes: Vec<String>,

    /// How far the title search may walk
    pub title_scope: TitleScope,

    /// Fold expansion rows into their primary rows during extraction too
    pub merge_on_extract: bool,

    /// Normalize extracted text to Unicode NFC
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed row pairs).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the table marker class.
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Set the primary and expansion row marker classes.
    pub fn with_row_classes(
        mut self,
        primary: impl Into<String>,
        expansion: impl Into<String>,
    ) -> Self {
        self.primary_row_class = primary.into();
        self.expansion_row_class = expansion.into();
        self
    }

    /// Set the heading levels that can title a table.
    pub fn with_heading_levels(mut self, levels: impl IntoIterator<Item = u8>) -> Self {
        self.heading_levels = levels.into_iter().map(|l| l.clamp(1, 6)).collect();
        self
    }

    /// Set or clear the heading wrapper class.
    pub fn with_heading_wrapper(mut self, class: Option<String>) -> Self {
        self.heading_wrapper_class = class;
        self
    }

    /// Add a decorative class stripped from headings.
    pub fn with_decorative_class(mut self, class: impl Into<String>) -> Self {
        self.decorative_classes.push(class.into());
        self
    }

    /// Add a class whose elements are dropped from cell text.
    pub fn with_ignored_class(mut self, class: impl Into<String>) -> Self {
        self.ignored_classes.push(class.into());
        self
    }

    /// Set the title search scope.
    pub fn with_title_scope(mut self, scope: TitleScope) -> Self {
        self.title_scope = scope;
        self
    }

    /// Only look at the table's own preceding siblings for a title.
    pub fn siblings_only(mut self) -> Self {
        self.title_scope = TitleScope::Siblings;
        self
    }

    /// Enable or disable row merging during extraction.
    pub fn with_merge_on_extract(mut self, merge: bool) -> Self {
        self.merge_on_extract = merge;
        self
    }

    /// Enable or disable Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    pub(crate) fn is_heading_name(&self, name: &str) -> bool {
        let bytes = name.as_bytes();
        bytes.len() == 2
            && bytes[0].eq_ignore_ascii_case(&b'h')
            && self
                .heading_levels
                .iter()
                .any(|&level| level <= 9 && bytes[1] == b'0' + level)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            table_class: "wikitable".to_string(),
            primary_row_class: "vevent".to_string(),
            expansion_row_class: "expand-child".to_string(),
            heading_levels: vec![2, 3],
            heading_wrapper_class: Some("mw-heading".to_string()),
            decorative_classes: vec!["mw-editsection".to_string()],
            ignored_classes: vec!["sortkey".to_string()],
            title_scope: TitleScope::SiblingsThenAncestors,
            merge_on_extract: false,
            normalize_unicode: true,
        }
    }
}

/// Error handling mode for structural problems in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Report the problem as an error for that table
    #[default]
    Strict,
    /// Skip the malformed row pair and continue
    Lenient,
}

/// Where the title search may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleScope {
    /// Preceding siblings of the table only
    Siblings,
    /// Preceding siblings, then the preceding siblings of each ancestor
    #[default]
    SiblingsThenAncestors,
}
