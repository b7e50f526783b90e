//! HTML parsing module.

pub mod dom;
mod html_parser;
mod options;

pub use dom::{find_tables, HtmlTable};
pub use html_parser::HtmlParser;
pub use options::{ErrorMode, ParseOptions, TitleScope};
