//! Rendering module for serializing tables and listings.

mod csv;
mod json;
mod options;
mod result;

pub use csv::{to_csv, write_csv};
pub use json::{to_json, JsonFormat};
pub use options::{Delimiter, LineEnding, RenderOptions};
pub use result::{filename_hint, filename_with_extension, RenderResult};
