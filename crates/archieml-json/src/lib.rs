//! Conversion of parsed ArchieML documents to [`serde_json::Value`].

mod config;
mod convert;
mod error;

pub use config::{Config, FreeformRepr};
pub use convert::{value_to_json, value_to_json_with_config};
pub use error::Error;

use archieml_document::Value;

pub type Result<T> = std::result::Result<T, Error>;

/// Render a document as JSON text using the default [`Config`].
pub fn document_to_json_string(value: &Value, pretty: bool) -> Result<String> {
    let json = value_to_json(value)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    rendered.map_err(|e| Error::Render(e.to_string()))
}
