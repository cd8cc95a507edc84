//! Parser for [ArchieML](https://archieml.org), a markup language for
//! structured data written as plain prose.
//!
//! ```
//! let doc = archieml::parse("title: A Headline\n[crew]\n* Jane\n* Bob\n[]\n").unwrap();
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("A Headline"));
//! ```

pub mod document;
pub mod error;

pub use archieml_document::{DocPath, FreeformItem, List, Map, PathSegment, Value};
pub use archieml_grammar as grammar;
pub use archieml_json as json;
pub use document::{ParseOptions, parse, parse_bytes, parse_with_options};
pub use error::Error;
