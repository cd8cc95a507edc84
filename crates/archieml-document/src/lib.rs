/// Value model of a parsed ArchieML document.
pub mod value;

/// Insertion-ordered mapping and list containers.
pub mod map;

/// Paths addressing values from the document root.
pub mod path;

/// Stack-aware constructor used to fold statements into a document.
pub mod constructor;

mod error;
mod squash;

pub use constructor::{Context, DocumentConstructor};
pub use error::BuildError;
pub use map::{List, Map};
pub use path::{DocPath, PathSegment};
pub use squash::squash_prefix;
pub use value::{FreeformItem, Value, ValueKind};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::error::BuildError;
    pub use crate::map::{List, Map};
    pub use crate::path::{DocPath, PathSegment};
    pub use crate::value::{FreeformItem, Value, ValueKind};
    pub use thisisplural::Plural;
}
