use thiserror::Error;

use crate::prelude_internal::*;

/// Failures while folding statements into a document.
///
/// These only surface for documents whose structure was changed behind the
/// constructor's back; well-formed input never produces them.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    #[error("scope `{key}` not found at {path}")]
    ScopeNotFound { key: String, path: DocPath },
    #[error("freeform item at {path} has type `{found}`, expected `{expected}`")]
    FreeformTagMismatch {
        expected: String,
        found: String,
        path: DocPath,
    },
    #[error("expected a list at {path}, found {found}")]
    ExpectedList { path: DocPath, found: ValueKind },
    #[error("list at {path} has no elements")]
    EmptyList { path: DocPath },
    #[error("expected a mapping at {path}, found {found}")]
    ExpectedMapping { path: DocPath, found: ValueKind },
    #[error("last assignment at {path} no longer exists")]
    DanglingAssignment { path: DocPath },
}
