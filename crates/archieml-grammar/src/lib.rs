//! Line recognizer for ArchieML.
//!
//! Splits a complete text into an ordered sequence of [`Statement`]s. Every
//! line becomes exactly one statement; a line that does not match one of the
//! structural patterns is a [`StatementKind::Comment`] rather than an error.

mod config;
mod error;
mod recognizer;

/// Statement model produced by the recognizer.
pub mod statement;

pub use config::RecognizerConfig;
pub use error::GrammarError;
pub use recognizer::{decode, normalize_newlines, recognize, recognize_with_config};
pub use statement::{Command, Statement, StatementKind};

/// Result type for recognizer operations
pub type Result<T> = std::result::Result<T, GrammarError>;
