use archieml_document::BuildError;
use archieml_grammar::GrammarError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// The document builder broke one of its own invariants.
    #[error("internal document construction fault: {0}")]
    Build(#[from] BuildError),
}
