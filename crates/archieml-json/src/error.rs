use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("freeform tag `{tag}` conflicts with a field of the item value")]
    FreeformTagConflict { tag: String },

    #[error("freeform tag and content use the same field `{field}`")]
    FreeformAdjacentConflict { field: String },

    #[error("failed to render JSON: {0}")]
    Render(String),
}
