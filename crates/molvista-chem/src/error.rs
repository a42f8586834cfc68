use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    /// The SMILES string could not be parsed into a molecular graph.
    #[error("invalid SMILES: {0}")]
    Parse(String),

    /// The parsed structure contains no atoms.
    #[error("structure has no atoms")]
    Empty,

    /// Embedding, optimization, or serialization failed.
    #[error("model generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, StructureError>;
