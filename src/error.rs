//! Error kinds surfaced by the crate. Each is distinguishable by callers so
//! that, for example, the CLI can fall back from a cache load to FASTA
//! parsing without losing the original failure's meaning.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("an alignment must contain at least one sequence")]
    EmptyAlignment,

    #[error("sequence '{name}' has length {actual}, expected {expected} (alignment columns must be of consistent length)")]
    InconsistentLengths {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("cached weights count ({weights}) does not match sequence count ({sequences})")]
    WeightCountMismatch { weights: usize, sequences: usize },

    #[error("cached positions count ({positions}) does not match column count ({columns})")]
    PositionCountMismatch { positions: usize, columns: usize },

    #[error("alignment missing sequence for '{name}'")]
    MissingSequence { name: String },

    #[error("sequence without a preceding name in alignment input")]
    SequenceWithoutName,

    #[error("input could not be read: {0}")]
    NotReadable(#[from] std::io::Error),

    #[error("invalid cache format: {0}")]
    InvalidCacheFormat(String),

    #[error("cache file version '{found}' does not match the current version '{expected}'")]
    MismatchedCacheVersion { found: String, expected: String },

    #[error("cannot merge alignments with different alphabets ({query} vs {reference})")]
    AlphabetMismatch {
        query: crate::alphabet::Alphabet,
        reference: crate::alphabet::Alphabet,
    },

    #[error("reference alignment has no sequence named '{0}'")]
    UnknownReferenceName(String),

    #[error("unknown alphabet string: '{0}'")]
    UnknownAlphabet(String),

    #[error("unhandled alphabet variant reached in a branch that assumed exhaustive coverage: {0:?}")]
    UnhandledAlphabet(crate::alphabet::Alphabet),
}
